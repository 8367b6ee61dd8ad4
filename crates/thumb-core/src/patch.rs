//! Typed partial updates.
//!
//! Each nested region of the document has its own patch type, and every
//! patch only overwrites the fields it carries. Nested patches merge into
//! the current value instead of replacing it, so `{fontShadow: {blur: 9}}`
//! keeps the shadow's color and offsets.
//!
//! Patches deserialize from the same camelCase JSON shape as the model,
//! with every field optional.

use crate::model::*;
use serde::{Deserialize, Deserializer, Serialize};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) when deserializing.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

// ─── Nested regions ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadowPatch {
    pub enabled: Option<bool>,
    pub color: Option<String>,
    pub blur: Option<f32>,
    pub offset_x: Option<f32>,
    pub offset_y: Option<f32>,
}

impl ShadowPatch {
    pub fn apply(&self, shadow: &mut Shadow) {
        set(&mut shadow.enabled, &self.enabled);
        set(&mut shadow.color, &self.color);
        set(&mut shadow.blur, &self.blur);
        set(&mut shadow.offset_x, &self.offset_x);
        set(&mut shadow.offset_y, &self.offset_y);
    }

    /// A patch that overwrites every field with `shadow`.
    pub fn replace(shadow: &Shadow) -> Self {
        Self {
            enabled: Some(shadow.enabled),
            color: Some(shadow.color.clone()),
            blur: Some(shadow.blur),
            offset_x: Some(shadow.offset_x),
            offset_y: Some(shadow.offset_y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradientPatch {
    pub enabled: Option<bool>,
    #[serde(rename = "type")]
    pub kind: Option<GradientKind>,
    pub colors: Option<[String; 2]>,
    pub angle: Option<f32>,
}

impl GradientPatch {
    pub fn apply(&self, gradient: &mut Gradient) {
        set(&mut gradient.enabled, &self.enabled);
        set(&mut gradient.kind, &self.kind);
        set(&mut gradient.colors, &self.colors);
        set(&mut gradient.angle, &self.angle);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextGradientPatch {
    pub enabled: Option<bool>,
    pub colors: Option<[String; 2]>,
    pub angle: Option<f32>,
    pub direction: Option<GradientDirection>,
}

impl TextGradientPatch {
    /// Merge into `gradient`. A direction without an explicit angle also
    /// sets the angle it names.
    pub fn apply(&self, gradient: &mut TextGradient) {
        set(&mut gradient.enabled, &self.enabled);
        set(&mut gradient.colors, &self.colors);
        if let Some(direction) = self.direction {
            gradient.direction = Some(direction);
            if self.angle.is_none() {
                gradient.angle = direction.angle();
            }
        }
        set(&mut gradient.angle, &self.angle);
    }

    /// Merge into an optional gradient, starting from the default when the
    /// slot is empty.
    pub fn apply_to_slot(&self, slot: &mut Option<TextGradient>) {
        self.apply(slot.get_or_insert_with(TextGradient::default));
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleStylePatch {
    pub font_family: Option<String>,
    pub font_color: Option<String>,
    pub font_weight: Option<u16>,
    pub text_gradient: Option<TextGradientPatch>,
}

impl RoleStylePatch {
    pub fn apply(&self, role: &mut RoleStyle) {
        if let Some(family) = &self.font_family {
            role.font_family = Some(family.clone());
        }
        if let Some(color) = &self.font_color {
            role.font_color = Some(color.clone());
        }
        if let Some(weight) = self.font_weight {
            role.font_weight = Some(weight);
        }
        if let Some(gradient) = &self.text_gradient {
            gradient.apply_to_slot(&mut role.text_gradient);
        }
    }
}

// ─── Style / Text ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePatch {
    pub background_color: Option<String>,
    pub background_gradient: Option<GradientPatch>,
    pub font_family: Option<String>,
    pub font_color: Option<String>,
    pub font_outline_color: Option<String>,
    pub font_outline_width: Option<f32>,
    pub font_shadow: Option<ShadowPatch>,
    pub text_gradient: Option<TextGradientPatch>,
    pub font_weight: Option<u16>,
    pub font_size: Option<f32>,
    pub headline_style: Option<RoleStylePatch>,
    pub subtitle_style: Option<RoleStylePatch>,
    #[serde(rename = "badgeStyle")]
    pub badge: Option<BadgeKind>,
    /// Wholesale replacement of the asset list.
    pub assets: Option<Vec<Asset>>,
}

impl StylePatch {
    pub fn apply(&self, style: &mut Style) {
        set(&mut style.background_color, &self.background_color);
        if let Some(patch) = &self.background_gradient {
            patch.apply(&mut style.background_gradient);
        }
        set(&mut style.font_family, &self.font_family);
        set(&mut style.font_color, &self.font_color);
        set(&mut style.font_outline_color, &self.font_outline_color);
        if let Some(width) = self.font_outline_width {
            style.font_outline_width = width.max(0.0);
        }
        if let Some(patch) = &self.font_shadow {
            patch.apply(&mut style.font_shadow);
        }
        if let Some(patch) = &self.text_gradient {
            patch.apply(&mut style.text_gradient);
        }
        if let Some(weight) = self.font_weight {
            style.font_weight = Some(weight);
        }
        if let Some(size) = self.font_size {
            style.font_size = Some(size);
        }
        if let Some(patch) = &self.headline_style {
            patch.apply(&mut style.headline_style);
        }
        if let Some(patch) = &self.subtitle_style {
            patch.apply(&mut style.subtitle_style);
        }
        set(&mut style.badge, &self.badge);
        set(&mut style.assets, &self.assets);
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextPatch {
    pub headline: Option<String>,
    pub subtitle: Option<String>,
    pub headline_size: Option<f32>,
    pub subtitle_size: Option<f32>,
    pub headline_alignment: Option<Alignment>,
    pub subtitle_alignment: Option<Alignment>,
    pub headline_position: Option<VerticalBucket>,
    pub subtitle_position: Option<VerticalBucket>,
    /// `Some(None)` clears the custom position.
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub headline_custom_position: Option<Option<Position>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub subtitle_custom_position: Option<Option<Position>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub headline_width: Option<Option<f32>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub subtitle_width: Option<Option<f32>>,
    pub text_case: Option<TextCase>,
    pub text_bold: Option<bool>,
    pub text_italic: Option<bool>,
    pub text_highlight: Option<bool>,
    pub text_highlight_color: Option<String>,
    pub text_outline: Option<bool>,
}

impl TextPatch {
    pub fn apply(&self, text: &mut TextSettings) {
        set(&mut text.headline, &self.headline);
        set(&mut text.subtitle, &self.subtitle);
        set(&mut text.headline_size, &self.headline_size);
        set(&mut text.subtitle_size, &self.subtitle_size);
        set(&mut text.headline_alignment, &self.headline_alignment);
        set(&mut text.subtitle_alignment, &self.subtitle_alignment);
        set(&mut text.headline_position, &self.headline_position);
        set(&mut text.subtitle_position, &self.subtitle_position);
        set(&mut text.headline_custom_position, &self.headline_custom_position);
        set(&mut text.subtitle_custom_position, &self.subtitle_custom_position);
        set(&mut text.headline_width, &self.headline_width);
        set(&mut text.subtitle_width, &self.subtitle_width);
        set(&mut text.text_case, &self.text_case);
        set(&mut text.text_bold, &self.text_bold);
        set(&mut text.text_italic, &self.text_italic);
        set(&mut text.text_highlight, &self.text_highlight);
        set(&mut text.text_highlight_color, &self.text_highlight_color);
        set(&mut text.text_outline, &self.text_outline);
    }
}

// ─── Assets ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetPatch {
    pub src: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<AssetCategory>,
    #[serde(rename = "position")]
    pub placement: Option<Placement>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub rotation: Option<f32>,
    pub opacity: Option<f32>,
    pub z_index: Option<i32>,
    pub is_background: Option<bool>,
}

impl AssetPatch {
    pub fn moved_to(pos: Position) -> Self {
        Self {
            x: Some(pos.x),
            y: Some(pos.y),
            ..Self::default()
        }
    }

    /// Merge into `asset`, re-applying the size floor afterwards.
    pub fn apply(&self, asset: &mut Asset) {
        set(&mut asset.src, &self.src);
        set(&mut asset.category, &self.category);
        set(&mut asset.placement, &self.placement);
        set(&mut asset.transform.x, &self.x);
        set(&mut asset.transform.y, &self.y);
        set(&mut asset.transform.width, &self.width);
        set(&mut asset.transform.height, &self.height);
        set(&mut asset.transform.rotation, &self.rotation);
        set(&mut asset.transform.opacity, &self.opacity);
        set(&mut asset.z_index, &self.z_index);
        set(&mut asset.is_background, &self.is_background);
        asset.transform.clamp();
    }
}
