//! Style presets from the template picker.
//!
//! A preset describes a look with CSS-like gradient directions and
//! optional per-role overrides. [`StylePreset::to_patch`] lowers it to a
//! [`StylePatch`], filling in the role fallbacks, so applying a preset
//! goes through the same merge path as any other style edit and never
//! touches text placement.

use crate::model::{BadgeKind, GradientDirection, GradientKind, Shadow};
use crate::patch::{GradientPatch, RoleStylePatch, ShadowPatch, StylePatch, TextGradientPatch};
use serde::{Deserialize, Serialize};

const DEFAULT_HEADLINE_WEIGHT: u16 = 700;
const DEFAULT_SUBTITLE_WEIGHT: u16 = 400;
/// Subtitles of heavy presets are drawn this much lighter than the base.
const SUBTITLE_WEIGHT_DROP: u16 = 200;
const HEAVY_WEIGHT: u16 = 500;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresetGradient {
    pub enabled: bool,
    pub colors: [String; 2],
    pub direction: Option<GradientDirection>,
}

impl PresetGradient {
    fn angle(&self) -> f32 {
        self.direction.map_or(0.0, GradientDirection::angle)
    }

    fn to_text_patch(&self, angle: f32) -> TextGradientPatch {
        TextGradientPatch {
            enabled: Some(self.enabled),
            colors: Some(self.colors.clone()),
            angle: Some(angle),
            direction: self.direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresetRole {
    pub font_family: Option<String>,
    pub font_color: Option<String>,
    pub font_weight: Option<u16>,
    pub text_gradient: Option<PresetGradient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePreset {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub background_color: String,
    #[serde(default)]
    pub background_gradient: PresetGradient,
    pub font_family: String,
    pub font_color: String,
    #[serde(default)]
    pub font_weight: Option<u16>,
    #[serde(default)]
    pub font_size: Option<f32>,
    #[serde(default = "Shadow::none")]
    pub font_shadow: Shadow,
    #[serde(default)]
    pub font_outline_width: f32,
    #[serde(default = "default_outline_color")]
    pub font_outline_color: String,
    #[serde(default)]
    pub text_gradient: Option<PresetGradient>,
    #[serde(default)]
    pub headline_style: Option<PresetRole>,
    #[serde(default)]
    pub subtitle_style: Option<PresetRole>,
    #[serde(default)]
    pub badge_style: BadgeKind,
}

fn default_outline_color() -> String {
    "#000000".into()
}

impl StylePreset {
    fn headline_weight(&self, role: Option<&PresetRole>) -> u16 {
        role.and_then(|r| r.font_weight)
            .or(self.font_weight)
            .unwrap_or(DEFAULT_HEADLINE_WEIGHT)
    }

    fn subtitle_weight(&self, role: Option<&PresetRole>) -> u16 {
        if let Some(weight) = role.and_then(|r| r.font_weight) {
            return weight;
        }
        match self.font_weight {
            Some(w) if w > HEAVY_WEIGHT => w - SUBTITLE_WEIGHT_DROP,
            Some(w) => w,
            None => DEFAULT_SUBTITLE_WEIGHT,
        }
    }

    /// Role gradients inherit the base text gradient's angle, as the
    /// picker has always rendered them.
    fn role_patch(&self, role: Option<&PresetRole>, weight: u16) -> RoleStylePatch {
        let text_angle = self.text_gradient.as_ref().map_or(0.0, PresetGradient::angle);
        let gradient = role
            .and_then(|r| r.text_gradient.as_ref())
            .or(self.text_gradient.as_ref());
        RoleStylePatch {
            font_family: Some(
                role.and_then(|r| r.font_family.clone())
                    .unwrap_or_else(|| self.font_family.clone()),
            ),
            font_color: Some(
                role.and_then(|r| r.font_color.clone())
                    .unwrap_or_else(|| self.font_color.clone()),
            ),
            font_weight: Some(weight),
            text_gradient: gradient.map(|g| g.to_text_patch(text_angle)),
        }
    }

    pub fn to_patch(&self) -> StylePatch {
        let headline = self.headline_style.as_ref();
        let subtitle = self.subtitle_style.as_ref();
        StylePatch {
            background_color: Some(self.background_color.clone()),
            background_gradient: Some(GradientPatch {
                enabled: Some(self.background_gradient.enabled),
                kind: Some(GradientKind::Linear),
                colors: Some(self.background_gradient.colors.clone()),
                angle: Some(self.background_gradient.angle()),
            }),
            font_family: Some(self.font_family.clone()),
            font_color: Some(self.font_color.clone()),
            font_outline_color: Some(self.font_outline_color.clone()),
            font_outline_width: Some(self.font_outline_width),
            font_shadow: Some(ShadowPatch::replace(&self.font_shadow)),
            text_gradient: self
                .text_gradient
                .as_ref()
                .map(|g| g.to_text_patch(g.angle())),
            font_weight: self.font_weight,
            font_size: self.font_size,
            headline_style: Some(self.role_patch(headline, self.headline_weight(headline))),
            subtitle_style: Some(self.role_patch(subtitle, self.subtitle_weight(subtitle))),
            badge: Some(self.badge_style),
            assets: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn preset() -> StylePreset {
        serde_json::from_str(
            r##"{
                "id": "hyper-impact",
                "name": "Hyper Impact",
                "backgroundColor": "#000000",
                "backgroundGradient": {
                    "enabled": true,
                    "colors": ["#1A1A1A", "#000000"],
                    "direction": "to bottom"
                },
                "fontFamily": "Anton, sans-serif",
                "fontColor": "#FFFFFF",
                "fontWeight": 900,
                "fontShadow": {"enabled": true, "color": "#FF2D55", "blur": 12, "offsetX": 0, "offsetY": 0},
                "textGradient": {"enabled": true, "colors": ["#FFFFFF", "#F0F0F0"], "direction": "to bottom right"},
                "subtitleStyle": {"fontFamily": "Montserrat, sans-serif"},
                "badgeStyle": "floating"
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn directions_become_angles() {
        let patch = preset().to_patch();
        assert_eq!(patch.background_gradient.unwrap().angle, Some(90.0));
        assert_eq!(patch.text_gradient.unwrap().angle, Some(135.0));
    }

    #[test]
    fn roles_fall_back_to_base_font() {
        let patch = preset().to_patch();
        let headline = patch.headline_style.unwrap();
        let subtitle = patch.subtitle_style.unwrap();
        assert_eq!(headline.font_family.as_deref(), Some("Anton, sans-serif"));
        assert_eq!(subtitle.font_family.as_deref(), Some("Montserrat, sans-serif"));
        assert_eq!(subtitle.font_color.as_deref(), Some("#FFFFFF"));
        assert_eq!(headline.font_weight, Some(900));
        assert_eq!(subtitle.font_weight, Some(700));
        assert_eq!(subtitle.text_gradient.unwrap().angle, Some(135.0));
    }

    #[test]
    fn weight_fallbacks() {
        let mut p = preset();
        p.font_weight = Some(400);
        let patch = p.to_patch();
        assert_eq!(patch.subtitle_style.unwrap().font_weight, Some(400));

        p.font_weight = None;
        let patch = p.to_patch();
        assert_eq!(patch.headline_style.unwrap().font_weight, Some(700));
        assert_eq!(patch.subtitle_style.unwrap().font_weight, Some(400));
    }

    #[test]
    fn preset_never_touches_assets() {
        assert!(preset().to_patch().assets.is_none());
    }
}
