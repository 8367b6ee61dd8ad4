//! Data model for a thumbnail composition.
//!
//! A composition is a fixed-size canvas carrying a [`Style`] (background,
//! typography, per-role overrides, badge and the asset list) and a
//! [`TextSettings`] block (headline/subtitle content and placement).
//! Everything here is plain serialisable data; the operations that keep
//! the invariants live in [`crate::document`].
//!
//! Colors are kept as CSS color strings (`#1E293B`, `rgba(0, 0, 0, 0.5)`)
//! because the rendering surface consumes them verbatim.

use crate::id::AssetId;
use serde::{Deserialize, Serialize};

/// Minimum width/height of an asset after any write.
pub const MIN_ASSET_SIZE: f32 = 5.0;

/// Minimum wrap width of a text role after a transform.
pub const MIN_TEXT_WIDTH: f32 = 50.0;

// ─── Geometry primitives ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of the composition. Constant for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const HD: CanvasSize = CanvasSize {
        width: 1280,
        height: 720,
    };

    pub fn width_f(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f(&self) -> f32 {
        self.height as f32
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::HD
    }
}

/// Axis-aligned box of an element in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

// ─── Style ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

/// CSS-style direction keywords used by style presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientDirection {
    #[serde(rename = "to right")]
    ToRight,
    #[serde(rename = "to bottom")]
    ToBottom,
    #[serde(rename = "to bottom right")]
    ToBottomRight,
    #[serde(rename = "to bottom left")]
    ToBottomLeft,
    #[serde(rename = "to left")]
    ToLeft,
    #[serde(rename = "to top")]
    ToTop,
    #[serde(rename = "to top right")]
    ToTopRight,
    #[serde(rename = "to top left")]
    ToTopLeft,
}

impl GradientDirection {
    /// Angle in degrees, clockwise from "to right".
    pub fn angle(self) -> f32 {
        match self {
            Self::ToRight => 0.0,
            Self::ToTopRight => 45.0,
            Self::ToBottom => 90.0,
            Self::ToBottomRight => 135.0,
            Self::ToLeft => 180.0,
            Self::ToBottomLeft => 225.0,
            Self::ToTop => 270.0,
            Self::ToTopLeft => 315.0,
        }
    }

    /// Inverse of [`angle`](Self::angle). Angles without a keyword map to
    /// `ToRight`.
    pub fn from_angle(angle: f32) -> Self {
        match angle.rem_euclid(360.0).round() as u32 {
            45 => Self::ToTopRight,
            90 => Self::ToBottom,
            135 => Self::ToBottomRight,
            180 => Self::ToLeft,
            225 => Self::ToBottomLeft,
            270 => Self::ToTop,
            315 => Self::ToTopLeft,
            _ => Self::ToRight,
        }
    }
}

/// Two-stop background gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: GradientKind,
    pub colors: [String; 2],
    pub angle: f32,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: GradientKind::Linear,
            colors: ["#3B82F6".into(), "#10B981".into()],
            angle: 45.0,
        }
    }
}

/// Two-stop gradient fill for glyphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGradient {
    pub enabled: bool,
    pub colors: [String; 2],
    pub angle: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<GradientDirection>,
}

impl Default for TextGradient {
    fn default() -> Self {
        Self {
            enabled: false,
            colors: ["#FFFFFF".into(), "#FFFFFF".into()],
            angle: 0.0,
            direction: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub enabled: bool,
    pub color: String,
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Shadow {
    /// A disabled shadow with every parameter zeroed.
    pub fn none() -> Self {
        Self {
            enabled: false,
            color: "rgba(0, 0, 0, 0)".into(),
            blur: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            enabled: true,
            color: "rgba(0, 0, 0, 0.5)".into(),
            blur: 10.0,
            offset_x: 2.0,
            offset_y: 2.0,
        }
    }
}

/// Typography overrides for one text role. Unset fields fall back to the
/// style-wide defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_gradient: Option<TextGradient>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeKind {
    #[default]
    None,
    Pill,
    Rectangle,
    Code,
    Floating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub background_color: String,
    #[serde(default)]
    pub background_gradient: Gradient,
    pub font_family: String,
    pub font_color: String,
    pub font_outline_color: String,
    pub font_outline_width: f32,
    #[serde(default)]
    pub font_shadow: Shadow,
    #[serde(default)]
    pub text_gradient: TextGradient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default)]
    pub headline_style: RoleStyle,
    #[serde(default)]
    pub subtitle_style: RoleStyle,
    #[serde(default, rename = "badgeStyle")]
    pub badge: BadgeKind,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Style {
    /// Resolved typography for one role: override first, then defaults.
    pub fn role_style(&self, role: TextRole) -> &RoleStyle {
        match role {
            TextRole::Headline => &self.headline_style,
            TextRole::Subtitle => &self.subtitle_style,
        }
    }

    pub fn role_font_family(&self, role: TextRole) -> &str {
        self.role_style(role)
            .font_family
            .as_deref()
            .unwrap_or(&self.font_family)
    }

    pub fn role_font_color(&self, role: TextRole) -> &str {
        self.role_style(role)
            .font_color
            .as_deref()
            .unwrap_or(&self.font_color)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background_color: "#1E293B".into(),
            background_gradient: Gradient::default(),
            font_family: "Inter".into(),
            font_color: "#FFFFFF".into(),
            font_outline_color: "#000000".into(),
            font_outline_width: 0.0,
            font_shadow: Shadow::default(),
            text_gradient: TextGradient::default(),
            font_weight: None,
            font_size: None,
            headline_style: RoleStyle {
                font_family: Some("Inter".into()),
                font_color: Some("#FFFFFF".into()),
                font_weight: Some(700),
                text_gradient: Some(TextGradient::default()),
            },
            subtitle_style: RoleStyle {
                font_family: Some("Inter".into()),
                font_color: Some("#FFFFFF".into()),
                font_weight: Some(400),
                text_gradient: Some(TextGradient::default()),
            },
            badge: BadgeKind::None,
            assets: Vec::new(),
        }
    }
}

// ─── Text ────────────────────────────────────────────────────────────────

/// The two text elements of a thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextRole {
    Headline,
    Subtitle,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical placement bucket used when no custom position is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalBucket {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextCase {
    Uppercase,
    #[default]
    Normal,
    Lowercase,
}

impl TextCase {
    pub fn apply(self, s: &str) -> String {
        match self {
            Self::Uppercase => s.to_uppercase(),
            Self::Normal => s.to_string(),
            Self::Lowercase => s.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSettings {
    pub headline: String,
    pub subtitle: String,
    pub headline_size: f32,
    pub subtitle_size: f32,
    pub headline_alignment: Alignment,
    pub subtitle_alignment: Alignment,
    pub headline_position: VerticalBucket,
    #[serde(default)]
    pub subtitle_position: VerticalBucket,
    #[serde(default)]
    pub headline_custom_position: Option<Position>,
    #[serde(default)]
    pub subtitle_custom_position: Option<Position>,
    /// Wrap width set by a text transform gesture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_width: Option<f32>,
    pub text_case: TextCase,
    pub text_bold: bool,
    #[serde(default)]
    pub text_italic: bool,
    pub text_highlight: bool,
    #[serde(default = "default_highlight_color")]
    pub text_highlight_color: String,
    pub text_outline: bool,
}

fn default_highlight_color() -> String {
    "#FFFF00".into()
}

impl TextSettings {
    pub fn content(&self, role: TextRole) -> &str {
        match role {
            TextRole::Headline => &self.headline,
            TextRole::Subtitle => &self.subtitle,
        }
    }

    pub fn size(&self, role: TextRole) -> f32 {
        match role {
            TextRole::Headline => self.headline_size,
            TextRole::Subtitle => self.subtitle_size,
        }
    }

    pub fn alignment(&self, role: TextRole) -> Alignment {
        match role {
            TextRole::Headline => self.headline_alignment,
            TextRole::Subtitle => self.subtitle_alignment,
        }
    }

    pub fn custom_position(&self, role: TextRole) -> Option<Position> {
        match role {
            TextRole::Headline => self.headline_custom_position,
            TextRole::Subtitle => self.subtitle_custom_position,
        }
    }

    pub fn custom_position_mut(&mut self, role: TextRole) -> &mut Option<Position> {
        match role {
            TextRole::Headline => &mut self.headline_custom_position,
            TextRole::Subtitle => &mut self.subtitle_custom_position,
        }
    }

    pub fn wrap_width(&self, role: TextRole) -> Option<f32> {
        match role {
            TextRole::Headline => self.headline_width,
            TextRole::Subtitle => self.subtitle_width,
        }
    }

    pub fn wrap_width_mut(&mut self, role: TextRole) -> &mut Option<f32> {
        match role {
            TextRole::Headline => &mut self.headline_width,
            TextRole::Subtitle => &mut self.subtitle_width,
        }
    }

    /// Display string with the case transform applied.
    pub fn display(&self, role: TextRole) -> String {
        self.text_case.apply(self.content(role))
    }
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            headline: "YOUR HEADLINE HERE".into(),
            subtitle: "Your subtitle here".into(),
            headline_size: 48.0,
            subtitle_size: 24.0,
            headline_alignment: Alignment::Center,
            subtitle_alignment: Alignment::Center,
            headline_position: VerticalBucket::Middle,
            subtitle_position: VerticalBucket::Middle,
            headline_custom_position: None,
            subtitle_custom_position: None,
            headline_width: None,
            subtitle_width: None,
            text_case: TextCase::Normal,
            text_bold: false,
            text_italic: false,
            text_highlight: false,
            text_highlight_color: default_highlight_color(),
            text_outline: false,
        }
    }
}

// ─── Assets ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    #[default]
    Image,
    Icon,
    Shape,
}

impl AssetCategory {
    /// Default edge length for a freshly picked asset.
    pub fn default_size(self) -> f32 {
        match self {
            Self::Image => 400.0,
            Self::Icon => 200.0,
            Self::Shape => 150.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Icon => "Icon",
            Self::Shape => "Shape",
        }
    }
}

/// Which side of the canvas an asset is meant to occupy. Only consulted
/// by alignment heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Left,
    Right,
    #[default]
    Center,
}

impl Placement {
    /// Default x for a freshly picked asset.
    pub fn default_x(self) -> f32 {
        match self {
            Self::Left => 200.0,
            Self::Center => 500.0,
            Self::Right => 800.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetTransform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_opacity() -> f32 {
    1.0
}

impl AssetTransform {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// Enforce the size floor and keep opacity in `[0, 1]`.
    pub fn clamp(&mut self) {
        self.width = self.width.max(MIN_ASSET_SIZE);
        self.height = self.height.max(MIN_ASSET_SIZE);
        self.opacity = self.opacity.clamp(0.0, 1.0);
    }
}

impl Default for AssetTransform {
    fn default() -> Self {
        Self {
            x: 200.0,
            y: 300.0,
            width: AssetCategory::Image.default_size(),
            height: AssetCategory::Image.default_size(),
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

/// A placed image element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    pub src: String,
    #[serde(default, rename = "type")]
    pub category: AssetCategory,
    #[serde(default, rename = "position")]
    pub placement: Placement,
    #[serde(flatten)]
    pub transform: AssetTransform,
    pub z_index: i32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_background: bool,
}

impl Asset {
    pub fn bounds(&self) -> Bounds {
        self.transform.bounds()
    }
}

/// An asset before it is placed: the document assigns `id` and `z_index`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub src: String,
    #[serde(default, rename = "type")]
    pub category: AssetCategory,
    #[serde(default, rename = "position")]
    pub placement: Placement,
    #[serde(flatten)]
    pub transform: AssetTransform,
    #[serde(default)]
    pub is_background: bool,
}

/// A user pick from the asset library or upload UI.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPick {
    pub src: String,
    #[serde(default, rename = "type")]
    pub category: AssetCategory,
    #[serde(default, rename = "position")]
    pub placement: Placement,
    #[serde(default)]
    pub is_background_intent: bool,
}

// ─── Elements ────────────────────────────────────────────────────────────

/// Anything selectable on the canvas: one of the two text roles or an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Text(TextRole),
    Asset(AssetId),
}

impl ElementId {
    pub const HEADLINE: ElementId = ElementId::Text(TextRole::Headline);
    pub const SUBTITLE: ElementId = ElementId::Text(TextRole::Subtitle);

    /// Parse the wire form: `"headline"`, `"subtitle"`, or an asset id.
    /// Asset ids never interned in this process yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "headline" => Some(Self::HEADLINE),
            "subtitle" => Some(Self::SUBTITLE),
            other => AssetId::lookup(other).map(Self::Asset),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(TextRole::Headline) => "headline",
            Self::Text(TextRole::Subtitle) => "subtitle",
            Self::Asset(id) => id.as_str(),
        }
    }

    pub fn as_asset(&self) -> Option<AssetId> {
        match self {
            Self::Asset(id) => Some(*id),
            Self::Text(_) => None,
        }
    }
}

/// Snapshot of the mutable parts of a document (assets ride inside style).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub style: Style,
    pub text: TextSettings,
}
