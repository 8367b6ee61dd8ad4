//! Layout variations of a baseline composition.
//!
//! Each variation is a whole snapshot derived from the baseline captured
//! when the user first opens the variation view, so switching between
//! variations never compounds their transforms.

use crate::document::ThumbnailDocument;
use crate::model::*;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VariationKind {
    TextEmphasis,
    AssetEmphasis,
    Balanced,
    HighContrast,
}

impl VariationKind {
    pub const ALL: [VariationKind; 4] = [
        Self::TextEmphasis,
        Self::AssetEmphasis,
        Self::Balanced,
        Self::HighContrast,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::TextEmphasis => "Text Emphasis",
            Self::AssetEmphasis => "Asset Emphasis",
            Self::Balanced => "Balanced",
            Self::HighContrast => "High Contrast",
        }
    }

    fn transform(self, snapshot: &mut Snapshot, canvas: CanvasSize) {
        let w = canvas.width_f();
        let h = canvas.height_f();
        let style = &mut snapshot.style;
        let text = &mut snapshot.text;
        match self {
            Self::TextEmphasis => {
                for_each_foreground(&mut style.assets, |a| {
                    let t = &mut a.transform;
                    a.placement = Placement::Right;
                    t.x = w * 0.7;
                    t.y = h * 0.5 - t.height * 0.4;
                    t.width *= 0.8;
                    t.height *= 0.8;
                });
                style.font_shadow.enabled = true;
                style.font_shadow.blur = 12.0;
                text.headline_size *= 1.2;
                text.headline_alignment = Alignment::Left;
                text.subtitle_alignment = Alignment::Left;
                text.text_bold = true;
            }
            Self::AssetEmphasis => {
                for_each_foreground(&mut style.assets, |a| {
                    let t = &mut a.transform;
                    a.placement = Placement::Left;
                    t.x = w * 0.3;
                    t.y = h * 0.5 - t.height * 0.6;
                    t.width *= 1.2;
                    t.height *= 1.2;
                });
                text.headline_size *= 0.9;
                text.headline_alignment = Alignment::Right;
                text.subtitle_alignment = Alignment::Right;
                text.text_case = TextCase::Uppercase;
            }
            Self::Balanced => {
                for_each_foreground(&mut style.assets, |a| {
                    let t = &mut a.transform;
                    a.placement = Placement::Center;
                    t.x = w * 0.5 - t.width / 2.0;
                    t.y = h * 0.3 - t.height / 2.0;
                });
                style.font_outline_width = 1.0;
                text.headline_position = VerticalBucket::Bottom;
                text.headline_alignment = Alignment::Center;
                text.subtitle_alignment = Alignment::Center;
                text.text_outline = true;
            }
            Self::HighContrast => {
                style.background_gradient.enabled = true;
                style.background_gradient.colors = ["#000000".into(), "#333333".into()];
                style.font_shadow = Shadow::none();
                style.font_outline_width = 0.0;
                text.headline_alignment = Alignment::Center;
                text.subtitle_alignment = Alignment::Center;
                text.text_highlight = true;
                text.text_bold = true;
            }
        }
        for asset in &mut style.assets {
            asset.transform.clamp();
        }
    }
}

/// Background layers stay full-bleed in every variation.
fn for_each_foreground(assets: &mut [Asset], f: impl FnMut(&mut Asset)) {
    assets.iter_mut().filter(|a| !a.is_background).for_each(f);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variation {
    pub kind: VariationKind,
    pub name: &'static str,
    pub snapshot: Snapshot,
}

pub fn generate_variations(baseline: &Snapshot, canvas: CanvasSize) -> Vec<Variation> {
    VariationKind::ALL
        .into_iter()
        .map(|kind| {
            let mut snapshot = baseline.clone();
            kind.transform(&mut snapshot, canvas);
            Variation {
                kind,
                name: kind.name(),
                snapshot,
            }
        })
        .collect()
}

/// Text alignment that balances the assets: text moves away from the
/// side with more assets, and centers on a tie.
pub fn compute_optimized_alignment(assets: &[Asset]) -> Alignment {
    let left = assets.iter().filter(|a| a.placement == Placement::Left).count();
    let right = assets.iter().filter(|a| a.placement == Placement::Right).count();
    match left.cmp(&right) {
        std::cmp::Ordering::Greater => Alignment::Right,
        std::cmp::Ordering::Less => Alignment::Left,
        std::cmp::Ordering::Equal => Alignment::Center,
    }
}

/// The variation view: a fixed baseline plus the variations built from it.
#[derive(Debug, Clone)]
pub struct VariationSession {
    baseline: Snapshot,
    canvas: CanvasSize,
    variations: Vec<Variation>,
    selected: Option<usize>,
}

impl VariationSession {
    /// Capture the document as the baseline and build the variations.
    pub fn enter(doc: &ThumbnailDocument) -> Self {
        let baseline = doc.snapshot();
        let variations = generate_variations(&baseline, doc.canvas());
        log::debug!("variation session with {} variations", variations.len());
        Self {
            baseline,
            canvas: doc.canvas(),
            variations,
            selected: None,
        }
    }

    pub fn baseline(&self) -> &Snapshot {
        &self.baseline
    }

    pub fn variations(&self) -> &[Variation] {
        &self.variations
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Rebuild the variations from the same baseline and drop the selection.
    pub fn regenerate(&mut self) {
        self.variations = generate_variations(&self.baseline, self.canvas);
        self.selected = None;
    }

    /// Write variation `index` into `doc`. Text alignment is then
    /// re-derived from the variation's asset placements and both text
    /// roles return to derived placement. `false` for a bad index.
    pub fn select(&mut self, doc: &mut ThumbnailDocument, index: usize) -> bool {
        let Some(variation) = self.variations.get(index) else {
            return false;
        };
        let mut snapshot = variation.snapshot.clone();
        let alignment = compute_optimized_alignment(&snapshot.style.assets);
        snapshot.text.headline_alignment = alignment;
        snapshot.text.subtitle_alignment = alignment;
        snapshot.text.headline_custom_position = None;
        snapshot.text.subtitle_custom_position = None;
        doc.restore(snapshot);
        self.selected = Some(index);
        log::debug!("selected variation {:?}", variation.kind);
        true
    }
}
