pub mod document;
pub mod error;
pub mod geometry;
pub mod id;
pub mod layout;
pub mod model;
pub mod patch;
pub mod preset;
pub mod variation;
pub mod zorder;

pub use document::ThumbnailDocument;
pub use error::{DocumentError, DocumentResult};
pub use geometry::{Guide, closest_guides, compute_alignment_guides, snap_to_grid};
pub use id::AssetId;
pub use model::*;
pub use patch::{AssetPatch, StylePatch, TextPatch};
pub use preset::StylePreset;
pub use variation::{Variation, VariationKind, VariationSession, generate_variations};
