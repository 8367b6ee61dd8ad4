pub mod controller;
pub mod history;
pub mod hit;
pub mod input;
pub mod selection;
pub mod session;
pub mod settings;
pub mod shortcuts;
pub mod surface;

pub use controller::{InteractionController, InteractionState, TransformEnd};
pub use history::History;
pub use input::{Direction, Modifiers};
pub use selection::{SelectedType, Selection};
pub use session::Editor;
pub use settings::EditorSettings;
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use surface::{Frame, RasterImage, RenderSurface};
