//! # lineup_core - Soccer Lineup Editing Core
//!
//! This library holds everything behind the lineup editor that is not
//! widget markup: the team model, the formation catalog and assignment
//! engine, the percentage coordinate model used for drag positioning, the
//! circular profile-photo crop, persistence and export.
//!
//! ## Features
//! - Priority-ordered formation assignment with positional fallback
//! - Pointer → field percentage transform with 5..95 inset clamping
//! - Presentation-only field rotation
//! - Deterministic circular avatar cropping
//! - JSON persistence (last write wins) and JSON / PNG lineup export

// Builder-style structs are filled field by field in tests
#![allow(clippy::field_reassign_with_default)]

pub mod crop;
pub mod editor;
pub mod error;
pub mod field;
pub mod formation;
pub mod interaction;
pub mod models;
pub mod render;
pub mod save;
pub mod settings;

pub use crop::{crop_profile_photo, CropError, CropRequest, CropSettings, PanOffset, SampleRect};
pub use editor::LineupEditor;
pub use error::{LineupError, Result};
pub use field::{FieldPos, FieldRect};
pub use formation::{
    assign_formation, role_priority, Formation, FormationAssignment, FormationCatalog,
    FormationSlot, Placement, DEFAULT_FORMATION_ID,
};
pub use interaction::{DragCommit, DragSession, PointerPos};
pub use models::{Player, PlayerDraft, PlayerValidator, Team, ValidationError};
pub use render::{export_lineup_png, render_lineup, LineupImageExport, RenderError};
pub use save::{export_lineup_json, LineupExport, LineupStore, SaveError};
pub use settings::{EditorSettings, FieldAppearance};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
