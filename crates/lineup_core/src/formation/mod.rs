// Formation presets and the roster → slot assignment engine

pub mod assignment;
pub mod catalog;
pub mod roles;

pub use assignment::{apply_formation, assign_formation, FormationAssignment, Placement};
pub use catalog::{Formation, FormationCatalog, FormationSlot, DEFAULT_FORMATION_ID};
pub use roles::{role_priority, ROLE_LABELS, UNKNOWN_ROLE_PRIORITY};
