// Save/Load System for the lineup editor
// Single-record JSON files, atomic rewrite, last write wins

pub mod error;
pub mod export;
pub mod store;

pub use error::SaveError;
pub use export::{export_file_stem, export_lineup_json, LineupExport};
pub use store::LineupStore;

pub const TEAM_FILE: &str = "team.json";
pub const SETTINGS_FILE: &str = "settings.json";
