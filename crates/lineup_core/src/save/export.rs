//! Lineup export as a standalone JSON document
//!
//! The document has exactly the shape of the persisted team record, so an
//! exported file can be dropped in as `team.json`.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::SaveError;
use crate::models::Team;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupExport {
    pub file_name: String,
    pub contents: String,
}

/// File-name safe form of the team name (`team` when nothing is left).
pub fn export_file_stem(team: &Team) -> String {
    let stem: String = team
        .name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.trim_matches(|c| c == '_' || c == '.').is_empty() {
        "team".to_string()
    } else {
        stem
    }
}

pub fn export_lineup_json(team: &Team) -> Result<LineupExport, SaveError> {
    let contents = serde_json::to_string_pretty(team)?;
    let file_name = format!("{}_lineup.json", export_file_stem(team));
    info!(file = %file_name, players = team.players.len(), "lineup exported");
    Ok(LineupExport { file_name, contents })
}
