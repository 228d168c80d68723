use super::Player;
use crate::formation::DEFAULT_FORMATION_ID;
use serde::{Deserialize, Serialize};

/// The lineup aggregate: persisted and exported as one record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    #[serde(default = "default_team_id")]
    pub id: String,
    #[serde(default = "default_team_name")]
    pub name: String,
    /// Insertion order, which is also display order
    #[serde(default)]
    pub players: Vec<Player>,
    /// Id of the currently selected formation
    #[serde(default = "default_formation")]
    pub formation: String,
}

fn default_team_id() -> String {
    "1".to_string()
}

fn default_team_name() -> String {
    "My Team".to_string()
}

fn default_formation() -> String {
    DEFAULT_FORMATION_ID.to_string()
}

impl Default for Team {
    fn default() -> Self {
        Self {
            id: default_team_id(),
            name: default_team_name(),
            players: Vec::new(),
            formation: default_formation(),
        }
    }
}

impl Team {
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn contains_player(&self, id: &str) -> bool {
        self.player(id).is_some()
    }

    /// Copy of the team with one player replaced through `update`.
    ///
    /// Returns `None` when no player has the given id.
    pub fn with_player_updated(&self, id: &str, update: impl FnOnce(&Player) -> Player) -> Option<Team> {
        let index = self.players.iter().position(|p| p.id == id)?;
        let mut players = self.players.clone();
        let updated = update(&players[index]);
        players[index] = updated;
        Some(Team { players, ..self.clone() })
    }

    /// Sanity check run on loaded records: ids must be unique.
    pub fn has_unique_player_ids(&self) -> bool {
        let mut ids = std::collections::HashSet::new();
        self.players.iter().all(|p| ids.insert(p.id.as_str()))
    }
}
