use std::fs::{rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::error::SaveError;
use super::{SETTINGS_FILE, TEAM_FILE};
use crate::models::player::generate_player_id;
use crate::models::Team;
use crate::settings::EditorSettings;

/// File-backed store for the team record and editor settings
#[derive(Debug, Clone)]
pub struct LineupStore {
    dir: PathBuf,
}

impl LineupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn team_path(&self) -> PathBuf {
        self.dir.join(TEAM_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    /// Load the team, falling back to the default team on any problem.
    pub fn load_team(&self) -> Team {
        match self.try_load_team() {
            Ok(team) => team,
            Err(err) => {
                if !matches!(err, SaveError::FileNotFound { .. }) {
                    warn!(error = %err, path = %self.team_path().display(), "team record unreadable, starting empty");
                }
                Team::default()
            }
        }
    }

    pub fn try_load_team(&self) -> Result<Team, SaveError> {
        let mut team: Team = load_json(&self.team_path())?;
        if !team.has_unique_player_ids() {
            warn!("duplicate player ids in team record, reissuing");
            reissue_duplicate_ids(&mut team);
        }
        info!(players = team.players.len(), formation = %team.formation, "team loaded");
        Ok(team)
    }

    pub fn save_team(&self, team: &Team) -> Result<(), SaveError> {
        save_json(&self.team_path(), team)
    }

    /// Load settings, falling back to defaults on any problem.
    pub fn load_settings(&self) -> EditorSettings {
        match load_json(&self.settings_path()) {
            Ok(settings) => settings,
            Err(SaveError::FileNotFound { .. }) => EditorSettings::default(),
            Err(err) => {
                warn!(error = %err, "settings unreadable, using defaults");
                EditorSettings::default()
            }
        }
    }

    pub fn save_settings(&self, settings: &EditorSettings) -> Result<(), SaveError> {
        save_json(&self.settings_path(), settings)
    }
}

fn reissue_duplicate_ids(team: &mut Team) {
    let mut seen = std::collections::HashSet::new();
    for player in &mut team.players {
        if !seen.insert(player.id.clone()) {
            player.id = generate_player_id();
            seen.insert(player.id.clone());
        }
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, SaveError> {
    if !path.exists() {
        return Err(SaveError::FileNotFound { path: path.display().to_string() });
    }

    let data = std::fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Err(SaveError::Corrupted(format!("{} is empty", path.display())));
    }

    let value = serde_json::from_str(&data)?;
    debug!("Loaded {} bytes from {:?}", data.len(), path);
    Ok(value)
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let data = serde_json::to_vec_pretty(value)?;

    // Atomic save: write to temp file, then rename
    let temp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(&data)?;
        file.flush()?;
        file.sync_all()?;
    }
    rename(&temp_path, path)?;

    debug!("Saved {} bytes to {:?}", data.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, PlayerDraft};
    use tempfile::TempDir;

    fn store() -> (TempDir, LineupStore) {
        let dir = TempDir::new().unwrap();
        let store = LineupStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn test_missing_file_gives_default_team() {
        let (_dir, store) = store();
        assert_eq!(store.load_team(), Team::default());
        assert!(matches!(store.try_load_team(), Err(SaveError::FileNotFound { .. })));
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, store) = store();
        let mut team = Team::default();
        team.name = "Reds".to_string();
        team.players.push(Player::from_draft(PlayerDraft::new("Ana", "Pivot", 9)));

        store.save_team(&team).unwrap();
        assert_eq!(store.load_team(), team);
        assert!(!store.team_path().with_extension("tmp").exists());
    }

    #[test]
    fn test_malformed_file_gives_default_team() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(store.team_path(), "{ not json").unwrap();

        let err = store.try_load_team().unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(store.load_team(), Team::default());
    }

    #[test]
    fn test_empty_file_is_corrupted() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(store.team_path(), "  \n").unwrap();
        assert!(matches!(store.try_load_team(), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_duplicate_ids_are_reissued() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(
            store.team_path(),
            r#"{"id":"1","name":"T","formation":"2-1-1","players":[
                {"id":"a","name":"A","position":"Pivot","jerseyNumber":9,"x":10,"y":10},
                {"id":"a","name":"B","position":"Pivot","jerseyNumber":8,"x":20,"y":20}]}"#,
        )
        .unwrap();

        let team = store.load_team();
        assert_eq!(team.players.len(), 2);
        assert_eq!(team.players[0].id, "a");
        assert!(team.has_unique_player_ids());
    }

    #[test]
    fn test_settings_round_trip() {
        let (_dir, store) = store();
        assert_eq!(store.load_settings(), EditorSettings::default());

        let mut settings = EditorSettings::default();
        settings.appearance.rotated = true;
        settings.appearance.set_player_size(64);
        store.save_settings(&settings).unwrap();
        assert_eq!(store.load_settings(), settings);
    }
}
