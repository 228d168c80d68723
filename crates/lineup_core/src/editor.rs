//! Lineup editor state
//!
//! Owns the team record, the active drag gesture and the appearance
//! settings. Every mutation builds a new player list and swaps it in, so a
//! reader never sees a half-applied change. Stale player ids and unknown
//! formation ids are reported but leave the team untouched.

use tracing::{debug, info, warn};

use crate::crop::{crop_profile_photo, CropRequest};
use crate::error::{LineupError, Result};
use crate::field::{FieldPos, FieldRect};
use crate::formation::{apply_formation, FormationCatalog};
use crate::interaction::{DragCommit, DragSession, PointerPos};
use crate::models::{Player, PlayerDraft, PlayerValidator, Team};
use crate::settings::EditorSettings;

#[derive(Debug, Clone)]
pub struct LineupEditor {
    team: Team,
    settings: EditorSettings,
    drag: DragSession,
    catalog: &'static FormationCatalog,
}

impl Default for LineupEditor {
    fn default() -> Self {
        Self::new(Team::default(), EditorSettings::default())
    }
}

impl LineupEditor {
    pub fn new(team: Team, settings: EditorSettings) -> Self {
        Self::with_catalog(team, settings, FormationCatalog::builtin())
    }

    pub fn with_catalog(team: Team, settings: EditorSettings, catalog: &'static FormationCatalog) -> Self {
        Self { team, settings, drag: DragSession::new(), catalog }
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn into_team(self) -> Team {
        self.team
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut EditorSettings {
        &mut self.settings
    }

    pub fn catalog(&self) -> &'static FormationCatalog {
        self.catalog
    }

    pub fn drag_session(&self) -> &DragSession {
        &self.drag
    }

    fn replace_player(&mut self, id: &str, update: impl FnOnce(&Player) -> Player) -> Result<()> {
        match self.team.with_player_updated(id, update) {
            Some(team) => {
                self.team = team;
                Ok(())
            }
            None => {
                debug!(player = %id, "ignoring update for unknown player");
                Err(LineupError::PlayerNotFound { id: id.to_string() })
            }
        }
    }

    // ========== Roster ==========

    /// Validate and append a player; returns the new player's id.
    pub fn add_player(&mut self, draft: PlayerDraft) -> Result<String> {
        PlayerValidator::validate_draft(&draft)?;

        let mut player = Player::from_draft(draft);
        while self.team.contains_player(&player.id) {
            player = Player::from_draft(PlayerDraft::from_player(&player));
        }
        let id = player.id.clone();

        info!(player = %id, name = %player.name, "player added");
        let mut players = self.team.players.clone();
        players.push(player);
        self.team = Team { players, ..self.team.clone() };
        Ok(id)
    }

    /// Replace a player's form fields; the id is kept.
    pub fn update_player(&mut self, id: &str, draft: PlayerDraft) -> Result<()> {
        PlayerValidator::validate_draft(&draft)?;
        self.replace_player(id, |p| Player { id: p.id.clone(), ..Player::from_draft(draft) })?;
        info!(player = %id, "player updated");
        Ok(())
    }

    pub fn remove_player(&mut self, id: &str) -> Result<Player> {
        let removed = self
            .team
            .player(id)
            .cloned()
            .ok_or_else(|| LineupError::PlayerNotFound { id: id.to_string() })?;

        let players = self.team.players.iter().filter(|p| p.id != id).cloned().collect();
        self.team = Team { players, ..self.team.clone() };
        if self.drag.player_id() == Some(id) {
            self.drag.cancel();
        }

        info!(player = %id, "player removed");
        Ok(removed)
    }

    /// Assign a role label to a player.
    pub fn set_player_position(&mut self, id: &str, position: &str) -> Result<()> {
        self.replace_player(id, |p| Player { position: position.to_string(), ..p.clone() })
    }

    pub fn rename_team(&mut self, name: &str) {
        self.team = Team { name: name.to_string(), ..self.team.clone() };
    }

    // ========== Positioning ==========

    /// Place a player at a pointer-derived position (clamped to 5..95).
    pub fn move_player(&mut self, id: &str, pos: FieldPos) -> Result<FieldPos> {
        let clamped = pos.clamp_inset();
        self.replace_player(id, |p| p.with_field_pos(clamped))?;
        debug!(player = %id, x = clamped.x, y = clamped.y, "player moved");
        Ok(clamped)
    }

    pub fn begin_drag(&mut self, id: &str) -> Result<()> {
        if !self.team.contains_player(id) {
            return Err(LineupError::PlayerNotFound { id: id.to_string() });
        }
        self.drag.begin(id);
        Ok(())
    }

    /// Transient display position while dragging
    pub fn drag_hover(&mut self, pointer: PointerPos, rect: &FieldRect) -> Option<FieldPos> {
        self.drag.hover(pointer, rect)
    }

    /// Commit the gesture at `pointer`. `None` when nothing was committed.
    pub fn end_drag(&mut self, pointer: PointerPos, rect: &FieldRect) -> Option<DragCommit> {
        let commit = self.drag.release(pointer, rect, self.settings.appearance.rotated)?;
        match self.move_player(&commit.player_id, commit.position) {
            Ok(_) => Some(commit),
            Err(_) => None,
        }
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Apply a formation preset. Unknown ids leave the team unchanged.
    pub fn change_formation(&mut self, formation_id: &str) -> Result<()> {
        let Some(formation) = self.catalog.get(formation_id) else {
            warn!(formation = %formation_id, "unknown formation requested");
            return Err(LineupError::UnknownFormation { id: formation_id.to_string() });
        };

        self.team = apply_formation(&self.team, formation);
        info!(formation = %formation.id, name = %formation.name, "formation changed");
        Ok(())
    }

    // ========== Presentation ==========

    pub fn toggle_rotation(&mut self) -> bool {
        let appearance = &mut self.settings.appearance;
        appearance.rotated = !appearance.rotated;
        appearance.rotated
    }

    /// Where a player is drawn; the stored position is not affected.
    pub fn displayed_position(&self, id: &str) -> Option<FieldPos> {
        self.team.player(id).map(|p| p.field_pos().display(self.settings.appearance.rotated))
    }

    // ========== Photos ==========

    /// Crop an uploaded image into the player's avatar. On failure the
    /// previous photo stays.
    pub fn set_profile_photo(&mut self, id: &str, image_bytes: &[u8], request: CropRequest) -> Result<()> {
        if !self.team.contains_player(id) {
            return Err(LineupError::PlayerNotFound { id: id.to_string() });
        }

        let photo = crop_profile_photo(image_bytes, request, &self.settings.crop)?;
        self.replace_player(id, |p| Player { profile_photo: Some(photo), ..p.clone() })?;
        info!(player = %id, "profile photo set");
        Ok(())
    }

    pub fn clear_profile_photo(&mut self, id: &str) -> Result<()> {
        self.replace_player(id, |p| Player { profile_photo: None, ..p.clone() })
    }
}
