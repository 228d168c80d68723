use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field::FieldPos;

/// A squad member placed on the field.
///
/// Serialized with the editor's camelCase record layout (`jerseyNumber`,
/// `profilePhoto`). Every field has a default so partially written records
/// still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default = "generate_player_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Role label, either free-form or one of `formation::ROLE_LABELS`
    #[serde(default)]
    pub position: String,

    #[serde(default = "default_jersey_number")]
    pub jersey_number: u8,

    /// Horizontal position, percent of field width
    #[serde(default = "default_coordinate")]
    pub x: f32,

    /// Vertical position, percent of field height
    #[serde(default = "default_coordinate")]
    pub y: f32,

    /// Cropped avatar as an image data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

pub(crate) fn generate_player_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_jersey_number() -> u8 {
    1
}

fn default_coordinate() -> f32 {
    50.0
}

impl Player {
    /// Create a player from submitted form data with a fresh unique id.
    /// Coordinates are pulled onto the field (0..100).
    pub fn from_draft(draft: PlayerDraft) -> Self {
        let pos = FieldPos::new(draft.x, draft.y).clamp_bounds();
        Self {
            id: generate_player_id(),
            name: draft.name,
            position: draft.position,
            jersey_number: draft.jersey_number,
            x: pos.x,
            y: pos.y,
            profile_photo: draft.profile_photo,
        }
    }

    pub fn field_pos(&self) -> FieldPos {
        FieldPos::new(self.x, self.y)
    }

    /// Copy with the coordinates replaced; every other field is kept.
    pub fn with_field_pos(&self, pos: FieldPos) -> Self {
        Self { x: pos.x, y: pos.y, ..self.clone() }
    }

    /// Marker fallback text when no photo is set.
    pub fn initial(&self) -> char {
        self.name.chars().next().map(|c| c.to_ascii_uppercase()).unwrap_or('?')
    }
}

/// Player data as submitted by the add/edit form (no id yet).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDraft {
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default = "default_jersey_number")]
    pub jersey_number: u8,
    #[serde(default = "default_coordinate")]
    pub x: f32,
    #[serde(default = "default_coordinate")]
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

impl Default for PlayerDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: String::new(),
            jersey_number: default_jersey_number(),
            x: default_coordinate(),
            y: default_coordinate(),
            profile_photo: None,
        }
    }
}

impl PlayerDraft {
    pub fn new(name: impl Into<String>, position: impl Into<String>, jersey_number: u8) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            jersey_number,
            ..Self::default()
        }
    }

    /// Pre-filled draft for editing an existing player.
    pub fn from_player(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            position: player.position.clone(),
            jersey_number: player.jersey_number,
            x: player.x,
            y: player.y,
            profile_photo: player.profile_photo.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_draft_generates_unique_ids() {
        let a = Player::from_draft(PlayerDraft::new("Ana", "Pivot", 9));
        let b = Player::from_draft(PlayerDraft::new("Ana", "Pivot", 9));
        assert_ne!(a.id, b.id);
        assert_eq!(a.x, 50.0);
        assert_eq!(a.y, 50.0);
    }

    #[test]
    fn test_from_draft_keeps_player_on_field() {
        let mut draft = PlayerDraft::new("Ana", "Pivot", 9);
        draft.x = 250.0;
        draft.y = -40.0;
        let player = Player::from_draft(draft);
        assert_eq!(player.field_pos(), FieldPos::new(100.0, 0.0));
    }

    #[test]
    fn test_serializes_camel_case_record() {
        let mut player = Player::from_draft(PlayerDraft::new("Ana", "Pivot", 9));
        player.id = "p1".to_string();
        let json = serde_json::to_value(&player).unwrap();

        assert_eq!(json["jerseyNumber"], 9);
        assert_eq!(json["id"], "p1");
        assert!(json.get("profilePhoto").is_none());
    }

    #[test]
    fn test_missing_fields_default() {
        let player: Player =
            serde_json::from_str(r#"{"id":"7","name":"Bo","position":"Goalkeeper"}"#).unwrap();
        assert_eq!(player.jersey_number, 1);
        assert_eq!(player.field_pos(), FieldPos::new(50.0, 50.0));
        assert_eq!(player.profile_photo, None);
    }

    #[test]
    fn test_initial_falls_back_to_question_mark() {
        let mut player = Player::from_draft(PlayerDraft::new("zed", "", 4));
        assert_eq!(player.initial(), 'Z');
        player.name.clear();
        assert_eq!(player.initial(), '?');
    }
}
