//! Built-in formation presets
//!
//! Coordinates are field percentages (see `crate::field`), listed from the
//! own goal (y = 10) towards the attack (y = 85). Slot order matters: it is
//! the positional fallback order.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::field::FieldPos;

/// Formation selected for a fresh team
pub const DEFAULT_FORMATION_ID: &str = "2-1-1";

/// One position on the field within a formation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationSlot {
    /// Role label this slot is meant for
    pub position: String,
    pub x: f32,
    pub y: f32,
}

impl FormationSlot {
    pub fn new(position: &str, x: f32, y: f32) -> Self {
        Self { position: position.to_string(), x, y }
    }

    pub fn field_pos(&self) -> FieldPos {
        FieldPos::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub id: String,
    pub name: String,
    pub positions: Vec<FormationSlot>,
}

impl Formation {
    pub fn new(id: &str, name: &str, positions: Vec<FormationSlot>) -> Self {
        Self { id: id.to_string(), name: name.to_string(), positions }
    }

    /// Number of players this formation places
    pub fn squad_size(&self) -> usize {
        self.positions.len()
    }
}

/// Ordered, read-only set of formations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormationCatalog {
    formations: Vec<Formation>,
}

static BUILTIN_CATALOG: Lazy<FormationCatalog> = Lazy::new(|| FormationCatalog::new(builtin_formations()));

impl FormationCatalog {
    pub fn new(formations: Vec<Formation>) -> Self {
        Self { formations }
    }

    /// The presets shipped with the editor
    pub fn builtin() -> &'static FormationCatalog {
        &BUILTIN_CATALOG
    }

    pub fn all(&self) -> &[Formation] {
        &self.formations
    }

    pub fn get(&self, id: &str) -> Option<&Formation> {
        self.formations.iter().find(|f| f.id == id)
    }

    pub fn for_squad_size(&self, size: usize) -> Vec<&Formation> {
        self.formations.iter().filter(|f| f.squad_size() == size).collect()
    }

    /// Distinct squad sizes in catalog order
    pub fn squad_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = Vec::new();
        for formation in &self.formations {
            if !sizes.contains(&formation.squad_size()) {
                sizes.push(formation.squad_size());
            }
        }
        sizes
    }

    pub fn len(&self) -> usize {
        self.formations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formations.is_empty()
    }
}

fn slots(data: &[(&str, f32, f32)]) -> Vec<FormationSlot> {
    data.iter().map(|&(label, x, y)| FormationSlot::new(label, x, y)).collect()
}

fn builtin_formations() -> Vec<Formation> {
    vec![
        // 5-a-side
        Formation::new(
            "2-1-1",
            "2-1-1 (5 players)",
            slots(&[
                ("Goalkeeper", 50.0, 10.0),
                ("Right Flank", 30.0, 30.0),
                ("Left Flank", 70.0, 30.0),
                ("Universal", 50.0, 60.0),
                ("Pivot", 50.0, 85.0),
            ]),
        ),
        Formation::new(
            "1-2-1",
            "1-2-1 (5 players)",
            slots(&[
                ("Goalkeeper", 50.0, 10.0),
                ("Defender", 50.0, 30.0),
                ("Right Flank", 35.0, 60.0),
                ("Left Flank", 65.0, 60.0),
                ("Pivot", 50.0, 85.0),
            ]),
        ),
        Formation::new(
            "1-1-2",
            "1-1-2 (5 players)",
            slots(&[
                ("Goalkeeper", 50.0, 10.0),
                ("Defender", 50.0, 35.0),
                ("Universal", 50.0, 60.0),
                ("Right Flank", 40.0, 85.0),
                ("Left Flank", 60.0, 85.0),
            ]),
        ),
        // 7-a-side
        Formation::new(
            "3-2-1",
            "3-2-1 (7 players)",
            slots(&[
                ("Goalkeeper", 50.0, 10.0),
                ("Right Flank", 25.0, 30.0),
                ("Defender", 50.0, 30.0),
                ("Left Flank", 75.0, 30.0),
                ("Right Flank", 40.0, 60.0),
                ("Left Flank", 60.0, 60.0),
                ("Pivot", 50.0, 85.0),
            ]),
        ),
        Formation::new(
            "2-3-1",
            "2-3-1 (7 players)",
            slots(&[
                ("Goalkeeper", 50.0, 10.0),
                ("Right Flank", 35.0, 30.0),
                ("Left Flank", 65.0, 30.0),
                ("Right Flank", 30.0, 55.0),
                ("Universal", 50.0, 55.0),
                ("Left Flank", 70.0, 55.0),
                ("Pivot", 50.0, 85.0),
            ]),
        ),
        Formation::new(
            "2-2-2",
            "2-2-2 (7 players)",
            slots(&[
                ("Goalkeeper", 50.0, 10.0),
                ("Right Flank", 35.0, 30.0),
                ("Left Flank", 65.0, 30.0),
                ("Right Flank", 40.0, 55.0),
                ("Left Flank", 60.0, 55.0),
                ("Right Flank", 40.0, 85.0),
                ("Left Flank", 60.0, 85.0),
            ]),
        ),
        // 8-a-side
        Formation::new(
            "3-3-1",
            "3-3-1 (8 players)",
            slots(&[
                ("Goalkeeper", 50.0, 10.0),
                ("Right Flank", 25.0, 30.0),
                ("Defender", 50.0, 30.0),
                ("Left Flank", 75.0, 30.0),
                ("Right Flank", 30.0, 55.0),
                ("Universal", 50.0, 55.0),
                ("Left Flank", 70.0, 55.0),
                ("Pivot", 50.0, 85.0),
            ]),
        ),
        Formation::new(
            "3-2-2",
            "3-2-2 (8 players)",
            slots(&[
                ("Goalkeeper", 50.0, 10.0),
                ("Right Flank", 25.0, 30.0),
                ("Defender", 50.0, 30.0),
                ("Left Flank", 75.0, 30.0),
                ("Right Flank", 40.0, 55.0),
                ("Left Flank", 60.0, 55.0),
                ("Right Flank", 40.0, 85.0),
                ("Left Flank", 60.0, 85.0),
            ]),
        ),
        Formation::new(
            "2-4-1",
            "2-4-1 (8 players)",
            slots(&[
                ("Goalkeeper", 50.0, 10.0),
                ("Right Flank", 35.0, 30.0),
                ("Left Flank", 65.0, 30.0),
                ("Right Flank", 25.0, 55.0),
                ("Universal", 42.0, 55.0),
                ("Universal", 58.0, 55.0),
                ("Left Flank", 75.0, 55.0),
                ("Pivot", 50.0, 85.0),
            ]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formation::{role_priority, UNKNOWN_ROLE_PRIORITY};

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = FormationCatalog::builtin();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.all()[0].id, DEFAULT_FORMATION_ID);
        assert_eq!(catalog.squad_sizes(), vec![5, 7, 8]);
        assert_eq!(catalog.for_squad_size(7).len(), 3);
        assert!(catalog.get("4-3-3").is_none());
    }

    #[test]
    fn test_builtin_ids_unique() {
        let ids: Vec<&str> = FormationCatalog::builtin().all().iter().map(|f| f.id.as_str()).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn test_builtin_slots_well_formed() {
        for formation in FormationCatalog::builtin().all() {
            let keepers = formation.positions.iter().filter(|s| s.position == "Goalkeeper").count();
            assert_eq!(keepers, 1, "{}", formation.id);
            for slot in &formation.positions {
                assert!(slot.field_pos().is_within_bounds(), "{} {:?}", formation.id, slot);
                assert_ne!(role_priority(&slot.position), UNKNOWN_ROLE_PRIORITY);
            }
        }
    }

    #[test]
    fn test_slot_json_shape() {
        let formation = FormationCatalog::builtin().get("2-1-1").unwrap();
        let json = serde_json::to_value(formation).unwrap();
        assert_eq!(json["positions"][4]["position"], "Pivot");
        assert_eq!(json["positions"][4]["y"], 85.0);
    }
}
