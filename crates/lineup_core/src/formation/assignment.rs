//! Formation assignment engine
//!
//! Maps an arbitrary roster onto a formation's slots:
//!
//! 1. Rank the roster by (role priority, jersey number). Ties keep roster
//!    order.
//! 2. Label pass: walk the ranked roster; each player takes the next
//!    unclaimed slot carrying exactly their role label. Slots of one label
//!    are handed out in formation-list order, players of one label in rank
//!    order. Labels outside the priority table never label-match, even
//!    against a custom slot with the same text.
//! 3. Fallback pass: a player left without a label slot takes the slot at
//!    their rank index, if the formation has one.
//! 4. Anyone else keeps their current coordinates.
//!
//! The label pass completes for the whole roster before any fallback is
//! resolved. Slot coordinates are written verbatim (no inset clamping).

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::Formation;
use super::roles::{role_priority, UNKNOWN_ROLE_PRIORITY};
use crate::field::FieldPos;
use crate::models::{Player, Team};

/// How one roster entry was placed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Took a slot with the same role label
    Label { slot: usize, pos: FieldPos },
    /// Took the slot at the player's priority rank
    Positional { slot: usize, pos: FieldPos },
    /// No slot available; coordinates unchanged
    Unassigned,
}

impl Placement {
    pub fn slot(&self) -> Option<usize> {
        match self {
            Placement::Label { slot, .. } | Placement::Positional { slot, .. } => Some(*slot),
            Placement::Unassigned => None,
        }
    }

    pub fn target(&self) -> Option<FieldPos> {
        match self {
            Placement::Label { pos, .. } | Placement::Positional { pos, .. } => Some(*pos),
            Placement::Unassigned => None,
        }
    }
}

/// Result of mapping a roster onto a formation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationAssignment {
    pub formation_id: String,
    /// One entry per player, in roster order
    pub placements: Vec<Placement>,
    /// Roster indices sorted by assignment priority
    pub priority_order: Vec<usize>,
}

impl FormationAssignment {
    /// New roster with slot coordinates applied; other fields untouched.
    pub fn apply(&self, players: &[Player]) -> Vec<Player> {
        players
            .iter()
            .zip(&self.placements)
            .map(|(player, placement)| match placement.target() {
                Some(pos) => player.with_field_pos(pos),
                None => player.clone(),
            })
            .collect()
    }

    pub fn label_matches(&self) -> usize {
        self.placements.iter().filter(|p| matches!(p, Placement::Label { .. })).count()
    }

    pub fn positional_fallbacks(&self) -> usize {
        self.placements.iter().filter(|p| matches!(p, Placement::Positional { .. })).count()
    }

    pub fn unassigned(&self) -> usize {
        self.placements.iter().filter(|p| matches!(p, Placement::Unassigned)).count()
    }
}

/// Roster indices ordered by (role priority, jersey number).
///
/// `sort_by_key` is stable, so equal keys keep roster order.
pub fn priority_order(players: &[Player]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..players.len()).collect();
    order.sort_by_key(|&i| (role_priority(&players[i].position), players[i].jersey_number));
    order
}

/// Compute where every roster entry goes in `formation`.
pub fn assign_formation(players: &[Player], formation: &Formation) -> FormationAssignment {
    let order = priority_order(players);

    let mut rank = vec![0usize; players.len()];
    for (r, &index) in order.iter().enumerate() {
        rank[index] = r;
    }

    // Unclaimed slots per label, in formation-list order
    let mut open_slots: HashMap<&str, VecDeque<usize>> = HashMap::new();
    for (slot, entry) in formation.positions.iter().enumerate() {
        open_slots.entry(entry.position.as_str()).or_default().push_back(slot);
    }

    // Label pass, in priority order
    let mut label_slot: Vec<Option<usize>> = vec![None; players.len()];
    for &index in &order {
        let label = players[index].position.as_str();
        if role_priority(label) == UNKNOWN_ROLE_PRIORITY {
            continue;
        }
        if let Some(queue) = open_slots.get_mut(label) {
            label_slot[index] = queue.pop_front();
        }
    }

    // Fallback pass, in roster order
    let placements = (0..players.len())
        .map(|index| match label_slot[index] {
            Some(slot) => Placement::Label { slot, pos: formation.positions[slot].field_pos() },
            None => match formation.positions.get(rank[index]) {
                Some(entry) => Placement::Positional { slot: rank[index], pos: entry.field_pos() },
                None => Placement::Unassigned,
            },
        })
        .collect();

    FormationAssignment { formation_id: formation.id.clone(), placements, priority_order: order }
}

/// Team with `formation` applied: coordinates replaced and the formation id
/// updated, even for an empty roster.
pub fn apply_formation(team: &Team, formation: &Formation) -> Team {
    let assignment = assign_formation(&team.players, formation);

    debug!(
        formation = %formation.id,
        roster = team.players.len(),
        label_matches = assignment.label_matches(),
        fallbacks = assignment.positional_fallbacks(),
        unassigned = assignment.unassigned(),
        "formation assigned"
    );

    Team {
        players: assignment.apply(&team.players),
        formation: formation.id.clone(),
        ..team.clone()
    }
}
