//! Role labels and their assignment priority
//!
//! Priority decides which player gets first pick of a contested slot and
//! the rank used for positional fallback. Lower value = picked earlier.

/// Role labels offered by the player form, in display order.
pub const ROLE_LABELS: [&str; 8] = [
    "Goalkeeper",
    "Defender",
    "Right Flank",
    "Left Flank",
    "Universal",
    "Right Winger",
    "Left Winger",
    "Pivot",
];

/// Priority for labels outside the lookup table (sorted last)
pub const UNKNOWN_ROLE_PRIORITY: u32 = u32::MAX;

/// Fixed role → priority lookup. Labels are matched exactly.
pub fn role_priority(label: &str) -> u32 {
    match label {
        "Goalkeeper" => 1,
        "Defender" => 2,
        "Right Flank" | "Left Flank" => 3,
        "Universal" => 4,
        "Right Winger" | "Left Winger" => 5,
        "Pivot" => 6,
        _ => UNKNOWN_ROLE_PRIORITY,
    }
}
