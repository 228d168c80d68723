pub mod player;
pub mod team;
pub mod validation;

pub use player::{Player, PlayerDraft};
pub use team::Team;
pub use validation::{PlayerValidator, ValidationError};
