pub mod escrow;
pub mod match_status;
pub mod platform;
pub mod player_profile;
pub mod settlement;
pub mod wager;

pub use escrow::*;
pub use match_status::*;
pub use platform::*;
pub use player_profile::*;
pub use settlement::*;
pub use wager::*;
