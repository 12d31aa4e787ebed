pub mod ban_player;
pub mod close_wager;
pub mod create_wager;
pub mod force_close_escrow;
pub mod initialize_escrow;
pub mod initialize_platform;
pub mod initialize_player;
pub mod join_escrow;
pub mod join_wager;
pub mod resolve_escrow;
pub mod resolve_wager;
pub mod retract_escrow_vote;
pub mod retract_vote;
pub mod set_moderator;
pub mod submit_escrow_vote;
pub mod submit_vote;

pub use ban_player::*;
pub use close_wager::*;
pub use create_wager::*;
pub use force_close_escrow::*;
pub use initialize_escrow::*;
pub use initialize_platform::*;
pub use initialize_player::*;
pub use join_escrow::*;
pub use join_wager::*;
pub use resolve_escrow::*;
pub use resolve_wager::*;
pub use retract_escrow_vote::*;
pub use retract_vote::*;
pub use set_moderator::*;
pub use submit_escrow_vote::*;
pub use submit_vote::*;
