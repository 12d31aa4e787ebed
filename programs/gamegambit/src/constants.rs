/// Maximum byte length of an external (e.g. Lichess) game id.
pub const MAX_EXTERNAL_GAME_ID_LEN: usize = 20;

/// Platform cut of an escrow pot on settlement (1500 = 15%).
pub const ESCROW_FEE_BPS: u16 = 1_500;

pub const BPS_DENOMINATOR: u64 = 10_000;

/// Grace window after both votes agree, used when the platform is set up
/// without an explicit value.
pub const DEFAULT_RETRACT_WINDOW_SECONDS: i64 = 300;

pub const MAX_RETRACT_WINDOW_SECONDS: i64 = 86_400;
