use anchor_lang::prelude::*;

use crate::errors::GambitError;
use crate::events::ModeratorUpdated;
use crate::state::Platform;

#[derive(Accounts)]
pub struct SetModerator<'info> {
    #[account(
        mut,
        seeds = [Platform::SEED],
        bump = platform.bump,
        has_one = authority @ GambitError::Unauthorized,
    )]
    pub platform: Account<'info, Platform>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<SetModerator>, moderator: Pubkey) -> Result<()> {
    let platform = &mut ctx.accounts.platform;
    let previous = platform.moderator;
    platform.moderator = moderator;

    emit!(ModeratorUpdated {
        previous,
        moderator,
    });

    Ok(())
}
