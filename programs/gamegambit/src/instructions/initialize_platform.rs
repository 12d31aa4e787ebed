use anchor_lang::prelude::*;

use crate::events::PlatformInitialized;
use crate::state::Platform;

#[derive(Accounts)]
pub struct InitializePlatform<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + Platform::INIT_SPACE,
        seeds = [Platform::SEED],
        bump,
    )]
    pub platform: Account<'info, Platform>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: Treasury wallet that owns the fee token accounts.
    pub treasury: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializePlatform>,
    moderator: Pubkey,
    retract_window_seconds: Option<i64>,
) -> Result<()> {
    let platform = &mut ctx.accounts.platform;
    platform.configure(
        ctx.accounts.authority.key(),
        moderator,
        ctx.accounts.treasury.key(),
        retract_window_seconds,
        ctx.bumps.platform,
    )?;

    emit!(PlatformInitialized {
        authority: platform.authority,
        moderator: platform.moderator,
        treasury: platform.treasury,
        retract_window_seconds: platform.retract_window_seconds,
    });

    Ok(())
}
