//! Value movement in and out of record custody.
//!
//! Wagers hold lamports directly in their program-owned PDA; escrows hold
//! tokens in a vault whose authority is the escrow PDA.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, CloseAccount, Transfer};

use crate::errors::GambitError;

/// Move `amount` lamports from a signer into a record via the System
/// program.
pub fn deposit_lamports<'info>(
    system_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    system_program::transfer(
        CpiContext::new(system_program, system_program::Transfer { from, to }),
        amount,
    )
}

/// Debit a program-owned record directly. No CPI, since the System
/// program cannot move lamports out of an account it does not own.
pub fn release_lamports(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    require_keys_neq!(*from.key, *to.key, GambitError::InvalidState);
    let from_balance = from
        .lamports()
        .checked_sub(amount)
        .ok_or(GambitError::MathOverflow)?;
    let to_balance = to
        .lamports()
        .checked_add(amount)
        .ok_or(GambitError::MathOverflow)?;

    **from.try_borrow_mut_lamports()? = from_balance;
    **to.try_borrow_mut_lamports()? = to_balance;
    Ok(())
}

/// Player-signed token transfer into a vault.
pub fn deposit_tokens<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    owner: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    token::transfer(
        CpiContext::new(
            token_program,
            Transfer {
                from,
                to: vault,
                authority: owner,
            },
        ),
        amount,
    )
}

/// PDA-signed token transfer out of a vault.
pub fn release_tokens<'info>(
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    escrow: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token::transfer(
        CpiContext::new_with_signer(
            token_program,
            Transfer {
                from: vault,
                to,
                authority: escrow,
            },
            signer_seeds,
        ),
        amount,
    )
}

/// Close an emptied vault, sending its rent to `destination`.
pub fn close_vault<'info>(
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    destination: AccountInfo<'info>,
    escrow: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    token::close_account(CpiContext::new_with_signer(
        token_program,
        CloseAccount {
            account: vault,
            destination,
            authority: escrow,
        },
        signer_seeds,
    ))
}
