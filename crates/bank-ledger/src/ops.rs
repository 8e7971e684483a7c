//! Transaction operations.
//!
//! Every operation validates completely before it mutates anything, so a
//! failed call leaves balances and histories exactly as they were.

use tracing::debug;

use crate::account::Account;
use crate::error::{LedgerError, Result};

/// Add `amount` to the account's balance. Returns the new balance.
pub fn deposit(account: &mut Account, amount: i64) -> Result<i64> {
    let balance = account.balance();
    if amount < 0 {
        return Err(LedgerError::InvalidAmount { amount, balance });
    }
    let new_balance = balance
        .checked_add(amount)
        .ok_or(LedgerError::Overflow { balance, amount })?;

    account.apply(amount, new_balance);
    debug!(account = account.name(), amount, balance = new_balance, "deposit");
    Ok(new_balance)
}

/// Remove `amount` from the account's balance. Returns the new balance.
pub fn withdraw(account: &mut Account, amount: i64) -> Result<i64> {
    let balance = account.balance();
    check_debit(balance, amount)?;

    let new_balance = balance - amount;
    account.apply(-amount, new_balance);
    debug!(account = account.name(), amount, balance = new_balance, "withdraw");
    Ok(new_balance)
}

/// Move `amount` from `source` to `destination`.
///
/// Returns the resulting `(source, destination)` balances. Both accounts gain
/// exactly one history record on success and none on failure.
pub fn transfer(
    source: &mut Account,
    destination: &mut Account,
    amount: i64,
) -> Result<(i64, i64)> {
    let source_balance = source.balance();
    check_debit(source_balance, amount)?;

    let destination_balance = destination.balance();
    let new_destination = destination_balance
        .checked_add(amount)
        .ok_or(LedgerError::Overflow {
            balance: destination_balance,
            amount,
        })?;
    let new_source = source_balance - amount;

    source.apply(-amount, new_source);
    destination.apply(amount, new_destination);
    debug!(
        from = source.name(),
        to = destination.name(),
        amount,
        "transfer"
    );
    Ok((new_source, new_destination))
}

/// Transfer where source and destination are the same account.
///
/// Validated like any transfer; logs the debit and then the credit, leaving
/// the balance where it started.
pub fn transfer_within(account: &mut Account, amount: i64) -> Result<(i64, i64)> {
    let balance = account.balance();
    check_debit(balance, amount)?;

    account.apply(-amount, balance - amount);
    account.apply(amount, balance);
    debug!(account = account.name(), amount, "transfer to self");
    Ok((balance, balance))
}

fn check_debit(balance: i64, amount: i64) -> Result<()> {
    if amount < 0 {
        return Err(LedgerError::InvalidAmount { amount, balance });
    }
    if amount > balance {
        return Err(LedgerError::InsufficientFunds {
            requested: amount,
            available: balance,
        });
    }
    Ok(())
}
