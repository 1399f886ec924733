//! Owner settlement: withdraw_funds, batch_withdraw_funds.
//!
//! **PRs that only change settlement should edit this file only.**
//!
//! Settlement zeroes the recorded `price` of a subscription. No tokens move.

use crate::admin::require_owner;
use crate::storage;
use crate::types::{BatchWithdrawResult, Error, FundsWithdrawnEvent, Subscription};
use soroban_sdk::{Address, Env, String, Symbol, Vec};

/// Settle a single subscription. Only the owner may call this.
pub fn withdraw_funds(env: &Env, caller: Address, id: String) -> Result<Subscription, Error> {
    caller.require_auth();
    let sub = storage::get(env, &id).ok_or(Error::NotFound)?;
    require_owner(env, &caller)?;
    settle(env, &caller, sub)
}

/// Settle several subscriptions under one owner authorization.
///
/// # Guarantees
/// - The owner authorizes once for the entire batch.
/// - Each id is settled independently; a failed entry does not stop the batch
///   and leaves its record unchanged.
/// - Returns one [`BatchWithdrawResult`] per id, in input order.
pub fn batch_withdraw_funds(
    env: &Env,
    caller: Address,
    ids: Vec<String>,
) -> Result<Vec<BatchWithdrawResult>, Error> {
    caller.require_auth();
    require_owner(env, &caller)?;

    let mut results: Vec<BatchWithdrawResult> = Vec::new(env);
    for id in ids.iter() {
        let settled = storage::get(env, &id)
            .ok_or(Error::NotFound)
            .and_then(|sub| settle(env, &caller, sub));
        let res = match settled {
            Ok(_) => BatchWithdrawResult {
                success: true,
                error_code: 0,
            },
            Err(e) => BatchWithdrawResult {
                success: false,
                error_code: e.to_code(),
            },
        };
        results.push_back(res);
    }
    Ok(results)
}

/// Zero the price of `sub`. The caller must already be checked as owner.
fn settle(env: &Env, owner: &Address, mut sub: Subscription) -> Result<Subscription, Error> {
    let amount = sub.price;
    sub.price = 0;
    sub.updated_at = Some(env.ledger().timestamp());
    storage::insert(env, &sub)?;

    env.events().publish(
        (Symbol::new(env, "withdrawn"), sub.id.clone()),
        FundsWithdrawnEvent {
            id: sub.id.clone(),
            owner: owner.clone(),
            amount,
        },
    );
    Ok(sub)
}
