//! Subscription lifecycle: create, cancel, renew.
//!
//! **PRs that only change subscriber-facing lifecycle rules should edit this file only.**

use crate::id;
use crate::storage;
use crate::types::{
    Error, Subscription, SubscriptionCancelledEvent, SubscriptionCreatedEvent,
    SubscriptionRenewedEvent, EXPIRY_UNIT_SECONDS, MAX_DAYS,
};
use soroban_sdk::{Address, Env, String, Symbol};

/// `created_at + days * EXPIRY_UNIT_SECONDS`.
pub fn compute_expiry(created_at: u64, days: u32) -> Result<u64, Error> {
    (days as u64)
        .checked_mul(EXPIRY_UNIT_SECONDS)
        .and_then(|span| created_at.checked_add(span))
        .ok_or(Error::Overflow)
}

/// Load `id` and assert `caller` is its subscriber.
pub fn load_owned(env: &Env, caller: &Address, id: &String) -> Result<Subscription, Error> {
    let sub = storage::get(env, id).ok_or(Error::NotFound)?;
    if sub.subscriber != *caller {
        return Err(Error::Unauthorized);
    }
    Ok(sub)
}

pub fn do_create_subscription(
    env: &Env,
    caller: Address,
    price: i128,
    days: u32,
) -> Result<Subscription, Error> {
    caller.require_auth();
    if price <= 0 || days == 0 || days > MAX_DAYS {
        return Err(Error::InvalidPayload);
    }

    let created_at = env.ledger().timestamp();
    let sub = Subscription {
        id: id::next_id(env)?,
        subscriber: caller,
        price,
        days,
        created_at,
        expiry_date: compute_expiry(created_at, days)?,
        updated_at: None,
    };
    storage::insert(env, &sub)?;

    env.events().publish(
        (Symbol::new(env, "created"), sub.id.clone()),
        SubscriptionCreatedEvent {
            id: sub.id.clone(),
            subscriber: sub.subscriber.clone(),
            price: sub.price,
            days: sub.days,
            expiry_date: sub.expiry_date,
        },
    );
    Ok(sub)
}

pub fn do_cancel_subscription(
    env: &Env,
    caller: Address,
    id: String,
) -> Result<Subscription, Error> {
    caller.require_auth();
    load_owned(env, &caller, &id)?;
    let sub = storage::remove(env, &id)?.ok_or(Error::NotFound)?;

    env.events().publish(
        (Symbol::new(env, "cancelled"), id),
        SubscriptionCancelledEvent {
            id: sub.id.clone(),
            subscriber: sub.subscriber.clone(),
            price: sub.price,
        },
    );
    Ok(sub)
}

/// Add `additional_price` to an existing subscription.
///
/// All checks run against the stored record before it is touched; only then is
/// it removed and reinserted under the same id. A rejected renewal leaves the
/// stored record untouched.
pub fn do_renew_subscription(
    env: &Env,
    caller: Address,
    id: String,
    additional_price: i128,
) -> Result<Subscription, Error> {
    caller.require_auth();
    if additional_price <= 0 {
        return Err(Error::InvalidInput);
    }

    let current = load_owned(env, &caller, &id)?;
    let new_price = current
        .price
        .checked_add(additional_price)
        .ok_or(Error::Overflow)?;

    let mut sub = storage::remove(env, &id)?.ok_or(Error::NotFound)?;
    sub.price = new_price;
    sub.updated_at = Some(env.ledger().timestamp());
    storage::insert(env, &sub)?;

    env.events().publish(
        (Symbol::new(env, "renewed"), id),
        SubscriptionRenewedEvent {
            id: sub.id.clone(),
            subscriber: sub.subscriber.clone(),
            additional_price,
            new_price,
        },
    );
    Ok(sub)
}
