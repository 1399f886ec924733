//! Read-only entrypoints.

use crate::storage;
use crate::subscription::load_owned;
use crate::types::{Error, IdList, Subscription};
use soroban_sdk::{Address, Env, String, Vec};

pub fn get_subscription(env: &Env, caller: Address, id: String) -> Result<Subscription, Error> {
    caller.require_auth();
    load_owned(env, &caller, &id)
}

/// All live records of `subscriber`. An empty result is reported as
/// [`Error::NotFound`].
pub fn get_subscriptions_by_subscriber(
    env: &Env,
    subscriber: Address,
) -> Result<Vec<Subscription>, Error> {
    let subs = storage::list_all_of(env, &IdList::Subscriber(subscriber))?;
    if subs.is_empty() {
        return Err(Error::NotFound);
    }
    Ok(subs)
}

pub fn get_all_subscriptions(env: &Env) -> Result<Vec<Subscription>, Error> {
    storage::list_all_of(env, &IdList::All)
}

pub fn get_subscriptions_page(
    env: &Env,
    start: u32,
    limit: u32,
) -> Result<Vec<Subscription>, Error> {
    storage::list_page(env, start, limit)
}

pub fn get_subscription_count(env: &Env) -> u32 {
    storage::live_count(env)
}

pub fn count_by_subscriber(env: &Env, subscriber: Address) -> u32 {
    storage::list_len(env, &IdList::Subscriber(subscriber))
}

/// Whether the ledger clock has reached the record's expiry date.
pub fn is_expired(env: &Env, id: String) -> Result<bool, Error> {
    let sub = storage::get(env, &id).ok_or(Error::NotFound)?;
    Ok(env.ledger().timestamp() >= sub.expiry_date)
}
