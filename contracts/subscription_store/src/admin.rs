//! Owner configuration: init, owner lookup and the owner gate used by settlement.
//!
//! **PRs that only change owner or init behavior should edit this file only.**

use crate::types::{DataKey, Error, PERSISTENT_BUMP_LEDGERS};
use soroban_sdk::{Address, Env, Symbol};

/// Record `owner` as the store owner. The owner can only be set once.
pub fn do_init(env: &Env, owner: Address) -> Result<(), Error> {
    owner.require_auth();
    let storage = env.storage().instance();
    if storage.has(&DataKey::Owner) {
        return Err(Error::AlreadyInitialized);
    }
    storage.set(&DataKey::Owner, &owner);
    storage.extend_ttl(PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
    env.events().publish((Symbol::new(env, "init"),), owner);
    Ok(())
}

pub fn get_owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

/// Asserts `caller` is the recorded owner.
///
/// A store without an owner rejects every caller with [`Error::Unauthorized`].
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    let owner: Address = env
        .storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::Unauthorized)?;
    if *caller != owner {
        return Err(Error::Unauthorized);
    }
    Ok(())
}
