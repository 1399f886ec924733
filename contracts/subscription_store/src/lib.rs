#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────
mod admin;
mod id;
mod queries;
mod settlement;
mod storage;
mod subscription;
pub mod types;

// ── Re-exports (used by tests and external consumers) ────────────────────────
pub use subscription::compute_expiry;
pub use types::*;

use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct SubscriptionStore;

#[contractimpl]
impl SubscriptionStore {
    // ── Owner / Config ───────────────────────────────────────────────────

    /// Initialize the store with its owner. Fails with
    /// [`Error::AlreadyInitialized`] on every call after the first.
    pub fn init(env: Env, owner: Address) -> Result<(), Error> {
        admin::do_init(&env, owner)
    }

    /// Get the owner address.
    pub fn get_owner(env: Env) -> Result<Address, Error> {
        admin::get_owner(&env)
    }

    // ── Subscription lifecycle ───────────────────────────────────────────

    /// Create a subscription for `caller` worth `price` over `days` units.
    ///
    /// The record's expiry is `now + days * 2_592_000` seconds.
    ///
    /// # Errors
    ///
    /// | Variant | Reason |
    /// |---------|--------|
    /// | `InvalidPayload` | `price <= 0`, `days == 0` or `days > 65535`. |
    /// | `Overflow` | Expiry does not fit in a `u64` timestamp. |
    /// | `StorageFailure` | Store is at capacity or no unused id could be drawn. |
    pub fn create_subscription(
        env: Env,
        caller: Address,
        price: i128,
        days: u32,
    ) -> Result<Subscription, Error> {
        subscription::do_create_subscription(&env, caller, price, days)
    }

    /// Remove a subscription and return its last state. Subscriber only.
    pub fn cancel_subscription(
        env: Env,
        caller: Address,
        id: String,
    ) -> Result<Subscription, Error> {
        subscription::do_cancel_subscription(&env, caller, id)
    }

    /// Increase a subscription's price by `additional_price`. Subscriber only.
    ///
    /// `days`, `created_at` and `expiry_date` are left as they were.
    pub fn renew_subscription(
        env: Env,
        caller: Address,
        id: String,
        additional_price: i128,
    ) -> Result<Subscription, Error> {
        subscription::do_renew_subscription(&env, caller, id, additional_price)
    }

    // ── Settlement ───────────────────────────────────────────────────────

    /// Owner zeroes the recorded price of a subscription.
    pub fn withdraw_funds(env: Env, caller: Address, id: String) -> Result<Subscription, Error> {
        settlement::withdraw_funds(&env, caller, id)
    }

    /// Owner settles several subscriptions in one call, one result per id.
    pub fn batch_withdraw_funds(
        env: Env,
        caller: Address,
        ids: Vec<String>,
    ) -> Result<Vec<BatchWithdrawResult>, Error> {
        settlement::batch_withdraw_funds(&env, caller, ids)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Read a subscription by id. Only its subscriber may read it.
    pub fn get_subscription(env: Env, caller: Address, id: String) -> Result<Subscription, Error> {
        queries::get_subscription(&env, caller, id)
    }

    /// Every live subscription of `subscriber`; `NotFound` when there are none.
    pub fn get_subscriptions_by_subscriber(
        env: Env,
        subscriber: Address,
    ) -> Result<Vec<Subscription>, Error> {
        queries::get_subscriptions_by_subscriber(&env, subscriber)
    }

    /// Every live subscription in the store.
    pub fn get_all_subscriptions(env: Env) -> Result<Vec<Subscription>, Error> {
        queries::get_all_subscriptions(&env)
    }

    /// Return live subscriptions, paginated, in the order of `get_all_subscriptions`.
    pub fn get_subscriptions_page(
        env: Env,
        start: u32,
        limit: u32,
    ) -> Result<Vec<Subscription>, Error> {
        queries::get_subscriptions_page(&env, start, limit)
    }

    /// Number of live subscriptions.
    pub fn get_subscription_count(env: Env) -> u32 {
        queries::get_subscription_count(&env)
    }

    /// Number of live subscriptions held by `subscriber`.
    pub fn count_by_subscriber(env: Env, subscriber: Address) -> u32 {
        queries::count_by_subscriber(&env, subscriber)
    }

    /// Whether the ledger clock has reached the subscription's expiry date.
    /// Expired records stay in the store until cancelled.
    pub fn is_expired(env: Env, id: String) -> Result<bool, Error> {
        queries::is_expired(&env, id)
    }
}
