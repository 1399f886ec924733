//! Record store: the id -> Subscription map plus the id lists that make it listable.
//!
//! Soroban storage cannot be enumerated, so every insert of a new id and every
//! remove keeps [`IdList::All`] and the subscriber's [`IdList::Subscriber`] in
//! step with the records themselves.
//!
//! A list is laid out as a dense sequence of positions `0..len`, stored in
//! `BUCKET_SIZE`-id bucket entries. Appends touch only the last bucket.
//! Removal moves the last id into the freed position, so the order of a list
//! is stable only while nothing is removed from it.

use crate::types::{
    DataKey, Error, IdList, Subscription, BUCKET_SIZE, MAX_LIST_LEN, MAX_SUBSCRIPTIONS,
    PERSISTENT_BUMP_LEDGERS,
};
use soroban_sdk::{Env, String, Vec};

fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

// ── Id lists ─────────────────────────────────────────────────────────────────

pub fn list_len(env: &Env, list: &IdList) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::ListLen(list.clone()))
        .unwrap_or(0)
}

fn set_list_len(env: &Env, list: &IdList, len: u32) {
    let key = DataKey::ListLen(list.clone());
    if len == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &len);
        bump(env, &key);
    }
}

fn load_bucket(env: &Env, list: &IdList, bucket: u32) -> Vec<String> {
    env.storage()
        .persistent()
        .get(&DataKey::ListBucket(list.clone(), bucket))
        .unwrap_or(Vec::new(env))
}

fn store_bucket(env: &Env, list: &IdList, bucket: u32, ids: &Vec<String>) {
    let key = DataKey::ListBucket(list.clone(), bucket);
    if ids.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, ids);
        bump(env, &key);
    }
}

fn set_slot(env: &Env, list: &IdList, id: &String, pos: u32) {
    let key = DataKey::ListSlot(list.clone(), id.clone());
    env.storage().persistent().set(&key, &pos);
    bump(env, &key);
}

fn push_id(env: &Env, list: &IdList, id: &String) {
    let len = list_len(env, list);
    let bucket = len / BUCKET_SIZE;
    let mut ids = load_bucket(env, list, bucket);
    ids.push_back(id.clone());
    store_bucket(env, list, bucket, &ids);
    set_slot(env, list, id, len);
    set_list_len(env, list, len + 1);
}

fn drop_id(env: &Env, list: &IdList, id: &String) -> Result<(), Error> {
    let slot_key = DataKey::ListSlot(list.clone(), id.clone());
    let Some(pos) = env.storage().persistent().get::<_, u32>(&slot_key) else {
        return Ok(());
    };
    let len = list_len(env, list);
    if len == 0 || pos >= len {
        return Err(Error::StorageFailure);
    }
    let last = len - 1;
    let last_bucket = last / BUCKET_SIZE;

    if pos != last {
        let moved = load_bucket(env, list, last_bucket)
            .get(last % BUCKET_SIZE)
            .ok_or(Error::StorageFailure)?;
        let mut ids = load_bucket(env, list, pos / BUCKET_SIZE);
        ids.set(pos % BUCKET_SIZE, moved.clone());
        store_bucket(env, list, pos / BUCKET_SIZE, &ids);
        set_slot(env, list, &moved, pos);
    }

    let mut tail = load_bucket(env, list, last_bucket);
    tail.pop_back();
    store_bucket(env, list, last_bucket, &tail);
    env.storage().persistent().remove(&slot_key);
    set_list_len(env, list, last);
    Ok(())
}

/// Ids at positions `start..end` of `list`; `end` must not exceed its length.
fn ids_in(env: &Env, list: &IdList, start: u32, end: u32) -> Vec<String> {
    let mut out = Vec::new(env);
    let mut pos = start;
    while pos < end {
        let bucket = pos / BUCKET_SIZE;
        let ids = load_bucket(env, list, bucket);
        let bucket_end = ((bucket + 1) * BUCKET_SIZE).min(end);
        for i in (pos % BUCKET_SIZE)..(bucket_end - bucket * BUCKET_SIZE) {
            if let Some(id) = ids.get(i) {
                out.push_back(id);
            }
        }
        pos = bucket_end;
    }
    out
}

// ── Records ──────────────────────────────────────────────────────────────────

pub fn live_count(env: &Env) -> u32 {
    list_len(env, &IdList::All)
}

pub fn contains(env: &Env, id: &String) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Subscription(id.clone()))
}

pub fn get(env: &Env, id: &String) -> Option<Subscription> {
    env.storage()
        .persistent()
        .get(&DataKey::Subscription(id.clone()))
}

/// Insert or replace `sub` under `sub.id`.
///
/// Replacing an existing record leaves the lists untouched. A new id is
/// appended to both lists and fails with [`Error::StorageFailure`] when the
/// store already holds [`MAX_SUBSCRIPTIONS`] records.
pub fn insert(env: &Env, sub: &Subscription) -> Result<(), Error> {
    let key = DataKey::Subscription(sub.id.clone());
    if !env.storage().persistent().has(&key) {
        if live_count(env) >= MAX_SUBSCRIPTIONS {
            return Err(Error::StorageFailure);
        }
        push_id(env, &IdList::All, &sub.id);
        push_id(env, &IdList::Subscriber(sub.subscriber.clone()), &sub.id);
    }
    env.storage().persistent().set(&key, sub);
    bump(env, &key);
    Ok(())
}

/// Remove the record for `id`, returning it if it was present.
pub fn remove(env: &Env, id: &String) -> Result<Option<Subscription>, Error> {
    let key = DataKey::Subscription(id.clone());
    let Some(sub) = env.storage().persistent().get::<_, Subscription>(&key) else {
        return Ok(None);
    };
    env.storage().persistent().remove(&key);
    drop_id(env, &IdList::All, id)?;
    drop_id(env, &IdList::Subscriber(sub.subscriber.clone()), id)?;
    Ok(Some(sub))
}

fn resolve(env: &Env, ids: &Vec<String>) -> Result<Vec<Subscription>, Error> {
    let mut out = Vec::new(env);
    for id in ids.iter() {
        out.push_back(get(env, &id).ok_or(Error::StorageFailure)?);
    }
    Ok(out)
}

/// Every record in `list`, failing with [`Error::StorageFailure`] when the
/// list holds more than [`MAX_LIST_LEN`] ids.
pub fn list_all_of(env: &Env, list: &IdList) -> Result<Vec<Subscription>, Error> {
    let len = list_len(env, list);
    if len > MAX_LIST_LEN {
        return Err(Error::StorageFailure);
    }
    resolve(env, &ids_in(env, list, 0, len))
}

/// Records `start..start + limit` of [`IdList::All`], with `limit` clamped to
/// [`MAX_LIST_LEN`].
pub fn list_page(env: &Env, start: u32, limit: u32) -> Result<Vec<Subscription>, Error> {
    let len = list_len(env, &IdList::All);
    if start >= len || limit == 0 {
        return Ok(Vec::new(env));
    }
    let end = start.saturating_add(limit.min(MAX_LIST_LEN)).min(len);
    resolve(env, &ids_in(env, &IdList::All, start, end))
}
