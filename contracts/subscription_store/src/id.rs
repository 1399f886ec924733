//! Subscription id allocation.
//!
//! Ids are random UUID v4 strings drawn from the contract PRNG. The PRNG is
//! seeded by the host per invocation, so ids are unpredictable to callers but
//! deterministic under test.

use crate::storage;
use crate::types::{Error, ID_LEN};
use soroban_sdk::{Env, String};

/// Draws before giving up on finding an unused id.
const MAX_ATTEMPTS: u32 = 8;

const HEX: &[u8; 16] = b"0123456789abcdef";

fn format_uuid(raw: &[u8; 16]) -> [u8; ID_LEN] {
    let mut out = [0u8; ID_LEN];
    let mut pos = 0;
    for (i, byte) in raw.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            out[pos] = b'-';
            pos += 1;
        }
        out[pos] = HEX[(byte >> 4) as usize];
        out[pos + 1] = HEX[(byte & 0x0f) as usize];
        pos += 2;
    }
    out
}

fn random_uuid(env: &Env) -> String {
    let mut raw = [0u8; 16];
    env.prng().fill(&mut raw);
    // version 4, RFC 4122 variant
    raw[6] = (raw[6] & 0x0f) | 0x40;
    raw[8] = (raw[8] & 0x3f) | 0x80;
    String::from_bytes(env, &format_uuid(&raw))
}

/// Allocate an id not held by any live record.
///
/// # Errors
/// [`Error::StorageFailure`] if every draw collided with a stored id.
pub fn next_id(env: &Env) -> Result<String, Error> {
    for _ in 0..MAX_ATTEMPTS {
        let id = random_uuid(env);
        if !storage::contains(env, &id) {
            return Ok(id);
        }
    }
    Err(Error::StorageFailure)
}
