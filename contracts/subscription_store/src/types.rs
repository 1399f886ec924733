use soroban_sdk::{contracterror, contracttype, Address, String};

/// Length of one subscription day-unit in seconds (30 days).
pub const EXPIRY_UNIT_SECONDS: u64 = 2_592_000;

/// Largest `days` value accepted at creation.
pub const MAX_DAYS: u32 = 65_535;

/// Upper bound on live records held by the store.
///
/// [`crate::SubscriptionStore::create_subscription`] returns
/// [`Error::StorageFailure`] once this many records exist.
pub const MAX_SUBSCRIPTIONS: u32 = 100_000;

/// Largest number of records a single listing call may return.
///
/// Full listings over more records than this fail with
/// [`Error::StorageFailure`]; page through them with
/// [`crate::SubscriptionStore::get_subscriptions_page`] instead. Page sizes are
/// clamped to this value.
pub const MAX_LIST_LEN: u32 = 200;

/// Ids held per index bucket entry.
pub const BUCKET_SIZE: u32 = 64;

/// Length of a generated subscription id (hyphenated UUID v4 text).
pub const ID_LEN: usize = 36;

/// Persistent storage TTL in ledgers (~30 days at 5 s/ledger).
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;

/// An ordered list of subscription ids kept in storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IdList {
    /// Every live record.
    All,
    /// Live records of one subscriber.
    Subscriber(Address),
}

/// Storage keys.
///
/// `Owner` lives in instance storage; everything else is persistent, one
/// ledger entry per key.
///
/// An [`IdList`] is split over `ListBucket` entries of at most
/// [`BUCKET_SIZE`] ids so no single entry grows with the store. `ListSlot`
/// records where an id sits so it can be removed without a scan.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    /// A single subscription record keyed by its id.
    Subscription(String),
    /// Number of ids in the list.
    ListLen(IdList),
    /// Ids at positions `n * BUCKET_SIZE .. (n + 1) * BUCKET_SIZE`.
    ListBucket(IdList, u32),
    /// Position of an id within the list.
    ListSlot(IdList, String),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    /// Creation arguments out of range (`price <= 0`, `days` not in `1..=65535`).
    InvalidPayload = 400,
    Unauthorized = 401,
    NotFound = 404,
    AlreadyInitialized = 409,
    /// Non-positive amount passed to renewal.
    InvalidInput = 422,
    /// The backing store rejected the operation (capacity reached, id space
    /// exhausted, listing too large, or an index entry without a record).
    StorageFailure = 507,
    /// Price or timestamp arithmetic left its integer range.
    Overflow = 1001,
    NotInitialized = 1002,
}

impl Error {
    pub const fn to_code(self) -> u32 {
        match self {
            Error::InvalidPayload => 400,
            Error::Unauthorized => 401,
            Error::NotFound => 404,
            Error::AlreadyInitialized => 409,
            Error::InvalidInput => 422,
            Error::StorageFailure => 507,
            Error::Overflow => 1001,
            Error::NotInitialized => 1002,
        }
    }
}

/// A time-bounded subscription record.
///
/// `subscriber`, `days`, `created_at` and `expiry_date` never change once the
/// record is stored. `price` moves through renewal and withdrawal only.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
    pub id: String,
    pub subscriber: Address,
    pub price: i128,
    pub days: u32,
    pub created_at: u64,
    /// `created_at + days * EXPIRY_UNIT_SECONDS`.
    pub expiry_date: u64,
    /// Ledger timestamp of the last renewal or withdrawal, if any.
    pub updated_at: Option<u64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchWithdrawResult {
    pub success: bool,
    pub error_code: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscriptionCreatedEvent {
    pub id: String,
    pub subscriber: Address,
    pub price: i128,
    pub days: u32,
    pub expiry_date: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscriptionCancelledEvent {
    pub id: String,
    pub subscriber: Address,
    pub price: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SubscriptionRenewedEvent {
    pub id: String,
    pub subscriber: Address,
    pub additional_price: i128,
    pub new_price: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct FundsWithdrawnEvent {
    pub id: String,
    pub owner: Address,
    pub amount: i128,
}
