//! Persistence seam for OTP records.

mod in_memory;

pub use in_memory::InMemoryRecordStore;

use crate::error::Result;
use crate::record::{NewOtpRecord, OtpRecord};
use async_trait::async_trait;

/// Outcome of the atomic consume step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkUsed {
    /// This caller won: the record flipped from unused to used.
    Marked,
    /// The record was already consumed by an earlier (or concurrent) caller.
    AlreadyUsed,
}

/// Durable storage for OTP records.
///
/// Implementations back the lifecycle controller; the controller itself holds
/// no state between calls. The contract that matters most is
/// [`mark_used_if_unused`](RecordStore::mark_used_if_unused): it MUST be a
/// store-level atomic check-and-set. Two concurrent verifications of the same
/// still-valid record must not both observe `used == false` and both succeed;
/// at most one caller may ever see [`MarkUsed::Marked`].
///
/// # Example
///
/// ```rust,ignore
/// use otpflow::store::{RecordStore, MarkUsed};
/// use async_trait::async_trait;
///
/// struct PostgresRecordStore { pool: sqlx::PgPool }
///
/// #[async_trait]
/// impl RecordStore for PostgresRecordStore {
///     async fn mark_used_if_unused(&self, id: &str) -> Result<MarkUsed> {
///         // UPDATE otp_records SET used = true, verified = true
///         //   WHERE id = $1 AND used = false
///         // -- rows_affected == 1 maps to MarkUsed::Marked
///     }
///
///     // ... implement create and get
/// }
/// ```
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new record and return its store-assigned id.
    async fn create(&self, record: NewOtpRecord) -> Result<String>;

    /// Fetch a record by id. `Ok(None)` means no such record.
    async fn get(&self, id: &str) -> Result<Option<OtpRecord>>;

    /// Atomically consume the record: set `used` (and `verified`) only if
    /// currently unused. Unknown ids report [`MarkUsed::AlreadyUsed`]; the
    /// controller has already fetched the record by then, so a vanished id
    /// means someone else raced ahead.
    async fn mark_used_if_unused(&self, id: &str) -> Result<MarkUsed>;
}
