/// SQLite persistence for swap info records
pub mod swap_info;

pub use swap_info::SwapInfoDb;

use crate::errors::SwapCacheError;
use crate::swaps::types::{SwapInfo, SwapInfoKey};

/// Keyed storage behind `SwapInfoCache`.
///
/// Calls block; the cache runs them on tokio's blocking pool. `Ok(None)`
/// means no record exists, `Err` means the store could not answer.
pub trait SwapInfoStore: Send + Sync {
    fn get(&self, key: &SwapInfoKey) -> Result<Option<SwapInfo>, SwapCacheError>;

    /// Slot `i` of the result answers `keys[i]`
    fn get_many(&self, keys: &[SwapInfoKey]) -> Result<Vec<Option<SwapInfo>>, SwapCacheError>;

    /// Insert or replace the record stored under its key
    fn put(&self, info: &SwapInfo) -> Result<bool, SwapCacheError>;

    /// True iff a row existed
    fn remove(&self, info: &SwapInfo) -> Result<bool, SwapCacheError>;
}
