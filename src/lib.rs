pub mod config;
pub mod database;
pub mod errors;
pub mod logger;
pub mod swaps;

pub use config::Config;
pub use database::{SwapInfoDb, SwapInfoStore};
pub use errors::SwapCacheError;
pub use swaps::{SwapInfo, SwapInfoCache, SwapInfoKey, SwapInfoOptions};
