/// Remote services that turn a quote into swap instructions
pub mod jupiter;

pub use jupiter::JupiterClient;

use super::types::{SwapInstructionsRequest, SwapInstructionsResponse};
use crate::errors::SwapCacheError;
use async_trait::async_trait;

/// Source of `route` instructions for a quote.
///
/// Implementations perform exactly one request per call; retries belong to the
/// caller. Any failure is returned as `SwapCacheError::Transport`.
#[async_trait]
pub trait SwapInstructionsApi: Send + Sync {
    /// Identifier used in logs
    fn id(&self) -> &'static str;

    async fn swap_instructions(
        &self,
        request: &SwapInstructionsRequest,
    ) -> Result<SwapInstructionsResponse, SwapCacheError>;
}
