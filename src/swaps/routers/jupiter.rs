/// Jupiter swap-instructions client
/// Uses api.jup.ag with an optional user API key for rate limits
use super::SwapInstructionsApi;
use crate::config::JupiterConfig;
use crate::errors::{SwapCacheError, TransportError};
use crate::logger::{self, LogTag};
use crate::swaps::types::{SwapInstructionsRequest, SwapInstructionsResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

pub struct JupiterClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
}

impl JupiterClient {
    pub fn new(config: &JupiterConfig) -> Result<Self, SwapCacheError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                SwapCacheError::configuration_error(format!("Failed to build HTTP client: {}", e))
            })?;

        let api_key = if config.api_key.is_empty() {
            None
        } else {
            Some(config.api_key.clone())
        };

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/swap-instructions", self.api_base)
    }
}

#[async_trait]
impl SwapInstructionsApi for JupiterClient {
    fn id(&self) -> &'static str {
        "jupiter"
    }

    async fn swap_instructions(
        &self,
        request: &SwapInstructionsRequest,
    ) -> Result<SwapInstructionsResponse, SwapCacheError> {
        let url = self.endpoint();
        let start = Instant::now();

        logger::debug(
            LogTag::Jupiter,
            &format!(
                "swap-instructions request: user={}, {} -> {} ({} hops)",
                request.user_public_key,
                request.quote_response.input_mint,
                request.quote_response.output_mint,
                request.quote_response.route_plan.len()
            ),
        );

        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key);
        }

        let response = builder.send().await.map_err(|e| {
            SwapCacheError::Transport(TransportError::RequestFailed {
                endpoint: url.clone(),
                reason: e.to_string(),
            })
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.ok().filter(|b| !b.is_empty());
            return Err(SwapCacheError::Transport(TransportError::HttpStatusError {
                endpoint: url,
                status,
                body,
            }));
        }

        let parsed: SwapInstructionsResponse = response.json().await.map_err(|e| {
            SwapCacheError::Transport(TransportError::MalformedResponse {
                endpoint: url.clone(),
                reason: e.to_string(),
            })
        })?;

        logger::debug(
            LogTag::Jupiter,
            &format!(
                "swap-instructions response: {} accounts, {} lookup tables in {}ms",
                parsed.swap_instruction.accounts.len(),
                parsed.address_lookup_table_addresses.len(),
                start.elapsed().as_millis()
            ),
        );

        Ok(parsed)
    }
}
