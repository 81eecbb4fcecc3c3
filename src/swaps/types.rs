/// Swap info records, cache keys and the Jupiter API shapes they are built from
use super::program::RoutePlanStep;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Label recorded for hops the quote did not name
pub const UNKNOWN_LABEL: &str = "Unknown";

// =============================================================================
// QUOTE (input to the pipeline)
// =============================================================================

/// Jupiter v6 quote response
///
/// Only the fields the cache reads are typed; everything else is kept in
/// `extra` so the quote can be sent back to `/swap-instructions` unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(rename = "inputMint")]
    pub input_mint: String,
    #[serde(rename = "inAmount")]
    pub in_amount: String,
    #[serde(rename = "outputMint")]
    pub output_mint: String,
    #[serde(rename = "outAmount")]
    pub out_amount: String,
    #[serde(rename = "routePlan")]
    pub route_plan: Vec<QuoteRoutePlanStep>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRoutePlanStep {
    #[serde(rename = "swapInfo")]
    pub swap_info: QuoteSwapInfo,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSwapInfo {
    #[serde(rename = "ammKey")]
    pub amm_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "inputMint")]
    pub input_mint: String,
    #[serde(rename = "outputMint")]
    pub output_mint: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// =============================================================================
// SWAP-INSTRUCTIONS API SHAPES
// =============================================================================

/// Account reference as returned by the swap-instructions API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMeta {
    pub pubkey: String,
    #[serde(rename = "isSigner")]
    pub is_signer: bool,
    #[serde(rename = "isWritable")]
    pub is_writable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiInstruction {
    #[serde(rename = "programId")]
    pub program_id: String,
    pub accounts: Vec<AccountMeta>,
    /// Base64 encoded instruction data
    pub data: String,
}

/// Request body for `POST /swap-instructions`
#[derive(Debug, Clone, Serialize)]
pub struct SwapInstructionsRequest {
    #[serde(rename = "quoteResponse")]
    pub quote_response: QuoteResponse,
    #[serde(rename = "userPublicKey")]
    pub user_public_key: String,
    #[serde(rename = "useSharedAccounts")]
    pub use_shared_accounts: bool,
    #[serde(rename = "wrapAndUnwrapSol")]
    pub wrap_and_unwrap_sol: bool,
    #[serde(rename = "dynamicComputeUnitLimit")]
    pub dynamic_compute_unit_limit: bool,
    #[serde(rename = "useTokenLedger")]
    pub use_token_ledger: bool,
    #[serde(rename = "skipUserAccountsRpcCalls")]
    pub skip_user_accounts_rpc_calls: bool,
}

impl SwapInstructionsRequest {
    /// Request for a plain `route` instruction: no shared accounts, no SOL
    /// wrapping, no compute budget, no token ledger, no account RPC checks
    pub fn for_route(quote: &QuoteResponse, user_public_key: &str) -> Self {
        Self {
            quote_response: quote.clone(),
            user_public_key: user_public_key.to_string(),
            use_shared_accounts: false,
            wrap_and_unwrap_sol: false,
            dynamic_compute_unit_limit: false,
            use_token_ledger: false,
            skip_user_accounts_rpc_calls: true,
        }
    }
}

/// Response body of `POST /swap-instructions` (fields the cache uses)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapInstructionsResponse {
    #[serde(rename = "swapInstruction")]
    pub swap_instruction: ApiInstruction,
    #[serde(rename = "addressLookupTableAddresses", default)]
    pub address_lookup_table_addresses: Vec<String>,
}

// =============================================================================
// CACHE KEY & RECORD
// =============================================================================

/// Storage slot identity: both mints plus the ordered hop pool addresses
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapInfoKey {
    pub input_mint: String,
    pub output_mint: String,
    pub route_ammkeys: Vec<String>,
}

impl SwapInfoKey {
    pub fn new(
        input_mint: impl Into<String>,
        output_mint: impl Into<String>,
        route_ammkeys: Vec<String>,
    ) -> Self {
        Self {
            input_mint: input_mint.into(),
            output_mint: output_mint.into(),
            route_ammkeys,
        }
    }

    /// Key for a quote; hop order is preserved
    pub fn from_quote(quote: &QuoteResponse) -> Self {
        Self {
            input_mint: quote.input_mint.clone(),
            output_mint: quote.output_mint.clone(),
            route_ammkeys: quote
                .route_plan
                .iter()
                .map(|step| step.swap_info.amm_key.clone())
                .collect(),
        }
    }
}

/// Cached instruction-building parameters for one route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInfo {
    pub direct: bool,
    pub input_mint: String,
    pub output_mint: String,
    pub remaining_accounts: Vec<AccountMeta>,
    pub route_labels: Vec<String>,
    pub route_ammkeys: Vec<String>,
    pub route_mints: Vec<String>,
    pub decoded_route_plan: Vec<RoutePlanStep>,
    pub address_lookup_table_addresses: Vec<String>,
    /// Expiry in epoch milliseconds; `None` caches indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_until: Option<i64>,
}

impl SwapInfo {
    pub fn key(&self) -> SwapInfoKey {
        SwapInfoKey {
            input_mint: self.input_mint.clone(),
            output_mint: self.output_mint.clone(),
            route_ammkeys: self.route_ammkeys.clone(),
        }
    }

    /// A record is a valid hit when it never expires or `now_ms <= cache_until`
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        match self.cache_until {
            Some(until) => now_ms <= until,
            None => true,
        }
    }
}

/// Everything the pipeline derives from a quote before any I/O
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub key: SwapInfoKey,
    pub route_labels: Vec<String>,
    /// Distinct mints in first-seen order (hop input, then hop output)
    pub route_mints: Vec<String>,
}

impl RouteSummary {
    pub fn from_quote(quote: &QuoteResponse) -> Self {
        let route_labels = quote
            .route_plan
            .iter()
            .map(|step| {
                step.swap_info
                    .label
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
            })
            .collect();

        let mut seen = HashSet::new();
        let mut route_mints = Vec::new();
        for step in &quote.route_plan {
            for mint in [&step.swap_info.input_mint, &step.swap_info.output_mint] {
                if seen.insert(mint.as_str()) {
                    route_mints.push(mint.clone());
                }
            }
        }

        Self {
            key: SwapInfoKey::from_quote(quote),
            route_labels,
            route_mints,
        }
    }

    /// Exactly two distinct mints means no intermediate asset
    pub fn is_direct(&self) -> bool {
        self.route_mints.len() == 2
    }
}
