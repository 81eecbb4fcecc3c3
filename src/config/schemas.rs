/// Configuration schemas - all config structures defined once with defaults
use crate::config_struct;

// ============================================================================
// CACHE CONFIGURATION
// ============================================================================

config_struct! {
    /// Swap info cache configuration
    pub struct CacheConfig {
        /// SQLite database file holding cached swap infos
        db_path: String = ".data/swap_info.db".to_string(),

        /// Look up and persist records by default
        enabled: bool = true,

        /// Venue labels added to the built-in temporary-cache set
        temp_cache_labels: Vec<String> = Vec::new(),

        /// Lifetime of records routed through a temporary-cache venue
        temp_cache_duration_ms: u64 = 60_000,
    }
}

// ============================================================================
// JUPITER CONFIGURATION
// ============================================================================

config_struct! {
    /// Jupiter swap-instructions API configuration
    pub struct JupiterConfig {
        /// API base URL; `/swap-instructions` is appended
        api_base: String = "https://api.jup.ag/swap/v1".to_string(),

        /// Optional API key sent as `x-api-key` (portal.jup.ag)
        api_key: String = String::new(),

        /// HTTP request timeout
        request_timeout_secs: u64 = 15,
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    pub struct Config {
        cache: CacheConfig = CacheConfig::default(),
        jupiter: JupiterConfig = JupiterConfig::default(),
    }
}
