/// Structured error handling for the swap info cache
///
/// Every failure surfaces to the caller as a `SwapCacheError` carrying the
/// category it came from, so callers can tell a changed instruction layout
/// apart from a network or storage problem.
pub mod decode;
pub use decode::DecodeError;

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Clone)]
pub enum SwapCacheError {
    // Instruction payload did not match the route layout
    Decode(DecodeError),

    // Remote swap-instructions service failures
    Transport(TransportError),

    // Embedded store failures
    Store(StoreError),

    // Configuration errors
    Configuration(ConfigurationError),
}

impl std::fmt::Display for SwapCacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwapCacheError::Decode(e) => write!(f, "Decode Error: {}", e),
            SwapCacheError::Transport(e) => write!(f, "Transport Error: {}", e),
            SwapCacheError::Store(e) => write!(f, "Store Error: {}", e),
            SwapCacheError::Configuration(e) => write!(f, "Configuration Error: {}", e),
        }
    }
}

impl std::error::Error for SwapCacheError {}

impl SwapCacheError {
    /// True when the instruction payload could not be decoded (layout drift)
    pub fn is_decode(&self) -> bool {
        matches!(self, SwapCacheError::Decode(_))
    }

    /// True when the remote service call failed
    pub fn is_transport(&self) -> bool {
        matches!(self, SwapCacheError::Transport(_))
    }

    pub fn is_store(&self) -> bool {
        matches!(self, SwapCacheError::Store(_))
    }
}

// =============================================================================
// TRANSPORT ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum TransportError {
    RequestFailed {
        endpoint: String,
        reason: String,
    },
    HttpStatusError {
        endpoint: String,
        status: u16,
        body: Option<String>,
    },
    MalformedResponse {
        endpoint: String,
        reason: String,
    },
    Generic {
        message: String,
    },
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::RequestFailed { endpoint, reason } => {
                write!(f, "Request to {} failed: {}", endpoint, reason)
            }
            TransportError::HttpStatusError {
                endpoint,
                status,
                body,
            } => {
                write!(
                    f,
                    "HTTP {} from {}: {}",
                    status,
                    endpoint,
                    body.as_deref().unwrap_or("No body")
                )
            }
            TransportError::MalformedResponse { endpoint, reason } => {
                write!(f, "Malformed response from {}: {}", endpoint, reason)
            }
            TransportError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// STORE ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum StoreError {
    OpenFailed { path: String, error: String },
    QueryFailed { operation: String, error: String },
    Serialization { error: String },
    BackgroundTask { error: String },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::OpenFailed { path, error } => {
                write!(f, "Failed to open store at '{}': {}", path, error)
            }
            StoreError::QueryFailed { operation, error } => {
                write!(f, "Store {} failed: {}", operation, error)
            }
            StoreError::Serialization { error } => {
                write!(f, "Record serialization failed: {}", error)
            }
            StoreError::BackgroundTask { error } => {
                write!(f, "Background store task failed: {}", error)
            }
        }
    }
}

// =============================================================================
// CONFIGURATION ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum ConfigurationError {
    InvalidConfig { field: String, reason: String },
    FileUnreadable { path: String, error: String },
    InvalidPubkey { value: String, error: String },
    Generic { message: String },
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::InvalidConfig { field, reason } => {
                write!(f, "Invalid config field '{}': {}", field, reason)
            }
            ConfigurationError::FileUnreadable { path, error } => {
                write!(f, "Cannot read config file '{}': {}", path, error)
            }
            ConfigurationError::InvalidPubkey { value, error } => {
                write!(f, "Invalid public key '{}': {}", value, error)
            }
            ConfigurationError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================

impl From<DecodeError> for SwapCacheError {
    fn from(err: DecodeError) -> Self {
        SwapCacheError::Decode(err)
    }
}

impl From<serde_json::Error> for SwapCacheError {
    fn from(err: serde_json::Error) -> Self {
        SwapCacheError::Store(StoreError::Serialization {
            error: err.to_string(),
        })
    }
}

// =============================================================================
// STRUCTURED ERROR BUILDERS
// =============================================================================

impl SwapCacheError {
    /// Create a generic transport error
    pub fn transport_error(message: impl Into<String>) -> Self {
        SwapCacheError::Transport(TransportError::Generic {
            message: message.into(),
        })
    }

    /// Create a store error for a failed operation
    pub fn store_error(operation: impl Into<String>, error: impl std::fmt::Display) -> Self {
        SwapCacheError::Store(StoreError::QueryFailed {
            operation: operation.into(),
            error: error.to_string(),
        })
    }

    /// Create a configuration error
    pub fn configuration_error(message: impl Into<String>) -> Self {
        SwapCacheError::Configuration(ConfigurationError::Generic {
            message: message.into(),
        })
    }

    /// Create an invalid public key error
    pub fn invalid_pubkey(value: impl Into<String>, error: impl std::fmt::Display) -> Self {
        SwapCacheError::Configuration(ConfigurationError::InvalidPubkey {
            value: value.into(),
            error: error.to_string(),
        })
    }
}
