/// Jupiter swap info caching
///
/// - `types`: quote, API and cache record shapes
/// - `program`: `route` instruction layout, decoding and assembly
/// - `temp_cache`: which routes expire and when
/// - `routers`: swap-instructions service clients
/// - `cache`: the lookup / fetch / decode / store pipeline
pub mod cache;
pub mod program;
pub mod routers;
pub mod temp_cache;
pub mod types;

pub use cache::{SwapInfoCache, SwapInfoOptions};
pub use program::{
    create_swap_instruction, decode_swap_instruction_data, route_discriminator,
    PreparedInstruction, RouteAccounts, RouteArgs, RoutePlanStep, Swap,
    JUPITER_V6_PROGRAM_ID, ROUTE_STRICT_ACCOUNTS_LEN,
};
pub use routers::{JupiterClient, SwapInstructionsApi};
pub use temp_cache::{TempCachePolicy, DEFAULT_TEMP_CACHE_DURATION, TEMP_CACHE_DEXES};
pub use types::{
    AccountMeta, QuoteResponse, RouteSummary, SwapInfo, SwapInfoKey, SwapInstructionsRequest,
    SwapInstructionsResponse,
};
