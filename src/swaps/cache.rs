/// Swap info cache: quote in, route building blocks out
///
/// A lookup hit skips the swap-instructions service entirely. A miss fetches
/// the `route` instruction for the quote, decodes its arguments, strips the
/// strict account prefix and writes the record back in the background.
use super::program::{decode_swap_instruction_data, ROUTE_STRICT_ACCOUNTS_LEN};
use super::routers::{JupiterClient, SwapInstructionsApi};
use super::temp_cache::TempCachePolicy;
use super::types::{QuoteResponse, RouteSummary, SwapInfo, SwapInfoKey, SwapInstructionsRequest};
use crate::config::Config;
use crate::database::{SwapInfoDb, SwapInfoStore};
use crate::errors::{StoreError, SwapCacheError};
use crate::logger::{self, LogTag};
use chrono::Utc;
use parking_lot::Mutex;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Per-call knobs for `get_routes_and_base_instructions`
#[derive(Debug, Clone, PartialEq)]
pub struct SwapInfoOptions {
    /// Consult the store before calling the service
    pub use_cache: bool,
    /// Write the fetched record back; `None` follows `use_cache`
    pub persist: Option<bool>,
    /// Labels added to the temporary-cache set for this call
    pub temp_cache_labels: Vec<String>,
    /// Overrides the policy duration for this call
    pub temp_cache_duration: Option<Duration>,
}

impl Default for SwapInfoOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            persist: None,
            temp_cache_labels: Vec::new(),
            temp_cache_duration: None,
        }
    }
}

impl SwapInfoOptions {
    /// Always fetch, never write
    pub fn bypass() -> Self {
        Self {
            use_cache: false,
            ..Self::default()
        }
    }

    pub fn should_persist(&self) -> bool {
        self.persist.unwrap_or(self.use_cache)
    }
}

pub struct SwapInfoCache {
    api: Arc<dyn SwapInstructionsApi>,
    store: Arc<dyn SwapInfoStore>,
    policy: TempCachePolicy,
    enabled: bool,
    pending_writes: Mutex<Vec<JoinHandle<()>>>,
}

impl SwapInfoCache {
    pub fn new(
        api: Arc<dyn SwapInstructionsApi>,
        store: Arc<dyn SwapInfoStore>,
        policy: TempCachePolicy,
    ) -> Self {
        Self {
            api,
            store,
            policy,
            enabled: true,
            pending_writes: Mutex::new(Vec::new()),
        }
    }

    /// Jupiter client, store and policy as described by `config`
    pub fn from_config(config: &Config) -> Result<Self, SwapCacheError> {
        let db = SwapInfoDb::open(&config.cache.db_path)?;
        Self::from_config_with_store(config, Arc::new(db))
    }

    /// Like `from_config`, over an already opened store
    pub fn from_config_with_store(
        config: &Config,
        store: Arc<dyn SwapInfoStore>,
    ) -> Result<Self, SwapCacheError> {
        let api = JupiterClient::new(&config.jupiter)?;
        let policy = TempCachePolicy::new(
            config.cache.temp_cache_labels.iter().cloned(),
            Some(Duration::from_millis(config.cache.temp_cache_duration_ms)),
        );

        let mut cache = Self::new(Arc::new(api), store, policy);
        cache.enabled = config.cache.enabled;

        logger::info(
            LogTag::Cache,
            &format!(
                "Swap info cache ready (enabled={}, temp duration={}ms, db={})",
                cache.enabled, config.cache.temp_cache_duration_ms, config.cache.db_path
            ),
        );

        Ok(cache)
    }

    pub fn store(&self) -> &Arc<dyn SwapInfoStore> {
        &self.store
    }

    pub fn policy(&self) -> &TempCachePolicy {
        &self.policy
    }

    /// Options honoring the configured `enabled` flag
    pub fn default_options(&self) -> SwapInfoOptions {
        if self.enabled {
            SwapInfoOptions::default()
        } else {
            SwapInfoOptions::bypass()
        }
    }

    /// Resolve the route building blocks for `quote`.
    ///
    /// Store read failures surface as `Store` without calling the service.
    /// Service failures surface as `Transport`, undecodable instruction data
    /// as `Decode`; neither writes anything. The write-back runs in the
    /// background, see `flush`.
    pub async fn get_routes_and_base_instructions(
        &self,
        quote: &QuoteResponse,
        user_public_key: &Pubkey,
        options: &SwapInfoOptions,
    ) -> Result<SwapInfo, SwapCacheError> {
        let summary = RouteSummary::from_quote(quote);
        let policy = self
            .policy
            .with_overrides(&options.temp_cache_labels, options.temp_cache_duration);

        if options.use_cache {
            if let Some(hit) = self.lookup(&summary.key).await? {
                return Ok(hit);
            }
        }

        let start = Instant::now();
        let request = SwapInstructionsRequest::for_route(quote, &user_public_key.to_string());
        let response = self.api.swap_instructions(&request).await.map_err(|e| {
            logger::warning(
                LogTag::Cache,
                &format!(
                    "{} swap-instructions failed for {} -> {}: {}",
                    self.api.id(),
                    summary.key.input_mint,
                    summary.key.output_mint,
                    e
                ),
            );
            e
        })?;

        let data = &response.swap_instruction.data;
        let (decoded, cache_until) = tokio::join!(
            async { decode_swap_instruction_data(data) },
            async { policy.cache_until(&summary.route_labels, now_ms()) },
        );
        let args = decoded.map_err(|e| {
            logger::error(
                LogTag::Decoder,
                &format!(
                    "Route decode failed for {} -> {} via [{}]: {}",
                    summary.key.input_mint,
                    summary.key.output_mint,
                    summary.route_labels.join(", "),
                    e
                ),
            );
            SwapCacheError::from(e)
        })?;

        let direct = summary.is_direct();
        let RouteSummary {
            key,
            route_labels,
            route_mints,
        } = summary;
        let SwapInfoKey {
            input_mint,
            output_mint,
            route_ammkeys,
        } = key;

        let info = SwapInfo {
            direct,
            input_mint,
            output_mint,
            remaining_accounts: response
                .swap_instruction
                .accounts
                .into_iter()
                .skip(ROUTE_STRICT_ACCOUNTS_LEN)
                .collect(),
            route_labels,
            route_ammkeys,
            route_mints,
            decoded_route_plan: args.route_plan,
            address_lookup_table_addresses: response.address_lookup_table_addresses,
            cache_until,
        };

        logger::debug(
            LogTag::Cache,
            &format!(
                "Fetched swap info {} -> {} ({} hops, {} remaining accounts, cache_until={:?}) in {}ms",
                info.input_mint,
                info.output_mint,
                info.route_ammkeys.len(),
                info.remaining_accounts.len(),
                info.cache_until,
                start.elapsed().as_millis()
            ),
        );

        if options.should_persist() {
            self.spawn_write(info.clone());
        }

        Ok(info)
    }

    /// Run a store call on the blocking pool
    async fn with_store<T, F>(&self, f: F) -> Result<T, SwapCacheError>
    where
        F: FnOnce(&dyn SwapInfoStore) -> Result<T, SwapCacheError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| {
                SwapCacheError::Store(StoreError::BackgroundTask {
                    error: e.to_string(),
                })
            })?
    }

    /// Point read honoring expiry; an unreadable store is an error, not a miss
    async fn lookup(&self, key: &SwapInfoKey) -> Result<Option<SwapInfo>, SwapCacheError> {
        let owned_key = key.clone();
        let found = self
            .with_store(move |store| store.get(&owned_key))
            .await
            .map_err(|e| {
                logger::error(
                    LogTag::Cache,
                    &format!(
                        "Cache read failed for {} -> {}: {}",
                        key.input_mint, key.output_mint, e
                    ),
                );
                e
            })?;

        match found {
            Some(info) if info.is_valid_at(now_ms()) => {
                logger::debug(
                    LogTag::Cache,
                    &format!(
                        "Cache hit {} -> {} via [{}]",
                        key.input_mint,
                        key.output_mint,
                        key.route_ammkeys.join(", ")
                    ),
                );
                Ok(Some(info))
            }
            Some(_) => {
                logger::debug(
                    LogTag::Cache,
                    &format!("Cache entry expired {} -> {}", key.input_mint, key.output_mint),
                );
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn spawn_write(&self, info: SwapInfo) {
        let store = Arc::clone(&self.store);
        let handle = tokio::task::spawn_blocking(move || {
            if let Err(e) = store.put(&info) {
                logger::error(
                    LogTag::Store,
                    &format!(
                        "Failed to store swap info {} -> {}: {}",
                        info.input_mint, info.output_mint, e
                    ),
                );
            }
        });

        let mut pending = self.pending_writes.lock();
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }

    /// Wait for every background write started so far
    pub async fn flush(&self) {
        let handles = std::mem::take(&mut *self.pending_writes.lock());
        for result in futures::future::join_all(handles).await {
            if let Err(e) = result {
                logger::error(LogTag::Store, &format!("Background write panicked: {}", e));
            }
        }
    }

    /// Stored record for `key` if it has not expired
    pub async fn get_cached(&self, key: &SwapInfoKey) -> Result<Option<SwapInfo>, SwapCacheError> {
        self.get_cached_at(key, now_ms()).await
    }

    pub async fn get_cached_at(
        &self,
        key: &SwapInfoKey,
        now_ms: i64,
    ) -> Result<Option<SwapInfo>, SwapCacheError> {
        let key = key.clone();
        let found = self.with_store(move |store| store.get(&key)).await?;
        Ok(found.filter(|info| info.is_valid_at(now_ms)))
    }

    /// Batched `get_cached`; expired slots come back as `None`
    pub async fn get_cached_many(
        &self,
        keys: &[SwapInfoKey],
    ) -> Result<Vec<Option<SwapInfo>>, SwapCacheError> {
        let keys = keys.to_vec();
        let slots = self.with_store(move |store| store.get_many(&keys)).await?;
        let now = now_ms();
        Ok(slots
            .into_iter()
            .map(|slot| slot.filter(|info| info.is_valid_at(now)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swaps::program::{encode_route_instruction_data, RouteArgs, RoutePlanStep, Swap};
    use crate::swaps::types::test_support::quote;
    use crate::swaps::types::{AccountMeta, ApiInstruction, SwapInstructionsResponse};
    use async_trait::async_trait;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct MockApi {
        calls: AtomicUsize,
        response: Result<SwapInstructionsResponse, SwapCacheError>,
        last_request: Mutex<Option<SwapInstructionsRequest>>,
    }

    impl MockApi {
        fn new(response: Result<SwapInstructionsResponse, SwapCacheError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response,
                last_request: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SwapInstructionsApi for MockApi {
        fn id(&self) -> &'static str {
            "mock"
        }

        async fn swap_instructions(
            &self,
            request: &SwapInstructionsRequest,
        ) -> Result<SwapInstructionsResponse, SwapCacheError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock() = Some(request.clone());
            self.response.clone()
        }
    }

    fn account(writable: bool) -> AccountMeta {
        AccountMeta {
            pubkey: Pubkey::new_unique().to_string(),
            is_signer: false,
            is_writable: writable,
        }
    }

    fn route_response(extra_accounts: usize) -> SwapInstructionsResponse {
        let args = RouteArgs {
            route_plan: vec![RoutePlanStep {
                swap: Swap::Whirlpool { a_to_b: true },
                percent: 100,
                input_index: 0,
                output_index: 1,
            }],
            in_amount: 1_000_000,
            quoted_out_amount: 990_000,
            slippage_bps: 50,
            platform_fee_bps: 0,
        };
        let data = STANDARD.encode(encode_route_instruction_data(&args).unwrap());
        SwapInstructionsResponse {
            swap_instruction: ApiInstruction {
                program_id: "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4".to_string(),
                accounts: (0..ROUTE_STRICT_ACCOUNTS_LEN + extra_accounts)
                    .map(|i| account(i % 2 == 0))
                    .collect(),
                data,
            },
            address_lookup_table_addresses: vec!["LUT1".to_string()],
        }
    }

    /// Store whose writes wait for a release signal
    struct GatedStore {
        inner: Arc<SwapInfoDb>,
        gate: Mutex<std::sync::mpsc::Receiver<()>>,
        completed: AtomicUsize,
    }

    impl SwapInfoStore for GatedStore {
        fn get(&self, key: &SwapInfoKey) -> Result<Option<SwapInfo>, SwapCacheError> {
            self.inner.get(key)
        }

        fn get_many(&self, keys: &[SwapInfoKey]) -> Result<Vec<Option<SwapInfo>>, SwapCacheError> {
            self.inner.get_many(keys)
        }

        fn put(&self, info: &SwapInfo) -> Result<bool, SwapCacheError> {
            let _ = self.gate.lock().recv_timeout(Duration::from_secs(10));
            let stored = self.inner.put(info)?;
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(stored)
        }

        fn remove(&self, info: &SwapInfo) -> Result<bool, SwapCacheError> {
            self.inner.remove(info)
        }
    }

    fn setup(api: Arc<MockApi>) -> (TempDir, Arc<SwapInfoDb>, SwapInfoCache) {
        let dir = tempfile::tempdir().unwrap();
        let db = Arc::new(SwapInfoDb::open(dir.path().join("swap_info.db")).unwrap());
        let cache = SwapInfoCache::new(api, db.clone(), TempCachePolicy::default());
        (dir, db, cache)
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_store() {
        let api = MockApi::new(Ok(route_response(3)));
        let (_dir, _db, cache) = setup(api.clone());
        let q = quote("A", "B", &[("P1", Some("Orca"), "A", "B")]);
        let user = Pubkey::new_unique();

        let first = cache
            .get_routes_and_base_instructions(&q, &user, &SwapInfoOptions::default())
            .await
            .unwrap();
        cache.flush().await;
        let second = cache
            .get_routes_and_base_instructions(&q, &user, &SwapInfoOptions::default())
            .await
            .unwrap();

        assert_eq!(api.calls(), 1);
        assert_eq!(first, second);
        assert!(first.direct);
        assert_eq!(first.cache_until, None);
    }

    #[tokio::test]
    async fn test_unreadable_record_fails_without_fetching() {
        let api = MockApi::new(Ok(route_response(1)));
        let (_dir, db, cache) = setup(api.clone());
        let q = quote("A", "B", &[("P1", Some("Orca"), "A", "B")]);
        let user = Pubkey::new_unique();

        cache
            .get_routes_and_base_instructions(&q, &user, &SwapInfoOptions::default())
            .await
            .unwrap();
        cache.flush().await;
        rusqlite::Connection::open(db.path())
            .unwrap()
            .execute("UPDATE swap_info SET record = 'not json'", [])
            .unwrap();

        let err = cache
            .get_routes_and_base_instructions(&q, &user, &SwapInfoOptions::default())
            .await
            .unwrap_err();

        assert!(err.is_store());
        assert_eq!(api.calls(), 1);
        assert!(cache.get_cached(&SwapInfoKey::from_quote(&q)).await.unwrap_err().is_store());
    }

    #[tokio::test]
    async fn test_result_returns_before_background_write_lands() {
        let dir = tempfile::tempdir().unwrap();
        let db = Arc::new(SwapInfoDb::open(dir.path().join("swap_info.db")).unwrap());
        let (release, gate) = std::sync::mpsc::channel();
        let store = Arc::new(GatedStore {
            inner: db.clone(),
            gate: Mutex::new(gate),
            completed: AtomicUsize::new(0),
        });
        let cache = SwapInfoCache::new(
            MockApi::new(Ok(route_response(1))),
            store.clone(),
            TempCachePolicy::default(),
        );
        let q = quote("A", "B", &[("P1", Some("Orca"), "A", "B")]);

        let info = cache
            .get_routes_and_base_instructions(&q, &Pubkey::new_unique(), &SwapInfoOptions::default())
            .await
            .unwrap();

        assert_eq!(store.completed.load(Ordering::SeqCst), 0);
        assert_eq!(db.count().unwrap(), 0);

        release.send(()).unwrap();
        cache.flush().await;

        assert_eq!(store.completed.load(Ordering::SeqCst), 1);
        assert_eq!(db.get(&info.key()).unwrap(), Some(info));
    }

    #[tokio::test]
    async fn test_request_carries_fixed_flags() {
        let api = MockApi::new(Ok(route_response(0)));
        let (_dir, _db, cache) = setup(api.clone());
        let q = quote("A", "B", &[("P1", Some("Orca"), "A", "B")]);
        let user = Pubkey::new_unique();

        cache
            .get_routes_and_base_instructions(&q, &user, &SwapInfoOptions::bypass())
            .await
            .unwrap();

        let request = api.last_request.lock().clone().unwrap();
        assert_eq!(request.user_public_key, user.to_string());
        assert!(!request.use_shared_accounts);
        assert!(!request.wrap_and_unwrap_sol);
        assert!(!request.dynamic_compute_unit_limit);
        assert!(!request.use_token_ledger);
        assert!(request.skip_user_accounts_rpc_calls);
    }

    #[tokio::test]
    async fn test_remaining_accounts_skip_strict_prefix() {
        let response = route_response(4);
        let expected: Vec<AccountMeta> = response.swap_instruction.accounts[ROUTE_STRICT_ACCOUNTS_LEN..].to_vec();
        let (_dir, _db, cache) = setup(MockApi::new(Ok(response)));
        let q = quote("A", "B", &[("P1", Some("Orca"), "A", "B")]);

        let info = cache
            .get_routes_and_base_instructions(&q, &Pubkey::new_unique(), &SwapInfoOptions::default())
            .await
            .unwrap();

        assert_eq!(info.remaining_accounts, expected);
        assert_eq!(info.decoded_route_plan.len(), 1);
        assert_eq!(info.address_lookup_table_addresses, vec!["LUT1".to_string()]);
    }

    #[tokio::test]
    async fn test_bypass_fetches_and_leaves_store_untouched() {
        let api = MockApi::new(Ok(route_response(2)));
        let (_dir, db, cache) = setup(api.clone());
        let q = quote("A", "B", &[("P1", Some("Orca"), "A", "B")]);
        let user = Pubkey::new_unique();

        let mut stored = cache
            .get_routes_and_base_instructions(&q, &user, &SwapInfoOptions::default())
            .await
            .unwrap();
        cache.flush().await;
        stored.remaining_accounts.clear();
        db.put(&stored).unwrap();

        let fresh = cache
            .get_routes_and_base_instructions(&q, &user, &SwapInfoOptions::bypass())
            .await
            .unwrap();
        cache.flush().await;

        assert_eq!(api.calls(), 2);
        assert_eq!(fresh.remaining_accounts.len(), 2);
        let on_disk = cache.get_cached(&SwapInfoKey::from_quote(&q)).await.unwrap().unwrap();
        assert_eq!(on_disk, stored);
    }

    #[tokio::test]
    async fn test_bypass_with_persist_overwrites() {
        let api = MockApi::new(Ok(route_response(2)));
        let (_dir, _db, cache) = setup(api.clone());
        let q = quote("A", "B", &[("P1", Some("Orca"), "A", "B")]);
        let options = SwapInfoOptions {
            persist: Some(true),
            ..SwapInfoOptions::bypass()
        };

        let info = cache
            .get_routes_and_base_instructions(&q, &Pubkey::new_unique(), &options)
            .await
            .unwrap();
        cache.flush().await;

        assert_eq!(cache.get_cached(&info.key()).await.unwrap(), Some(info));
    }

    #[tokio::test]
    async fn test_decode_failure_stores_nothing() {
        let mut response = route_response(2);
        response.swap_instruction.data = STANDARD.encode([0u8; 16]);
        let api = MockApi::new(Ok(response));
        let (_dir, db, cache) = setup(api.clone());
        let q = quote("A", "B", &[("P1", Some("Orca"), "A", "B")]);

        let err = cache
            .get_routes_and_base_instructions(&q, &Pubkey::new_unique(), &SwapInfoOptions::default())
            .await
            .unwrap_err();
        cache.flush().await;

        assert!(err.is_decode());
        assert!(!err.is_transport());
        assert_eq!(db.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates_without_retry() {
        let api = MockApi::new(Err(SwapCacheError::transport_error("connection reset")));
        let (_dir, db, cache) = setup(api.clone());
        let q = quote("A", "B", &[("P1", Some("Orca"), "A", "B")]);

        let err = cache
            .get_routes_and_base_instructions(&q, &Pubkey::new_unique(), &SwapInfoOptions::default())
            .await
            .unwrap_err();
        cache.flush().await;

        assert!(err.is_transport());
        assert_eq!(api.calls(), 1);
        assert_eq!(db.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_temporary_route_expires_after_duration() {
        let api = MockApi::new(Ok(route_response(1)));
        let (_dir, _db, cache) = setup(api.clone());
        let q = quote(
            "A",
            "C",
            &[("P1", Some("Orca"), "A", "B"), ("P2", Some("Whirlpool"), "B", "C")],
        );

        let before = now_ms();
        let info = cache
            .get_routes_and_base_instructions(&q, &Pubkey::new_unique(), &SwapInfoOptions::default())
            .await
            .unwrap();
        let after = now_ms();
        cache.flush().await;

        let until = info.cache_until.unwrap();
        assert!(until >= before + 60_000 && until <= after + 60_000);
        assert!(!info.direct);

        let key = info.key();
        assert!(cache.get_cached_at(&key, until).await.unwrap().is_some());
        assert!(cache.get_cached_at(&key, before + 61_000).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_record_triggers_fetch() {
        let api = MockApi::new(Ok(route_response(1)));
        let (_dir, _db, cache) = setup(api.clone());
        let q = quote("A", "B", &[("P1", Some("Whirlpool"), "A", "B")]);
        let options = SwapInfoOptions {
            temp_cache_duration: Some(Duration::ZERO),
            ..SwapInfoOptions::default()
        };

        let first = cache
            .get_routes_and_base_instructions(&q, &Pubkey::new_unique(), &options)
            .await
            .unwrap();
        cache.flush().await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        cache
            .get_routes_and_base_instructions(&q, &Pubkey::new_unique(), &options)
            .await
            .unwrap();

        assert!(first.cache_until.is_some());
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_per_call_labels_make_route_temporary() {
        let (_dir, _db, cache) = setup(MockApi::new(Ok(route_response(0))));
        let q = quote("A", "B", &[("P1", Some("Phoenix"), "A", "B")]);
        let options = SwapInfoOptions {
            temp_cache_labels: vec!["Phoenix".to_string()],
            ..SwapInfoOptions::bypass()
        };

        let info = cache
            .get_routes_and_base_instructions(&q, &Pubkey::new_unique(), &options)
            .await
            .unwrap();

        assert!(info.cache_until.is_some());
        assert!(!cache.policy().contains("Phoenix"));
    }

    #[tokio::test]
    async fn test_get_cached_many_filters_expired_slots() {
        let (_dir, _db, cache) = setup(MockApi::new(Ok(route_response(0))));
        let user = Pubkey::new_unique();
        let permanent = quote("A", "B", &[("P1", Some("Orca"), "A", "B")]);
        let temporary = quote("A", "B", &[("P2", Some("Cropper"), "A", "B")]);
        let options = SwapInfoOptions {
            temp_cache_duration: Some(Duration::ZERO),
            ..SwapInfoOptions::default()
        };

        cache
            .get_routes_and_base_instructions(&permanent, &user, &options)
            .await
            .unwrap();
        cache
            .get_routes_and_base_instructions(&temporary, &user, &options)
            .await
            .unwrap();
        cache.flush().await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        let slots = cache
            .get_cached_many(&[
                SwapInfoKey::from_quote(&temporary),
                SwapInfoKey::from_quote(&permanent),
            ])
            .await
            .unwrap();
        assert!(slots[0].is_none());
        assert_eq!(slots[1].as_ref().map(|i| i.route_labels.clone()), Some(vec!["Orca".to_string()]));
    }
}
