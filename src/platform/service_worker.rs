//! Asset cache worker: generation-tagged offline caching for tool assets.
//!
//! Mirrors a service worker's lifecycle: `install` precaches a fixed asset
//! list into the store named after the current cache generation, `activate`
//! deletes every store from older generations and takes control, and
//! `handle_fetch` answers GET requests for the worker's own origin using
//! the configured policy. Everything else passes through untouched.

use std::collections::HashMap;
use std::sync::Mutex;

use log::{debug, warn};
use url::Url;

use crate::error::{Error, Result};

/// A fetch request as seen by the cache worker.
#[derive(Debug, Clone)]
pub struct FetchEvent {
    pub url: String,
    pub method: String,
    pub headers: HashMap<String, String>,
}

impl FetchEvent {
    /// A plain GET request with no notable headers.
    pub fn get(url: &str) -> Self {
        Self {
            url: url.to_string(),
            method: "GET".to_string(),
            headers: HashMap::new(),
        }
    }

    /// A top-level navigation: a GET that accepts an HTML document.
    pub fn navigation(url: &str) -> Self {
        let mut event = Self::get(url);
        event
            .headers
            .insert("accept".to_string(), "text/html,*/*".to_string());
        event
    }

    /// Whether this request is a document navigation. Header names are
    /// matched case-insensitively.
    pub fn is_navigation(&self) -> bool {
        self.headers
            .iter()
            .any(|(name, value)| name.eq_ignore_ascii_case("accept") && value.contains("text/html"))
    }
}

/// A response held in or produced for the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn ok(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: content_type.to_string(),
            body: body.into(),
        }
    }

    /// True for 2xx statuses; only these are admitted into the cache.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// How a fetch event was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Not ours to answer: non-GET or cross-origin.
    PassThrough,
    FromNetwork(FetchResponse),
    FromCache(FetchResponse),
    /// Offline navigation answered with the fallback document.
    Fallback(FetchResponse),
    /// Offline with no cached copy; carries a synthetic 504.
    Failed(FetchResponse),
}

impl FetchOutcome {
    pub fn response(&self) -> Option<&FetchResponse> {
        match self {
            FetchOutcome::PassThrough => None,
            FetchOutcome::FromNetwork(r)
            | FetchOutcome::FromCache(r)
            | FetchOutcome::Fallback(r)
            | FetchOutcome::Failed(r) => Some(r),
        }
    }
}

/// Named response stores, one per cache generation.
pub trait CacheStore: Send + Sync {
    fn keys(&self) -> Vec<String>;
    fn put(&self, store: &str, url: &str, response: FetchResponse);
    fn get(&self, store: &str, url: &str) -> Option<FetchResponse>;
    fn delete(&self, store: &str);
}

/// In-memory cache store.
#[derive(Default)]
pub struct MemoryCacheStore {
    stores: Mutex<HashMap<String, HashMap<String, FetchResponse>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, HashMap<String, FetchResponse>>> {
        match self.stores.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl CacheStore for MemoryCacheStore {
    fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn put(&self, store: &str, url: &str, response: FetchResponse) {
        self.lock()
            .entry(store.to_string())
            .or_default()
            .insert(url.to_string(), response);
    }

    fn get(&self, store: &str, url: &str) -> Option<FetchResponse> {
        self.lock().get(store).and_then(|s| s.get(url).cloned())
    }

    fn delete(&self, store: &str) {
        self.lock().remove(store);
    }
}

impl<T: CacheStore> CacheStore for &T {
    fn keys(&self) -> Vec<String> {
        (*self).keys()
    }

    fn put(&self, store: &str, url: &str, response: FetchResponse) {
        (*self).put(store, url, response)
    }

    fn get(&self, store: &str, url: &str) -> Option<FetchResponse> {
        (*self).get(store, url)
    }

    fn delete(&self, store: &str) {
        (*self).delete(store)
    }
}

/// The network behind the worker.
pub trait NetworkFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

/// Real HTTP fetcher.
#[cfg(feature = "http")]
#[derive(Default)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "http")]
impl NetworkFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::NetworkError(e.to_string()))?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let body = resp
            .bytes()
            .map_err(|e| Error::NetworkError(e.to_string()))?
            .to_vec();
        Ok(FetchResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Which source the worker consults first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Try the network, fall back to the cached copy when offline.
    NetworkFirst,
    /// Serve the cached copy, fetch only on a miss.
    CacheFirst,
}

/// The asset cache worker itself.
pub struct AssetCacheWorker<C: CacheStore, N: NetworkFetcher> {
    generation: String,
    origin: Url,
    policy: CachePolicy,
    cache: C,
    network: N,
    precache: Vec<String>,
    fallback_document: Option<String>,
    controlling: bool,
}

impl<C: CacheStore, N: NetworkFetcher> AssetCacheWorker<C, N> {
    /// `generation` names this release's cache store (e.g. "my-tools-v124");
    /// requests outside `origin` pass through untouched.
    pub fn new(
        generation: &str,
        origin: &str,
        policy: CachePolicy,
        cache: C,
        network: N,
    ) -> Result<Self> {
        let origin = Url::parse(origin)
            .map_err(|e| Error::ConfigError(format!("invalid origin {origin}: {e}")))?;
        Ok(Self {
            generation: generation.to_string(),
            origin,
            policy,
            cache,
            network,
            precache: Vec::new(),
            fallback_document: None,
            controlling: false,
        })
    }

    /// URLs fetched into the current generation's store during `install`.
    pub fn with_precache(mut self, urls: impl IntoIterator<Item = String>) -> Self {
        self.precache = urls.into_iter().collect();
        self
    }

    /// HTML served for navigations that fail while offline with no cached
    /// copy.
    pub fn with_fallback_document(mut self, html: &str) -> Self {
        self.fallback_document = Some(html.to_string());
        self
    }

    pub fn generation(&self) -> &str {
        &self.generation
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn is_controlling(&self) -> bool {
        self.controlling
    }

    /// Install phase: precache the configured assets. A failed precache
    /// fetch is logged and skipped; installation itself never fails.
    pub fn install(&self) {
        for url in &self.precache {
            match self.network.fetch(url) {
                Ok(response) if response.is_ok() => {
                    self.cache.put(&self.generation, url, response);
                }
                Ok(response) => {
                    warn!("precache of {} got status {}", url, response.status);
                }
                Err(e) => {
                    warn!("precache of {} failed: {}", url, e);
                }
            }
        }
        debug!("installed cache generation {}", self.generation);
    }

    /// Activate phase: drop every store from older generations and take
    /// control of fetch events.
    pub fn activate(&mut self) {
        for store in self.cache.keys() {
            if store != self.generation {
                debug!("evicting stale cache generation {store}");
                self.cache.delete(&store);
            }
        }
        self.controlling = true;
    }

    /// Answer one fetch event according to the cache policy.
    pub fn handle_fetch(&self, event: &FetchEvent) -> FetchOutcome {
        if !event.method.eq_ignore_ascii_case("GET") {
            return FetchOutcome::PassThrough;
        }
        let Ok(url) = Url::parse(&event.url) else {
            return FetchOutcome::PassThrough;
        };
        if url.origin() != self.origin.origin() {
            return FetchOutcome::PassThrough;
        }

        match self.policy {
            CachePolicy::NetworkFirst => self.network_first(event),
            CachePolicy::CacheFirst => self.cache_first(event),
        }
    }

    fn network_first(&self, event: &FetchEvent) -> FetchOutcome {
        match self.network.fetch(&event.url) {
            Ok(response) => {
                if response.is_ok() {
                    self.cache
                        .put(&self.generation, &event.url, response.clone());
                }
                FetchOutcome::FromNetwork(response)
            }
            Err(e) => {
                debug!("network fetch of {} failed: {}", event.url, e);
                match self.cache.get(&self.generation, &event.url) {
                    Some(cached) => FetchOutcome::FromCache(cached),
                    None => self.offline_miss(event),
                }
            }
        }
    }

    fn cache_first(&self, event: &FetchEvent) -> FetchOutcome {
        if let Some(cached) = self.cache.get(&self.generation, &event.url) {
            return FetchOutcome::FromCache(cached);
        }
        match self.network.fetch(&event.url) {
            Ok(response) => {
                if response.is_ok() {
                    self.cache
                        .put(&self.generation, &event.url, response.clone());
                }
                FetchOutcome::FromNetwork(response)
            }
            Err(e) => {
                debug!("network fetch of {} failed: {}", event.url, e);
                self.offline_miss(event)
            }
        }
    }

    fn offline_miss(&self, event: &FetchEvent) -> FetchOutcome {
        if event.is_navigation() {
            if let Some(html) = &self.fallback_document {
                return FetchOutcome::Fallback(FetchResponse::ok("text/html", html.as_bytes()));
            }
        }
        FetchOutcome::Failed(FetchResponse {
            status: 504,
            content_type: "text/plain".to_string(),
            body: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OfflineFetcher;

    impl NetworkFetcher for OfflineFetcher {
        fn fetch(&self, url: &str) -> Result<FetchResponse> {
            Err(Error::NetworkError(format!("offline: {url}")))
        }
    }

    fn worker(policy: CachePolicy) -> AssetCacheWorker<MemoryCacheStore, OfflineFetcher> {
        AssetCacheWorker::new(
            "my-tools-v124",
            "https://tools.example",
            policy,
            MemoryCacheStore::new(),
            OfflineFetcher,
        )
        .unwrap()
    }

    #[test]
    fn non_get_passes_through() {
        let w = worker(CachePolicy::NetworkFirst);
        let mut event = FetchEvent::get("https://tools.example/api");
        event.method = "POST".to_string();
        assert_eq!(w.handle_fetch(&event), FetchOutcome::PassThrough);
    }

    #[test]
    fn cross_origin_passes_through() {
        let w = worker(CachePolicy::NetworkFirst);
        let event = FetchEvent::get("https://cdn.other.example/lib.js");
        assert_eq!(w.handle_fetch(&event), FetchOutcome::PassThrough);
    }

    #[test]
    fn unparseable_url_passes_through() {
        let w = worker(CachePolicy::NetworkFirst);
        let event = FetchEvent::get("not a url");
        assert_eq!(w.handle_fetch(&event), FetchOutcome::PassThrough);
    }

    #[test]
    fn offline_miss_is_a_504() {
        let w = worker(CachePolicy::NetworkFirst);
        let outcome = w.handle_fetch(&FetchEvent::get("https://tools.example/app.js"));
        match outcome {
            FetchOutcome::Failed(resp) => assert_eq!(resp.status, 504),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn offline_navigation_gets_the_fallback_document() {
        let w = worker(CachePolicy::NetworkFirst).with_fallback_document("<h1>offline</h1>");
        let outcome = w.handle_fetch(&FetchEvent::navigation("https://tools.example/"));
        match outcome {
            FetchOutcome::Fallback(resp) => {
                assert_eq!(resp.content_type, "text/html");
                assert_eq!(resp.body, b"<h1>offline</h1>");
            }
            other => panic!("expected Fallback, got {other:?}"),
        }
    }

    #[test]
    fn activate_evicts_older_generations() {
        let store = MemoryCacheStore::new();
        store.put(
            "my-tools-v123",
            "https://tools.example/old.js",
            FetchResponse::ok("text/javascript", "old"),
        );
        let mut w = AssetCacheWorker::new(
            "my-tools-v124",
            "https://tools.example",
            CachePolicy::NetworkFirst,
            store,
            OfflineFetcher,
        )
        .unwrap();
        assert!(!w.is_controlling());
        w.activate();
        assert!(w.is_controlling());
        assert_eq!(w.cache.keys(), Vec::<String>::new());
    }
}
