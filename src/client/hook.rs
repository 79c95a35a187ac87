use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::BoxFuture;

use super::api::ClientError;

type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, ClientError>> + Send + Sync>;

/// What a consumer renders from
#[derive(Debug, Clone, PartialEq)]
pub struct HookState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for HookState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// One resource's fetch state. Every `refresh` takes a generation number
/// and only the most recently issued call may write the result, so
/// overlapping refreshes settle on the latest one regardless of the order
/// they resolve in.
pub struct Hook<T> {
    state: Arc<Mutex<HookState<T>>>,
    issued: Arc<AtomicU64>,
    fetcher: Fetcher<T>,
}

impl<T> Clone for Hook<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            issued: Arc::clone(&self.issued),
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl<T> Hook<T>
where
    T: Clone + Send + 'static,
{
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        Self::from_state(HookState::default(), fetch)
    }

    /// Start with `data` already set, shown until the first fetch lands
    pub fn with_initial<F, Fut>(data: T, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        Self::from_state(
            HookState {
                data: Some(data),
                ..HookState::default()
            },
            fetch,
        )
    }

    fn from_state<F, Fut>(initial: HookState<T>, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let fetcher: Fetcher<T> = Arc::new(move || -> BoxFuture<'static, Result<T, ClientError>> { Box::pin(fetch()) });
        Self {
            state: Arc::new(Mutex::new(initial)),
            issued: Arc::new(AtomicU64::new(0)),
            fetcher,
        }
    }

    /// First fetch; identical to `refresh`
    pub async fn mount(&self) -> HookState<T> {
        self.refresh().await
    }

    /// Fetch again and return the state as this call left it
    pub async fn refresh(&self) -> HookState<T> {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.lock().loading = true;

        let result = (self.fetcher)().await;

        let mut state = self.lock();
        if self.issued.load(Ordering::SeqCst) == generation {
            match result {
                Ok(data) => {
                    state.data = Some(data);
                    state.error = None;
                }
                Err(e) => {
                    tracing::debug!("Hook fetch failed: {}", e);
                    state.error = Some(e.to_string());
                }
            }
            state.loading = false;
        }
        state.clone()
    }

    pub fn snapshot(&self) -> HookState<T> {
        self.lock().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.lock().data.clone()
    }

    pub fn loading(&self) -> bool {
        self.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    fn lock(&self) -> MutexGuard<'_, HookState<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
