use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store error: {0}")]
    Custom(String),
}

/// In-memory state shared between command invocations.
///
/// Lives exactly as long as the process; nothing is written to disk.
#[derive(Clone, Debug)]
pub struct Store<T: Default + Send + Sync + 'static> {
    inner: Arc<RwLock<T>>,
}

impl<T: Default + Send + Sync + 'static> Store<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(T::default())),
        }
    }

    /// Runs `f` with exclusive access. Lookup, insert and removal done inside
    /// one transaction cannot interleave with another invocation.
    pub async fn transaction<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut T) -> Result<R, String>,
    {
        let mut guard = self.inner.write().await;
        f(&mut *guard).map_err(StoreError::Custom)
    }

    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.inner.read().await;
        f(&*guard)
    }
}
