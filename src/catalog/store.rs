use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::models::product::RawProduct;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// In-memory snapshot of the product file.
///
/// The file is re-read at most once per TTL window; within the window every
/// caller shares the same snapshot, which may be stale by up to the TTL. A
/// failed read or parse logs and yields an empty catalog without touching
/// the cached slot, so the next call simply retries the read.
///
/// Cloning the store clones a handle to the same cache.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    path: PathBuf,
    ttl: Duration,
    slot: RwLock<Option<Snapshot>>,
}

struct Snapshot {
    products: Arc<Vec<RawProduct>>,
    loaded_at: Instant,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                path: path.into(),
                ttl,
                slot: RwLock::new(None),
            }),
        }
    }

    /// Current snapshot, re-reading the file when the cached one expired.
    pub async fn load(&self) -> Arc<Vec<RawProduct>> {
        {
            let slot = self.inner.slot.read().await;
            if let Some(snapshot) = slot.as_ref() {
                if snapshot.loaded_at.elapsed() < self.inner.ttl {
                    return Arc::clone(&snapshot.products);
                }
            }
        }

        match self.read_file().await {
            Ok(products) => {
                debug!(
                    path = %self.inner.path.display(),
                    count = products.len(),
                    "catalog reloaded"
                );
                let products = Arc::new(products);
                let mut slot = self.inner.slot.write().await;
                *slot = Some(Snapshot {
                    products: Arc::clone(&products),
                    loaded_at: Instant::now(),
                });
                products
            }
            Err(err) => {
                error!(
                    path = %self.inner.path.display(),
                    %err,
                    "failed to load product catalog"
                );
                Arc::new(Vec::new())
            }
        }
    }

    /// Drop the cached snapshot; the next [`load`](Self::load) re-reads.
    pub async fn invalidate(&self) {
        *self.inner.slot.write().await = None;
    }

    async fn read_file(&self) -> Result<Vec<RawProduct>, LoadError> {
        let content = tokio::fs::read_to_string(&self.inner.path)
            .await
            .map_err(LoadError::Io)?;
        serde_json::from_str(&content).map_err(LoadError::Parse)
    }
}

#[derive(Debug)]
enum LoadError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "read error: {err}"),
            LoadError::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}
