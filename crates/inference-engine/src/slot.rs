//! Model Slot

use crate::engine::InferenceEngine;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// The currently served engine, if any.
///
/// Readers clone the `Arc` under a short read lock and predict without
/// holding it; a reload swaps the whole engine under the write lock.
#[derive(Default)]
pub struct ModelSlot {
    current: RwLock<Option<Arc<InferenceEngine>>>,
}

impl ModelSlot {
    /// A slot with nothing loaded
    pub fn empty() -> Self {
        Self::default()
    }

    /// A slot serving `engine`
    pub fn with_engine(engine: InferenceEngine) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(engine))),
        }
    }

    /// The engine currently served
    pub async fn get(&self) -> Option<Arc<InferenceEngine>> {
        self.current.read().await.clone()
    }

    /// Whether an engine is loaded
    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Serve `engine` from now on and return the one it replaced.
    ///
    /// Requests already holding the previous engine finish on it.
    pub async fn swap(&self, engine: InferenceEngine) -> Option<Arc<InferenceEngine>> {
        let engine = Arc::new(engine);
        let mut current = self.current.write().await;
        info!(
            "Swapping served model to {} ({})",
            engine.artifact().model.kind().display_name(),
            engine.summary().source
        );
        current.replace(engine)
    }
}
