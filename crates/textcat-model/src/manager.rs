//! Artifact lifecycle management
//!
//! An explicit state machine (`Unloaded | Loading | Loaded | Failed`)
//! guarded by a mutex, with single-flight coordination so concurrent
//! first-requests share one load. Reload builds the replacement bundle
//! off to the side and swaps it in atomically; the previous bundle stays
//! servable to in-flight predictions throughout.

use crate::bundle::ArtifactBundle;
use crate::loader::{ArtifactLoader, ArtifactPaths, FileArtifactLoader};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{info, warn};

use textcat_core::LoadError;

type LoadOutcome = Result<Arc<ArtifactBundle>, LoadError>;

enum LifecycleState {
    /// No bundle; the next `ensure_loaded` starts a load
    Unloaded,

    /// A load is in flight; waiters subscribe to its outcome
    Loading {
        epoch: u64,
        outcome: watch::Receiver<Option<LoadOutcome>>,
    },

    /// A bundle is servable
    Loaded(Arc<ArtifactBundle>),

    /// The last load failed; the error is cached until an explicit reload
    Failed(LoadError),
}

struct Inner {
    loader: Arc<dyn ArtifactLoader>,
    state: Mutex<LifecycleState>,

    /// Serializes reloads with respect to each other
    reload_lock: Mutex<()>,

    /// Distinguishes load generations so a stale load task never
    /// overwrites state published by a newer reload or clear.
    epoch: AtomicU64,
}

/// Owns the current artifact bundle and governs loading, caching,
/// reload, and failure reporting.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct ArtifactManager {
    inner: Arc<Inner>,
}

impl ArtifactManager {
    /// Create a manager over an injectable loader
    pub fn new(loader: Arc<dyn ArtifactLoader>) -> Self {
        Self {
            inner: Arc::new(Inner {
                loader,
                state: Mutex::new(LifecycleState::Unloaded),
                reload_lock: Mutex::new(()),
                epoch: AtomicU64::new(0),
            }),
        }
    }

    /// Create a manager loading from the given artifact files
    pub fn from_paths(paths: ArtifactPaths) -> Self {
        Self::new(Arc::new(FileArtifactLoader::new(paths)))
    }

    /// Return the current bundle, loading it first if necessary.
    ///
    /// Concurrent callers during a load wait for the in-flight outcome
    /// instead of starting duplicate loads. A cached failure is returned
    /// without retrying I/O until an explicit `reload`.
    pub async fn ensure_loaded(&self) -> LoadOutcome {
        loop {
            let mut rx = {
                let mut state = self.inner.state.lock().await;
                match &*state {
                    LifecycleState::Loaded(bundle) => return Ok(bundle.clone()),
                    LifecycleState::Failed(err) => return Err(err.clone()),
                    LifecycleState::Loading { outcome, .. } => outcome.clone(),
                    LifecycleState::Unloaded => {
                        let (tx, rx) = watch::channel(None);
                        let epoch = self.inner.epoch.fetch_add(1, Ordering::Relaxed) + 1;
                        *state = LifecycleState::Loading {
                            epoch,
                            outcome: rx.clone(),
                        };
                        self.spawn_load(epoch, tx);
                        rx
                    }
                }
            };

            // Wait for the in-flight load. The load runs on its own task,
            // so a waiter dropped mid-wait never cancels it for the rest.
            loop {
                let outcome = rx.borrow().clone();
                if let Some(outcome) = outcome {
                    return outcome;
                }
                if rx.changed().await.is_err() {
                    // Sender vanished without publishing; re-read state.
                    break;
                }
            }
        }
    }

    fn spawn_load(&self, epoch: u64, tx: watch::Sender<Option<LoadOutcome>>) {
        let inner = self.inner.clone();
        tokio::spawn(async move {
            info!("loading artifact bundle");
            let outcome: LoadOutcome = inner.loader.load().await.map(Arc::new);

            {
                let mut state = inner.state.lock().await;
                // Only publish if this load is still the current generation;
                // a reload or clear_cache that ran in between wins.
                let current =
                    matches!(&*state, LifecycleState::Loading { epoch: e, .. } if *e == epoch);
                if current {
                    *state = match &outcome {
                        Ok(bundle) => {
                            info!("artifact bundle loaded");
                            LifecycleState::Loaded(bundle.clone())
                        }
                        Err(err) => {
                            warn!(error = %err, "artifact load failed");
                            LifecycleState::Failed(err.clone())
                        }
                    };
                }
            }

            let _ = tx.send(Some(outcome));
        });
    }

    /// Force a fresh load, atomically replacing the bundle on success.
    ///
    /// The candidate bundle is built entirely off to the side: concurrent
    /// predictions keep using the previous bundle until the swap. On
    /// failure the state moves to `Failed`, never back to `Unloaded`.
    pub async fn reload(&self) -> Result<(), LoadError> {
        let _guard = self.inner.reload_lock.lock().await;

        info!("reloading artifact bundle");
        let outcome = self.inner.loader.load().await;

        // Invalidate any in-flight first load; the reload result wins.
        self.inner.epoch.fetch_add(1, Ordering::Relaxed);

        let mut state = self.inner.state.lock().await;
        match outcome {
            Ok(bundle) => {
                *state = LifecycleState::Loaded(Arc::new(bundle));
                info!("artifact bundle reloaded");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "artifact reload failed");
                *state = LifecycleState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Drop the bundle and return to `Unloaded`.
    ///
    /// Explicit operator action; never invoked implicitly.
    pub async fn clear_cache(&self) {
        self.inner.epoch.fetch_add(1, Ordering::Relaxed);
        let mut state = self.inner.state.lock().await;
        *state = LifecycleState::Unloaded;
        info!("artifact cache cleared");
    }

    /// Whether a bundle is currently loaded, without triggering a load
    pub async fn is_loaded(&self) -> bool {
        matches!(&*self.inner.state.lock().await, LifecycleState::Loaded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{ClassOutcome, ClassifierModel, LabelDecoder, Vectorizer};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use textcat_core::ArtifactKind;

    struct StubVectorizer;
    impl Vectorizer for StubVectorizer {
        fn transform(&self, _text: &str) -> textcat_core::Result<Vec<f32>> {
            Ok(vec![0.0])
        }
        fn dimension(&self) -> usize {
            1
        }
    }

    struct StubClassifier;
    impl ClassifierModel for StubClassifier {
        fn predict(&self, _features: &[f32]) -> textcat_core::Result<ClassOutcome> {
            Ok(ClassOutcome {
                class_id: 0,
                confidence: 1.0,
            })
        }
        fn num_classes(&self) -> usize {
            2
        }
    }

    struct StubLabels;
    impl LabelDecoder for StubLabels {
        fn decode(&self, _class_id: usize) -> textcat_core::Result<String> {
            Ok("stub".to_string())
        }
        fn num_labels(&self) -> usize {
            2
        }
    }

    fn stub_bundle() -> ArtifactBundle {
        ArtifactBundle::new(
            Arc::new(StubClassifier),
            Arc::new(StubVectorizer),
            Arc::new(StubLabels),
        )
    }

    /// Counts load invocations; optionally fails or delays
    struct CountingLoader {
        calls: AtomicUsize,
        delay: Duration,
        fail: bool,
    }

    impl CountingLoader {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
                fail: false,
            }
        }

        fn with_delay(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::new()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ArtifactLoader for CountingLoader {
        async fn load(&self) -> Result<ArtifactBundle, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.fail {
                Err(LoadError::NotFound {
                    kind: ArtifactKind::Classifier,
                    path: "/missing/classifier.json".into(),
                })
            } else {
                Ok(stub_bundle())
            }
        }
    }

    #[tokio::test]
    async fn lazy_load_on_first_call() {
        let loader = Arc::new(CountingLoader::new());
        let manager = ArtifactManager::new(loader.clone());

        assert!(!manager.is_loaded().await);
        assert_eq!(loader.calls(), 0);

        manager.ensure_loaded().await.unwrap();
        assert!(manager.is_loaded().await);
        assert_eq!(loader.calls(), 1);
    }

    #[tokio::test]
    async fn repeated_calls_hit_the_cache() {
        let loader = Arc::new(CountingLoader::new());
        let manager = ArtifactManager::new(loader.clone());

        let first = manager.ensure_loaded().await.unwrap();
        let second = manager.ensure_loaded().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.calls(), 1);
    }

    #[tokio::test]
    async fn failure_is_cached_until_reload() {
        let loader = Arc::new(CountingLoader::failing());
        let manager = ArtifactManager::new(loader.clone());

        let first = manager.ensure_loaded().await.unwrap_err();
        let second = manager.ensure_loaded().await.unwrap_err();

        assert_eq!(first, second);
        assert_eq!(loader.calls(), 1, "cached failure must not retry I/O");
        assert!(!manager.is_loaded().await);
    }

    #[tokio::test]
    async fn clear_cache_returns_to_unloaded() {
        let loader = Arc::new(CountingLoader::new());
        let manager = ArtifactManager::new(loader.clone());

        manager.ensure_loaded().await.unwrap();
        manager.clear_cache().await;

        assert!(!manager.is_loaded().await);

        manager.ensure_loaded().await.unwrap();
        assert_eq!(loader.calls(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_loads_are_single_flight() {
        let loader = Arc::new(CountingLoader::with_delay(Duration::from_millis(50)));
        let manager = ArtifactManager::new(loader.clone());

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let manager = manager.clone();
                tokio::spawn(async move { manager.ensure_loaded().await })
            })
            .collect();

        let mut bundles = Vec::new();
        for task in tasks {
            bundles.push(task.await.unwrap().unwrap());
        }

        assert_eq!(loader.calls(), 1, "exactly one underlying load");
        for bundle in &bundles[1..] {
            assert!(
                Arc::ptr_eq(&bundles[0], bundle),
                "all waiters observe the same bundle"
            );
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_failures_observe_the_same_error() {
        let loader = Arc::new(CountingLoader {
            calls: AtomicUsize::new(0),
            delay: Duration::from_millis(50),
            fail: true,
        });
        let manager = ArtifactManager::new(loader.clone());

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let manager = manager.clone();
                tokio::spawn(async move { manager.ensure_loaded().await })
            })
            .collect();

        let mut errors = Vec::new();
        for task in tasks {
            errors.push(task.await.unwrap().unwrap_err());
        }

        assert_eq!(loader.calls(), 1);
        for err in &errors[1..] {
            assert_eq!(&errors[0], err);
        }
    }

    #[tokio::test]
    async fn dropped_waiter_does_not_cancel_the_shared_load() {
        let loader = Arc::new(CountingLoader::with_delay(Duration::from_millis(50)));
        let manager = ArtifactManager::new(loader.clone());

        let initiator = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.ensure_loaded().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        initiator.abort();

        // The spawned load still completes and publishes.
        let bundle = manager.ensure_loaded().await;
        assert!(bundle.is_ok());
        assert_eq!(loader.calls(), 1);
    }
}
