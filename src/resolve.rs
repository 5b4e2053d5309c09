//! Fallback resolution at the fetch → presentation boundary.
//!
//! Every remote value crosses this boundary exactly once and comes out the
//! other side as a plain renderable `T`. Failures are logged here, never
//! thrown: a failed or empty fetch shows the hand-authored baseline (default
//! biography, solid-color background, empty collection with its "no images"
//! affordance) instead of an error screen. Raw failure reasons go to the log
//! only — they are never surfaced verbatim to visitors.

use crate::fetch::RemoteContent;
use tracing::{debug, warn};

/// Resolve remote content to the value actually presented.
///
/// `Loaded` passes the payload through unchanged (resolving the same loaded
/// content twice yields identical state — there is no hidden mutation).
/// `Empty` and `Failed` yield the fallback; `Failed` logs its reason once.
pub fn resolve<T>(remote: RemoteContent<T>, default: T) -> T {
    resolve_with(remote, || default)
}

/// Like [`resolve`], but the fallback is built lazily. Useful when the
/// baseline is cloned out of config only on the degraded path.
pub fn resolve_with<T>(remote: RemoteContent<T>, default: impl FnOnce() -> T) -> T {
    match remote {
        RemoteContent::Loaded(value) => value,
        RemoteContent::Empty => {
            debug!("remote content empty, presenting fallback baseline");
            default()
        }
        RemoteContent::Pending => {
            // A value resolved before its fetch settled; the caller skipped
            // the loading phase. Degrade the same way as an empty result.
            warn!("remote content still pending at resolution, presenting fallback baseline");
            default()
        }
        RemoteContent::Failed(reason) => {
            warn!(error = %reason, "remote content unavailable, presenting fallback baseline");
            default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchError, ResourceKey};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Counts WARN events emitted while a test subscriber is installed.
    #[derive(Clone, Default)]
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn count_warns(f: impl FnOnce()) -> usize {
        let counter = WarnCounter::default();
        let warns = Arc::clone(&counter.0);
        let subscriber = Registry::default().with(counter);
        tracing::subscriber::with_default(subscriber, f);
        warns.load(Ordering::Relaxed)
    }

    fn parse_failure() -> FetchError {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        FetchError::Parse {
            key: ResourceKey::Background,
            source,
        }
    }

    #[test]
    fn loaded_passes_through() {
        assert_eq!(resolve(RemoteContent::Loaded(vec![1, 2, 3]), vec![]), vec![1, 2, 3]);
    }

    #[test]
    fn empty_yields_default() {
        assert_eq!(resolve(RemoteContent::<Vec<i32>>::Empty, vec![9]), vec![9]);
    }

    #[test]
    fn failed_yields_default() {
        let remote: RemoteContent<&str> = RemoteContent::Failed(parse_failure());
        assert_eq!(resolve(remote, "baseline"), "baseline");
    }

    #[test]
    fn pending_yields_default() {
        assert_eq!(resolve(RemoteContent::<u32>::Pending, 7), 7);
    }

    #[test]
    fn failed_resolution_warns_exactly_once() {
        let warns = count_warns(|| {
            let remote: RemoteContent<&str> = RemoteContent::Failed(parse_failure());
            assert_eq!(resolve(remote, "baseline"), "baseline");
        });
        assert_eq!(warns, 1);
    }

    #[test]
    fn empty_resolution_does_not_warn() {
        let warns = count_warns(|| {
            assert_eq!(resolve(RemoteContent::<u32>::Empty, 7), 7);
        });
        assert_eq!(warns, 0);
    }

    #[test]
    fn loaded_resolution_does_not_warn() {
        let warns = count_warns(|| {
            assert_eq!(resolve(RemoteContent::Loaded(1), 0), 1);
        });
        assert_eq!(warns, 0);
    }

    #[test]
    fn resolution_is_idempotent_for_loaded() {
        let first = resolve(RemoteContent::Loaded("bio".to_string()), String::new());
        let second = resolve(RemoteContent::Loaded("bio".to_string()), String::new());
        assert_eq!(first, second);
    }

    #[test]
    fn lazy_default_not_built_on_loaded_path() {
        let value = resolve_with(RemoteContent::Loaded(1), || panic!("fallback built eagerly"));
        assert_eq!(value, 1);
    }
}
