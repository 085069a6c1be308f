//! Application state shared across handlers.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use product_desk_core::listing::Submission;

use crate::config::AdminConfig;
use crate::shopify::{AdminClient, AdminShopifyError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration, the Shopify client and the in-flight registry.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    shopify: AdminClient,
    in_flight: Arc<InFlight>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Shopify client cannot be built from the
    /// configured token.
    pub fn new(config: AdminConfig) -> Result<Self, AdminShopifyError> {
        let shopify = AdminClient::new(&config.shopify)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                shopify,
                in_flight: Arc::new(InFlight::default()),
            }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Admin API client.
    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }

    /// Get the registry of mutations currently being sent.
    #[must_use]
    pub fn in_flight(&self) -> &Arc<InFlight> {
        &self.inner.in_flight
    }
}

/// Keys of mutations that have been sent and not yet answered.
///
/// A second submission with the same key is refused until the first one
/// finishes, so a double-clicked save creates one product, not two.
#[derive(Debug, Default)]
pub struct InFlight {
    keys: Mutex<HashSet<String>>,
}

impl InFlight {
    /// Claim the key of `submission`.
    ///
    /// Returns `None` if the same mutation is already in flight. The key is
    /// released when the returned guard is dropped.
    #[must_use]
    pub fn begin(self: &Arc<Self>, submission: &Submission) -> Option<InFlightGuard> {
        let key = submission.key();
        let inserted = self
            .keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone());

        inserted.then(|| InFlightGuard {
            registry: Arc::clone(self),
            key,
        })
    }

    /// Number of mutations in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing is in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Releases its key from the [`InFlight`] registry on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    registry: Arc<InFlight>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry
            .keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use product_desk_core::{ProductId, ProductInput};

    use super::*;

    fn delete(n: &str) -> Submission {
        Submission::Delete(ProductId::parse(n).unwrap())
    }

    #[test]
    fn test_duplicate_submission_refused_while_in_flight() {
        let registry = Arc::new(InFlight::default());

        let guard = registry.begin(&delete("1")).unwrap();
        assert!(registry.begin(&delete("1")).is_none());
        assert_eq!(registry.len(), 1);

        drop(guard);
        assert!(registry.is_empty());
        assert!(registry.begin(&delete("1")).is_some());
    }

    #[test]
    fn test_different_keys_run_together() {
        let registry = Arc::new(InFlight::default());
        let create = Submission::Create(ProductInput {
            title: "Linen Shirt".to_string(),
            ..ProductInput::default()
        });

        let _a = registry.begin(&delete("1")).unwrap();
        let _b = registry.begin(&delete("2")).unwrap();
        let _c = registry.begin(&create).unwrap();
        assert_eq!(registry.len(), 3);
    }
}
