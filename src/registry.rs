//! The active locale source and its change notification.
//!
//! A [`LocaleRegistry`] holds exactly one [`LocaleSource`] at a time. Reads
//! clone the current source under a read lock; [`LocaleRegistry::set_active`]
//! swaps it under a write lock, releases the lock, and then calls every
//! observer on the calling thread. Observers may read the registry (or even
//! set it again) from inside the callback.
//!
//! Setting the same source twice notifies twice; there is no deduplication.

use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicU64, Ordering},
};

use lazy_static::lazy_static;
use tracing::debug;

use crate::source::LocaleSource;

lazy_static! {
    static ref GLOBAL_REGISTRY: LocaleRegistry = LocaleRegistry::new(LocaleSource::platform_default());
}

/// Event published after the active locale source has been replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleChanged;

impl LocaleChanged {
    pub const NAME: &'static str = "Localization.Language.Changed";
}

/// Handle returned by [`LocaleRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(&LocaleChanged) + Send + Sync>;

pub struct LocaleRegistry {
    active: RwLock<LocaleSource>,
    observers: RwLock<Vec<(SubscriptionId, Observer)>>,
    next_id: AtomicU64,
}

impl LocaleRegistry {
    pub fn new(initial: LocaleSource) -> Self {
        Self {
            active: RwLock::new(initial),
            observers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// The process-wide registry, created on first access with
    /// [`LocaleSource::platform_default`].
    pub fn global() -> &'static LocaleRegistry {
        &GLOBAL_REGISTRY
    }

    /// Returns the current source.
    pub fn active(&self) -> LocaleSource {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the current source and notifies every observer once.
    pub fn set_active(&self, source: LocaleSource) {
        let identifier = source.identifier().to_string();
        {
            let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
            *active = source;
        }

        let observers: Vec<Observer> = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();

        debug!(
            identifier = %identifier,
            observers = observers.len(),
            event = LocaleChanged::NAME,
            "active locale source changed"
        );

        for observer in observers {
            observer(&LocaleChanged);
        }
    }

    /// Registers `observer` for [`LocaleChanged`] events.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&LocaleChanged) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::new(LocaleSource::platform_default())
    }
}

impl std::fmt::Debug for LocaleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleRegistry")
            .field("active", &self.active())
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// The global registry's current source.
pub fn active_locale_source() -> LocaleSource {
    LocaleRegistry::global().active()
}

/// Replaces the global registry's source and publishes [`LocaleChanged`].
pub fn set_active_locale_source(source: LocaleSource) {
    LocaleRegistry::global().set_active(source);
}
