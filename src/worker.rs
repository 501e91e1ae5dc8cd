use std::time::Duration;

use url::Url;

use crate::ports::{CacheStore, ClientHost, NotificationPresenter, TimeProvider};
use crate::types::payload::NotificationDefaults;

pub mod events;
pub mod lifecycle;
pub mod receive;
pub mod render;
pub mod router;

use events::{ClickEvent, CloseEvent, PushEvent};
use lifecycle::CacheVersion;
use receive::PushOutcome;
use router::ClickOutcome;

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub cache: CacheVersion,
    pub shell_urls: Vec<String>,
    pub defaults: NotificationDefaults,
    pub origin: Url,
    /// Bound on every event-lifetime extension. The platform recycles a
    /// worker whose extension never settles; this keeps ours finite.
    pub event_budget: Duration,
}

/// The background worker: one instance per registration, but the platform
/// may recycle the process between events, so handlers carry no state of
/// their own: everything durable lives behind the cache and subscription
/// ports, and every handler re-reads what it needs.
#[derive(Clone)]
pub struct Worker<C, P, H, T> {
    caches: C,
    presenter: P,
    host: H,
    time: T,
    config: WorkerConfig,
}

impl<C, P, H, T> Worker<C, P, H, T>
where
    C: CacheStore,
    P: NotificationPresenter,
    H: ClientHost,
    T: TimeProvider,
{
    pub fn new(caches: C, presenter: P, host: H, time: T, config: WorkerConfig) -> Self {
        Self {
            caches,
            presenter,
            host,
            time,
            config,
        }
    }

    /// Install: populate the shell cache. False fails the install; the
    /// platform retries installation on its own schedule.
    pub async fn on_install(&self) -> bool {
        let handler = lifecycle::handle_install(
            &self.caches,
            &self.host,
            &self.config.cache,
            &self.config.shell_urls,
        );
        match self.extend("install", handler).await {
            Some(Ok(())) => true,
            Some(Err(err)) => {
                eprintln!("install failed: {err}");
                false
            }
            None => false,
        }
    }

    /// Activate: evict stale cache generations and claim open clients.
    /// Returns the deleted generation names.
    pub async fn on_activate(&self) -> Vec<String> {
        let handler = lifecycle::handle_activate(&self.caches, &self.host, &self.config.cache);
        self.extend("activate", handler).await.unwrap_or_default()
    }

    /// Push receive: display must complete, or be allowed to fail, before
    /// the event is finished. A handler that returns earlier risks the
    /// worker being torn down before the notification renders.
    pub async fn on_push(&self, event: &PushEvent) -> PushOutcome {
        let handler = receive::handle_push(&self.presenter, &self.config.defaults, event);
        self.extend("push", handler)
            .await
            .unwrap_or(PushOutcome::Dropped)
    }

    /// Notification click: route to an in-app URL, focusing an existing
    /// window over opening a duplicate.
    pub async fn on_click(&self, event: &ClickEvent) -> ClickOutcome {
        let handler =
            router::handle_click(&self.presenter, &self.host, &self.config.origin, event);
        self.extend("notificationclick", handler)
            .await
            .unwrap_or(ClickOutcome::Failed)
    }

    /// Notification dismissed without a click: telemetry only.
    pub async fn on_close(&self, event: &CloseEvent) {
        self.extend("notificationclose", router::handle_close(&self.time, event))
            .await;
    }

    /// The event-lifetime extension: the platform keeps the worker alive
    /// until the handler settles, within a bounded budget. `None` means
    /// the budget ran out first and the event is over regardless.
    async fn extend<F>(&self, name: &str, handler: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            outcome = handler => Some(outcome),
            _ = self.time.sleep(self.config.event_budget) => {
                eprintln!("worker event '{name}' exceeded its lifetime budget");
                None
            }
        }
    }
}
