use std::time::Duration;

use time::OffsetDateTime;

/// Clock seam for the worker harness: `sleep` bounds every event-lifetime
/// extension, `now` stamps telemetry. Tests drive both manually.
pub trait TimeProvider: Clone + Send + Sync + 'static {
    type Sleep<'a>: Future<Output = ()> + Send + 'a
    where
        Self: 'a;

    fn now(&self) -> OffsetDateTime;
    fn sleep<'a>(&'a self, duration: Duration) -> Self::Sleep<'a>;
}
