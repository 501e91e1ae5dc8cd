use std::time::Duration;

use time::OffsetDateTime;

use crate::ports;

pub mod console;
pub mod fs;
pub mod http;

pub use console::ConsolePresenter;
pub use fs::DirCacheStore;
pub use http::HttpBackend;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimeProvider;

impl ports::TimeProvider for TokioTimeProvider {
    type Sleep<'a>
        = tokio::time::Sleep
    where
        Self: 'a;

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn sleep<'a>(&'a self, duration: Duration) -> Self::Sleep<'a> {
        tokio::time::sleep(duration)
    }
}
