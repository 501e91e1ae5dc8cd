pub mod backend;
pub mod caches;
pub mod clients;
pub mod notifications;
pub mod platform;
pub mod time;

pub use backend::BackendApi;
pub use caches::CacheStore;
pub use clients::{ClientHost, WindowRef};
pub use notifications::NotificationPresenter;
pub use platform::PushPlatform;
pub use time::TimeProvider;
