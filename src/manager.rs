use crate::ports::{BackendApi, PushPlatform};
use crate::types::subscription::{
    Permission, SubscribeOptions, Subscription, SubscriptionRecord,
};

pub mod keys;

/// Outcome of one permission prompt. A dismissed prompt reports as
/// `Denied`; callers treat every non-granted outcome the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    Denied,
    Unsupported,
    Error,
}

#[derive(Debug)]
pub enum ManagerError {
    Unsupported,
    PermissionNotGranted,
    NotInitialized,
    Platform(String),
}

impl std::fmt::Display for ManagerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManagerError::Unsupported => f.write_str("push is not supported on this platform"),
            ManagerError::PermissionNotGranted => {
                f.write_str("notification permission was not granted")
            }
            ManagerError::NotInitialized => {
                f.write_str("subscription manager was not initialized")
            }
            ManagerError::Platform(detail) => write!(f, "platform error: {detail}"),
        }
    }
}

/// Page-context component that establishes the push channel: registers the
/// background worker, fetches the server key, and keeps the platform
/// subscription in sync with the backend.
///
/// Every operation fails softly (a status value and a log line, never a
/// propagated error) except `get_or_create_subscription`, whose explicit
/// error is part of the public contract.
pub struct SubscriptionManager<P, B> {
    platform: P,
    backend: B,
    worker_path: String,
    supported: bool,
    server_key: Option<Vec<u8>>,
}

impl<P, B> SubscriptionManager<P, B>
where
    P: PushPlatform,
    B: BackendApi,
{
    pub fn new(platform: P, backend: B, worker_path: impl Into<String>) -> Self {
        let supported = platform.supported();
        Self {
            platform,
            backend,
            worker_path: worker_path.into(),
            supported,
            server_key: None,
        }
    }

    /// Capability flag computed once at construction. When false, every
    /// other operation is a no-op returning its failure value.
    pub fn supported(&self) -> bool {
        self.supported
    }

    /// Register the background worker and fetch the server's public key.
    /// Does not retry on failure; the caller decides.
    pub async fn initialize(&mut self) -> bool {
        if !self.supported {
            return false;
        }

        if let Err(err) = self.platform.register_worker(&self.worker_path).await {
            eprintln!("worker registration failed: {err}");
            return false;
        }

        let encoded = match self.backend.vapid_public_key().await {
            Ok(encoded) => encoded,
            Err(err) => {
                eprintln!("server key fetch failed: {err}");
                return false;
            }
        };
        match keys::decode_server_key(&encoded) {
            Ok(key) => {
                self.server_key = Some(key);
                true
            }
            Err(err) => {
                eprintln!("server key decode failed: {err}");
                false
            }
        }
    }

    /// Trigger the platform permission prompt once. Repeated denial should
    /// stop further prompts; that policy belongs to the caller.
    pub async fn request_permission(&self) -> PermissionOutcome {
        if !self.supported {
            return PermissionOutcome::Unsupported;
        }
        match self.platform.request_permission().await {
            Ok(Permission::Granted) => PermissionOutcome::Granted,
            Ok(_) => PermissionOutcome::Denied,
            Err(err) => {
                eprintln!("permission request failed: {err}");
                PermissionOutcome::Error
            }
        }
    }

    /// Return the existing subscription, or create one keyed to the server.
    /// Creation requires granted permission and a completed
    /// initialization. Idempotent: a second call returns the subscription
    /// the first one created.
    pub async fn get_or_create_subscription(&self) -> Result<Subscription, ManagerError> {
        if !self.supported {
            return Err(ManagerError::Unsupported);
        }

        match self.platform.subscription().await {
            Ok(Some(existing)) => return Ok(existing),
            Ok(None) => {}
            Err(err) => return Err(ManagerError::Platform(err.to_string())),
        }

        if self.platform.permission() != Permission::Granted {
            return Err(ManagerError::PermissionNotGranted);
        }
        let server_key = self.server_key.as_ref().ok_or(ManagerError::NotInitialized)?;

        let options = SubscribeOptions {
            application_server_key: server_key.clone(),
            user_visible_only: true,
        };
        self.platform
            .subscribe(&options)
            .await
            .map_err(|err| ManagerError::Platform(err.to_string()))
    }

    /// Obtain a subscription and report it to the backend. True only on a
    /// 2xx response. Safe to call repeatedly: when already subscribed this
    /// re-confirms the registration server-side.
    pub async fn subscribe(&self) -> bool {
        let subscription = match self.get_or_create_subscription().await {
            Ok(subscription) => subscription,
            Err(err) => {
                eprintln!("subscribe failed: {err}");
                return false;
            }
        };
        match self.backend.register(&subscription.to_wire()).await {
            Ok(()) => true,
            Err(err) => {
                eprintln!("subscription registration failed: {err}");
                false
            }
        }
    }

    /// Invalidate the subscription on the platform and tell the backend.
    /// No subscription means already in the desired state. A backend
    /// delete failure is logged, not fatal: the client subscription is
    /// gone and the server record goes stale on its own.
    pub async fn unsubscribe(&self) -> bool {
        if !self.supported {
            return false;
        }

        let subscription = match self.platform.subscription().await {
            Ok(Some(subscription)) => subscription,
            Ok(None) => return true,
            Err(err) => {
                eprintln!("subscription lookup failed: {err}");
                return false;
            }
        };

        // the backend needs the identifying endpoint after the platform
        // has invalidated it, so capture the wire form first
        let wire = subscription.to_wire();

        if let Err(err) = self.platform.unsubscribe().await {
            eprintln!("platform unsubscribe failed: {err}");
            return false;
        }
        if let Err(err) = self.backend.deregister(&wire).await {
            eprintln!("subscription removal not acknowledged by backend: {err}");
        }
        true
    }

    /// Read-only fetch of the backend's subscriptions for the current
    /// user. Empty on any failure.
    pub async fn list_subscriptions(&self) -> Vec<SubscriptionRecord> {
        if !self.supported {
            return Vec::new();
        }
        match self.backend.subscriptions().await {
            Ok(records) => records,
            Err(err) => {
                eprintln!("subscription list fetch failed: {err}");
                Vec::new()
            }
        }
    }
}
