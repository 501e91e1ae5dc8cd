use crate::types::subscription::{Permission, SubscribeOptions, Subscription};

/// The page-context platform surface: worker registration, the permission
/// prompt, and the push subscription registry.
///
/// Contract for `subscription()`: an endpoint the push service has
/// invalidated must be reported as `Ok(None)`, never as an error. A dead
/// subscription is indistinguishable from a missing one and triggers
/// re-subscription on next use.
pub trait PushPlatform: Clone + Send + Sync + 'static {
    type Error: std::fmt::Display + Send + Sync + 'static;
    type RegisterFut<'a>: Future<Output = Result<(), Self::Error>> + Send + 'a
    where
        Self: 'a;
    type PermissionFut<'a>: Future<Output = Result<Permission, Self::Error>> + Send + 'a
    where
        Self: 'a;
    type SubscriptionFut<'a>: Future<Output = Result<Option<Subscription>, Self::Error>> + Send + 'a
    where
        Self: 'a;
    type SubscribeFut<'a>: Future<Output = Result<Subscription, Self::Error>> + Send + 'a
    where
        Self: 'a;
    type UnsubscribeFut<'a>: Future<Output = Result<bool, Self::Error>> + Send + 'a
    where
        Self: 'a;

    /// Whether the worker-registration and push-manager features exist at
    /// all. Computed from the host environment, not from permission state.
    fn supported(&self) -> bool;
    /// Current permission state, without prompting.
    fn permission(&self) -> Permission;
    /// Trigger the platform permission prompt once.
    fn request_permission<'a>(&'a self) -> Self::PermissionFut<'a>;
    /// Register the background worker script at the given scope path.
    fn register_worker<'a>(&'a self, path: &'a str) -> Self::RegisterFut<'a>;
    /// The live subscription for this registration, if any.
    fn subscription<'a>(&'a self) -> Self::SubscriptionFut<'a>;
    /// Create a new subscription keyed to the application server.
    fn subscribe<'a>(&'a self, options: &'a SubscribeOptions) -> Self::SubscribeFut<'a>;
    /// Invalidate the live subscription. True when one existed and is now
    /// gone, false when there was nothing to remove.
    fn unsubscribe<'a>(&'a self) -> Self::UnsubscribeFut<'a>;
}
