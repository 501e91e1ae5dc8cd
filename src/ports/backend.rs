use crate::types::subscription::{SubscriptionJson, SubscriptionRecord};

/// The backend REST API consumed by the subscription manager. Non-2xx
/// responses surface as errors; callers decide whether and when to retry.
pub trait BackendApi: Clone + Send + Sync + 'static {
    type Error: std::fmt::Display + Send + Sync + 'static;
    type KeyFut<'a>: Future<Output = Result<String, Self::Error>> + Send + 'a
    where
        Self: 'a;
    type AckFut<'a>: Future<Output = Result<(), Self::Error>> + Send + 'a
    where
        Self: 'a;
    type ListFut<'a>: Future<Output = Result<Vec<SubscriptionRecord>, Self::Error>> + Send + 'a
    where
        Self: 'a;

    /// `GET /push/vapid_public_key/`, returning the base64url-encoded key.
    fn vapid_public_key<'a>(&'a self) -> Self::KeyFut<'a>;
    /// `POST /push/subscribe/` with the subscription's wire JSON.
    fn register<'a>(&'a self, subscription: &'a SubscriptionJson) -> Self::AckFut<'a>;
    /// `POST /push/unsubscribe/` with the subscription's wire JSON.
    fn deregister<'a>(&'a self, subscription: &'a SubscriptionJson) -> Self::AckFut<'a>;
    /// `GET /push/subscriptions/` for the current user.
    fn subscriptions<'a>(&'a self) -> Self::ListFut<'a>;
}
