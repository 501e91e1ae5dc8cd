use crate::types::payload::RenderedNotification;

/// Displays user-visible notifications. `show` may fail (malformed option
/// sets are rejected by some platforms); `dismiss` never does.
pub trait NotificationPresenter: Clone + Send + Sync + 'static {
    type Error: std::fmt::Display + Send + Sync + 'static;
    type ShowFut<'a>: Future<Output = Result<(), Self::Error>> + Send + 'a
    where
        Self: 'a;
    type DismissFut<'a>: Future<Output = ()> + Send + 'a
    where
        Self: 'a;

    fn show<'a>(&'a self, notification: &'a RenderedNotification) -> Self::ShowFut<'a>;
    fn dismiss<'a>(&'a self, notification: &'a RenderedNotification) -> Self::DismissFut<'a>;
}
