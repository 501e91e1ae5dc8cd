use time::format_description::well_known::Rfc3339;
use url::Url;

use crate::ports::{ClientHost, NotificationPresenter, TimeProvider};
use crate::types::payload::NotificationData;
use crate::worker::events::{ClickEvent, CloseEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An already-open window at the target URL was focused.
    Focused(String),
    /// A new window was opened at the target URL.
    Opened(String),
    Failed,
}

/// Resolve the in-app target path for a click, in priority order: a named
/// action button, an explicit `link`/`url` field, then the per-type
/// default route table.
pub fn resolve_target(action: Option<&str>, data: &NotificationData) -> String {
    match action {
        Some("view-message") => {
            return match data.related_object_id.as_deref() {
                Some(id) => format!("/messages/{id}"),
                None => "/messages".to_string(),
            };
        }
        Some("view-order") => {
            return match data.related_object_id.as_deref() {
                Some(id) => format!("/orders/{id}"),
                None => "/orders".to_string(),
            };
        }
        Some("reply") => {
            return match data.chat_id.as_deref() {
                Some(id) => format!("/messages?chat={id}"),
                None => "/messages".to_string(),
            };
        }
        _ => {}
    }

    if let Some(link) = data.link.as_deref().or(data.url.as_deref()) {
        return link.to_string();
    }

    match data.notification_type.as_deref() {
        Some("message") => "/messages",
        Some("order") => "/orders",
        Some("payment") => "/payments",
        Some("review") => "/reviews",
        _ => "/notifications",
    }
    .to_string()
}

/// Close the notification, resolve its target, and focus an existing
/// window there or open a new one. Clicking the same notification twice
/// must not pile up windows.
pub async fn handle_click<P, H>(
    presenter: &P,
    host: &H,
    origin: &Url,
    event: &ClickEvent,
) -> ClickOutcome
where
    P: NotificationPresenter,
    H: ClientHost,
{
    // close first: a notification left open can block new ones under the
    // same tag on some platforms
    presenter.dismiss(&event.notification).await;

    let target = resolve_target(event.action.as_deref(), &event.notification.data);
    let absolute = match origin.join(&target) {
        Ok(url) => url,
        Err(err) => {
            eprintln!("click target '{target}' did not resolve: {err}");
            return ClickOutcome::Failed;
        }
    };

    match host.windows().await {
        Ok(windows) => {
            if let Some(window) = windows.iter().find(|w| urls_match(&w.url, &absolute)) {
                match host.focus(window).await {
                    Ok(()) => return ClickOutcome::Focused(absolute.to_string()),
                    Err(err) => eprintln!("window focus failed, opening instead: {err}"),
                }
            }
        }
        Err(err) => eprintln!("window enumeration failed, opening instead: {err}"),
    }

    match host.open(absolute.as_str()).await {
        Ok(_) => ClickOutcome::Opened(absolute.to_string()),
        Err(err) => {
            eprintln!("window open failed: {err}");
            ClickOutcome::Failed
        }
    }
}

fn urls_match(window_url: &str, target: &Url) -> bool {
    let Ok(window) = Url::parse(window_url) else {
        return false;
    };
    window.origin() == target.origin()
        && window.path() == target.path()
        && window.query() == target.query()
}

/// Dismissal without a click is a terminal state; nothing to do beyond
/// telemetry.
pub async fn handle_close<T>(time: &T, event: &CloseEvent)
where
    T: TimeProvider,
{
    let now = time.now();
    let at = now
        .format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    let tag = event.notification.tag.as_deref().unwrap_or("untagged");
    eprintln!("notification dismissed without click: {tag} at {at}");
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use crate::ports::WindowRef;
    use crate::types::payload::{NotificationDefaults, RenderedNotification};
    use std::sync::Arc;
    use std::sync::Mutex;
    use time::OffsetDateTime;

    #[derive(Debug)]
    struct TestHostError;

    impl std::fmt::Display for TestHostError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("test host error")
        }
    }

    #[derive(Clone, Default)]
    struct TestHost {
        windows: Arc<Mutex<Vec<WindowRef>>>,
        focused: Arc<Mutex<Vec<String>>>,
        opened: Arc<Mutex<Vec<String>>>,
        windows_fail: bool,
        open_fails: bool,
    }

    impl TestHost {
        fn with_window(url: &str) -> Self {
            let host = Self::default();
            host.windows.lock().expect("windows lock").push(WindowRef {
                id: "w1".to_string(),
                url: url.to_string(),
            });
            host
        }

        fn focused(&self) -> Vec<String> {
            self.focused.lock().expect("focused lock").clone()
        }

        fn opened(&self) -> Vec<String> {
            self.opened.lock().expect("opened lock").clone()
        }
    }

    impl ClientHost for TestHost {
        type Error = TestHostError;
        type ControlFut<'a>
            = std::future::Ready<Result<(), Self::Error>>
        where
            Self: 'a;
        type WindowsFut<'a>
            = std::future::Ready<Result<Vec<WindowRef>, Self::Error>>
        where
            Self: 'a;
        type OpenFut<'a>
            = std::future::Ready<Result<WindowRef, Self::Error>>
        where
            Self: 'a;

        fn skip_waiting<'a>(&'a self) -> Self::ControlFut<'a> {
            std::future::ready(Ok(()))
        }

        fn claim<'a>(&'a self) -> Self::ControlFut<'a> {
            std::future::ready(Ok(()))
        }

        fn windows<'a>(&'a self) -> Self::WindowsFut<'a> {
            if self.windows_fail {
                return std::future::ready(Err(TestHostError));
            }
            std::future::ready(Ok(self.windows.lock().expect("windows lock").clone()))
        }

        fn focus<'a>(&'a self, window: &'a WindowRef) -> Self::ControlFut<'a> {
            self.focused
                .lock()
                .expect("focused lock")
                .push(window.id.clone());
            std::future::ready(Ok(()))
        }

        fn open<'a>(&'a self, url: &'a str) -> Self::OpenFut<'a> {
            if self.open_fails {
                return std::future::ready(Err(TestHostError));
            }
            self.opened.lock().expect("opened lock").push(url.to_string());
            std::future::ready(Ok(WindowRef {
                id: "new".to_string(),
                url: url.to_string(),
            }))
        }
    }

    #[derive(Clone, Default)]
    struct TestPresenter {
        dismissed: Arc<Mutex<Vec<Option<String>>>>,
    }

    impl NotificationPresenter for TestPresenter {
        type Error = TestHostError;
        type ShowFut<'a>
            = std::future::Ready<Result<(), Self::Error>>
        where
            Self: 'a;
        type DismissFut<'a>
            = std::future::Ready<()>
        where
            Self: 'a;

        fn show<'a>(&'a self, _notification: &'a RenderedNotification) -> Self::ShowFut<'a> {
            std::future::ready(Ok(()))
        }

        fn dismiss<'a>(&'a self, notification: &'a RenderedNotification) -> Self::DismissFut<'a> {
            self.dismissed
                .lock()
                .expect("dismissed lock")
                .push(notification.tag.clone());
            std::future::ready(())
        }
    }

    fn origin() -> Url {
        Url::parse("https://market.example").expect("parse origin")
    }

    fn message_click(action: Option<&str>, chat_id: Option<&str>) -> ClickEvent {
        let mut notification = RenderedNotification::fallback(&NotificationDefaults::default());
        notification.tag = Some("notification-7".to_string());
        notification.data.notification_type = Some("message".to_string());
        notification.data.chat_id = chat_id.map(str::to_string);
        ClickEvent {
            notification,
            action: action.map(str::to_string),
        }
    }

    #[test]
    fn resolve_target__should_map_named_actions_first() {
        // Given
        let mut data = NotificationData {
            related_object_id: Some("42".to_string()),
            chat_id: Some("7".to_string()),
            link: Some("/somewhere-else".to_string()),
            ..NotificationData::default()
        };

        // Then named actions win over the explicit link
        assert_eq!(resolve_target(Some("view-message"), &data), "/messages/42");
        assert_eq!(resolve_target(Some("view-order"), &data), "/orders/42");
        assert_eq!(resolve_target(Some("reply"), &data), "/messages?chat=7");

        // and degrade to the bare route without their identifier
        data.related_object_id = None;
        data.chat_id = None;
        assert_eq!(resolve_target(Some("view-message"), &data), "/messages");
        assert_eq!(resolve_target(Some("reply"), &data), "/messages");
    }

    #[test]
    fn resolve_target__should_use_explicit_link_for_unrecognized_action() {
        let data = NotificationData {
            link: Some("/orders/42".to_string()),
            ..NotificationData::default()
        };

        assert_eq!(resolve_target(Some("open"), &data), "/orders/42");
        assert_eq!(resolve_target(None, &data), "/orders/42");
    }

    #[test]
    fn resolve_target__should_prefer_link_over_url() {
        let data = NotificationData {
            link: Some("/from-link".to_string()),
            url: Some("/from-url".to_string()),
            ..NotificationData::default()
        };

        assert_eq!(resolve_target(None, &data), "/from-link");
    }

    #[test]
    fn resolve_target__should_fall_back_to_type_table() {
        let typed = |notification_type: &str| NotificationData {
            notification_type: Some(notification_type.to_string()),
            ..NotificationData::default()
        };

        assert_eq!(resolve_target(None, &typed("message")), "/messages");
        assert_eq!(resolve_target(None, &typed("order")), "/orders");
        assert_eq!(resolve_target(None, &typed("payment")), "/payments");
        assert_eq!(resolve_target(None, &typed("review")), "/reviews");
        assert_eq!(resolve_target(None, &typed("promotion")), "/notifications");
        assert_eq!(
            resolve_target(None, &NotificationData::default()),
            "/notifications"
        );
    }

    #[tokio::test]
    async fn handle_click__should_focus_existing_window_for_reply_action() {
        // Given a tab already open at the reply target
        let presenter = TestPresenter::default();
        let host = TestHost::with_window("https://market.example/messages?chat=7");
        let event = message_click(Some("reply"), Some("7"));

        // When
        let outcome = handle_click(&presenter, &host, &origin(), &event).await;

        // Then it focuses instead of opening a duplicate
        assert_eq!(
            outcome,
            ClickOutcome::Focused("https://market.example/messages?chat=7".to_string())
        );
        assert_eq!(host.focused(), ["w1"]);
        assert!(host.opened().is_empty());
    }

    #[tokio::test]
    async fn handle_click__should_open_new_window_when_none_matches() {
        // Given
        let presenter = TestPresenter::default();
        let host = TestHost::with_window("https://market.example/orders");
        let event = message_click(Some("reply"), Some("7"));

        // When
        let outcome = handle_click(&presenter, &host, &origin(), &event).await;

        // Then
        assert_eq!(
            outcome,
            ClickOutcome::Opened("https://market.example/messages?chat=7".to_string())
        );
        assert!(host.focused().is_empty());
        assert_eq!(host.opened(), ["https://market.example/messages?chat=7"]);
    }

    #[tokio::test]
    async fn handle_click__should_route_via_explicit_link_without_action() {
        // Given
        let presenter = TestPresenter::default();
        let host = TestHost::default();
        let mut event = message_click(None, None);
        event.notification.data.link = Some("/orders/42".to_string());

        // When
        let outcome = handle_click(&presenter, &host, &origin(), &event).await;

        // Then
        assert_eq!(
            outcome,
            ClickOutcome::Opened("https://market.example/orders/42".to_string())
        );
    }

    #[tokio::test]
    async fn handle_click__should_dismiss_notification_before_routing() {
        // Given
        let presenter = TestPresenter::default();
        let host = TestHost::default();
        let event = message_click(None, None);

        // When
        handle_click(&presenter, &host, &origin(), &event).await;

        // Then
        let dismissed = presenter.dismissed.lock().expect("dismissed lock");
        assert_eq!(dismissed.as_slice(), [Some("notification-7".to_string())]);
    }

    #[tokio::test]
    async fn handle_click__should_open_when_window_enumeration_fails() {
        // Given
        let presenter = TestPresenter::default();
        let host = TestHost {
            windows_fail: true,
            ..TestHost::default()
        };
        let event = message_click(None, None);

        // When
        let outcome = handle_click(&presenter, &host, &origin(), &event).await;

        // Then enumeration failure degrades to opening a fresh window
        assert_eq!(
            outcome,
            ClickOutcome::Opened("https://market.example/messages".to_string())
        );
    }

    #[tokio::test]
    async fn handle_click__should_fail_when_open_fails() {
        let presenter = TestPresenter::default();
        let host = TestHost {
            open_fails: true,
            ..TestHost::default()
        };
        let event = message_click(None, None);

        let outcome = handle_click(&presenter, &host, &origin(), &event).await;

        assert_eq!(outcome, ClickOutcome::Failed);
    }

    #[tokio::test]
    async fn handle_close__should_never_fail() {
        #[derive(Clone)]
        struct FixedTime;

        impl TimeProvider for FixedTime {
            type Sleep<'a>
                = std::future::Ready<()>
            where
                Self: 'a;

            fn now(&self) -> OffsetDateTime {
                OffsetDateTime::UNIX_EPOCH
            }

            fn sleep<'a>(&'a self, _duration: std::time::Duration) -> Self::Sleep<'a> {
                std::future::ready(())
            }
        }

        let event = CloseEvent {
            notification: RenderedNotification::fallback(&NotificationDefaults::default()),
        };

        handle_close(&FixedTime, &event).await;
    }
}
