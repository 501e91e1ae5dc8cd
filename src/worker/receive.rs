use crate::ports::NotificationPresenter;
use crate::types::payload::{NotificationDefaults, RenderedNotification};
use crate::worker::events::PushEvent;
use crate::worker::render;

/// Terminal state of one push delivery. The transport never re-delivers,
/// so there is no retry transition out of any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Push with no payload; nothing to show.
    EmptyPing,
    /// Notification rendered from the payload.
    Displayed,
    /// Payload did not parse; the generic default notification was shown.
    FallbackDisplayed,
    /// Both display attempts failed.
    Dropped,
}

/// Receive and display one push. A failed parse still surfaces something:
/// pushes are rare and meaningful enough that silent loss is worse than a
/// generic message.
pub async fn handle_push<P>(
    presenter: &P,
    defaults: &NotificationDefaults,
    event: &PushEvent,
) -> PushOutcome
where
    P: NotificationPresenter,
{
    let Some(data) = event.data.as_deref() else {
        eprintln!("push event carried no payload");
        return PushOutcome::EmptyPing;
    };

    match serde_json::from_slice::<serde_json::Value>(data) {
        Ok(value) => {
            let rendered = render::normalize(&value, defaults);
            if show_with_retry(presenter, &rendered).await {
                PushOutcome::Displayed
            } else {
                PushOutcome::Dropped
            }
        }
        Err(err) => {
            eprintln!("push payload did not parse: {err}");
            let fallback = RenderedNotification::fallback(defaults);
            if show_with_retry(presenter, &fallback).await {
                PushOutcome::FallbackDisplayed
            } else {
                PushOutcome::Dropped
            }
        }
    }
}

/// One display attempt, then one retry with a minimal option set. The
/// second failure drops the push for good.
async fn show_with_retry<P>(presenter: &P, rendered: &RenderedNotification) -> bool
where
    P: NotificationPresenter,
{
    let Err(err) = presenter.show(rendered).await else {
        return true;
    };
    eprintln!("notification display failed: {err}");

    let minimal = rendered.minimal();
    match presenter.show(&minimal).await {
        Ok(()) => true,
        Err(err) => {
            eprintln!("notification display retry failed, dropping push: {err}");
            false
        }
    }
}
