use std::convert::Infallible;

use crate::ports::NotificationPresenter;
use crate::types::payload::RenderedNotification;

/// Prints notifications instead of displaying them: backs the CLI preview
/// of how a payload will render on a device.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePresenter;

impl NotificationPresenter for ConsolePresenter {
    type Error = Infallible;
    type ShowFut<'a>
        = std::future::Ready<Result<(), Self::Error>>
    where
        Self: 'a;
    type DismissFut<'a>
        = std::future::Ready<()>
    where
        Self: 'a;

    fn show<'a>(&'a self, notification: &'a RenderedNotification) -> Self::ShowFut<'a> {
        println!("{}", notification.title);
        println!("  {}", notification.body);
        println!("  icon: {}  badge: {}", notification.icon, notification.badge);
        println!("  tag: {}", notification.tag.as_deref().unwrap_or("-"));
        println!(
            "  require interaction: {}",
            if notification.require_interaction { "yes" } else { "no" }
        );
        if notification.actions.is_empty() {
            println!("  actions: -");
        } else {
            let actions: Vec<String> = notification
                .actions
                .iter()
                .map(|action| format!("{} ({})", action.action, action.title))
                .collect();
            println!("  actions: {}", actions.join(", "));
        }
        std::future::ready(Ok(()))
    }

    fn dismiss<'a>(&'a self, notification: &'a RenderedNotification) -> Self::DismissFut<'a> {
        println!(
            "closed: {}",
            notification.tag.as_deref().unwrap_or("untagged")
        );
        std::future::ready(())
    }
}
