use crate::types::payload::RenderedNotification;

/// One push delivery. `data` is the decrypted payload handed over by the
/// transport; `None` is a valid empty ping, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushEvent {
    pub data: Option<Vec<u8>>,
}

impl PushEvent {
    pub fn empty() -> Self {
        Self { data: None }
    }

    pub fn with_payload(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }
}

/// A user click on a displayed notification, optionally on one of its
/// named action buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub notification: RenderedNotification,
    pub action: Option<String>,
}

/// A notification dismissed without a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseEvent {
    pub notification: RenderedNotification,
}
