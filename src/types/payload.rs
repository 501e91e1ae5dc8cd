/// The fully-defaulted view of one push payload. Raw payloads are
/// untrusted and may be absent, truncated, or structurally wrong; nothing
/// downstream of normalization reads the raw value again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    /// Derived from `data.notification_id` so a repeat push for the same
    /// logical notification replaces rather than stacks.
    pub tag: Option<String>,
    pub require_interaction: bool,
    pub actions: Vec<NotificationAction>,
    pub data: NotificationData,
}

impl RenderedNotification {
    /// The generic notification shown when a payload cannot be parsed.
    pub fn fallback(defaults: &NotificationDefaults) -> Self {
        Self {
            title: defaults.title.clone(),
            body: defaults.body.clone(),
            icon: defaults.icon.clone(),
            badge: defaults.badge.clone(),
            tag: None,
            require_interaction: false,
            actions: Vec::new(),
            data: NotificationData::default(),
        }
    }

    /// A minimal safe option set for the second display attempt: title and
    /// body only, nothing the platform could reject.
    pub fn minimal(&self) -> Self {
        Self {
            title: self.title.clone(),
            body: self.body.clone(),
            icon: String::new(),
            badge: String::new(),
            tag: None,
            require_interaction: false,
            actions: Vec::new(),
            data: NotificationData::default(),
        }
    }
}

/// The free-form `data` object of a payload, normalized. Identifier fields
/// accept JSON strings or numbers on the wire and land here as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationData {
    pub notification_type: Option<String>,
    pub notification_id: Option<String>,
    pub url: Option<String>,
    pub link: Option<String>,
    pub chat_id: Option<String>,
    pub related_object_id: Option<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Priority {
    #[default]
    Normal,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

/// Site defaults merged under every payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDefaults {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
}

impl NotificationDefaults {
    pub fn for_app(app_name: &str, icon: &str, badge: &str) -> Self {
        Self {
            title: app_name.to_string(),
            body: "You have a new notification.".to_string(),
            icon: icon.to_string(),
            badge: badge.to_string(),
        }
    }
}

#[cfg(test)]
impl Default for NotificationDefaults {
    fn default() -> Self {
        Self::for_app(
            "Courier",
            "/static/icons/icon-192.png",
            "/static/icons/badge-72.png",
        )
    }
}
