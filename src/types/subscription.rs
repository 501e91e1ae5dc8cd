use serde::{Deserialize, Serialize};

/// The channel identity issued by the platform: one endpoint plus the key
/// material the push service needs to address this browser instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

impl Subscription {
    /// The platform's JSON representation, as POSTed to the backend.
    pub fn to_wire(&self) -> SubscriptionJson {
        SubscriptionJson {
            endpoint: self.endpoint.clone(),
            expiration_time: None,
            keys: SubscriptionKeys {
                p256dh: self.p256dh.clone(),
                auth: self.auth.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionJson {
    pub endpoint: String,
    #[serde(rename = "expirationTime")]
    pub expiration_time: Option<i64>,
    pub keys: SubscriptionKeys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// The backend's stored view of one subscription, as returned by
/// `GET /push/subscriptions/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub endpoint: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Platform notification-permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// Not yet decided, or the prompt was dismissed.
    Prompt,
}

/// Parameters for creating a subscription. `user_visible_only` must be
/// true for every subscription this crate creates: a push that surfaces no
/// visible notification is not allowed over this channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeOptions {
    pub application_server_key: Vec<u8>,
    pub user_visible_only: bool,
}
