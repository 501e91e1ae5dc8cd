use serde_json::Value;

use crate::types::payload::{
    NotificationAction, NotificationData, NotificationDefaults, Priority, RenderedNotification,
};

/// Normalize one parsed payload into the fully-defaulted display record.
/// The payload is untrusted: every field is guarded, wrong-typed values
/// count as absent, and absent values fall back to the site defaults.
pub fn normalize(value: &Value, defaults: &NotificationDefaults) -> RenderedNotification {
    let data = normalize_data(value.get("data"));

    // a repeat push for the same logical notification replaces the
    // previous one instead of stacking
    let tag = data
        .notification_id
        .as_ref()
        .map(|id| format!("notification-{id}"));

    let mut actions = payload_actions(value.get("actions"));
    if actions.is_empty() {
        actions = derived_actions(data.notification_type.as_deref());
    }

    RenderedNotification {
        title: text(value.get("title")).unwrap_or_else(|| defaults.title.clone()),
        body: text(value.get("body"))
            .or_else(|| text(value.get("message")))
            .unwrap_or_else(|| defaults.body.clone()),
        icon: text(value.get("icon")).unwrap_or_else(|| defaults.icon.clone()),
        badge: text(value.get("badge")).unwrap_or_else(|| defaults.badge.clone()),
        tag,
        require_interaction: data.priority == Priority::High,
        actions,
        data,
    }
}

fn normalize_data(value: Option<&Value>) -> NotificationData {
    let field = |name: &str| value.and_then(|data| data.get(name));

    NotificationData {
        notification_type: text(field("notification_type")),
        notification_id: id_text(field("notification_id")),
        url: text(field("url")),
        link: text(field("link")),
        chat_id: id_text(field("chat_id")),
        related_object_id: id_text(field("related_object_id")),
        priority: match text(field("priority")).as_deref() {
            Some("high") => Priority::High,
            _ => Priority::Normal,
        },
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Identifier fields arrive as strings or numbers on the wire.
fn id_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Payload-supplied action buttons; malformed entries are skipped
/// individually rather than discarding the list.
fn payload_actions(value: Option<&Value>) -> Vec<NotificationAction> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            Some(NotificationAction {
                action: text(entry.get("action"))?,
                title: text(entry.get("title"))?,
            })
        })
        .collect()
}

fn derived_actions(notification_type: Option<&str>) -> Vec<NotificationAction> {
    match notification_type {
        Some("message") => vec![
            NotificationAction {
                action: "view-message".to_string(),
                title: "View".to_string(),
            },
            NotificationAction {
                action: "reply".to_string(),
                title: "Reply".to_string(),
            },
        ],
        Some("order") => vec![NotificationAction {
            action: "view-order".to_string(),
            title: "View order".to_string(),
        }],
        Some(_) => vec![NotificationAction {
            action: "open".to_string(),
            title: "Open".to_string(),
        }],
        None => Vec::new(),
    }
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;

    fn parse(payload: &str) -> Value {
        serde_json::from_str(payload).expect("parse payload")
    }

    #[test]
    fn normalize__should_use_payload_fields_when_present() {
        // Given
        let value = parse(
            r#"{
                "title": "New message",
                "body": "Ana: are the tickets still available?",
                "icon": "/static/icons/chat.png",
                "badge": "/static/icons/badge-chat.png"
            }"#,
        );

        // When
        let rendered = normalize(&value, &NotificationDefaults::default());

        // Then
        assert_eq!(rendered.title, "New message");
        assert_eq!(rendered.body, "Ana: are the tickets still available?");
        assert_eq!(rendered.icon, "/static/icons/chat.png");
        assert_eq!(rendered.badge, "/static/icons/badge-chat.png");
    }

    #[test]
    fn normalize__should_fall_back_to_defaults_for_absent_fields() {
        // Given
        let defaults = NotificationDefaults::default();

        // When
        let rendered = normalize(&parse("{}"), &defaults);

        // Then
        assert_eq!(rendered.title, defaults.title);
        assert_eq!(rendered.body, defaults.body);
        assert_eq!(rendered.icon, defaults.icon);
        assert_eq!(rendered.badge, defaults.badge);
        assert!(rendered.tag.is_none());
        assert!(!rendered.require_interaction);
        assert!(rendered.actions.is_empty());
    }

    #[test]
    fn normalize__should_treat_wrong_typed_fields_as_absent() {
        // Given
        let defaults = NotificationDefaults::default();
        let value = parse(r#"{"title": 17, "body": ["x"], "data": "oops"}"#);

        // When
        let rendered = normalize(&value, &defaults);

        // Then
        assert_eq!(rendered.title, defaults.title);
        assert_eq!(rendered.body, defaults.body);
        assert_eq!(rendered.data, NotificationData::default());
    }

    #[test]
    fn normalize__should_read_message_as_body_alias() {
        let value = parse(r#"{"message": "Your order shipped."}"#);

        let rendered = normalize(&value, &NotificationDefaults::default());

        assert_eq!(rendered.body, "Your order shipped.");
    }

    #[test]
    fn normalize__should_derive_tag_from_notification_id() {
        // Given two pushes for the same logical notification
        let first = parse(r#"{"data": {"notification_id": 42}}"#);
        let second = parse(r#"{"data": {"notification_id": "42"}}"#);

        // When
        let defaults = NotificationDefaults::default();
        let first = normalize(&first, &defaults);
        let second = normalize(&second, &defaults);

        // Then the second display replaces the first
        assert_eq!(first.tag.as_deref(), Some("notification-42"));
        assert_eq!(first.tag, second.tag);
    }

    #[test]
    fn normalize__should_require_interaction_for_high_priority_only() {
        let defaults = NotificationDefaults::default();

        let high = normalize(&parse(r#"{"data": {"priority": "high"}}"#), &defaults);
        let normal = normalize(&parse(r#"{"data": {"priority": "normal"}}"#), &defaults);
        let unknown = normalize(&parse(r#"{"data": {"priority": "urgent"}}"#), &defaults);

        assert!(high.require_interaction);
        assert_eq!(high.data.priority, Priority::High);
        assert!(!normal.require_interaction);
        assert!(!unknown.require_interaction);
        assert_eq!(unknown.data.priority, Priority::Normal);
    }

    #[test]
    fn normalize__should_derive_message_actions() {
        let value = parse(r#"{"data": {"notification_type": "message", "chat_id": 7}}"#);

        let rendered = normalize(&value, &NotificationDefaults::default());

        let names: Vec<&str> = rendered.actions.iter().map(|a| a.action.as_str()).collect();
        assert_eq!(names, ["view-message", "reply"]);
        assert_eq!(rendered.data.chat_id.as_deref(), Some("7"));
    }

    #[test]
    fn normalize__should_derive_generic_open_action_for_unknown_type() {
        let value = parse(r#"{"data": {"notification_type": "promotion"}}"#);

        let rendered = normalize(&value, &NotificationDefaults::default());

        let names: Vec<&str> = rendered.actions.iter().map(|a| a.action.as_str()).collect();
        assert_eq!(names, ["open"]);
    }

    #[test]
    fn normalize__should_prefer_payload_actions_and_skip_malformed_entries() {
        // Given
        let value = parse(
            r#"{
                "data": {"notification_type": "message"},
                "actions": [
                    {"action": "mute", "title": "Mute"},
                    {"action": "", "title": "Nameless"},
                    {"title": "No action"},
                    "not an object"
                ]
            }"#,
        );

        // When
        let rendered = normalize(&value, &NotificationDefaults::default());

        // Then
        let names: Vec<&str> = rendered.actions.iter().map(|a| a.action.as_str()).collect();
        assert_eq!(names, ["mute"]);
    }
}
