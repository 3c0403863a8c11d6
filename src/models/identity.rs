use serde::{Deserialize, Serialize};

/// Display id used for guest sessions
pub const GUEST_EMAIL: &str = "guest@example.com";

/// The active user context. Decides which note collection is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "email")]
    pub display_id: String,
    #[serde(rename = "isGuest", default)]
    pub is_guest: bool,
}

impl Identity {
    pub fn user(display_id: impl Into<String>) -> Self {
        Self {
            display_id: display_id.into(),
            is_guest: false,
        }
    }

    pub fn guest() -> Self {
        Self {
            display_id: GUEST_EMAIL.to_string(),
            is_guest: true,
        }
    }

    /// Storage key of this identity's note collection
    pub fn notes_key(&self) -> String {
        if self.is_guest {
            "notes_guest".to_string()
        } else {
            format!("notes_{}", self.display_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_key() {
        assert_eq!(Identity::guest().notes_key(), "notes_guest");
        assert_eq!(Identity::user("ann@example.com").notes_key(), "notes_ann@example.com");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&Identity::user("ann@example.com")).unwrap();
        assert_eq!(json, r#"{"email":"ann@example.com","isGuest":false}"#);

        let guest: Identity =
            serde_json::from_str(r#"{"email":"guest@example.com","isGuest":true}"#).unwrap();
        assert_eq!(guest, Identity::guest());
    }
}
