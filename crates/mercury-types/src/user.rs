//! Stable user addressing for Mercury.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Stable identifier for one user's conversation, derived from the
/// provider-assigned contact id (the WhatsApp `wa_id`).
///
/// Derivation is deterministic and injective: the same contact id always
/// yields the same key, and distinct contact ids never collide. The key
/// doubles as the delivery address, so only whitespace is normalized away.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserKey(String);

impl UserKey {
    /// Derive a key from a provider contact id. Returns `None` when the id
    /// is empty after trimming.
    pub fn from_contact(contact_id: &str) -> Option<Self> {
        let trimmed = contact_id.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_contact_is_deterministic() {
        let a = UserKey::from_contact("15551234567").unwrap();
        let b = UserKey::from_contact("15551234567").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_contact_trims_whitespace() {
        let a = UserKey::from_contact(" 15551234567 ").unwrap();
        assert_eq!(a.as_str(), "15551234567");
    }

    #[test]
    fn test_distinct_contacts_do_not_collide() {
        let a = UserKey::from_contact("15551234567").unwrap();
        let b = UserKey::from_contact("15557654321").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_contact_is_rejected() {
        assert!(UserKey::from_contact("").is_none());
        assert!(UserKey::from_contact("   ").is_none());
    }

    #[test]
    fn test_serde_transparent() {
        let key = UserKey::from_contact("15551234567").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"15551234567\"");
        let parsed: UserKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);
    }
}
