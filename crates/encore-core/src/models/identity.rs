use serde::{Deserialize, Serialize};

/// Social identity provider that authenticated a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Facebook,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Facebook => "facebook",
        }
    }
}

/// Normalized identity produced by a provider adapter on a successful OAuth
/// result. Held by the session store for the lifetime of the session and
/// mirrored to persistent storage so a restart does not force re-login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-assigned subject id (Google `sub`, Facebook `id`).
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub provider: Provider,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Provider::Google).unwrap(),
            "\"google\""
        );
        assert_eq!(
            serde_json::to_string(&Provider::Facebook).unwrap(),
            "\"facebook\""
        );
    }

    #[test]
    fn identity_round_trips_without_picture() {
        let identity = Identity {
            id: "108".to_string(),
            name: "Megan".to_string(),
            email: "megan@example.com".to_string(),
            picture: None,
            provider: Provider::Google,
        };
        let json = serde_json::to_string(&identity).unwrap();
        assert!(!json.contains("picture"));
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identity);
    }
}
