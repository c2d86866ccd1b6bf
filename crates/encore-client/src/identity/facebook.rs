use anyhow::{Context, Result};
use serde::Deserialize;

use encore_core::models::{Identity, Provider};

use super::IdentityProvider;

const GRAPH_VERSION: &str = "v18.0";

/// Facebook Login. The flow yields a Graph API profile
/// (`/me?fields=name,email,picture`) which is normalized here.
pub struct FacebookIdentityProvider {
    app_id: String,
}

impl FacebookIdentityProvider {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FacebookProfile {
    id: String,
    name: String,
    email: Option<String>,
    #[serde(default)]
    picture: Option<FacebookPicture>,
}

#[derive(Debug, Deserialize)]
struct FacebookPicture {
    data: Option<FacebookPictureData>,
}

#[derive(Debug, Deserialize)]
struct FacebookPictureData {
    url: Option<String>,
}

impl IdentityProvider for FacebookIdentityProvider {
    fn provider(&self) -> Provider {
        Provider::Facebook
    }

    fn initiate(&self) -> String {
        format!(
            "Sign in with Facebook at https://www.facebook.com/{}/dialog/oauth?client_id={}&scope=public_profile,email, then paste your /me profile JSON",
            GRAPH_VERSION, self.app_id
        )
    }

    fn on_result(&self, raw: &str) -> Result<Identity> {
        let profile: FacebookProfile =
            serde_json::from_str(raw).context("Failed to parse Facebook profile")?;

        // The upload log records name and email for every submission; a
        // profile without an email grant cannot be used.
        let email = profile
            .email
            .context("Facebook profile has no email (the email permission was not granted)")?;

        Ok(Identity {
            id: profile.id,
            name: profile.name,
            email,
            picture: profile.picture.and_then(|p| p.data).and_then(|d| d.url),
            provider: Provider::Facebook,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_graph_profile() {
        let provider = FacebookIdentityProvider::new("app-1");
        let raw = serde_json::json!({
            "id": "fb-77",
            "name": "Megan",
            "email": "megan@example.com",
            "picture": { "data": { "url": "https://graph.example.com/p.jpg", "width": 50 } }
        })
        .to_string();

        let identity = provider.on_result(&raw).unwrap();
        assert_eq!(identity.id, "fb-77");
        assert_eq!(identity.name, "Megan");
        assert_eq!(identity.email, "megan@example.com");
        assert_eq!(
            identity.picture.as_deref(),
            Some("https://graph.example.com/p.jpg")
        );
        assert_eq!(identity.provider, Provider::Facebook);
    }

    #[test]
    fn profile_without_picture_is_fine() {
        let provider = FacebookIdentityProvider::new("app-1");
        let raw = serde_json::json!({
            "id": "fb-77",
            "name": "Megan",
            "email": "megan@example.com"
        })
        .to_string();

        let identity = provider.on_result(&raw).unwrap();
        assert_eq!(identity.picture, None);
    }

    #[test]
    fn profile_without_email_is_rejected() {
        let provider = FacebookIdentityProvider::new("app-1");
        let raw = serde_json::json!({ "id": "fb-77", "name": "Megan" }).to_string();
        let err = provider.on_result(&raw).unwrap_err();
        assert!(err.to_string().contains("email"));
    }
}
