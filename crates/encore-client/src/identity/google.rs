use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;

use encore_core::models::{Identity, Provider};

use super::IdentityProvider;

/// Google Sign-In. The flow yields an ID-token credential (a JWT); the
/// profile is read from its payload segment, exactly the fields the sign-in
/// widget exposes.
pub struct GoogleIdentityProvider {
    client_id: String,
}

impl GoogleIdentityProvider {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
        }
    }
}

/// Claims of interest in the ID token. The signature is not verified; only
/// the profile claims are read.
#[derive(Debug, Deserialize)]
struct GoogleClaims {
    sub: String,
    name: String,
    email: String,
    #[serde(default)]
    picture: Option<String>,
}

impl IdentityProvider for GoogleIdentityProvider {
    fn provider(&self) -> Provider {
        Provider::Google
    }

    fn initiate(&self) -> String {
        format!(
            "Sign in with Google (client id {}) at https://accounts.google.com/gsi/client, then paste the returned credential",
            self.client_id
        )
    }

    fn on_result(&self, raw: &str) -> Result<Identity> {
        let payload = raw
            .split('.')
            .nth(1)
            .context("Credential is not a JWT (missing payload segment)")?;

        let decoded = URL_SAFE_NO_PAD
            .decode(payload)
            .context("Failed to decode credential payload")?;

        let claims: GoogleClaims =
            serde_json::from_slice(&decoded).context("Failed to parse credential claims")?;

        Ok(Identity {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            picture: claims.picture,
            provider: Provider::Google,
        })
    }
}
