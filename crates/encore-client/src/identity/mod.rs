//! Identity provider adapters.
//!
//! Each external OAuth flow is wrapped by an `IdentityProvider` that
//! normalizes the provider-specific result into the single `Identity` shape
//! before it reaches the session store.

mod facebook;
mod google;

pub use facebook::FacebookIdentityProvider;
pub use google::GoogleIdentityProvider;

use anyhow::Result;
use encore_core::models::{Identity, Provider};

pub trait IdentityProvider {
    fn provider(&self) -> Provider;

    /// Instruction presented to the user to start the flow (the URL to
    /// visit; the provider's own UI takes it from there).
    fn initiate(&self) -> String;

    /// Normalize the raw provider result (Google: the ID-token credential;
    /// Facebook: the Graph profile JSON) into an `Identity`.
    fn on_result(&self, raw: &str) -> Result<Identity>;
}
