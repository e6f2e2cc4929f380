use crate::error::TokenError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Join tokens are valid for 15 minutes unless configured otherwise.
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 15 * 60;

/// Agent name placed in the room's dispatch configuration.
pub const DEFAULT_DISPATCH_AGENT: &str = "livekit";

fn default_token_ttl_seconds() -> u64 {
    DEFAULT_TOKEN_TTL_SECONDS
}

fn default_dispatch_agent_name() -> String {
    DEFAULT_DISPATCH_AGENT.to_string()
}

/// How generated room names are suffixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomNameStyle {
    /// `voice_assistant_room_<0..=9999>`. Collisions are possible.
    #[default]
    Numeric,
    /// `voice_assistant_room_<uuid v4>`.
    Uuid,
}

/// LiveKit settings for issuing participant tokens.
///
/// The credential fields are optional at load time so that a partially
/// configured server still starts; they are checked on every request by
/// [`LiveKitConfig::credentials`].
#[derive(Clone, Serialize, Deserialize)]
pub struct LiveKitConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing)]
    pub api_secret: Option<String>,
    /// Caller number used as the participant identity for every token.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// JWT token TTL in seconds. Default: 900 (15 minutes).
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: u64,
    #[serde(default = "default_dispatch_agent_name")]
    pub dispatch_agent_name: String,
    #[serde(default)]
    pub room_names: RoomNameStyle,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            api_secret: None,
            phone_number: None,
            token_ttl_seconds: default_token_ttl_seconds(),
            dispatch_agent_name: default_dispatch_agent_name(),
            room_names: RoomNameStyle::default(),
        }
    }
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field(
                "api_secret",
                &self.api_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("phone_number", &self.phone_number)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("dispatch_agent_name", &self.dispatch_agent_name)
            .field("room_names", &self.room_names)
            .finish()
    }
}

/// Validated LiveKit credentials borrowed from a [`LiveKitConfig`].
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    pub url: &'a str,
    pub api_key: &'a str,
    pub api_secret: &'a str,
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Treats unset and empty values the same way.
fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, TokenError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(TokenError::MissingConfig(name)),
    }
}

impl LiveKitConfig {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: Some(url.into()),
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
            ..Self::default()
        }
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// Returns the server URL, API key and API secret, checked in that order.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::MissingConfig`] naming the first missing value.
    pub fn credentials(&self) -> Result<Credentials<'_>, TokenError> {
        Ok(Credentials {
            url: required(&self.url, "LIVEKIT_URL")?,
            api_key: required(&self.api_key, "LIVEKIT_API_KEY")?,
            api_secret: required(&self.api_secret, "LIVEKIT_API_SECRET")?,
        })
    }

    /// Returns the participant identity shared by all issued tokens.
    pub fn participant_identity(&self) -> Result<&str, TokenError> {
        required(&self.phone_number, "PHONE_NUMBER")
    }
}
