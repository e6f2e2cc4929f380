use crate::config::{Credentials, LiveKitConfig};
use crate::details::ConnectionDetails;
use crate::error::TokenError;
use crate::metadata::ParticipantMetadata;
use crate::room::RoomNameGenerator;
use livekit_api::access_token::{AccessToken, VideoGrants};
use livekit_protocol::{RoomAgentDispatch, RoomConfiguration};
use std::time::Duration;

/// Inputs for a single participant token.
#[derive(Debug, Clone, Copy)]
pub struct ParticipantToken<'a> {
    pub identity: &'a str,
    /// JSON string stored in the token's `metadata` claim.
    pub metadata: &'a str,
    pub room_name: &'a str,
    /// Agent dispatched into the room when LiveKit creates it.
    pub dispatch_agent: &'a str,
    pub ttl: Duration,
}

/// Signs a join token for `request.room_name`.
///
/// The grant is always join + publish + publish data + subscribe. The room
/// configuration dispatches `request.dispatch_agent` with empty metadata;
/// any agent name the caller asked for travels in participant metadata
/// instead.
pub fn create_participant_token(
    credentials: &Credentials<'_>,
    request: &ParticipantToken<'_>,
) -> Result<String, TokenError> {
    let room_config = RoomConfiguration {
        agents: vec![RoomAgentDispatch {
            agent_name: request.dispatch_agent.to_string(),
            metadata: "{}".to_string(),
        }],
        ..Default::default()
    };

    let token = AccessToken::with_api_key(credentials.api_key, credentials.api_secret)
        .with_identity(request.identity)
        .with_metadata(request.metadata)
        .with_grants(VideoGrants {
            room_join: true,
            room: request.room_name.to_string(),
            can_publish: true,
            can_subscribe: true,
            can_publish_data: true,
            ..Default::default()
        })
        .with_room_config(room_config)
        .with_ttl(request.ttl);

    token.to_jwt().map_err(TokenError::Signing)
}

/// Issues connection details for voice assistant rooms.
#[derive(Debug)]
pub struct TokenService {
    config: LiveKitConfig,
    room_names: Box<dyn RoomNameGenerator>,
}

impl TokenService {
    pub fn new(config: LiveKitConfig) -> Self {
        let room_names = config.room_names.generator();
        Self { config, room_names }
    }

    /// Replaces the room-name generator selected by the config.
    pub fn with_room_names(mut self, room_names: impl RoomNameGenerator + 'static) -> Self {
        self.room_names = Box::new(room_names);
        self
    }

    pub fn config(&self) -> &LiveKitConfig {
        &self.config
    }

    /// Generates a room and a signed token for the configured participant.
    ///
    /// Configuration is validated first, so a missing credential fails
    /// before any room name is drawn.
    ///
    /// # Errors
    ///
    /// [`TokenError::MissingConfig`] for the first missing setting, or a
    /// metadata/signing error from token construction.
    pub fn issue(&self, metadata: &ParticipantMetadata) -> Result<ConnectionDetails, TokenError> {
        let credentials = self.config.credentials()?;
        let identity = self.config.participant_identity()?;

        let room_name = self.room_names.generate();
        let metadata_json = metadata.to_json()?;

        let participant_token = create_participant_token(
            &credentials,
            &ParticipantToken {
                identity,
                metadata: &metadata_json,
                room_name: &room_name,
                dispatch_agent: &self.config.dispatch_agent_name,
                ttl: Duration::from_secs(self.config.token_ttl_seconds),
            },
        )?;

        tracing::info!(
            room = %room_name,
            agent_name = ?metadata.agent_name,
            unified_event_id = ?metadata.unified_event_id,
            ttl_seconds = self.config.token_ttl_seconds,
            "issued participant token"
        );

        Ok(ConnectionDetails {
            server_url: credentials.url.to_string(),
            room_name,
            participant_name: identity.to_string(),
            participant_token,
        })
    }
}
