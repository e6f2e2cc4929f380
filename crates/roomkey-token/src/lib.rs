//! LiveKit connection tokens for voice assistant rooms.
//!
//! Builds the connection details a client needs to join a LiveKit room:
//! a generated room name, the configured participant identity, and a
//! signed participant token. The token carries a fixed publish/subscribe
//! grant plus a room configuration that dispatches a voice agent into the
//! room when it is created.
//!
//! Signing, claims encoding and expiry are handled by `livekit-api`; this
//! crate only decides what goes into the token.

pub mod config;
pub mod details;
pub mod error;
pub mod metadata;
pub mod room;
pub mod service;

pub use config::{
    Credentials, LiveKitConfig, RoomNameStyle, DEFAULT_DISPATCH_AGENT, DEFAULT_TOKEN_TTL_SECONDS,
};
pub use details::ConnectionDetails;
pub use error::TokenError;
pub use metadata::ParticipantMetadata;
pub use room::{NumericRoomNames, RoomNameGenerator, UuidRoomNames, ROOM_NAME_PREFIX};
pub use service::{create_participant_token, ParticipantToken, TokenService};
