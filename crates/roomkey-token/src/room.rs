use crate::config::RoomNameStyle;
use rand::Rng;
use std::fmt;

pub const ROOM_NAME_PREFIX: &str = "voice_assistant_room_";

/// Exclusive upper bound of the numeric room suffix.
const NUMERIC_SUFFIX_RANGE: u32 = 10_000;

/// Produces a room name for each issued token.
pub trait RoomNameGenerator: Send + Sync + fmt::Debug {
    fn generate(&self) -> String;
}

/// `voice_assistant_room_<n>` with `n` drawn uniformly from `0..10000`.
///
/// No collision detection: two callers can be handed the same room.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumericRoomNames;

impl RoomNameGenerator for NumericRoomNames {
    fn generate(&self) -> String {
        let suffix = rand::thread_rng().gen_range(0..NUMERIC_SUFFIX_RANGE);
        format!("{ROOM_NAME_PREFIX}{suffix}")
    }
}

/// `voice_assistant_room_<uuid>` for deployments that need distinct rooms.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidRoomNames;

impl RoomNameGenerator for UuidRoomNames {
    fn generate(&self) -> String {
        format!("{ROOM_NAME_PREFIX}{}", uuid::Uuid::new_v4())
    }
}

impl RoomNameStyle {
    pub fn generator(self) -> Box<dyn RoomNameGenerator> {
        match self {
            RoomNameStyle::Numeric => Box::new(NumericRoomNames),
            RoomNameStyle::Uuid => Box::new(UuidRoomNames),
        }
    }
}
