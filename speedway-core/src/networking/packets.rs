use std::fmt;

use glam::DVec3;

/// Sentinel for a client that has not been handed an id yet; never allocated.
pub const UNASSIGNED_ID: u8 = 255;

const ID_ASSIGNMENT_TAG: u8 = 0;
const PLAYER_POSITION_TAG: u8 = 10;
const PLAYER_POSITION_LEN: usize = 14;

/// The two message kinds that cross the wire. Byte 0 is always the type tag.
///
/// `IdAssignment` carries the assigned id in byte 1 and one known peer id per
/// byte after that; an empty trailer is a valid, empty list. `PlayerPosition`
/// carries the id in byte 1 and X, Y, Z as little-endian f32 in the 4-byte
/// strides starting at bytes 2, 6 and 10.
#[derive(Clone, Debug, PartialEq)]
pub enum WirePacket {
    IdAssignment { assigned_id: u8, known_ids: Vec<u8> },
    PlayerPosition { id: u8, position: DVec3 },
}

#[derive(Debug, PartialEq, Eq)]
pub enum PacketError {
    Empty,
    UnknownTag(u8),
    TooShort { tag: u8, len: usize },
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PacketError::Empty => write!(f, "empty packet buffer"),
            PacketError::UnknownTag(tag) => write!(f, "packet type with tag {} unhandled", tag),
            PacketError::TooShort { tag, len } => {
                write!(f, "packet with tag {} too short at {} bytes", tag, len)
            }
        }
    }
}

impl std::error::Error for PacketError {}

pub trait Packet: Sized {
    fn encode(&self) -> Vec<u8>;
    fn decode(data: &[u8]) -> Result<Self, PacketError>;
}

impl Packet for WirePacket {
    fn encode(&self) -> Vec<u8> {
        match self {
            WirePacket::IdAssignment {
                assigned_id,
                known_ids,
            } => {
                let mut data = vec![ID_ASSIGNMENT_TAG, *assigned_id];
                data.extend_from_slice(known_ids);
                data
            }
            WirePacket::PlayerPosition { id, position } => {
                let mut data = vec![0u8; PLAYER_POSITION_LEN];
                data[0] = PLAYER_POSITION_TAG;
                data[1] = *id;
                data[2..6].copy_from_slice(&(position.x as f32).to_le_bytes());
                data[6..10].copy_from_slice(&(position.y as f32).to_le_bytes());
                data[10..14].copy_from_slice(&(position.z as f32).to_le_bytes());
                data
            }
        }
    }

    fn decode(data: &[u8]) -> Result<WirePacket, PacketError> {
        let tag = match data.first() {
            Some(tag) => *tag,
            None => return Err(PacketError::Empty),
        };

        match tag {
            ID_ASSIGNMENT_TAG => {
                if data.len() < 2 {
                    return Err(PacketError::TooShort {
                        tag,
                        len: data.len(),
                    });
                }
                Ok(WirePacket::IdAssignment {
                    assigned_id: data[1],
                    known_ids: data[2..].to_vec(),
                })
            }
            PLAYER_POSITION_TAG => {
                if data.len() < PLAYER_POSITION_LEN {
                    return Err(PacketError::TooShort {
                        tag,
                        len: data.len(),
                    });
                }
                Ok(WirePacket::PlayerPosition {
                    id: data[1],
                    position: DVec3::new(
                        read_f32(data, 2) as f64,
                        read_f32(data, 6) as f64,
                        read_f32(data, 10) as f64,
                    ),
                })
            }
            other => Err(PacketError::UnknownTag(other)),
        }
    }
}

fn read_f32(data: &[u8], at: usize) -> f32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&data[at..at + 4]);
    f32::from_le_bytes(word)
}
