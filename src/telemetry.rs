//! Legacy locomotor telemetry and its persisted layout.
//!
//! Saved games carry a block of locomotor state whose gameplay meaning is
//! only partly known. The block is kept byte-for-byte: opaque values round
//! trip untouched, and slots that have only ever been observed holding a
//! fixed value are checked on load. A mismatch means the stream is corrupt
//! or was written by a code path this engine does not emulate, so loading
//! fails rather than guessing.
//!
//! Layout (little-endian, fixed width):
//!
//! | field | type |
//! |-------|------|
//! | version | `u8`, always [`PERSIST_VERSION`] |
//! | frame offset | `u32` |
//! | position snapshot | 3 × `f32` |
//! | scalar slots | 9 × `f32`, see [`SCALAR_LAYOUT`] |
//! | flags | `u8` |
//! | toggles | 2 × `bool` |

use glam::Vec3;
use log::error;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BIG_NUMBER, PERSIST_VERSION};

/// Errors raised while saving or loading locomotor state.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The stream was written by another layout version.
    #[error("unsupported locomotor state version {found}, expected {expected}")]
    UnsupportedVersion {
        /// Version byte read from the stream.
        found: u8,
        /// Version this engine writes.
        expected: u8,
    },
    /// A slot that must hold a fixed value holds something else.
    #[error("locomotor state slot {slot} holds {found}, expected {expected}")]
    SentinelMismatch {
        /// Index into [`SCALAR_LAYOUT`].
        slot: usize,
        /// Value the slot must hold.
        expected: f32,
        /// Value read from the stream.
        found: f32,
    },
    /// Bytes remain after the last field.
    #[error("{0} unexpected trailing bytes after locomotor state")]
    TrailingBytes(usize),
    /// The codec could not write the block.
    #[error("failed to encode locomotor state")]
    Encode(#[from] bincode::error::EncodeError),
    /// The stream is truncated or malformed.
    #[error("failed to decode locomotor state")]
    Decode(#[from] bincode::error::DecodeError),
}

/// Role of one of the nine persisted scalar slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarSlot {
    /// Always holds this exact value.
    Sentinel(f32),
    /// Preserved verbatim; index into [`LegacyTelemetry::opaque_scalars`].
    Opaque(usize),
    /// The locomotor's lift multiplier.
    LiftMultiplier,
}

/// Number of persisted scalar slots.
pub const SCALAR_SLOTS: usize = 9;

/// Order and role of the persisted scalar slots.
pub const SCALAR_LAYOUT: [ScalarSlot; SCALAR_SLOTS] = [
    ScalarSlot::Sentinel(BIG_NUMBER),
    ScalarSlot::Opaque(0),
    ScalarSlot::Opaque(1),
    ScalarSlot::LiftMultiplier,
    ScalarSlot::Sentinel(1.0),
    ScalarSlot::Opaque(2),
    ScalarSlot::Sentinel(BIG_NUMBER),
    ScalarSlot::Opaque(3),
    ScalarSlot::Sentinel(1.0),
];

/// Legacy per-locomotor values carried through saves.
///
/// None of these influence movement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LegacyTelemetry {
    /// Frame counter captured at save time.
    pub frame_offset: u32,
    /// Position snapshot captured at save time.
    pub position: Vec3,
    /// Scalar slots with no known meaning, in slot order.
    pub opaque_scalars: [f32; 4],
    /// Packed flag byte.
    pub flags: u8,
    /// Two boolean toggles.
    pub toggles: [bool; 2],
}

#[derive(Debug, Serialize, Deserialize)]
struct LocomotorRecord {
    frame_offset: u32,
    position: [f32; 3],
    scalars: [f32; SCALAR_SLOTS],
    flags: u8,
    toggles: [bool; 2],
}

const fn codec() -> bincode::config::Configuration<
    bincode::config::LittleEndian,
    bincode::config::Fixint,
> {
    bincode::config::legacy()
}

impl LegacyTelemetry {
    /// Serialises the telemetry and `lift_multiplier` in the versioned layout.
    ///
    /// # Errors
    /// Returns [`PersistError::Encode`] if the codec fails.
    pub fn encode(&self, lift_multiplier: f32) -> Result<Vec<u8>, PersistError> {
        let scalars = SCALAR_LAYOUT.map(|slot| match slot {
            ScalarSlot::Sentinel(value) => value,
            ScalarSlot::Opaque(index) => self.opaque_scalars.get(index).copied().unwrap_or(0.0),
            ScalarSlot::LiftMultiplier => lift_multiplier,
        });
        let record = LocomotorRecord {
            frame_offset: self.frame_offset,
            position: self.position.to_array(),
            scalars,
            flags: self.flags,
            toggles: self.toggles,
        };
        let bytes = bincode::serde::encode_to_vec((PERSIST_VERSION, &record), codec())?;
        Ok(bytes)
    }

    /// Parses a versioned block, returning the telemetry and lift multiplier.
    ///
    /// # Errors
    /// Rejects any version other than [`PERSIST_VERSION`], any sentinel slot
    /// that does not hold its exact value, truncated input and trailing bytes.
    pub fn decode(bytes: &[u8]) -> Result<(Self, f32), PersistError> {
        let (version, header_len): (u8, usize) =
            bincode::serde::decode_from_slice(bytes, codec())?;
        if version != PERSIST_VERSION {
            error!("refusing locomotor state version {version}, expected {PERSIST_VERSION}");
            return Err(PersistError::UnsupportedVersion {
                found: version,
                expected: PERSIST_VERSION,
            });
        }

        let body = bytes.get(header_len..).unwrap_or_default();
        let (record, body_len): (LocomotorRecord, usize) =
            bincode::serde::decode_from_slice(body, codec())?;
        if body_len != body.len() {
            return Err(PersistError::TrailingBytes(body.len() - body_len));
        }

        let mut telemetry = Self {
            frame_offset: record.frame_offset,
            position: Vec3::from_array(record.position),
            opaque_scalars: [0.0; 4],
            flags: record.flags,
            toggles: record.toggles,
        };
        let mut lift_multiplier = 1.0;
        for (slot, (role, value)) in SCALAR_LAYOUT.iter().zip(record.scalars).enumerate() {
            match *role {
                ScalarSlot::Sentinel(expected) => {
                    if value.to_bits() != expected.to_bits() {
                        error!("locomotor state slot {slot} holds {value}, expected {expected}");
                        return Err(PersistError::SentinelMismatch {
                            slot,
                            expected,
                            found: value,
                        });
                    }
                }
                ScalarSlot::Opaque(index) => {
                    if let Some(target) = telemetry.opaque_scalars.get_mut(index) {
                        *target = value;
                    }
                }
                ScalarSlot::LiftMultiplier => lift_multiplier = value,
            }
        }
        Ok((telemetry, lift_multiplier))
    }
}

#[cfg(test)]
#[expect(
    clippy::little_endian_bytes,
    reason = "Tests poke at the little-endian persisted layout directly."
)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> LegacyTelemetry {
        LegacyTelemetry {
            frame_offset: 1_234,
            position: Vec3::new(10.5, -3.25, 7.0),
            opaque_scalars: [0.5, -2.0, 3.75, 1e-3],
            flags: 0b1010_0101,
            toggles: [true, false],
        }
    }

    /// Byte offset of scalar slot `slot` in an encoded block.
    const fn slot_offset(slot: usize) -> usize {
        1 + 4 + 12 + slot * 4
    }

    #[test]
    fn encoded_length_matches_layout() {
        let bytes = sample().encode(1.0).expect("encode");
        assert_eq!(bytes.len(), 1 + 4 + 12 + SCALAR_SLOTS * 4 + 1 + 2);
        assert_eq!(bytes.first(), Some(&PERSIST_VERSION));
    }

    #[test]
    fn sentinels_are_written_at_their_slots() {
        let bytes = sample().encode(1.0).expect("encode");
        let first = bytes
            .get(slot_offset(0)..slot_offset(1))
            .expect("slot zero in range");
        assert_eq!(first, BIG_NUMBER.to_le_bytes().as_slice());
    }

    #[test]
    fn round_trip_preserves_everything() {
        let telemetry = sample();
        let bytes = telemetry.encode(1.5).expect("encode");
        let (decoded, lift_multiplier) = LegacyTelemetry::decode(&bytes).expect("decode");
        assert_eq!(decoded, telemetry);
        assert_eq!(lift_multiplier.to_bits(), 1.5_f32.to_bits());
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    #[case(255)]
    fn other_versions_are_rejected(#[case] version: u8) {
        let mut bytes = sample().encode(1.0).expect("encode");
        if let Some(first) = bytes.first_mut() {
            *first = version;
        }
        assert!(matches!(
            LegacyTelemetry::decode(&bytes),
            Err(PersistError::UnsupportedVersion { found, expected: 2 }) if found == version
        ));
    }

    #[rstest]
    #[case::first_ceiling(0)]
    #[case::first_unit(4)]
    #[case::second_ceiling(6)]
    #[case::second_unit(8)]
    fn sentinel_drift_is_fatal(#[case] slot: usize) {
        let mut bytes = sample().encode(1.0).expect("encode");
        let offset = slot_offset(slot);
        let drifted = 42.0_f32.to_le_bytes();
        bytes
            .get_mut(offset..offset + 4)
            .expect("slot in range")
            .copy_from_slice(&drifted);
        match LegacyTelemetry::decode(&bytes) {
            Err(PersistError::SentinelMismatch { slot: found, .. }) => assert_eq!(found, slot),
            other => panic!("expected sentinel mismatch, got {other:?}"),
        }
    }

    #[test]
    fn truncated_input_fails_to_decode() {
        let bytes = sample().encode(1.0).expect("encode");
        let truncated = bytes.get(..bytes.len() - 1).expect("non-empty");
        assert!(matches!(
            LegacyTelemetry::decode(truncated),
            Err(PersistError::Decode(_))
        ));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = sample().encode(1.0).expect("encode");
        bytes.push(0);
        assert!(matches!(
            LegacyTelemetry::decode(&bytes),
            Err(PersistError::TrailingBytes(1))
        ));
    }

    #[test]
    fn invalid_boolean_fails_to_decode() {
        let mut bytes = sample().encode(1.0).expect("encode");
        if let Some(last) = bytes.last_mut() {
            *last = 2;
        }
        assert!(matches!(
            LegacyTelemetry::decode(&bytes),
            Err(PersistError::Decode(_))
        ));
    }
}
