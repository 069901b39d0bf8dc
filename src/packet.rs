//! Datagram framing
//!
//! This module contains the two packet representations handled by the radio layer:
//! - [`Datagram`]: the driver-native unit, a payload plus the signal strength it was received with
//! - [`FramedPacket`]: the flat buffer handed to callers, payload followed by a 4-byte RSSI trailer
//!
//! # Frame Layout
//! ```text
//! 0                         MAX_PACKET_SIZE          FRAME_SIZE
//! +-------------------------+------------------------+
//! | payload (zero padded)   | RSSI (i32, LE)         |
//! +-------------------------+------------------------+
//! ```
//!
//! The layout is the binding-compatibility surface with existing callers and
//! must not change.

use core::convert::Infallible;
use core::fmt;

use regiface::{FromByteArray, ToByteArray};

/// Largest payload the radio carries in a single datagram
pub const MAX_PACKET_SIZE: usize = 32;

/// Size of the RSSI trailer appended to every frame
pub const RSSI_SIZE: usize = core::mem::size_of::<i32>();

/// Total size of a [`FramedPacket`]
pub const FRAME_SIZE: usize = MAX_PACKET_SIZE + RSSI_SIZE;

/// Error type for flat frame decoding
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// The buffer is not exactly [`FRAME_SIZE`] bytes long
    InvalidLength(usize),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "frame must be {FRAME_SIZE} bytes, got {len}")
            }
        }
    }
}

/// A datagram as exchanged with the driver
///
/// The payload capacity is bounded by [`MAX_PACKET_SIZE`], so a datagram can
/// never carry more than the payload region of a frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Datagram {
    /// Payload bytes as received over the air
    pub payload: heapless::Vec<u8, MAX_PACKET_SIZE>,
    /// Received signal strength indicator
    pub rssi: i32,
}

impl Datagram {
    /// Creates a datagram, truncating `payload` to [`MAX_PACKET_SIZE`].
    pub fn new(payload: &[u8], rssi: i32) -> Self {
        let len = payload.len().min(MAX_PACKET_SIZE);
        let mut bytes = heapless::Vec::new();
        // cannot fail, len is bounded by the capacity
        let _ = bytes.extend_from_slice(&payload[..len]);

        Self {
            payload: bytes,
            rssi,
        }
    }
}

/// A received datagram in its caller-facing layout
///
/// Backed by the flat [`FRAME_SIZE`]-byte representation; the accessors read
/// from fixed offsets so no call site does offset arithmetic.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FramedPacket {
    bytes: [u8; FRAME_SIZE],
}

impl FramedPacket {
    /// Builds a frame from a payload and an RSSI value.
    ///
    /// Payloads longer than [`MAX_PACKET_SIZE`] are truncated; shorter ones are
    /// zero padded.
    pub fn new(payload: &[u8], rssi: i32) -> Self {
        let mut bytes = [0u8; FRAME_SIZE];
        let len = payload.len().min(MAX_PACKET_SIZE);
        bytes[..len].copy_from_slice(&payload[..len]);
        bytes[MAX_PACKET_SIZE..].copy_from_slice(&rssi.to_le_bytes());

        Self { bytes }
    }

    /// Encodes a driver datagram into the flat layout.
    pub fn from_datagram(datagram: &Datagram) -> Self {
        Self::new(&datagram.payload, datagram.rssi)
    }

    /// The full payload region, including any zero padding
    pub fn payload(&self) -> &[u8] {
        &self.bytes[..MAX_PACKET_SIZE]
    }

    /// The received signal strength stored in the trailer
    pub fn rssi(&self) -> i32 {
        let mut raw = [0u8; RSSI_SIZE];
        raw.copy_from_slice(&self.bytes[MAX_PACKET_SIZE..]);
        i32::from_le_bytes(raw)
    }

    /// The flat frame bytes
    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.bytes
    }
}

impl fmt::Debug for FramedPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FramedPacket")
            .field("payload", &self.payload())
            .field("rssi", &self.rssi())
            .finish()
    }
}

impl FromByteArray for FramedPacket {
    type Error = Infallible;
    type Array = [u8; FRAME_SIZE];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { bytes })
    }
}

impl ToByteArray for FramedPacket {
    type Error = Infallible;
    type Array = [u8; FRAME_SIZE];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(self.bytes)
    }
}

impl TryFrom<&[u8]> for FramedPacket {
    type Error = FrameError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; FRAME_SIZE] = value
            .try_into()
            .map_err(|_| FrameError::InvalidLength(value.len()))?;

        Ok(Self { bytes })
    }
}

/// Length of the payload to transmit for a caller-supplied frame buffer.
///
/// The trailing RSSI bytes are never sent. Returns `None` when nothing would
/// remain after dropping the trailer.
pub(crate) fn outbound_len(buffer: &[u8]) -> Option<usize> {
    match buffer.len().checked_sub(RSSI_SIZE) {
        Some(len) if len > 0 => Some(len),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let frame = FramedPacket::new(&[1, 2, 3], -70);
        let bytes = frame.as_bytes();

        assert_eq!(bytes.len(), FRAME_SIZE);
        assert_eq!(&bytes[..3], &[1, 2, 3]);
        assert!(bytes[3..MAX_PACKET_SIZE].iter().all(|b| *b == 0));
        assert_eq!(&bytes[MAX_PACKET_SIZE..], &(-70i32).to_le_bytes());
        assert_eq!(frame.rssi(), -70);
    }

    #[test]
    fn test_full_payload_fills_region() {
        let payload = [0xA5u8; MAX_PACKET_SIZE];
        let frame = FramedPacket::new(&payload, i32::MIN);

        assert_eq!(frame.payload(), &payload);
        assert_eq!(frame.rssi(), i32::MIN);
    }

    #[test]
    fn test_oversized_payload_is_truncated() {
        let payload = [0xFFu8; MAX_PACKET_SIZE + 8];
        let frame = FramedPacket::new(&payload, 0);

        assert_eq!(frame.payload(), &payload[..MAX_PACKET_SIZE]);
        assert_eq!(frame.rssi(), 0);
    }

    #[test]
    fn test_datagram_truncates() {
        let datagram = Datagram::new(&[7u8; MAX_PACKET_SIZE + 1], -1);
        assert_eq!(datagram.payload.len(), MAX_PACKET_SIZE);
    }

    #[test]
    fn test_try_from_slice() {
        let frame = FramedPacket::new(b"hi", 12);
        let decoded = FramedPacket::try_from(&frame.as_bytes()[..]).unwrap();
        assert_eq!(decoded, frame);

        assert_eq!(
            FramedPacket::try_from(&[0u8; FRAME_SIZE - 1][..]),
            Err(FrameError::InvalidLength(FRAME_SIZE - 1))
        );
    }

    #[test]
    fn test_regiface_bytes() {
        let frame = FramedPacket::new(&[9, 8], 1_000);
        let raw = frame.to_bytes().unwrap();
        assert_eq!(FramedPacket::from_bytes(raw).unwrap(), frame);
    }

    #[test]
    fn test_outbound_len() {
        assert_eq!(outbound_len(&[]), None);
        assert_eq!(outbound_len(&[0; RSSI_SIZE]), None);
        assert_eq!(outbound_len(&[0; RSSI_SIZE + 1]), Some(1));
        assert_eq!(outbound_len(&[0; FRAME_SIZE]), Some(MAX_PACKET_SIZE));
    }
}
