//! Default radio configuration
//!
//! The configuration applied once, on the first successful enable. The group
//! is derived from a hash of the running program so that co-located devices
//! running different programs do not hear each other unless they explicitly
//! join the same group.

use core::ops::RangeInclusive;

/// Transmit power applied on first enable (high, but not maximum)
pub const DEFAULT_TRANSMIT_POWER: i32 = 6;

/// Valid group IDs, published for tooling; not enforced by this crate
pub const GROUP_RANGE: RangeInclusive<i32> = 0..=255;

/// Valid transmit power levels, 0 lowest to 7 highest; not enforced by this crate
pub const TRANSMIT_POWER_RANGE: RangeInclusive<i32> = 0..=7;

/// Valid frequency bands in 1 MHz steps above 2400 MHz; not enforced by this crate
pub const FREQUENCY_BAND_RANGE: RangeInclusive<i32> = 0..=83;

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Configuration applied by the lifecycle manager on first enable
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    /// Group ID the radio joins
    pub group: u8,
    /// Initial transmit power level
    pub transmit_power: i32,
}

impl RadioConfig {
    /// Configuration for a program identified by `program_hash`.
    ///
    /// The group is the low byte of the hash.
    pub const fn for_program(program_hash: u32) -> Self {
        Self {
            group: (program_hash & 0xFF) as u8,
            transmit_power: DEFAULT_TRANSMIT_POWER,
        }
    }

    /// Configuration for a program identified by arbitrary bytes (a build ID,
    /// the program image, its name).
    pub fn from_identity(identity: &[u8]) -> Self {
        Self::for_program(program_hash(identity))
    }
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self::for_program(0)
    }
}

/// 32-bit FNV-1a hash of a program identity
pub fn program_hash(identity: &[u8]) -> u32 {
    identity.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_reference_values() {
        assert_eq!(program_hash(b""), 0x811C_9DC5);
        assert_eq!(program_hash(b"a"), 0xE40C_292C);
        assert_eq!(program_hash(b"foobar"), 0xBF9C_F968);
    }

    #[test]
    fn test_group_is_low_byte() {
        let config = RadioConfig::for_program(0x1234_56AB);
        assert_eq!(config.group, 0xAB);
        assert_eq!(config.transmit_power, DEFAULT_TRANSMIT_POWER);
    }

    #[test]
    fn test_identity_is_deterministic() {
        assert_eq!(
            RadioConfig::from_identity(b"blinky"),
            RadioConfig::from_identity(b"blinky")
        );
        assert_eq!(
            RadioConfig::from_identity(b"a").group,
            (0xE40C_292Cu32 & 0xFF) as u8
        );
    }
}
