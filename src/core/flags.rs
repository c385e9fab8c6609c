//! # Flag Algebra
//!
//! Bit-mask helpers for the two 16-bit flag fields on the wire.
//!
//! Telemetry flags and control flags are independent vocabularies. Each flag
//! owns exactly one bit; any number of flags may be set at once. Bits with no
//! assigned flag are carried through untouched and never interpreted.
//!
//! The free functions ([`flag_mask`], [`is_set`], [`with_flag`]) operate on raw
//! `u16` field values. [`TelemetryFlags`] and [`ControlFlags`] wrap those values
//! so a packet field can only be manipulated with its own vocabulary.
//!
//! ```rust
//! use sensor_link_protocol::core::flags::{is_set, with_flag, TelemetryFlag};
//!
//! let field = with_flag(0, TelemetryFlag::HelpActive, true);
//! assert!(is_set(field, TelemetryFlag::HelpActive));
//! assert!(!is_set(field, TelemetryFlag::SensorFault));
//! ```

use serde::{Deserialize, Serialize};

/// A named single-bit flag.
pub trait Flag: Copy {
    /// Bit mask with exactly one bit set
    fn mask(self) -> u16;
}

/// Single-bit mask for `flag`.
#[inline]
pub fn flag_mask<F: Flag>(flag: F) -> u16 {
    flag.mask()
}

/// True iff the bit for `flag` is set in `field`.
#[inline]
pub fn is_set<F: Flag>(field: u16, flag: F) -> bool {
    (field & flag.mask()) != 0
}

/// Returns `field` with the bit for `flag` set or cleared; all other bits unchanged.
#[inline]
pub fn with_flag<F: Flag>(field: u16, flag: F, state: bool) -> u16 {
    if state {
        field | flag.mask()
    } else {
        field & !flag.mask()
    }
}

/// Telemetry state flags reported by sensor nodes.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TelemetryFlag {
    HelpActive = 1 << 0,
    OverrideActive = 1 << 1,
    SensorFault = 1 << 2,
}

impl TelemetryFlag {
    pub const ALL: [TelemetryFlag; 3] = [
        TelemetryFlag::HelpActive,
        TelemetryFlag::OverrideActive,
        TelemetryFlag::SensorFault,
    ];
}

impl Flag for TelemetryFlag {
    #[inline]
    fn mask(self) -> u16 {
        self as u16
    }
}

/// Command flags written by the control node into a sensor node.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlFlag {
    OverrideEnable = 1 << 0,
    ClearHelpRequest = 1 << 1,
}

impl ControlFlag {
    pub const ALL: [ControlFlag; 2] = [ControlFlag::OverrideEnable, ControlFlag::ClearHelpRequest];
}

impl Flag for ControlFlag {
    #[inline]
    fn mask(self) -> u16 {
        self as u16
    }
}

// Typed wrapper around a raw flags field. Keeps unknown bits as received.
macro_rules! flag_field {
    ($(#[$meta:meta])* $name:ident, $flag:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u16);

        impl $name {
            pub const EMPTY: Self = Self(0);

            /// Mask covering every bit that has an assigned flag
            pub const KNOWN_BITS: u16 = {
                let mut bits = 0u16;
                let mut i = 0;
                while i < $flag::ALL.len() {
                    bits |= $flag::ALL[i] as u16;
                    i += 1;
                }
                bits
            };

            #[inline]
            pub const fn from_bits(bits: u16) -> Self {
                Self(bits)
            }

            #[inline]
            pub const fn bits(self) -> u16 {
                self.0
            }

            #[inline]
            pub fn contains(self, flag: $flag) -> bool {
                is_set(self.0, flag)
            }

            #[inline]
            #[must_use]
            pub fn with(self, flag: $flag, state: bool) -> Self {
                Self(with_flag(self.0, flag, state))
            }

            #[inline]
            pub fn set(&mut self, flag: $flag, state: bool) {
                self.0 = with_flag(self.0, flag, state);
            }

            /// Bits set in the field that carry no assigned meaning
            #[inline]
            pub const fn unknown_bits(self) -> u16 {
                self.0 & !Self::KNOWN_BITS
            }

            pub fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// Known flags currently set, in bit order
            pub fn iter(self) -> impl Iterator<Item = $flag> {
                $flag::ALL.into_iter().filter(move |flag| self.contains(*flag))
            }
        }

        impl From<$flag> for $name {
            fn from(flag: $flag) -> Self {
                Self(flag.mask())
            }
        }

        impl From<$name> for u16 {
            fn from(field: $name) -> u16 {
                field.0
            }
        }

        impl FromIterator<$flag> for $name {
            fn from_iter<I: IntoIterator<Item = $flag>>(iter: I) -> Self {
                iter.into_iter()
                    .fold(Self::EMPTY, |acc, flag| acc.with(flag, true))
            }
        }
    };
}

flag_field!(
    /// Raw telemetry flags field.
    TelemetryFlags,
    TelemetryFlag
);

flag_field!(
    /// Raw control command flags field.
    ControlFlags,
    ControlFlag
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_are_single_distinct_bits() {
        let mut seen = 0u16;
        for flag in TelemetryFlag::ALL {
            let mask = flag_mask(flag);
            assert_eq!(mask.count_ones(), 1);
            assert_eq!(seen & mask, 0);
            seen |= mask;
        }
        assert_eq!(seen, 0b111);

        let mut seen = 0u16;
        for flag in ControlFlag::ALL {
            let mask = flag_mask(flag);
            assert_eq!(mask.count_ones(), 1);
            assert_eq!(seen & mask, 0);
            seen |= mask;
        }
        assert_eq!(seen, 0b11);
    }

    #[test]
    fn test_with_flag_leaves_other_bits() {
        let field = 0xFF00;
        let set = with_flag(field, TelemetryFlag::SensorFault, true);
        assert_eq!(set, 0xFF04);
        let cleared = with_flag(set, TelemetryFlag::SensorFault, false);
        assert_eq!(cleared, 0xFF00);
        assert_eq!(with_flag(0xFFFF, ControlFlag::OverrideEnable, false), 0xFFFE);
    }

    #[test]
    fn test_with_flag_idempotent() {
        for flag in TelemetryFlag::ALL {
            for state in [true, false] {
                let once = with_flag(0x1234, flag, state);
                assert_eq!(with_flag(once, flag, state), once);
            }
        }
    }

    #[test]
    fn test_flags_are_additive() {
        let flags: TelemetryFlags = [TelemetryFlag::HelpActive, TelemetryFlag::SensorFault]
            .into_iter()
            .collect();
        assert_eq!(flags.bits(), 0b101);
        assert!(flags.contains(TelemetryFlag::HelpActive));
        assert!(!flags.contains(TelemetryFlag::OverrideActive));
        assert!(flags.contains(TelemetryFlag::SensorFault));
        assert_eq!(
            flags.iter().collect::<Vec<_>>(),
            vec![TelemetryFlag::HelpActive, TelemetryFlag::SensorFault]
        );
    }

    #[test]
    fn test_unknown_bits_pass_through() {
        let mut flags = ControlFlags::from_bits(0x8000);
        flags.set(ControlFlag::ClearHelpRequest, true);
        assert_eq!(flags.bits(), 0x8002);
        assert_eq!(flags.unknown_bits(), 0x8000);
        assert_eq!(flags.iter().count(), 1);
        flags.set(ControlFlag::ClearHelpRequest, false);
        assert_eq!(flags.bits(), 0x8000);
    }

    #[test]
    fn test_known_bits() {
        assert_eq!(TelemetryFlags::KNOWN_BITS, 0x0007);
        assert_eq!(ControlFlags::KNOWN_BITS, 0x0003);
        assert!(TelemetryFlags::EMPTY.is_empty());
        assert_eq!(u16::from(ControlFlags::from(ControlFlag::OverrideEnable)), 1);
    }
}
