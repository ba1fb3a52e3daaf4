//! Type definitions shared across the crate.
//!
//! These types model what the radio-configuration layers consume: bands and
//! channels, the derived hardware capability, the hardware address and the
//! progress of the initialization sequence.

use std::fmt;

/// Radio frequency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// 2.4 GHz band.
    Ghz2,
    /// 5 GHz band.
    Ghz5,
}

/// A radio channel as seen by the power resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Channel {
    /// Band the channel belongs to.
    pub band: Band,
    /// IEEE channel number.
    pub hw_value: u16,
}

impl Channel {
    /// Create a channel descriptor.
    pub fn new(band: Band, hw_value: u16) -> Self {
        Self { band, hw_value }
    }
}

/// Capabilities derived from the EEPROM's Wi-Fi configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HardwareCapability {
    /// 2.4 GHz band supported.
    pub has_2ghz: bool,
    /// 5 GHz band supported.
    pub has_5ghz: bool,
    /// Device-wide TX/RX chain mask.
    pub chain_mask: u8,
    /// Antenna mask of the primary radio.
    pub antenna_mask: u8,
    /// Chain mask of the primary radio.
    pub phy_chain_mask: u8,
}

impl HardwareCapability {
    /// Number of chains enabled in [`chain_mask`](Self::chain_mask).
    #[inline]
    pub fn chain_count(&self) -> u32 {
        self.chain_mask.count_ones()
    }

    /// Whether the given band is supported.
    pub fn supports(&self, band: Band) -> bool {
        match band {
            Band::Ghz2 => self.has_2ghz,
            Band::Ghz5 => self.has_5ghz,
        }
    }
}

/// A 48-bit IEEE 802 hardware address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// Whether the address is usable as a station address: not all-zero
    /// and not multicast/broadcast.
    pub fn is_valid(&self) -> bool {
        self.0 != [0; 6] && self.0[0] & 0x01 == 0
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            a[0], a[1], a[2], a[3], a[4], a[5]
        )
    }
}

/// Progress of the EEPROM initialization sequence.
///
/// `LoadFailed` and `SignatureInvalid` are terminal: the device must not be
/// used once it reaches either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InitState {
    /// No store allocated yet.
    #[default]
    Unloaded,
    /// Store allocated and filled with the sentinel.
    Loaded,
    /// Signature accepted.
    Validated,
    /// Capability fields derived.
    CapabilityParsed,
    /// Hardware address copied and overrides applied.
    Ready,
    /// Store allocation failed.
    LoadFailed,
    /// Signature rejected.
    SignatureInvalid,
}

impl InitState {
    /// Whether the sequence ended in a failure state.
    #[inline]
    pub fn is_failed(self) -> bool {
        matches!(self, Self::LoadFailed | Self::SignatureInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_display_is_colon_hex() {
        let mac = MacAddress([0x00, 0x0c, 0x43, 0x79, 0x15, 0xab]);
        assert_eq!(mac.to_string(), "00:0c:43:79:15:ab");
    }

    #[test]
    fn mac_validity() {
        assert!(MacAddress([0x00, 0x0c, 0x43, 0x00, 0x00, 0x01]).is_valid());
        assert!(!MacAddress([0; 6]).is_valid());
        assert!(!MacAddress([0xff; 6]).is_valid());
        assert!(!MacAddress([0x01, 0, 0, 0, 0, 1]).is_valid());
    }

    #[test]
    fn chain_count_follows_mask() {
        let cap = HardwareCapability {
            chain_mask: 0b1111,
            ..Default::default()
        };
        assert_eq!(cap.chain_count(), 4);
    }

    #[test]
    fn supports_follows_band_flags() {
        let cap = HardwareCapability {
            has_5ghz: true,
            ..Default::default()
        };
        assert!(cap.supports(Band::Ghz5));
        assert!(!cap.supports(Band::Ghz2));
    }

    #[test]
    fn failure_states() {
        assert!(InitState::LoadFailed.is_failed());
        assert!(InitState::SignatureInvalid.is_failed());
        assert!(!InitState::Ready.is_failed());
    }
}
