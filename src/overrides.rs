//! Post-initialization overrides.
//!
//! After the capability fields and hardware address have been derived, the
//! init sequence hands them to an [`EepromOverride`], which may replace any
//! of them. [`Overrides`] covers the usual platform configuration: a MAC
//! address from the board, a forced band set, or a reduced chain mask.

use log::{info, warn};

use crate::eeprom::EepromImage;
use crate::types::{HardwareCapability, MacAddress};

/// Fields the override step may rewrite.
#[derive(Debug)]
pub struct DeviceIdentity<'a> {
    /// Raw EEPROM image.
    pub image: &'a mut EepromImage,
    /// Derived hardware capability.
    pub capability: &'a mut HardwareCapability,
    /// Hardware address copied from the image.
    pub mac_address: &'a mut MacAddress,
}

/// Post-init hook allowing external configuration to replace parsed values.
pub trait EepromOverride {
    /// Apply the override in place.
    fn apply(&mut self, identity: DeviceIdentity<'_>);
}

impl<O: EepromOverride + ?Sized> EepromOverride for &mut O {
    fn apply(&mut self, identity: DeviceIdentity<'_>) {
        (**self).apply(identity)
    }
}

/// An override step that changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverride;

impl EepromOverride for NoOverride {
    fn apply(&mut self, _identity: DeviceIdentity<'_>) {}
}

/// Platform configuration applied on top of the EEPROM contents.
///
/// All fields are optional; unset fields leave the parsed value alone.
///
/// # Example
///
/// ```
/// use mt7915_eeprom::{MacAddress, Overrides};
///
/// let overrides = Overrides::new()
///     .mac_address(MacAddress([0x00, 0x0c, 0x43, 0x12, 0x34, 0x56]))
///     .chain_mask(0b11);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Replacement hardware address.
    pub mac_address: Option<MacAddress>,
    /// Forced `(has_2ghz, has_5ghz)`. Ignored if both are false.
    pub bands: Option<(bool, bool)>,
    /// Forced chain mask, applied to the antenna and radio masks too.
    pub chain_mask: Option<u8>,
}

impl Overrides {
    /// Create an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the hardware address.
    pub fn mac_address(mut self, mac: MacAddress) -> Self {
        self.mac_address = Some(mac);
        self
    }

    /// Force the supported band set.
    pub fn bands(mut self, has_2ghz: bool, has_5ghz: bool) -> Self {
        self.bands = Some((has_2ghz, has_5ghz));
        self
    }

    /// Force the chain mask.
    pub fn chain_mask(mut self, mask: u8) -> Self {
        self.chain_mask = Some(mask);
        self
    }
}

impl EepromOverride for Overrides {
    fn apply(&mut self, identity: DeviceIdentity<'_>) {
        if let Some(mac) = self.mac_address {
            info!("eeprom: MAC address overridden to {mac}");
            *identity.mac_address = mac;
        }

        match self.bands {
            Some((false, false)) => warn!("eeprom: ignoring band override with no band enabled"),
            Some((has_2ghz, has_5ghz)) => {
                identity.capability.has_2ghz = has_2ghz;
                identity.capability.has_5ghz = has_5ghz;
            }
            None => {}
        }

        if let Some(mask) = self.chain_mask {
            identity.capability.chain_mask = mask;
            identity.capability.antenna_mask = mask;
            identity.capability.phy_chain_mask = mask;
        }
    }
}
