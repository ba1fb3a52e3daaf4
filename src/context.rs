//! Device context and EEPROM initialization sequence.
//!
//! [`Mt7915Device`] owns the EEPROM image together with the collaborators
//! used to populate and interpret it. It drives the sequence
//! `Unloaded -> Loaded -> Validated -> CapabilityParsed -> Ready` and serves
//! field and TX power reads afterwards.
//!
//! Access is single-threaded: callers sharing a device across threads must
//! wrap it in their own lock.

use log::{debug, warn};

use crate::calibration::{Calibration, ImageCalibration};
use crate::constants::*;
use crate::eeprom::{access, capability, power, validate};
use crate::eeprom::{EepromImage, HeapAllocator, StoreAllocator};
use crate::error::{Error, Result};
use crate::fetch::FieldFetcher;
use crate::overrides::{DeviceIdentity, EepromOverride, NoOverride};
use crate::types::*;

/// An MT7915 device context.
///
/// # Initializing a device
///
/// ```
/// use mt7915_eeprom::{Band, Channel, ImageFetcher, Mt7915Device};
///
/// let mut dump = vec![0u8; 0xE00];
/// dump[0] = 0x15;
/// dump[1] = 0x79;
/// dump[0x190] = 0x82; // 2.4 GHz only, two chains
///
/// let mut dev = Mt7915Device::new(ImageFetcher::new(dump));
/// dev.init()?;
///
/// let cap = dev.hardware_capability().unwrap();
/// assert!(cap.has_2ghz && !cap.has_5ghz);
/// assert_eq!(cap.chain_mask, 0b11);
///
/// let power = dev.target_power(Channel::new(Band::Ghz2, 6), 0)?;
/// # let _ = power;
/// # Ok::<(), mt7915_eeprom::Error>(())
/// ```
pub struct Mt7915Device<F, C = ImageCalibration> {
    fetcher: F,
    calibration: C,

    state: InitState,
    image: Option<EepromImage>,

    // Derived at init
    capability: HardwareCapability,
    mac_address: MacAddress,
}

impl<F, C> std::fmt::Debug for Mt7915Device<F, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt7915Device")
            .field("state", &self.state)
            .field("image", &self.image)
            .field("capability", &self.capability)
            .field("mac_address", &self.mac_address)
            .finish_non_exhaustive()
    }
}

// ---- Construction ----

impl<F: FieldFetcher> Mt7915Device<F> {
    /// Create a device that fetches fields through `fetcher` and reads
    /// calibration state from the image.
    pub fn new(fetcher: F) -> Self {
        Self::with_calibration(fetcher, ImageCalibration)
    }
}

impl<F: FieldFetcher, C: Calibration> Mt7915Device<F, C> {
    /// Create a device with a custom calibration source.
    pub fn with_calibration(fetcher: F, calibration: C) -> Self {
        Self {
            fetcher,
            calibration,
            state: InitState::Unloaded,
            image: None,
            capability: HardwareCapability::default(),
            mac_address: MacAddress::default(),
        }
    }

    // ---- Initialization ----

    /// Run the initialization sequence with a heap-allocated store and no
    /// overrides.
    pub fn init(&mut self) -> Result<()> {
        self.init_with(&mut HeapAllocator, &mut NoOverride)
    }

    /// Run the initialization sequence.
    ///
    /// On failure the device lands in a terminal state
    /// ([`InitState::LoadFailed`] or [`InitState::SignatureInvalid`]) and
    /// exposes no capability. Calling this on a device that is not
    /// [`InitState::Unloaded`] returns [`Error::InvalidState`].
    pub fn init_with<A, O>(&mut self, allocator: &mut A, overrides: &mut O) -> Result<()>
    where
        A: StoreAllocator + ?Sized,
        O: EepromOverride + ?Sized,
    {
        if self.state != InitState::Unloaded {
            return Err(Error::InvalidState(self.state));
        }

        let image = match validate::load(allocator) {
            Ok(image) => image,
            Err(e) => {
                self.transition(InitState::LoadFailed);
                return Err(e);
            }
        };
        let image = self.image.insert(image);
        self.state = InitState::Loaded;

        if let Err(e) = validate::check_signature(image, &mut self.fetcher) {
            self.transition(InitState::SignatureInvalid);
            return Err(e);
        }
        self.transition(InitState::Validated);

        let image = self.image.as_mut().ok_or(Error::InvalidState(self.state))?;
        self.capability = capability::parse_hw_cap(image, &mut self.fetcher);
        // The calibration lookup reads the TSSI flags raw.
        access::read_field(image, &mut self.fetcher, MT_EE_WIFI_CONF7);
        self.transition(InitState::CapabilityParsed);

        let image = self.image.as_mut().ok_or(Error::InvalidState(self.state))?;
        for i in 0..ETH_ALEN {
            access::read_field(image, &mut self.fetcher, MT_EE_MAC_ADDR + i);
        }
        self.mac_address = MacAddress(
            image
                .array::<ETH_ALEN>(MT_EE_MAC_ADDR)
                .unwrap_or([EEPROM_SENTINEL; ETH_ALEN]),
        );
        overrides.apply(DeviceIdentity {
            image,
            capability: &mut self.capability,
            mac_address: &mut self.mac_address,
        });
        if !self.mac_address.is_valid() {
            warn!("eeprom: invalid MAC address {}", self.mac_address);
        }
        self.transition(InitState::Ready);

        Ok(())
    }

    fn transition(&mut self, next: InitState) {
        debug!("eeprom: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    // ---- Accessors ----

    /// Current initialization state.
    pub fn state(&self) -> InitState {
        self.state
    }

    /// The EEPROM image, once loaded.
    pub fn image(&self) -> Option<&EepromImage> {
        self.image.as_ref()
    }

    /// The derived capability. `None` until the device is
    /// [`InitState::Ready`].
    pub fn hardware_capability(&self) -> Option<HardwareCapability> {
        (self.state == InitState::Ready).then_some(self.capability)
    }

    /// The hardware address. `None` until the device is
    /// [`InitState::Ready`].
    pub fn mac_address(&self) -> Option<MacAddress> {
        (self.state == InitState::Ready).then_some(self.mac_address)
    }

    /// Get a reference to the field fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    // ---- Field reads ----

    /// Read one EEPROM byte, fetching it from firmware if unpopulated.
    ///
    /// Before the image is loaded, and on a device whose init failed,
    /// every offset reads as the sentinel without fetching.
    pub fn read_field(&mut self, offset: usize) -> u8 {
        if self.state.is_failed() {
            return EEPROM_SENTINEL;
        }
        match self.image.as_mut() {
            Some(image) => access::read_field(image, &mut self.fetcher, offset),
            None => EEPROM_SENTINEL,
        }
    }

    /// EEPROM layout version byte.
    pub fn eeprom_version(&mut self) -> u8 {
        self.read_field(MT_EE_VERSION)
    }

    /// Image offset of the target power entry for `chain_idx` on `channel`.
    pub fn target_power_offset(&self, channel: Channel, chain_idx: u8) -> Result<usize> {
        let image = self.usable_image()?;
        power::target_power_offset(image, &self.calibration, channel, chain_idx)
    }

    /// Raw target TX power for `chain_idx` (0..=3) on `channel`.
    ///
    /// The value is in the hardware's own units. An out-of-range chain
    /// index returns [`Error::InvalidArgument`] without fetching anything.
    pub fn target_power(&mut self, channel: Channel, chain_idx: u8) -> Result<u8> {
        if chain_idx > MAX_CHAIN_IDX {
            return Err(Error::InvalidArgument("chain index out of range"));
        }
        if self.state.is_failed() {
            return Err(Error::InvalidState(self.state));
        }
        let image = self.image.as_mut().ok_or(Error::InvalidState(self.state))?;
        power::target_power(image, &mut self.fetcher, &self.calibration, channel, chain_idx)
    }

    fn usable_image(&self) -> Result<&EepromImage> {
        if self.state.is_failed() {
            return Err(Error::InvalidState(self.state));
        }
        self.image.as_ref().ok_or(Error::InvalidState(self.state))
    }
}
