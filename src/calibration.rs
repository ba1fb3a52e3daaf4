//! Calibration state lookups used by the target power resolver.

use crate::constants::{MT_EE_WIFI_CONF7, MT_EE_WIFI_CONF7_TSSI0_2G, MT_EE_WIFI_CONF7_TSSI0_5G};
use crate::eeprom::EepromImage;
use crate::types::Band;

/// Source of TSSI calibration state and channel grouping.
pub trait Calibration {
    /// Whether TSSI power calibration is enabled on `band`.
    fn tssi_enabled(&self, image: &EepromImage, band: Band) -> bool;

    /// Calibration group of a 5 GHz channel number.
    fn channel_group(&self, hw_value: u16) -> usize;
}

impl<C: Calibration + ?Sized> Calibration for &C {
    fn tssi_enabled(&self, image: &EepromImage, band: Band) -> bool {
        (**self).tssi_enabled(image, band)
    }

    fn channel_group(&self, hw_value: u16) -> usize {
        (**self).channel_group(hw_value)
    }
}

/// Reads TSSI flags from the image's `WIFI_CONF + 7` byte and groups
/// channels with the MT7915 table.
///
/// The flag byte is read raw: an unpopulated byte reads as `0xFF`, which
/// enables TSSI on both bands.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCalibration;

impl Calibration for ImageCalibration {
    fn tssi_enabled(&self, image: &EepromImage, band: Band) -> bool {
        let flags = image.field(MT_EE_WIFI_CONF7).raw();
        let bit = match band {
            Band::Ghz5 => MT_EE_WIFI_CONF7_TSSI0_5G,
            Band::Ghz2 => MT_EE_WIFI_CONF7_TSSI0_2G,
        };
        flags & bit != 0
    }

    fn channel_group(&self, hw_value: u16) -> usize {
        channel_group(hw_value)
    }
}

/// Map a 5 GHz channel number to its power calibration group.
pub fn channel_group(channel: u16) -> usize {
    match channel {
        184..=196 => 0,
        0..=48 => 1,
        49..=64 => 2,
        65..=96 => 3,
        97..=112 => 4,
        113..=144 => 5,
        _ => 6,
    }
}

/// Fixed calibration state, for callers that track TSSI elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedCalibration {
    /// TSSI enabled on 2.4 GHz.
    pub tssi_2g: bool,
    /// TSSI enabled on 5 GHz.
    pub tssi_5g: bool,
}

impl Calibration for FixedCalibration {
    fn tssi_enabled(&self, _image: &EepromImage, band: Band) -> bool {
        match band {
            Band::Ghz2 => self.tssi_2g,
            Band::Ghz5 => self.tssi_5g,
        }
    }

    fn channel_group(&self, hw_value: u16) -> usize {
        channel_group(hw_value)
    }
}
