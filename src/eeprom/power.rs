//! Target TX power lookup.
//!
//! The image holds two power tables. The 2.4 GHz table has three entries
//! per chain, of which the first two are used: TSSI-calibrated and
//! uncalibrated. The 5 GHz table has twelve entries per chain, one per
//! channel group for the calibrated case and group 8 for uncalibrated.

use crate::calibration::Calibration;
use crate::constants::*;
use crate::error::{Error, Result};
use crate::fetch::FieldFetcher;
use crate::types::{Band, Channel};

use super::access::read_field;
use super::EepromImage;

/// Compute the image offset of the target power entry for `chain_idx` on
/// `channel`.
pub fn target_power_offset<C: Calibration + ?Sized>(
    image: &EepromImage,
    calibration: &C,
    channel: Channel,
    chain_idx: u8,
) -> Result<usize> {
    if chain_idx > MAX_CHAIN_IDX {
        return Err(Error::InvalidArgument("chain index out of range"));
    }
    let chain = chain_idx as usize;
    let tssi_on = calibration.tssi_enabled(image, channel.band);

    let offset = match channel.band {
        Band::Ghz2 => MT_EE_TX0_POWER_2G + chain * POWER_2G_STRIDE + usize::from(!tssi_on),
        _ => {
            // Groups come from the calibration source; an oversized one
            // saturates past the image and reads as the sentinel.
            let group = if tssi_on {
                calibration.channel_group(channel.hw_value)
            } else {
                POWER_5G_UNCAL_GROUP
            };
            (MT_EE_TX0_POWER_5G + chain * POWER_5G_STRIDE).saturating_add(group)
        }
    };
    Ok(offset)
}

/// Read the raw target power for `chain_idx` on `channel`.
///
/// An out-of-range chain index is rejected before anything is fetched.
pub fn target_power<F, C>(
    image: &mut EepromImage,
    fetcher: &mut F,
    calibration: &C,
    channel: Channel,
    chain_idx: u8,
) -> Result<u8>
where
    F: FieldFetcher + ?Sized,
    C: Calibration + ?Sized,
{
    let offset = target_power_offset(image, calibration, channel, chain_idx)?;
    Ok(read_field(image, fetcher, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{FixedCalibration, ImageCalibration};
    use crate::fetch::ImageFetcher;

    const TSSI_OFF: FixedCalibration = FixedCalibration {
        tssi_2g: false,
        tssi_5g: false,
    };
    const TSSI_ON: FixedCalibration = FixedCalibration {
        tssi_2g: true,
        tssi_5g: true,
    };

    fn blank() -> EepromImage {
        EepromImage::from_bytes(&[])
    }

    #[test]
    fn offset_2g() {
        let ch = Channel::new(Band::Ghz2, 6);
        assert_eq!(
            target_power_offset(&blank(), &TSSI_OFF, ch, 1).unwrap(),
            MT_EE_TX0_POWER_2G + 4
        );
        assert_eq!(
            target_power_offset(&blank(), &TSSI_ON, ch, 1).unwrap(),
            MT_EE_TX0_POWER_2G + 3
        );
        assert_eq!(
            target_power_offset(&blank(), &TSSI_ON, ch, 0).unwrap(),
            MT_EE_TX0_POWER_2G
        );
    }

    #[test]
    fn offset_5g_uncalibrated() {
        let ch = Channel::new(Band::Ghz5, 36);
        assert_eq!(
            target_power_offset(&blank(), &TSSI_OFF, ch, 2).unwrap(),
            MT_EE_TX0_POWER_5G + 32
        );
    }

    #[test]
    fn offset_5g_calibrated_uses_group() {
        let ch = Channel::new(Band::Ghz5, 100);
        assert_eq!(
            target_power_offset(&blank(), &TSSI_ON, ch, 3).unwrap(),
            MT_EE_TX0_POWER_5G + 36 + 4
        );
    }

    #[test]
    fn chain_index_bounds() {
        let ch = Channel::new(Band::Ghz2, 1);
        for idx in 0..=3 {
            assert!(target_power_offset(&blank(), &TSSI_OFF, ch, idx).is_ok());
        }
        for idx in [4, 255] {
            assert!(matches!(
                target_power_offset(&blank(), &TSSI_OFF, ch, idx),
                Err(Error::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn invalid_chain_does_not_fetch() {
        let mut image = blank();
        let mut fetcher = ImageFetcher::new(vec![0; MT7915_EEPROM_SIZE]);
        let ch = Channel::new(Band::Ghz5, 36);
        assert!(target_power(&mut image, &mut fetcher, &TSSI_OFF, ch, 4).is_err());
        assert_eq!(fetcher.fetch_count(), 0);
    }

    #[test]
    fn reads_power_through_accessor() {
        let mut backing = vec![0u8; MT7915_EEPROM_SIZE];
        backing[MT_EE_TX0_POWER_2G + 4] = 0x24;
        backing[MT_EE_TX0_POWER_5G + 12 + 8] = 0x1c;
        let mut fetcher = ImageFetcher::new(backing);
        let mut image = blank();
        image.set(MT_EE_WIFI_CONF7, 0);

        let cal = ImageCalibration;
        let p2 = target_power(&mut image, &mut fetcher, &cal, Channel::new(Band::Ghz2, 1), 1);
        assert_eq!(p2, Ok(0x24));
        let p5 = target_power(&mut image, &mut fetcher, &cal, Channel::new(Band::Ghz5, 149), 1);
        assert_eq!(p5, Ok(0x1c));
        assert_eq!(fetcher.fetch_count(), 2);
    }

    struct HugeGroup;

    impl Calibration for HugeGroup {
        fn tssi_enabled(&self, _image: &EepromImage, _band: Band) -> bool {
            true
        }

        fn channel_group(&self, _hw_value: u16) -> usize {
            usize::MAX
        }
    }

    #[test]
    fn oversized_group_reads_sentinel() {
        let ch = Channel::new(Band::Ghz5, 36);
        assert_eq!(target_power_offset(&blank(), &HugeGroup, ch, 3), Ok(usize::MAX));

        let mut image = blank();
        let mut fetcher = ImageFetcher::new(vec![0u8; MT7915_EEPROM_SIZE]);
        assert_eq!(target_power(&mut image, &mut fetcher, &HugeGroup, ch, 0), Ok(EEPROM_SENTINEL));
        assert_eq!(fetcher.fetch_count(), 0);
    }
}
