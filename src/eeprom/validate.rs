//! Image loading and signature validation.

use log::{debug, warn};

use crate::constants::{MT7915_EEPROM_SIZE, MT7915_SIGNATURE, MT_EE_CHIP_ID};
use crate::error::{Error, Result};
use crate::fetch::FieldFetcher;

use super::access::read_field;
use super::{EepromImage, StoreAllocator};

/// Allocate the image store and fill it with the sentinel.
pub fn load<A: StoreAllocator + ?Sized>(allocator: &mut A) -> Result<EepromImage> {
    let store = allocator.allocate(MT7915_EEPROM_SIZE)?;
    let image = EepromImage::from_store(store)?;
    debug!("eeprom: loaded {} byte store", image.len());
    Ok(image)
}

/// Check that the image carries the MT7915 signature.
///
/// Both signature bytes go through the field accessor, so either may be
/// fetched. Anything other than an exact `0x7915` is rejected.
pub fn check_signature<F: FieldFetcher + ?Sized>(
    image: &mut EepromImage,
    fetcher: &mut F,
) -> Result<()> {
    read_field(image, fetcher, MT_EE_CHIP_ID);
    read_field(image, fetcher, MT_EE_CHIP_ID + 1);

    match image.le16(MT_EE_CHIP_ID).unwrap_or(u16::MAX) {
        MT7915_SIGNATURE => Ok(()),
        found => {
            warn!("eeprom: bad signature 0x{found:04x}");
            Err(Error::InvalidImage { found })
        }
    }
}
