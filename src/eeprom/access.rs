//! Field access with fetch-on-miss.
//!
//! The image is a write-through cache over the firmware: a byte holding the
//! sentinel triggers exactly one fetch for its offset, and whatever the
//! store holds afterwards is returned. A fetch that leaves the sentinel in
//! place is indistinguishable from a field that is genuinely `0xFF`.

use log::debug;

use crate::constants::EEPROM_SENTINEL;
use crate::fetch::FieldFetcher;

use super::EepromImage;

/// Read the byte at `offset`, fetching it first if it is still the sentinel.
///
/// Offsets outside the image read as the sentinel and are never fetched.
pub fn read_field<F: FieldFetcher + ?Sized>(
    image: &mut EepromImage,
    fetcher: &mut F,
    offset: usize,
) -> u8 {
    if offset >= image.len() {
        debug!("eeprom: offset 0x{offset:x} outside image");
        return EEPROM_SENTINEL;
    }

    if image.field(offset).is_missing() {
        debug!("eeprom: fetching field 0x{offset:03x}");
        fetcher.fetch_field(offset, image.as_bytes_mut());
    }

    image.get(offset).unwrap_or(EEPROM_SENTINEL)
}
