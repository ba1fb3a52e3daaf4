//! Hardware capability decoding from the Wi-Fi configuration field.

use log::debug;

use crate::constants::*;
use crate::fetch::FieldFetcher;
use crate::types::HardwareCapability;

use super::access::read_field;
use super::EepromImage;

/// Decode the band selector tag into `(has_2ghz, has_5ghz)`.
///
/// Dual-band, DBDC, and anything unrecognized enable both bands.
pub fn decode_bands(conf: u8) -> (bool, bool) {
    match field_get(MT_EE_WIFI_CONF_BAND_SEL, conf) {
        band_sel::GHZ_5 => (false, true),
        band_sel::GHZ_2 => (true, false),
        _ => (true, true),
    }
}

/// Decode the TX chain count, clamping 0 and out-of-range values to
/// [`MAX_NSS`].
pub fn decode_tx_chains(conf: u8) -> u8 {
    match field_get(MT_EE_WIFI_CONF_TX_MASK, conf) {
        0 => MAX_NSS,
        n if n > MAX_NSS => MAX_NSS,
        n => n,
    }
}

/// Contiguous low-bit mask with `chains` bits set.
#[inline]
pub fn chain_mask(chains: u8) -> u8 {
    ((1u16 << chains) - 1) as u8
}

/// Derive the hardware capability from a configuration byte.
pub fn capability_from_conf(conf: u8) -> HardwareCapability {
    let (has_2ghz, has_5ghz) = decode_bands(conf);
    let mask = chain_mask(decode_tx_chains(conf));

    HardwareCapability {
        has_2ghz,
        has_5ghz,
        chain_mask: mask,
        antenna_mask: mask,
        phy_chain_mask: mask,
    }
}

/// Read [`MT_EE_WIFI_CONF`] through the field accessor and derive the
/// hardware capability. Never fails.
pub fn parse_hw_cap<F: FieldFetcher + ?Sized>(
    image: &mut EepromImage,
    fetcher: &mut F,
) -> HardwareCapability {
    let conf = read_field(image, fetcher, MT_EE_WIFI_CONF);
    let cap = capability_from_conf(conf);
    debug!(
        "eeprom: wifi_conf=0x{conf:02x} 2g={} 5g={} chainmask=0x{:x}",
        cap.has_2ghz, cap.has_5ghz, cap.chain_mask
    );
    cap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::ImageFetcher;

    fn conf(band: u8, tx: u8) -> u8 {
        field_prep(MT_EE_WIFI_CONF_BAND_SEL, band) | field_prep(MT_EE_WIFI_CONF_TX_MASK, tx)
    }

    #[test]
    fn band_tags() {
        assert_eq!(decode_bands(conf(band_sel::GHZ_5, 2)), (false, true));
        assert_eq!(decode_bands(conf(band_sel::GHZ_2, 2)), (true, false));
        assert_eq!(decode_bands(conf(band_sel::DUAL_BAND, 2)), (true, true));
        assert_eq!(decode_bands(conf(band_sel::DBDC, 2)), (true, true));
    }

    #[test]
    fn tx_mask_clamped() {
        for tx in [0, 5, 6, 7] {
            assert_eq!(capability_from_conf(conf(band_sel::GHZ_2, tx)).chain_mask, 0b1111);
        }
        assert_eq!(capability_from_conf(conf(band_sel::GHZ_2, 2)).chain_mask, 0b11);
        assert_eq!(capability_from_conf(conf(band_sel::GHZ_2, 1)).chain_mask, 0b1);
        assert_eq!(capability_from_conf(conf(band_sel::GHZ_2, 4)).chain_mask, 0b1111);
    }

    #[test]
    fn masks_are_shared() {
        let cap = capability_from_conf(conf(band_sel::GHZ_5, 3));
        assert_eq!(cap.chain_mask, 0b111);
        assert_eq!(cap.antenna_mask, cap.chain_mask);
        assert_eq!(cap.phy_chain_mask, cap.chain_mask);
    }

    #[test]
    fn unpopulated_conf_fails_open() {
        // 0xFF decodes as DBDC with tx mask 7: both bands, four chains.
        let cap = capability_from_conf(EEPROM_SENTINEL);
        assert!(cap.has_2ghz && cap.has_5ghz);
        assert_eq!(cap.chain_mask, 0b1111);
    }

    #[test]
    fn parse_reads_through_accessor() {
        let mut backing = vec![0u8; MT_EE_WIFI_CONF + 1];
        backing[MT_EE_WIFI_CONF] = conf(band_sel::GHZ_2, 2);
        let mut fetcher = ImageFetcher::new(backing);
        let mut image = EepromImage::from_bytes(&[]);

        let cap = parse_hw_cap(&mut image, &mut fetcher);
        assert!(cap.has_2ghz);
        assert!(!cap.has_5ghz);
        assert_eq!(cap.chain_mask, 0b11);
        assert_eq!(fetcher.fetch_count(), 1);
        assert_eq!(image.get(MT_EE_WIFI_CONF), Some(0x82));
    }
}
