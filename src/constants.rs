//! EEPROM layout constants for the MT7915.
//!
//! These constants describe the fixed-offset binary format of the EEPROM
//! image: its size, the signature word, the named field offsets, and the
//! bit-fields packed inside the configuration bytes. Most users should not
//! need to use these directly.

/// Size of the EEPROM image in bytes.
pub const MT7915_EEPROM_SIZE: usize = 0xE00;

/// Granularity of firmware EEPROM reads.
pub const MT7915_EEPROM_BLOCK_SIZE: usize = 16;

/// Byte value marking a field that has not been fetched yet.
pub const EEPROM_SENTINEL: u8 = 0xFF;

/// Signature stored little-endian at [`MT_EE_CHIP_ID`].
pub const MT7915_SIGNATURE: u16 = 0x7915;

/// Length of the hardware (MAC) address field.
pub const ETH_ALEN: usize = 6;

/// Highest supported spatial stream / chain count.
pub const MAX_NSS: u8 = 4;

/// Highest valid chain index for power lookups.
pub const MAX_CHAIN_IDX: u8 = MAX_NSS - 1;

// ---- Field offsets ----

/// Chip ID / signature word (2 bytes, little-endian).
pub const MT_EE_CHIP_ID: usize = 0x000;
/// EEPROM layout version.
pub const MT_EE_VERSION: usize = 0x002;
/// Factory MAC address (6 bytes).
pub const MT_EE_MAC_ADDR: usize = 0x004;
/// Wi-Fi configuration: band selector and TX mask.
pub const MT_EE_WIFI_CONF: usize = 0x190;
/// First 2.4 GHz target power entry (chain 0).
pub const MT_EE_TX0_POWER_2G: usize = 0x2FC;
/// First 5 GHz target power entry (chain 0, group 0).
pub const MT_EE_TX0_POWER_5G: usize = 0x34B;

/// 2.4 GHz power entries per chain.
pub const POWER_2G_STRIDE: usize = 3;
/// 5 GHz power entries per chain.
pub const POWER_5G_STRIDE: usize = 12;
/// 5 GHz group used when TSSI calibration is off.
pub const POWER_5G_UNCAL_GROUP: usize = 8;

// ---- Bit-fields of MT_EE_WIFI_CONF ----

/// Band selector, bits 7..6.
pub const MT_EE_WIFI_CONF_BAND_SEL: u8 = 0xC0;
/// TX chain count, bits 2..0.
pub const MT_EE_WIFI_CONF_TX_MASK: u8 = 0x07;

/// Band selector tag values.
pub mod band_sel {
    /// Both bands on a single radio.
    pub const DUAL_BAND: u8 = 0;
    /// 5 GHz only.
    pub const GHZ_5: u8 = 1;
    /// 2.4 GHz only.
    pub const GHZ_2: u8 = 2;
    /// Dual-band dual-concurrent.
    pub const DBDC: u8 = 3;
}

// ---- Bit-fields of MT_EE_WIFI_CONF + 7 ----

/// Offset of the TSSI configuration byte.
pub const MT_EE_WIFI_CONF7: usize = MT_EE_WIFI_CONF + 7;
/// TSSI enabled on 2.4 GHz.
pub const MT_EE_WIFI_CONF7_TSSI0_2G: u8 = 1 << 2;
/// TSSI enabled on 5 GHz.
pub const MT_EE_WIFI_CONF7_TSSI0_5G: u8 = 1 << 4;

/// Extract a bit-field described by a contiguous mask.
#[inline]
pub const fn field_get(mask: u8, value: u8) -> u8 {
    (value & mask) >> mask.trailing_zeros()
}

/// Place a value into the bit-field described by `mask`.
#[inline]
pub const fn field_prep(mask: u8, value: u8) -> u8 {
    (value << mask.trailing_zeros()) & mask
}
