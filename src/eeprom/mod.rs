//! MT7915 EEPROM support: loading, field access, validation, and decoding.
//!
//! The EEPROM stores the factory calibration of the adapter: signature,
//! MAC address, band and chain configuration, and TX power tables. This
//! module provides:
//!
//! - [`EepromImage`] - The fixed-size byte store.
//! - [`access`] - Field reads that fetch unpopulated bytes from firmware.
//! - [`validate`] - Store allocation and signature check.
//! - [`capability`] - Band and chain-mask decoding.
//! - [`power`] - Target TX power lookup per channel and chain.
//!
//! The [`Mt7915Device`](crate::Mt7915Device) context ties these together
//! into the initialization sequence.

pub mod access;
pub mod capability;
mod image;
pub mod power;
pub mod validate;

pub use image::{EepromImage, FieldValue, HeapAllocator, StoreAllocator};
