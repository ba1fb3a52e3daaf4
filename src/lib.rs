//! EEPROM validation and capability decoding for MediaTek MT7915 adapters.
//!
//! The MT7915 keeps its factory configuration in an EEPROM image that the
//! host reads through the firmware's command channel. This crate holds that
//! image, validates it, and derives what the radio layers need: supported
//! bands, chain and antenna masks, the hardware address, and per-channel
//! target TX power entries.
//!
//! # Quick Start
//!
//! ```
//! use mt7915_eeprom::{ImageFetcher, Mt7915Device};
//!
//! # let mut dump = vec![0u8; 0xE00];
//! # dump[0] = 0x15;
//! # dump[1] = 0x79;
//! // `dump` holds an EEPROM image read from firmware or disk
//! let mut dev = Mt7915Device::new(ImageFetcher::new(dump));
//! dev.init()?;
//! println!("{:?}", dev.hardware_capability());
//! # Ok::<(), mt7915_eeprom::Error>(())
//! ```
//!
//! # Features
//!
//! - **Lazy fetch**: the image starts unpopulated (`0xFF`) and bytes are
//!   fetched from firmware on first read ([`fetch`]).
//! - **Validation**: signature check against `0x7915`.
//! - **Capabilities**: band selector and TX chain decoding with clamping
//!   ([`eeprom::capability`]).
//! - **TX power**: table offsets by band, chain, and TSSI calibration mode
//!   ([`eeprom::power`], [`calibration`]).
//! - **Overrides**: platform configuration applied after parsing
//!   ([`overrides`]).

pub mod calibration;
pub mod constants;
pub mod context;
pub mod eeprom;
pub mod error;
pub mod fetch;
pub mod overrides;
pub mod types;

// ---- Convenience re-exports ----

pub use calibration::{Calibration, FixedCalibration, ImageCalibration};
pub use context::Mt7915Device;
pub use eeprom::{EepromImage, FieldValue, HeapAllocator, StoreAllocator};
pub use error::{Error, Result};
pub use fetch::{BlockFetcher, BlockSource, FieldFetcher, ImageFetcher, NoFetch};
pub use overrides::{DeviceIdentity, EepromOverride, NoOverride, Overrides};
pub use types::*;
