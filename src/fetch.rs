//! On-demand population of EEPROM fields from firmware.
//!
//! The EEPROM image starts out filled with the sentinel. Whenever the field
//! accessor meets a sentinel byte it asks a [`FieldFetcher`] to fill that
//! offset in. The fetcher may write more than the requested byte, or nothing
//! at all; the accessor never checks.
//!
//! - [`FieldFetcher`] - single-offset fetch interface consumed by the core.
//! - [`BlockFetcher`] - adapts a firmware [`BlockSource`] that returns whole
//!   [`MT7915_EEPROM_BLOCK_SIZE`]-byte blocks.
//! - [`ImageFetcher`] - serves fields from a complete image already in
//!   memory, such as a dump read from disk.
//! - [`NoFetch`] - never populates anything.

use log::{debug, warn};

use crate::constants::{EEPROM_SENTINEL, MT7915_EEPROM_BLOCK_SIZE};

/// Fetches one EEPROM field from firmware into the image.
pub trait FieldFetcher {
    /// Populate `store[offset]`, possibly along with its neighbours.
    ///
    /// Failures are silent: the byte is simply left unchanged.
    fn fetch_field(&mut self, offset: usize, store: &mut [u8]);
}

impl<F: FieldFetcher + ?Sized> FieldFetcher for &mut F {
    fn fetch_field(&mut self, offset: usize, store: &mut [u8]) {
        (**self).fetch_field(offset, store)
    }
}

impl<F: FieldFetcher + ?Sized> FieldFetcher for Box<F> {
    fn fetch_field(&mut self, offset: usize, store: &mut [u8]) {
        (**self).fetch_field(offset, store)
    }
}

/// A fetcher that never populates anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFetch;

impl FieldFetcher for NoFetch {
    fn fetch_field(&mut self, _offset: usize, _store: &mut [u8]) {}
}

/// Firmware command channel returning EEPROM contents block by block.
pub trait BlockSource {
    /// Error reported by the command channel.
    type Error: std::fmt::Display;

    /// Read the block starting at `block_start` (a multiple of
    /// [`MT7915_EEPROM_BLOCK_SIZE`]).
    fn read_block(
        &mut self,
        block_start: usize,
        block: &mut [u8; MT7915_EEPROM_BLOCK_SIZE],
    ) -> Result<(), Self::Error>;
}

/// Adapts a [`BlockSource`] to [`FieldFetcher`].
///
/// The requested offset is aligned down to its block and the whole block is
/// copied into the store, so neighbouring fields are populated by the same
/// request.
#[derive(Debug)]
pub struct BlockFetcher<S> {
    source: S,
}

impl<S: BlockSource> BlockFetcher<S> {
    /// Wrap a block source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Unwrap the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: BlockSource> FieldFetcher for BlockFetcher<S> {
    fn fetch_field(&mut self, offset: usize, store: &mut [u8]) {
        let start = offset - offset % MT7915_EEPROM_BLOCK_SIZE;
        if start >= store.len() {
            return;
        }
        let end = (start + MT7915_EEPROM_BLOCK_SIZE).min(store.len());

        let mut block = [EEPROM_SENTINEL; MT7915_EEPROM_BLOCK_SIZE];
        match self.source.read_block(start, &mut block) {
            Ok(()) => {
                debug!("eeprom: fetched block 0x{start:03x}");
                store[start..end].copy_from_slice(&block[..end - start]);
            }
            Err(e) => warn!("eeprom: fetching block 0x{start:03x} failed: {e}"),
        }
    }
}

/// Serves fields from a complete image held in memory.
///
/// Works both as a byte-granular [`FieldFetcher`] and as a [`BlockSource`].
/// Every request is counted.
#[derive(Debug, Clone, Default)]
pub struct ImageFetcher {
    image: Vec<u8>,
    fetches: usize,
}

impl ImageFetcher {
    /// Serve fields from `image`. Offsets past its end read as the sentinel.
    pub fn new(image: impl Into<Vec<u8>>) -> Self {
        Self {
            image: image.into(),
            fetches: 0,
        }
    }

    /// Number of fetch requests served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    fn byte(&self, offset: usize) -> u8 {
        self.image.get(offset).copied().unwrap_or(EEPROM_SENTINEL)
    }
}

impl FieldFetcher for ImageFetcher {
    fn fetch_field(&mut self, offset: usize, store: &mut [u8]) {
        self.fetches += 1;
        let value = self.byte(offset);
        if let Some(slot) = store.get_mut(offset) {
            *slot = value;
        }
    }
}

impl BlockSource for ImageFetcher {
    type Error = std::convert::Infallible;

    fn read_block(
        &mut self,
        block_start: usize,
        block: &mut [u8; MT7915_EEPROM_BLOCK_SIZE],
    ) -> Result<(), Self::Error> {
        self.fetches += 1;
        for (i, b) in block.iter_mut().enumerate() {
            *b = self.byte(block_start + i);
        }
        Ok(())
    }
}
