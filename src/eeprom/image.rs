//! The EEPROM byte store.

use crate::constants::{EEPROM_SENTINEL, MT7915_EEPROM_SIZE};
use crate::error::{Error, Result};

/// Allocates the backing storage for an [`EepromImage`].
pub trait StoreAllocator {
    /// Return a buffer of exactly `size` bytes.
    fn allocate(&mut self, size: usize) -> Result<Vec<u8>>;
}

/// Allocates the store on the heap, reporting allocation failure instead of
/// aborting.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapAllocator;

impl StoreAllocator for HeapAllocator {
    fn allocate(&mut self, size: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(size)
            .map_err(|e| Error::Allocation(e.to_string()))?;
        buf.resize(size, 0);
        Ok(buf)
    }
}

/// A single EEPROM byte, with the sentinel decoded as absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// The byte still holds the sentinel (never fetched, or unavailable).
    Missing,
    /// A populated byte.
    Present(u8),
}

impl FieldValue {
    /// Decode a raw byte.
    #[inline]
    pub fn from_raw(raw: u8) -> Self {
        if raw == EEPROM_SENTINEL {
            Self::Missing
        } else {
            Self::Present(raw)
        }
    }

    /// The on-the-wire encoding (`0xFF` for missing).
    #[inline]
    pub fn raw(self) -> u8 {
        match self {
            Self::Missing => EEPROM_SENTINEL,
            Self::Present(v) => v,
        }
    }

    /// Whether the byte still needs fetching.
    #[inline]
    pub fn is_missing(self) -> bool {
        self == Self::Missing
    }

    /// Convert into an `Option`.
    #[inline]
    pub fn get(self) -> Option<u8> {
        match self {
            Self::Missing => None,
            Self::Present(v) => Some(v),
        }
    }
}

/// Raw EEPROM image of [`MT7915_EEPROM_SIZE`] bytes.
///
/// The length is fixed at construction. All accessors are bounds-checked:
/// an out-of-range offset reads as [`FieldValue::Missing`] and writes are
/// ignored.
#[derive(Clone, PartialEq, Eq)]
pub struct EepromImage {
    buf: Box<[u8]>,
}

impl std::fmt::Debug for EepromImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let populated = self.buf.iter().filter(|&&b| b != EEPROM_SENTINEL).count();
        f.debug_struct("EepromImage")
            .field("len", &self.buf.len())
            .field("populated", &populated)
            .finish()
    }
}

impl EepromImage {
    /// Take ownership of an allocated store and fill it with the sentinel.
    ///
    /// The store must be exactly [`MT7915_EEPROM_SIZE`] bytes long.
    pub fn from_store(mut store: Vec<u8>) -> Result<Self> {
        if store.len() != MT7915_EEPROM_SIZE {
            return Err(Error::Allocation(format!(
                "store is {} bytes, expected {}",
                store.len(),
                MT7915_EEPROM_SIZE
            )));
        }
        store.fill(EEPROM_SENTINEL);
        Ok(Self {
            buf: store.into_boxed_slice(),
        })
    }

    /// Build an image from a (possibly partial) dump.
    ///
    /// Bytes past the end of `data` are left as the sentinel; bytes past
    /// [`MT7915_EEPROM_SIZE`] are dropped.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut buf = vec![EEPROM_SENTINEL; MT7915_EEPROM_SIZE];
        let len = data.len().min(MT7915_EEPROM_SIZE);
        buf[..len].copy_from_slice(&data[..len]);
        Self {
            buf: buf.into_boxed_slice(),
        }
    }

    /// Image length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Always false; the image has a fixed non-zero size.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Get the raw image contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Mutable access to the raw contents, for fetchers writing in place.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Raw byte at `offset`, or `None` if out of range.
    #[inline]
    pub fn get(&self, offset: usize) -> Option<u8> {
        self.buf.get(offset).copied()
    }

    /// Decoded byte at `offset`.
    #[inline]
    pub fn field(&self, offset: usize) -> FieldValue {
        self.get(offset)
            .map_or(FieldValue::Missing, FieldValue::from_raw)
    }

    /// Store `value` at `offset`. Returns false if out of range.
    pub fn set(&mut self, offset: usize, value: u8) -> bool {
        match self.buf.get_mut(offset) {
            Some(b) => {
                *b = value;
                true
            }
            None => false,
        }
    }

    /// Little-endian u16 at `offset`.
    pub fn le16(&self, offset: usize) -> Option<u16> {
        let lo = self.get(offset)?;
        let hi = self.get(offset.checked_add(1)?)?;
        Some(u16::from_le_bytes([lo, hi]))
    }

    /// `N` contiguous bytes starting at `offset`.
    pub fn array<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        let end = offset.checked_add(N)?;
        self.buf.get(offset..end)?.try_into().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TinyAllocator;

    impl StoreAllocator for TinyAllocator {
        fn allocate(&mut self, _size: usize) -> Result<Vec<u8>> {
            Ok(vec![0; 16])
        }
    }

    #[test]
    fn from_store_fills_sentinel() {
        let store = HeapAllocator.allocate(MT7915_EEPROM_SIZE).unwrap();
        let image = EepromImage::from_store(store).unwrap();
        assert_eq!(image.len(), MT7915_EEPROM_SIZE);
        assert!(image.as_bytes().iter().all(|&b| b == EEPROM_SENTINEL));
    }

    #[test]
    fn from_store_rejects_wrong_size() {
        let store = TinyAllocator.allocate(MT7915_EEPROM_SIZE).unwrap();
        assert!(matches!(
            EepromImage::from_store(store),
            Err(Error::Allocation(_))
        ));
    }

    #[test]
    fn heap_allocator_reports_capacity_overflow() {
        assert!(matches!(
            HeapAllocator.allocate(usize::MAX),
            Err(Error::Allocation(_))
        ));
    }

    #[test]
    fn out_of_range_reads_missing() {
        let mut image = EepromImage::from_bytes(&[0x15, 0x79]);
        assert_eq!(image.field(MT7915_EEPROM_SIZE), FieldValue::Missing);
        assert_eq!(image.get(usize::MAX), None);
        assert!(!image.set(MT7915_EEPROM_SIZE, 0));
        assert_eq!(image.le16(MT7915_EEPROM_SIZE - 1), None);
        assert_eq!(image.array::<6>(usize::MAX - 2), None);
    }

    #[test]
    fn le16_and_array() {
        let image = EepromImage::from_bytes(&[0x15, 0x79, 0x01, 0x00, 1, 2, 3, 4, 5, 6]);
        assert_eq!(image.le16(0), Some(0x7915));
        assert_eq!(image.array::<6>(4), Some([1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn field_value_decoding() {
        assert_eq!(FieldValue::from_raw(0xFF), FieldValue::Missing);
        assert_eq!(FieldValue::from_raw(0x00).get(), Some(0));
        assert_eq!(FieldValue::Missing.raw(), 0xFF);
        assert!(FieldValue::Missing.is_missing());
    }
}
