//! Fixed-size byte buffer addressed by (byte, shift, width) fields.

use serde::{Deserialize, Serialize};

/// Largest buffer a layout may declare.
pub const MAX_BUFFER_LEN: usize = 64;

/// Location of a field: a byte index and the bit shift of its lowest bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldAddress {
    pub byte: usize,
    pub shift: u8,
}

impl FieldAddress {
    pub fn new(byte: usize, shift: u8) -> Self {
        Self { byte, shift }
    }
}

/// A run of `width` bits starting at `address`.
///
/// Fields never cross a byte boundary: `shift + width <= 8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    pub address: FieldAddress,
    pub width: u8,
}

impl Field {
    pub fn new(address: FieldAddress, width: u8) -> Self {
        Self { address, width }
    }

    /// Mask of `width` low bits, before shifting.
    pub fn value_mask(&self) -> u8 {
        value_mask(self.width)
    }

    /// Mask of the field's bits in place within its byte.
    pub fn mask(&self) -> u8 {
        self.value_mask() << self.address.shift
    }

    /// Whether the field lies inside a buffer of `len` bytes without
    /// crossing into the next byte.
    pub fn fits(&self, len: usize) -> bool {
        self.address.byte < len
            && self.width >= 1
            && u16::from(self.address.shift) + u16::from(self.width) <= 8
    }

    /// Whether both fields claim at least one common bit.
    pub fn overlaps(&self, other: &Field) -> bool {
        self.address.byte == other.address.byte && self.mask() & other.mask() != 0
    }
}

/// Low-bit mask for a field of `width` bits (capped at a full byte).
pub fn value_mask(width: u8) -> u8 {
    if width >= 8 {
        u8::MAX
    } else {
        (1u8 << width) - 1
    }
}

/// The canonical configuration state: `len` bytes, zero-initialized.
///
/// The length is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitFieldBuffer {
    bytes: Box<[u8]>,
}

impl BitFieldBuffer {
    /// Create a zeroed buffer of `len` bytes.
    pub fn new(len: usize) -> Self {
        Self {
            bytes: vec![0; len].into_boxed_slice(),
        }
    }

    /// Create a buffer holding exactly `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Zero every byte.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Replace the contents with `data`: bytes beyond `data` become zero and
    /// bytes of `data` beyond the buffer are dropped.
    pub fn load(&mut self, data: &[u8]) {
        self.clear();
        let n = data.len().min(self.bytes.len());
        self.bytes[..n].copy_from_slice(&data[..n]);
    }

    /// Extract `width` bits at `address`.
    ///
    /// The field must fit (see [`Field::fits`]); a byte index past the end
    /// panics like any slice index.
    pub fn read_field(&self, address: FieldAddress, width: u8) -> u8 {
        debug_assert!(u16::from(address.shift) + u16::from(width) <= 8);
        (self.bytes[address.byte] >> address.shift) & value_mask(width)
    }

    /// Store `value` into `width` bits at `address`.
    ///
    /// Bits of `value` above `width` are dropped without error. Other bits of
    /// the byte are left untouched.
    pub fn write_field(&mut self, address: FieldAddress, width: u8, value: u8) {
        debug_assert!(u16::from(address.shift) + u16::from(width) <= 8);
        let mask = value_mask(width);
        let byte = &mut self.bytes[address.byte];
        *byte = (*byte & !(mask << address.shift)) | ((value & mask) << address.shift);
    }

    pub fn read(&self, field: &Field) -> u8 {
        self.read_field(field.address, field.width)
    }

    pub fn write(&mut self, field: &Field, value: u8) {
        self.write_field(field.address, field.width, value)
    }
}

impl AsRef<[u8]> for BitFieldBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_zeroed() {
        let buffer = BitFieldBuffer::new(15);
        assert_eq!(buffer.len(), 15);
        assert!(buffer.as_bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_write_then_read_field() {
        let mut buffer = BitFieldBuffer::new(2);
        buffer.write_field(FieldAddress::new(1, 2), 3, 0b101);
        assert_eq!(buffer.as_bytes(), &[0, 0b1_0100]);
        assert_eq!(buffer.read_field(FieldAddress::new(1, 2), 3), 0b101);
    }

    #[test]
    fn test_write_preserves_neighbouring_bits() {
        let mut buffer = BitFieldBuffer::from_bytes(&[0xFF]);
        buffer.write_field(FieldAddress::new(0, 2), 2, 0);
        assert_eq!(buffer.as_bytes(), &[0b1111_0011]);
    }

    #[test]
    fn test_write_truncates_out_of_range_value() {
        let mut buffer = BitFieldBuffer::new(1);
        buffer.write_field(FieldAddress::new(0, 6), 2, 0b111);
        assert_eq!(buffer.as_bytes(), &[0b1100_0000]);
        assert_eq!(buffer.read_field(FieldAddress::new(0, 6), 2), 0b11);
    }

    #[test]
    fn test_load_pads_and_truncates() {
        let mut buffer = BitFieldBuffer::from_bytes(&[9, 9, 9]);
        buffer.load(&[1]);
        assert_eq!(buffer.as_bytes(), &[1, 0, 0]);

        buffer.load(&[1, 2, 3, 4, 5]);
        assert_eq!(buffer.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_clear() {
        let mut buffer = BitFieldBuffer::from_bytes(&[1, 2]);
        buffer.clear();
        assert_eq!(buffer.as_bytes(), &[0, 0]);
    }

    #[test]
    fn test_field_overlap_and_fit() {
        let a = Field::new(FieldAddress::new(0, 0), 2);
        let b = Field::new(FieldAddress::new(0, 1), 1);
        let c = Field::new(FieldAddress::new(0, 2), 2);
        let d = Field::new(FieldAddress::new(1, 0), 2);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&d));

        assert!(c.fits(1));
        assert!(!d.fits(1));
        assert!(!Field::new(FieldAddress::new(0, 7), 2).fits(1));
        assert!(!Field::new(FieldAddress::new(0, 0), 0).fits(1));
    }

    #[test]
    fn test_masks() {
        assert_eq!(value_mask(1), 0b1);
        assert_eq!(value_mask(3), 0b111);
        assert_eq!(value_mask(8), 0xFF);
        assert_eq!(Field::new(FieldAddress::new(0, 6), 2).mask(), 0b1100_0000);
    }
}
