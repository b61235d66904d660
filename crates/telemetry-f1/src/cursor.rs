//! Bounds-checked, offset-addressed reader over a record buffer.

use crate::error::{DecodeError, DecodeResult};

/// Byte order of multi-byte fields.
///
/// Logged records are little-endian. `BigEndian` exists for one legacy
/// producer and must be selected explicitly; it is never detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

/// Read-only view over one record.
///
/// Reads take an absolute offset and never move any position, matching the
/// offset tables of the protocol. Every read checks `offset + width <= len`
/// and reports [`DecodeError::TruncatedRecord`] otherwise.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    order: ByteOrder,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8], order: ByteOrder) -> Self {
        Self { data, order }
    }

    /// Little-endian cursor.
    pub fn le(data: &'a [u8]) -> Self {
        Self::new(data, ByteOrder::LittleEndian)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// `true` when `width` bytes are readable at `offset`.
    pub fn fits(&self, offset: usize, width: usize) -> bool {
        offset
            .checked_add(width)
            .is_some_and(|end| end <= self.data.len())
    }

    /// Opaque byte range, borrowed from the record.
    pub fn fixed_bytes(&self, offset: usize, n: usize) -> DecodeResult<&'a [u8]> {
        let data = self.data;
        offset
            .checked_add(n)
            .and_then(|end| data.get(offset..end))
            .ok_or(DecodeError::TruncatedRecord {
                offset,
                needed: n,
                available: data.len(),
            })
    }

    fn array<const N: usize>(&self, offset: usize) -> DecodeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.fixed_bytes(offset, N)?);
        Ok(out)
    }

    #[inline]
    pub fn u8(&self, offset: usize) -> DecodeResult<u8> {
        self.array::<1>(offset).map(|[b]| b)
    }

    #[inline]
    pub fn i8(&self, offset: usize) -> DecodeResult<i8> {
        self.array::<1>(offset).map(i8::from_le_bytes)
    }

    #[inline]
    pub fn u16(&self, offset: usize) -> DecodeResult<u16> {
        let bytes = self.array::<2>(offset)?;
        Ok(match self.order {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        })
    }

    #[inline]
    pub fn i16(&self, offset: usize) -> DecodeResult<i16> {
        let bytes = self.array::<2>(offset)?;
        Ok(match self.order {
            ByteOrder::LittleEndian => i16::from_le_bytes(bytes),
            ByteOrder::BigEndian => i16::from_be_bytes(bytes),
        })
    }

    #[inline]
    pub fn u32(&self, offset: usize) -> DecodeResult<u32> {
        let bytes = self.array::<4>(offset)?;
        Ok(match self.order {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        })
    }

    #[inline]
    pub fn u64(&self, offset: usize) -> DecodeResult<u64> {
        let bytes = self.array::<8>(offset)?;
        Ok(match self.order {
            ByteOrder::LittleEndian => u64::from_le_bytes(bytes),
            ByteOrder::BigEndian => u64::from_be_bytes(bytes),
        })
    }

    /// Reads an `f32`; NaN and infinities decode as `0.0`.
    #[inline]
    pub fn f32(&self, offset: usize) -> DecodeResult<f32> {
        self.u32(offset)
            .map(f32::from_bits)
            .map(|v| if v.is_finite() { v } else { 0.0 })
    }

    /// Reads an `f64`; NaN and infinities decode as `0.0`.
    #[inline]
    pub fn f64(&self, offset: usize) -> DecodeResult<f64> {
        self.u64(offset)
            .map(f64::from_bits)
            .map(|v| if v.is_finite() { v } else { 0.0 })
    }

    pub fn u8_array<const N: usize>(&self, offset: usize) -> DecodeResult<[u8; N]> {
        self.array::<N>(offset)
    }

    pub fn u16_array<const N: usize>(&self, offset: usize) -> DecodeResult<[u16; N]> {
        let mut arr = [0u16; N];
        for (i, item) in arr.iter_mut().enumerate() {
            *item = self.u16(offset + i * 2)?;
        }
        Ok(arr)
    }

    pub fn f32_array<const N: usize>(&self, offset: usize) -> DecodeResult<[f32; N]> {
        let mut arr = [0.0f32; N];
        for (i, item) in arr.iter_mut().enumerate() {
            *item = self.f32(offset + i * 4)?;
        }
        Ok(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn reads_little_endian_at_offsets() -> TestResult {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09];
        let cursor = ByteCursor::le(&data);
        assert_eq!(cursor.u8(0)?, 0x01);
        assert_eq!(cursor.u16(1)?, 0x0302);
        assert_eq!(cursor.u32(1)?, 0x0504_0302);
        assert_eq!(cursor.u64(1)?, 0x0908_0706_0504_0302);
        // reads do not advance
        assert_eq!(cursor.u8(0)?, 0x01);
        Ok(())
    }

    #[test]
    fn reads_big_endian_when_selected() -> TestResult {
        let data = [0x07, 0xE5, 0xFF, 0xFE];
        let cursor = ByteCursor::new(&data, ByteOrder::BigEndian);
        assert_eq!(cursor.u16(0)?, 2021);
        assert_eq!(cursor.i16(2)?, -2);
        Ok(())
    }

    #[test]
    fn signed_reads() -> TestResult {
        let data = [0xFF, 0x01, 0x80];
        let cursor = ByteCursor::le(&data);
        assert_eq!(cursor.i8(0)?, -1);
        assert_eq!(cursor.i16(1)?, i16::MIN + 1);
        Ok(())
    }

    #[test]
    fn out_of_bounds_is_truncated_record() {
        let data = [0u8; 5];
        let cursor = ByteCursor::le(&data);
        assert_eq!(
            cursor.u32(2),
            Err(DecodeError::TruncatedRecord {
                offset: 2,
                needed: 4,
                available: 5
            })
        );
        assert!(cursor.u8(5).is_err());
        assert!(cursor.fixed_bytes(usize::MAX, 2).is_err());
        assert!(!cursor.fits(usize::MAX, 1));
        assert!(cursor.fits(1, 4));
    }

    #[test]
    fn non_finite_floats_read_as_zero() -> TestResult {
        let mut data = Vec::new();
        data.extend_from_slice(&f32::NAN.to_le_bytes());
        data.extend_from_slice(&f32::INFINITY.to_le_bytes());
        data.extend_from_slice(&1.5f32.to_le_bytes());
        let cursor = ByteCursor::le(&data);
        assert_eq!(cursor.f32_array::<3>(0)?, [0.0, 0.0, 1.5]);
        Ok(())
    }

    #[test]
    fn fixed_bytes_borrows_range() -> TestResult {
        let data = *b"xxFTLPyy";
        let cursor = ByteCursor::le(&data);
        assert_eq!(cursor.fixed_bytes(2, 4)?, b"FTLP");
        Ok(())
    }
}
