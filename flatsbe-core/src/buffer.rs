//! Buffer traits for zero-copy flyweight access.
//!
//! This module provides:
//! - [`ReadBuffer`] trait for read-only buffer access
//! - [`WriteBuffer`] trait for read-write buffer access
//!
//! Generated accessors call the `get_*`/`put_*` methods by name, so the
//! method names here are part of the contract with `flatsbe-codegen`:
//! `get_<type>_le`, `get_<type>_be` for multi-byte primitives and plain
//! `get_u8`/`get_i8` for single bytes (likewise for `put_*`).
//!
//! All accessors panic if the requested range lies outside the buffer.

macro_rules! read_primitive {
    ($name:ident, $ty:ty, $len:literal, $from:ident) => {
        #[doc = concat!("Reads a `", stringify!($ty), "` at `offset` via `", stringify!($from), "`.")]
        #[inline(always)]
        fn $name(&self, offset: usize) -> $ty {
            let mut bytes = [0u8; $len];
            bytes.copy_from_slice(&self.as_slice()[offset..offset + $len]);
            <$ty>::$from(bytes)
        }
    };
}

macro_rules! write_primitive {
    ($name:ident, $ty:ty, $len:literal, $to:ident) => {
        #[doc = concat!("Writes a `", stringify!($ty), "` at `offset` via `", stringify!($to), "`.")]
        #[inline(always)]
        fn $name(&mut self, offset: usize, value: $ty) {
            self.as_mut_slice()[offset..offset + $len].copy_from_slice(&value.$to());
        }
    };
}

/// Trait for read-only buffer access with primitive reads in either byte order.
pub trait ReadBuffer {
    /// Returns the buffer as a byte slice.
    fn as_slice(&self) -> &[u8];

    /// Returns the length of the buffer in bytes.
    #[inline(always)]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if the buffer is empty.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads a u8 at the given offset.
    #[inline(always)]
    fn get_u8(&self, offset: usize) -> u8 {
        self.as_slice()[offset]
    }

    /// Reads an i8 at the given offset.
    #[inline(always)]
    fn get_i8(&self, offset: usize) -> i8 {
        self.as_slice()[offset] as i8
    }

    read_primitive!(get_u16_le, u16, 2, from_le_bytes);
    read_primitive!(get_i16_le, i16, 2, from_le_bytes);
    read_primitive!(get_u32_le, u32, 4, from_le_bytes);
    read_primitive!(get_i32_le, i32, 4, from_le_bytes);
    read_primitive!(get_u64_le, u64, 8, from_le_bytes);
    read_primitive!(get_i64_le, i64, 8, from_le_bytes);
    read_primitive!(get_f32_le, f32, 4, from_le_bytes);
    read_primitive!(get_f64_le, f64, 8, from_le_bytes);

    read_primitive!(get_u16_be, u16, 2, from_be_bytes);
    read_primitive!(get_i16_be, i16, 2, from_be_bytes);
    read_primitive!(get_u32_be, u32, 4, from_be_bytes);
    read_primitive!(get_i32_be, i32, 4, from_be_bytes);
    read_primitive!(get_u64_be, u64, 8, from_be_bytes);
    read_primitive!(get_i64_be, i64, 8, from_be_bytes);
    read_primitive!(get_f32_be, f32, 4, from_be_bytes);
    read_primitive!(get_f64_be, f64, 8, from_be_bytes);

    /// Returns a slice of `len` bytes starting at `offset`.
    #[inline(always)]
    fn get_bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.as_slice()[offset..offset + len]
    }
}

/// Trait for read-write buffer access with primitive writes in either byte order.
pub trait WriteBuffer: ReadBuffer {
    /// Returns the buffer as a mutable byte slice.
    fn as_mut_slice(&mut self) -> &mut [u8];

    /// Writes a u8 at the given offset.
    #[inline(always)]
    fn put_u8(&mut self, offset: usize, value: u8) {
        self.as_mut_slice()[offset] = value;
    }

    /// Writes an i8 at the given offset.
    #[inline(always)]
    fn put_i8(&mut self, offset: usize, value: i8) {
        self.as_mut_slice()[offset] = value as u8;
    }

    write_primitive!(put_u16_le, u16, 2, to_le_bytes);
    write_primitive!(put_i16_le, i16, 2, to_le_bytes);
    write_primitive!(put_u32_le, u32, 4, to_le_bytes);
    write_primitive!(put_i32_le, i32, 4, to_le_bytes);
    write_primitive!(put_u64_le, u64, 8, to_le_bytes);
    write_primitive!(put_i64_le, i64, 8, to_le_bytes);
    write_primitive!(put_f32_le, f32, 4, to_le_bytes);
    write_primitive!(put_f64_le, f64, 8, to_le_bytes);

    write_primitive!(put_u16_be, u16, 2, to_be_bytes);
    write_primitive!(put_i16_be, i16, 2, to_be_bytes);
    write_primitive!(put_u32_be, u32, 4, to_be_bytes);
    write_primitive!(put_i32_be, i32, 4, to_be_bytes);
    write_primitive!(put_u64_be, u64, 8, to_be_bytes);
    write_primitive!(put_i64_be, i64, 8, to_be_bytes);
    write_primitive!(put_f32_be, f32, 4, to_be_bytes);
    write_primitive!(put_f64_be, f64, 8, to_be_bytes);

    /// Writes a byte slice at the given offset.
    #[inline(always)]
    fn put_bytes(&mut self, offset: usize, src: &[u8]) {
        self.as_mut_slice()[offset..offset + src.len()].copy_from_slice(src);
    }
}

impl ReadBuffer for [u8] {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }
}

impl WriteBuffer for [u8] {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

impl ReadBuffer for Vec<u8> {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }
}

impl WriteBuffer for Vec<u8> {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

impl<const N: usize> ReadBuffer for [u8; N] {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> WriteBuffer for [u8; N] {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

// Flyweights hand out nested flyweights over borrowed buffers, so references
// to buffers are buffers too.
impl<T: ReadBuffer + ?Sized> ReadBuffer for &T {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        (**self).as_slice()
    }
}

impl<T: ReadBuffer + ?Sized> ReadBuffer for &mut T {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        (**self).as_slice()
    }
}

impl<T: WriteBuffer + ?Sized> WriteBuffer for &mut T {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        (**self).as_mut_slice()
    }
}
