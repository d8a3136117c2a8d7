/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Formatter;

use crate::bytestream::LByteReaderTrait;

/// Enumeration of possible methods to seek within an I/O object.
///
/// It is analogous to [SeekFrom](std::io::SeekFrom) in the std library but
/// it's here to allow this to work in no-std crates
#[derive(Copy, PartialEq, Eq, Clone, Debug)]
pub enum LSeekFrom {
    /// Sets the offset to the provided number of bytes.
    Start(u64),
    /// Sets the offset to the size of this object plus the specified number
    /// of bytes.
    End(i64),
    /// Sets the offset to the current position plus the specified number of
    /// bytes.
    ///
    /// It is possible to seek beyond the end of an object, but it's an error
    /// to seek before byte 0.
    Current(i64)
}

impl LSeekFrom {
    /// Convert to [SeekFrom](std::io::SeekFrom) from the `std::io` library
    ///
    /// This is only present when the std feature is present
    #[cfg(feature = "std")]
    pub(crate) fn to_std_seek(self) -> std::io::SeekFrom {
        match self {
            LSeekFrom::Start(pos) => std::io::SeekFrom::Start(pos),
            LSeekFrom::End(pos) => std::io::SeekFrom::End(pos),
            LSeekFrom::Current(pos) => std::io::SeekFrom::Current(pos)
        }
    }
}

/// Errors that may arise when reading from or seeking in a byte source
pub enum LByteIoError {
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    TryFromIntError(core::num::TryFromIntError),
    /// Requested bytes vs bytes actually read
    NotEnoughBytes(usize, usize),
    Generic(&'static str),
    SeekError(&'static str),
    SeekErrorOwned(String)
}

impl core::fmt::Debug for LByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            LByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {err}")
            }
            LByteIoError::TryFromIntError(err) => {
                writeln!(f, "Cannot convert to int {err}")
            }
            LByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            LByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
            LByteIoError::SeekError(err) => {
                writeln!(f, "Seek error: {err}")
            }
            LByteIoError::SeekErrorOwned(err) => {
                writeln!(f, "Seek error {err}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for LByteIoError {
    fn from(value: std::io::Error) -> Self {
        LByteIoError::StdIoError(value)
    }
}

impl From<core::num::TryFromIntError> for LByteIoError {
    fn from(value: core::num::TryFromIntError) -> Self {
        LByteIoError::TryFromIntError(value)
    }
}

impl From<&'static str> for LByteIoError {
    fn from(value: &'static str) -> Self {
        LByteIoError::Generic(value)
    }
}

/// A reader layering endian aware integer reads and convenience
/// helpers on top of a raw byte source.
///
/// Every decoder owns one of these for the duration of a decode.
pub struct LReader<T: LByteReaderTrait> {
    inner:       T,
    temp_buffer: Vec<u8>
}

impl<T: LByteReaderTrait> LReader<T> {
    pub fn new(source: T) -> LReader<T> {
        LReader {
            inner:       source,
            temp_buffer: vec![]
        }
    }

    /// Destroy this reader returning the underlying source of the bytes
    /// from which we were decoding
    #[inline(always)]
    pub fn consume(self) -> T {
        self.inner
    }

    #[inline(always)]
    pub fn skip(&mut self, num: usize) -> Result<u64, LByteIoError> {
        self.inner.l_seek(LSeekFrom::Current(num as i64))
    }

    #[inline(always)]
    pub fn rewind(&mut self, num: usize) -> Result<u64, LByteIoError> {
        self.inner.l_seek(LSeekFrom::Current(-(num as i64)))
    }

    #[inline(always)]
    pub fn seek(&mut self, from: LSeekFrom) -> Result<u64, LByteIoError> {
        self.inner.l_seek(from)
    }

    #[inline(always)]
    pub fn get_u8(&mut self) -> u8 {
        self.inner.read_byte_no_error()
    }

    #[inline(always)]
    pub fn get_u8_err(&mut self) -> Result<u8, LByteIoError> {
        let mut buf = [0];
        self.inner.read_exact_bytes(&mut buf)?;
        Ok(buf[0])
    }

    /// Look ahead `position` bytes and return a reference to `num_bytes`
    /// from that position, or an error if the peek would be out of bounds.
    ///
    /// This doesn't increment the position, bytes would have to be
    /// discarded at a later point.
    #[inline]
    pub fn peek_at(&mut self, position: usize, num_bytes: usize) -> Result<&[u8], LByteIoError> {
        // short circuit for zero
        // important since implementations like File will
        // cause a syscall on skip
        if position != 0 {
            self.skip(position)?;
        }
        self.temp_buffer.resize(num_bytes, 0);

        match self.inner.peek_exact_bytes(&mut self.temp_buffer[..]) {
            Ok(_) => {
                // rewind back to where we were
                if position != 0 {
                    self.rewind(position)?;
                }
                Ok(&self.temp_buffer)
            }
            Err(e) => Err(e)
        }
    }

    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], LByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        match self.inner.read_const_bytes(&mut byte_store) {
            Ok(_) => Ok(byte_store),
            Err(e) => Err(e)
        }
    }

    #[inline(always)]
    pub fn get_fixed_bytes_or_zero<const N: usize>(&mut self) -> [u8; N] {
        let mut byte_store: [u8; N] = [0; N];
        self.inner.read_const_bytes_no_error(&mut byte_store);
        byte_store
    }

    #[inline]
    pub fn set_position(&mut self, position: usize) -> Result<(), LByteIoError> {
        self.seek(LSeekFrom::Start(position as u64))?;
        Ok(())
    }

    #[inline(always)]
    pub fn eof(&mut self) -> Result<bool, LByteIoError> {
        self.inner.is_eof()
    }

    #[inline(always)]
    pub fn position(&mut self) -> Result<u64, LByteIoError> {
        self.inner.l_position()
    }

    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), LByteIoError> {
        self.inner.read_exact_bytes(buf)
    }

    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, LByteIoError> {
        self.inner.read_bytes(buf)
    }
}

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$name4:tt,$name5:tt,$name6:tt,$int_type:tt) => {
        impl<T: LByteReaderTrait> LReader<T> {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> $int_type {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                self.inner.read_const_bytes_no_error(&mut space);

                match mode {
                    Mode::BE => $int_type::from_be_bytes(space),
                    Mode::LE => $int_type::from_le_bytes(space)
                }
            }

            #[inline(always)]
            fn $name2(&mut self, mode: Mode) -> Result<$int_type, LByteIoError> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                match self.inner.read_const_bytes(&mut space) {
                    Ok(_) => match mode {
                        Mode::BE => Ok($int_type::from_be_bytes(space)),
                        Mode::LE => Ok($int_type::from_le_bytes(space))
                    },
                    Err(e) => Err(e)
                }
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name3(&mut self) -> Result<$int_type, LByteIoError> {
                self.$name2(Mode::BE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name4(&mut self) -> Result<$int_type, LByteIoError> {
                self.$name2(Mode::LE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning 0 if the underlying buffer does not have enough bytes for a ",stringify!($int_type)," read.")]
            #[inline(always)]
            pub fn $name5(&mut self) -> $int_type {
                self.$name(Mode::BE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning 0 if the underlying buffer does not have enough bytes for a ",stringify!($int_type)," read.")]
            #[inline(always)]
            pub fn $name6(&mut self) -> $int_type {
                self.$name(Mode::LE)
            }
        }
    };
}

get_single_type!(
    get_u16_inner_or_default,
    get_u16_inner_or_die,
    get_u16_be_err,
    get_u16_le_err,
    get_u16_be,
    get_u16_le,
    u16
);
get_single_type!(
    get_u32_inner_or_default,
    get_u32_inner_or_die,
    get_u32_be_err,
    get_u32_le_err,
    get_u32_be,
    get_u32_le,
    u32
);

#[cfg(feature = "std")]
impl<T> std::io::Read for LReader<T>
where
    T: LByteReaderTrait
{
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        use std::io::ErrorKind;
        self.read_bytes(buf)
            .map_err(|e| std::io::Error::new(ErrorKind::Other, alloc::format!("{e:?}")))
    }
}
