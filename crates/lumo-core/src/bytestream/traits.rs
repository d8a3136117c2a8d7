/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The reader contract every byte source fulfills.

use crate::bytestream::reader::{LByteIoError, LSeekFrom};

/// The de-facto input trait implemented for readers.
///
/// This provides the basic functions needed for quick and sometimes
/// heap free I/O for the lumo image decoders, with easy support for
/// extending it to multiple implementations.
///
/// Decoders never assume an exact-match read, every read that must fill its
/// buffer goes through [`read_exact_bytes`](Self::read_exact_bytes) which
/// reports a short read as an error.
pub trait LByteReaderTrait {
    /// Read a single byte from the source and return
    /// `0` if we can't read the byte, e.g because of EOF
    ///
    /// The implementation should try to be as fast as possible as this is
    /// called from some hot loops where it may become the bottleneck
    fn read_byte_no_error(&mut self) -> u8;

    /// Read exact bytes required to fill `buf` or return an error if that
    /// isn't possible
    ///
    /// A short read is an error, not something to recover from.
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), LByteIoError>;

    /// Read exact bytes required to fill `buf` or return an error if that
    /// isn't possible
    ///
    /// This is the same as [`read_exact_bytes`](Self::read_exact_bytes) but
    /// implemented as a separate method to allow some implementations to
    /// optimize it to cost fewer instructions
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), LByteIoError>;

    /// Read exact bytes required to fill `buf` or leave `buf` as is if
    /// the source cannot fill it completely
    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]);

    /// Read bytes into `buf` returning how many bytes were read or an error
    /// if one occurred
    ///
    /// This doesn't guarantee that `buf` will be filled with bytes, for such
    /// a guarantee see [`read_exact_bytes`](Self::read_exact_bytes)
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, LByteIoError>;

    /// Read data into the provided buffer without advancing the read
    /// position
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), LByteIoError>;

    /// Seek to a new position in the source
    ///
    /// This is similar to the [seek](std::io::Seek::seek) function in the
    /// [Seek](std::io::Seek) trait but implemented to work in no-std
    /// environments
    fn l_seek(&mut self, from: LSeekFrom) -> Result<u64, LByteIoError>;

    /// Report whether we are at the end of the stream
    fn is_eof(&mut self) -> Result<bool, LByteIoError>;

    /// Return the current position of the inner cursor
    fn l_position(&mut self) -> Result<u64, LByteIoError>;
}

// a mutable reference to a reader is itself a reader, this is what lets
// the format dispatcher hand the same rewound source to decoder after
// decoder
impl<R: LByteReaderTrait + ?Sized> LByteReaderTrait for &mut R {
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        (**self).read_byte_no_error()
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), LByteIoError> {
        (**self).read_exact_bytes(buf)
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), LByteIoError> {
        (**self).read_const_bytes(buf)
    }

    #[inline(always)]
    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]) {
        (**self).read_const_bytes_no_error(buf)
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, LByteIoError> {
        (**self).read_bytes(buf)
    }

    #[inline(always)]
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), LByteIoError> {
        (**self).peek_exact_bytes(buf)
    }

    #[inline(always)]
    fn l_seek(&mut self, from: LSeekFrom) -> Result<u64, LByteIoError> {
        (**self).l_seek(from)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, LByteIoError> {
        (**self).is_eof()
    }

    #[inline(always)]
    fn l_position(&mut self) -> Result<u64, LByteIoError> {
        (**self).l_position()
    }
}
