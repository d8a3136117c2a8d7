/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "std")]

//! Byte sources backed by `std::io` readers.

use std::io;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

use crate::bytestream::reader::{LByteIoError, LSeekFrom};
use crate::bytestream::LByteReaderTrait;

impl<T> LByteReaderTrait for io::Cursor<T>
where
    T: AsRef<[u8]>
{
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        let mut buf = [0];
        let _ = self.read(&mut buf);
        buf[0]
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), LByteIoError> {
        self.read_exact(buf).map_err(LByteIoError::from)
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), LByteIoError> {
        self.read_exact(buf).map_err(LByteIoError::from)
    }

    #[inline(always)]
    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]) {
        let _ = self.read_exact(buf);
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, LByteIoError> {
        self.read(buf).map_err(LByteIoError::from)
    }

    #[inline(always)]
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), LByteIoError> {
        self.read_exact(buf).map_err(LByteIoError::from)?;
        let converted = -i64::try_from(buf.len()).map_err(LByteIoError::from)?;
        self.seek(SeekFrom::Current(converted))
            .map_err(LByteIoError::from)?;
        Ok(())
    }

    #[inline(always)]
    fn l_seek(&mut self, from: LSeekFrom) -> Result<u64, LByteIoError> {
        self.seek(from.to_std_seek()).map_err(LByteIoError::from)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, LByteIoError> {
        Ok(self.position() as usize >= self.get_ref().as_ref().len())
    }

    #[inline(always)]
    fn l_position(&mut self) -> Result<u64, LByteIoError> {
        Ok(self.position())
    }
}

impl<T: Read + Seek> LByteReaderTrait for BufReader<T> {
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        let mut buf = [0];
        let _ = self.read(&mut buf);
        buf[0]
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), LByteIoError> {
        self.read_exact(buf).map_err(LByteIoError::from)
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), LByteIoError> {
        self.read_exact(buf).map_err(LByteIoError::from)
    }

    #[inline(always)]
    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]) {
        let _ = self.read_exact(buf);
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, LByteIoError> {
        self.read(buf).map_err(LByteIoError::from)
    }

    #[inline(always)]
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), LByteIoError> {
        self.read_exact(buf).map_err(LByteIoError::from)?;
        let converted = -i64::try_from(buf.len()).map_err(LByteIoError::from)?;
        self.seek(SeekFrom::Current(converted))
            .map_err(LByteIoError::from)?;
        Ok(())
    }

    #[inline(always)]
    fn l_seek(&mut self, from: LSeekFrom) -> Result<u64, LByteIoError> {
        self.seek(from.to_std_seek()).map_err(LByteIoError::from)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, LByteIoError> {
        // querying the underlying reader is the only way to know,
        // fill_buf returning an empty slice means the source is drained
        let filled = self.fill_buf().map_err(LByteIoError::from)?;
        Ok(filled.is_empty())
    }

    #[inline(always)]
    fn l_position(&mut self) -> Result<u64, LByteIoError> {
        self.stream_position().map_err(LByteIoError::from)
    }
}
