/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! An in-memory byte source.

use crate::bytestream::reader::{LByteIoError, LSeekFrom};
use crate::bytestream::LByteReaderTrait;

/// An in-memory reader over anything that can be seen as a byte slice.
///
/// Prefer this over [`Cursor`](std::io::Cursor) when the whole image is
/// already in memory, reads compile down to slice copies with no
/// buffering layer in between.
pub struct LCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> LCursor<T> {
    pub fn new(buffer: T) -> LCursor<T> {
        LCursor {
            stream:   buffer,
            position: 0
        }
    }

    #[inline(always)]
    fn remaining(&self) -> &[u8] {
        let stream = self.stream.as_ref();
        let start = self.position.min(stream.len());
        &stream[start..]
    }
}

impl<T: AsRef<[u8]>> LByteReaderTrait for LCursor<T> {
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        let byte = self.remaining().first().copied().unwrap_or(0);
        self.position += 1;
        byte
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), LByteIoError> {
        let remaining = self.remaining();
        if remaining.len() < buf.len() {
            return Err(LByteIoError::NotEnoughBytes(buf.len(), remaining.len()));
        }
        buf.copy_from_slice(&remaining[..buf.len()]);
        self.position += buf.len();
        Ok(())
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), LByteIoError> {
        let remaining = self.remaining();
        match remaining.get(..N) {
            Some(bytes) => {
                buf.copy_from_slice(bytes);
                self.position += N;
                Ok(())
            }
            None => Err(LByteIoError::NotEnoughBytes(N, remaining.len()))
        }
    }

    #[inline(always)]
    fn read_const_bytes_no_error<const N: usize>(&mut self, buf: &mut [u8; N]) {
        let _ = self.read_const_bytes(buf);
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, LByteIoError> {
        let remaining = self.remaining();
        let can_read = remaining.len().min(buf.len());
        buf[..can_read].copy_from_slice(&remaining[..can_read]);
        self.position += can_read;
        Ok(can_read)
    }

    #[inline(always)]
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), LByteIoError> {
        self.read_exact_bytes(buf)?;
        self.position -= buf.len();
        Ok(())
    }

    fn l_seek(&mut self, from: LSeekFrom) -> Result<u64, LByteIoError> {
        let len = self.stream.as_ref().len() as i64;
        let new_position = match from {
            LSeekFrom::Start(position) => i64::try_from(position)?,
            LSeekFrom::End(position) => len + position,
            LSeekFrom::Current(position) => i64::try_from(self.position)? + position
        };
        if new_position < 0 {
            return Err(LByteIoError::SeekError("Cannot seek before byte 0"));
        }
        self.position = new_position as usize;
        Ok(self.position as u64)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, LByteIoError> {
        Ok(self.position >= self.stream.as_ref().len())
    }

    #[inline(always)]
    fn l_position(&mut self) -> Result<u64, LByteIoError> {
        Ok(self.position as u64)
    }
}
