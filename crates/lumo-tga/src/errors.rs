/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Formatter};

use lumo_core::bytestream::LByteIoError;

/// Errors that can occur during TGA decoding
pub enum TgaDecodeErrors {
    /// Only uncompressed (2) and RLE (10) true-color images are decodable
    UnsupportedImageType(u8),
    /// Only 24 and 32 bit pixels are decodable
    UnsupportedDepth(u8),
    LargeDimensions(usize, usize),
    ZeroDimensions,
    Generic(&'static str),
    IoErrors(LByteIoError)
}

impl Debug for TgaDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            TgaDecodeErrors::UnsupportedImageType(image_type) => {
                writeln!(
                    f,
                    "Unsupported image type {image_type}, supported types are 2 and 10"
                )
            }
            TgaDecodeErrors::UnsupportedDepth(depth) => {
                writeln!(
                    f,
                    "Unsupported pixel depth {depth}, supported depths are 24 and 32"
                )
            }
            TgaDecodeErrors::LargeDimensions(supported, found) => {
                writeln!(
                    f,
                    "Too large dimensions, supported {supported} but found {found}"
                )
            }
            TgaDecodeErrors::ZeroDimensions => {
                writeln!(f, "Zero found where not expected")
            }
            TgaDecodeErrors::Generic(reason) => {
                writeln!(f, "{reason}")
            }
            TgaDecodeErrors::IoErrors(e) => {
                writeln!(f, "I/O error :{e:?}")
            }
        }
    }
}

impl From<&'static str> for TgaDecodeErrors {
    fn from(r: &'static str) -> Self {
        Self::Generic(r)
    }
}

impl From<LByteIoError> for TgaDecodeErrors {
    fn from(r: LByteIoError) -> Self {
        Self::IoErrors(r)
    }
}
