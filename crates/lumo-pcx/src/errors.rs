/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Formatter};

use lumo_core::bytestream::LByteIoError;

/// Errors that can occur during PCX decoding
pub enum PcxDecodeErrors {
    /// The first header byte was not the 0x0A manufacturer tag
    WrongManufacturer(u8),
    /// Encoding values other than 0 and 1 don't exist
    UnknownEncoding(u8),
    /// Only 1 and 3 plane images are decodable
    UnsupportedPlaneCount(u8),
    LargeDimensions(usize, usize),
    ZeroDimensions,
    Generic(&'static str),
    IoErrors(LByteIoError)
}

impl Debug for PcxDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PcxDecodeErrors::WrongManufacturer(byte) => {
                writeln!(f, "Expected 0x0A but found {byte:#04x}, not a PCX image")
            }
            PcxDecodeErrors::UnknownEncoding(encoding) => {
                writeln!(f, "Unknown encoding {encoding}, known encodings are 0 and 1")
            }
            PcxDecodeErrors::UnsupportedPlaneCount(planes) => {
                writeln!(
                    f,
                    "Unsupported plane count {planes}, supported planes are 1 and 3"
                )
            }
            PcxDecodeErrors::LargeDimensions(supported, found) => {
                writeln!(
                    f,
                    "Too large dimensions, supported {supported} but found {found}"
                )
            }
            PcxDecodeErrors::ZeroDimensions => {
                writeln!(f, "Zero found where not expected")
            }
            PcxDecodeErrors::Generic(reason) => {
                writeln!(f, "{reason}")
            }
            PcxDecodeErrors::IoErrors(e) => {
                writeln!(f, "I/O error :{e:?}")
            }
        }
    }
}

impl From<&'static str> for PcxDecodeErrors {
    fn from(r: &'static str) -> Self {
        Self::Generic(r)
    }
}

impl From<LByteIoError> for PcxDecodeErrors {
    fn from(r: LByteIoError) -> Self {
        Self::IoErrors(r)
    }
}
