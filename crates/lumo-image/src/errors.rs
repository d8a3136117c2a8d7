/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Formatter};

use lumo_core::bytestream::LByteIoError;
use lumo_core::pixel_format::PixelFormat;

use crate::codecs::ImageFormat;

/// All errors possible during image handling
pub enum ImageErrors {
    /// A decoder failed, the string carries the format and its own error
    ImageDecodeErrors(String),
    /// Auto-detection ran every configured decoder and none produced an
    /// image
    NoDecoderMatched,
    /// The decoder for this format was not included at compile time
    ImageDecoderNotIncluded(ImageFormat),
    /// There is no decoder for this format at all
    ImageDecoderNotImplemented(ImageFormat),
    /// No channel mapping exists between the two formats
    UnsupportedConversion {
        from: PixelFormat,
        to:   PixelFormat
    },
    /// A buffer length disagrees with the dimensions it was handed with,
    /// expected vs found
    DimensionsMisMatch(usize, usize),
    GenericStatic(&'static str),
    IoErrors(LByteIoError)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageDecodeErrors(error) => {
                writeln!(f, "Image decoding failed: {error}")
            }
            Self::NoDecoderMatched => {
                writeln!(f, "No decoder recognized the byte stream")
            }
            Self::ImageDecoderNotIncluded(format) => {
                writeln!(
                    f,
                    "The decoder for {format:?} was not included in this build"
                )
            }
            Self::ImageDecoderNotImplemented(format) => {
                writeln!(f, "No decoder exists for format {format:?}")
            }
            Self::UnsupportedConversion { from, to } => {
                writeln!(f, "Cannot convert from {from:?} to {to:?}")
            }
            Self::DimensionsMisMatch(expected, found) => {
                writeln!(
                    f,
                    "Dimensions mismatch, expected {expected} bytes but found {found}"
                )
            }
            Self::GenericStatic(message) => {
                writeln!(f, "{message}")
            }
            Self::IoErrors(err) => {
                writeln!(f, "{err:?}")
            }
        }
    }
}

impl From<LByteIoError> for ImageErrors {
    fn from(value: LByteIoError) -> Self {
        ImageErrors::IoErrors(value)
    }
}

impl From<&'static str> for ImageErrors {
    fn from(value: &'static str) -> Self {
        ImageErrors::GenericStatic(value)
    }
}

impl From<std::io::Error> for ImageErrors {
    fn from(value: std::io::Error) -> Self {
        ImageErrors::IoErrors(LByteIoError::StdIoError(value))
    }
}
