/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Entry point for all supported codecs the library understands
//!
//! The codecs here can be enabled and disabled at will via cargo
//! features, it is recommended that you only enable the decoders you
//! use.
//!
//! Auto-detection does not rely on magic bytes alone, each decoder is
//! simply attempted in a fixed priority order against the rewound
//! stream until one produces an image.

use std::io::BufReader;
use std::path::Path;

use lumo_core::bytestream::{LByteReaderTrait, LSeekFrom};
use lumo_core::log::trace;
use lumo_core::options::DecoderOptions;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::DecoderTrait;

pub mod bmp;
pub mod gif;
pub mod jpeg;
pub mod pcx;
pub mod png;
pub mod tga;

/// All image formats the library knows about
///
/// Whether a decoder is actually present depends on the enabled cargo
/// features, see [`has_decoder`](ImageFormat::has_decoder)
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ImageFormat {
    /// Portable Network Graphics
    PNG,
    /// Joint Photographic Experts Group
    JPEG,
    /// ZSoft Picture Exchange
    PCX,
    /// Windows/OS2 Bitmap
    BMP,
    /// Truevision Targa
    TGA,
    /// Graphics Interchange Format
    GIF,
    /// Any unknown format
    Unknown
}

/// The fixed order auto-detection attempts decoders in
pub static AUTODETECT_ORDER: [ImageFormat; 6] = [
    ImageFormat::PNG,
    ImageFormat::JPEG,
    ImageFormat::PCX,
    ImageFormat::BMP,
    ImageFormat::TGA,
    ImageFormat::GIF
];

impl ImageFormat {
    /// Stable integer tag for this format, part of the public surface
    pub const fn to_int(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::PNG => 1,
            Self::JPEG => 2,
            Self::PCX => 3,
            Self::BMP => 4,
            Self::TGA => 5,
            Self::GIF => 6
        }
    }

    /// Map a stable integer tag back to a format
    pub const fn from_int(value: u32) -> Option<ImageFormat> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::PNG),
            2 => Some(Self::JPEG),
            3 => Some(Self::PCX),
            4 => Some(Self::BMP),
            5 => Some(Self::TGA),
            6 => Some(Self::GIF),
            _ => None
        }
    }

    /// Return true if a decoder for this format was compiled in
    pub fn has_decoder(self) -> bool {
        self.decoder(lumo_core::bytestream::LCursor::new(b"")).is_ok()
    }

    /// Construct a decoder for this format reading from `data`
    ///
    /// This bypasses auto-detection, the returned decoder will decode
    /// `data` as this format or fail
    pub fn decoder<'a, T>(&self, data: T) -> Result<Box<dyn DecoderTrait + 'a>, ImageErrors>
    where
        T: LByteReaderTrait + 'a
    {
        self.decoder_with_options(data, DecoderOptions::default())
    }

    /// Construct a decoder for this format with custom options
    pub fn decoder_with_options<'a, T>(
        &self, data: T, options: DecoderOptions
    ) -> Result<Box<dyn DecoderTrait + 'a>, ImageErrors>
    where
        T: LByteReaderTrait + 'a
    {
        match self {
            ImageFormat::PNG => {
                #[cfg(feature = "png")]
                {
                    Ok(Box::new(crate::codecs::png::PngDecoder::new_with_options(
                        data, options
                    )))
                }
                #[cfg(not(feature = "png"))]
                {
                    let _ = (data, options);
                    Err(ImageErrors::ImageDecoderNotIncluded(*self))
                }
            }
            ImageFormat::JPEG => {
                #[cfg(feature = "jpeg")]
                {
                    Ok(Box::new(
                        crate::codecs::jpeg::JpegDecoder::new_with_options(data, options)
                    ))
                }
                #[cfg(not(feature = "jpeg"))]
                {
                    let _ = (data, options);
                    Err(ImageErrors::ImageDecoderNotIncluded(*self))
                }
            }
            ImageFormat::PCX => {
                #[cfg(feature = "pcx")]
                {
                    Ok(Box::new(lumo_pcx::PcxDecoder::new_with_options(
                        data, options
                    )))
                }
                #[cfg(not(feature = "pcx"))]
                {
                    let _ = (data, options);
                    Err(ImageErrors::ImageDecoderNotIncluded(*self))
                }
            }
            ImageFormat::BMP => {
                #[cfg(feature = "bmp")]
                {
                    Ok(Box::new(lumo_bmp::BmpDecoder::new_with_options(
                        data, options
                    )))
                }
                #[cfg(not(feature = "bmp"))]
                {
                    let _ = (data, options);
                    Err(ImageErrors::ImageDecoderNotIncluded(*self))
                }
            }
            ImageFormat::TGA => {
                #[cfg(feature = "tga")]
                {
                    Ok(Box::new(lumo_tga::TgaDecoder::new_with_options(
                        data, options
                    )))
                }
                #[cfg(not(feature = "tga"))]
                {
                    let _ = (data, options);
                    Err(ImageErrors::ImageDecoderNotIncluded(*self))
                }
            }
            ImageFormat::GIF => {
                #[cfg(feature = "gif")]
                {
                    Ok(Box::new(crate::codecs::gif::GifDecoder::new_with_options(
                        data, options
                    )))
                }
                #[cfg(not(feature = "gif"))]
                {
                    let _ = (data, options);
                    Err(ImageErrors::ImageDecoderNotIncluded(*self))
                }
            }
            ImageFormat::Unknown => Err(ImageErrors::ImageDecoderNotImplemented(*self))
        }
    }
}

impl Image {
    /// Open an encoded file for which the library has a configured
    /// decoder
    ///
    /// See also [read](Self::read) for reading from memory or any other
    /// byte source
    pub fn open<P: AsRef<Path>>(file: P) -> Result<Image, ImageErrors> {
        Self::open_with_options(file, DecoderOptions::default())
    }

    /// Open an encoded file with the specified custom decoder options
    pub fn open_with_options<P: AsRef<Path>>(
        file: P, options: DecoderOptions
    ) -> Result<Image, ImageErrors> {
        let reader = BufReader::new(std::fs::File::open(file)?);
        Self::read(reader, options)
    }

    /// Decode an image from a byte source, auto-detecting its format.
    ///
    /// Decoders are attempted in the fixed [`AUTODETECT_ORDER`], the
    /// stream is rewound to offset 0 before every attempt so no decoder
    /// sees leftovers of a previous one. The first decoder that produces
    /// an image wins, when all of them fail the whole read fails with
    /// [`NoDecoderMatched`](ImageErrors::NoDecoderMatched).
    pub fn read<T>(mut src: T, options: DecoderOptions) -> Result<Image, ImageErrors>
    where
        T: LByteReaderTrait
    {
        for format in AUTODETECT_ORDER {
            if !format.has_decoder() {
                continue;
            }
            // decoders may not depend on leftover position from a prior
            // failed attempt
            src.l_seek(LSeekFrom::Start(0))?;

            let mut decoder = format.decoder_with_options(&mut src, options)?;

            match decoder.decode() {
                Ok(image) => return Ok(image),
                Err(e) => {
                    trace!("{} did not match: {:?}", decoder.name(), e);
                }
            }
        }

        Err(ImageErrors::NoDecoderMatched)
    }

    /// Decode an image from a byte source as one specific format,
    /// bypassing auto-detection
    pub fn read_format<T>(
        src: T, format: ImageFormat, options: DecoderOptions
    ) -> Result<Image, ImageErrors>
    where
        T: LByteReaderTrait
    {
        format.decoder_with_options(src, options)?.decode()
    }
}
