/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! TGA decoding support
//!
//! Decoding is done by the delegate library [lumo-tga](lumo_tga).
//! Pixels come out in the B,G,R\[,A\] order TGA stores them in, convert
//! to [RGB](lumo_core::pixel_format::PixelFormat::RGB) when byte order
//! matters.
#![cfg(feature = "tga")]

use lumo_core::bytestream::LByteReaderTrait;
use lumo_core::pixel_format::PixelFormat;
pub use lumo_tga::*;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::DecoderTrait;

impl<T> DecoderTrait for TgaDecoder<T>
where
    T: LByteReaderTrait
{
    fn decode(&mut self) -> Result<Image, ImageErrors> {
        let pixels = self.decode()?;
        let (width, height) = self.dimensions().unwrap();
        let format = self.pixel_format().unwrap();

        Image::from_vec(pixels, width, height, format)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions()
    }

    fn out_format(&self) -> Option<PixelFormat> {
        self.pixel_format()
    }

    fn name(&self) -> &'static str {
        "TGA Decoder"
    }
}

impl From<TgaDecodeErrors> for ImageErrors {
    fn from(value: TgaDecodeErrors) -> Self {
        Self::ImageDecodeErrors(format!("tga: {value:?}"))
    }
}
