/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! BMP decoding support
//!
//! Decoding is done by the delegate library [lumo-bmp](lumo_bmp)
#![cfg(feature = "bmp")]

pub use lumo_bmp::*;
use lumo_core::bytestream::LByteReaderTrait;
use lumo_core::pixel_format::PixelFormat;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::DecoderTrait;

impl<T> DecoderTrait for BmpDecoder<T>
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
        "BMP Decoder"
    }
}

impl From<BmpDecoderErrors> for ImageErrors {
    fn from(value: BmpDecoderErrors) -> Self {
        Self::ImageDecodeErrors(format!("bmp: {value:?}"))
    }
}
