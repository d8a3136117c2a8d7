/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! JPEG decoding support
//!
//! Decoding is delegated to the
//! [`jpeg-decoder`](https://crates.io/crates/jpeg-decoder) crate, this
//! module only adapts its output into an [`Image`]. Grayscale images are
//! expanded to RGB, CMYK output is rejected.
//!
//! [`Image`]: crate::image::Image
#![cfg(feature = "jpeg")]

use lumo_core::bytestream::{LByteReaderTrait, LReader};
use lumo_core::options::DecoderOptions;
use lumo_core::pixel_format::PixelFormat;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::DecoderTrait;

/// A JPEG decoder wrapping the `jpeg-decoder` crate
pub struct JpegDecoder<T>
where
    T: LByteReaderTrait
{
    source:     LReader<T>,
    options:    DecoderOptions,
    dimensions: Option<(usize, usize)>
}

impl<T> JpegDecoder<T>
where
    T: LByteReaderTrait
{
    pub fn new(data: T) -> JpegDecoder<T> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: T, options: DecoderOptions) -> JpegDecoder<T> {
        JpegDecoder {
            source: LReader::new(data),
            options,
            dimensions: None
        }
    }
}

impl<T> DecoderTrait for JpegDecoder<T>
where
    T: LByteReaderTrait
{
    fn decode(&mut self) -> Result<Image, ImageErrors> {
        let mut decoder = jpeg_decoder::Decoder::new(&mut self.source);
        let pixels = decoder.decode()?;

        let info = decoder
            .info()
            .ok_or(ImageErrors::GenericStatic("jpeg: no image info produced"))?;

        let width = usize::from(info.width);
        let height = usize::from(info.height);

        if width > self.options.max_width() || height > self.options.max_height() {
            return Err(ImageErrors::ImageDecodeErrors(format!(
                "jpeg: {width}x{height} exceeds the configured decoder limits"
            )));
        }

        let pixels = match info.pixel_format {
            jpeg_decoder::PixelFormat::RGB24 => pixels,
            jpeg_decoder::PixelFormat::L8 => {
                let mut expanded = Vec::with_capacity(pixels.len() * 3);
                for luma in &pixels {
                    expanded.extend_from_slice(&[*luma, *luma, *luma]);
                }
                expanded
            }
            other => {
                return Err(ImageErrors::ImageDecodeErrors(format!(
                    "jpeg: unsupported output format {other:?}"
                )));
            }
        };

        self.dimensions = Some((width, height));

        Image::from_vec(pixels, width, height, PixelFormat::RGB)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions
    }

    fn out_format(&self) -> Option<PixelFormat> {
        self.dimensions.map(|_| PixelFormat::RGB)
    }

    fn name(&self) -> &'static str {
        "JPEG Decoder"
    }
}

impl From<jpeg_decoder::Error> for ImageErrors {
    fn from(value: jpeg_decoder::Error) -> Self {
        Self::ImageDecodeErrors(format!("jpeg: {value}"))
    }
}
