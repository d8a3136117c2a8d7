/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! PNG decoding support
//!
//! Decoding is delegated to the [`png`](https://crates.io/crates/png)
//! crate, this module only adapts its output into an [`Image`].
//! Palettes are expanded and 16 bit samples stripped on the way out, so
//! pixels always come out as 8-bit RGB or RGBA.
//!
//! [`Image`]: crate::image::Image
#![cfg(feature = "png")]

use lumo_core::bytestream::{LByteReaderTrait, LReader};
use lumo_core::options::DecoderOptions;
use lumo_core::pixel_format::PixelFormat;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::DecoderTrait;

/// A PNG decoder wrapping the `png` crate
pub struct PngDecoder<T>
where
    T: LByteReaderTrait
{
    source:     LReader<T>,
    options:    DecoderOptions,
    dimensions: Option<(usize, usize)>,
    format:     Option<PixelFormat>
}

impl<T> PngDecoder<T>
where
    T: LByteReaderTrait
{
    pub fn new(data: T) -> PngDecoder<T> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: T, options: DecoderOptions) -> PngDecoder<T> {
        PngDecoder {
            source: LReader::new(data),
            options,
            dimensions: None,
            format: None
        }
    }
}

impl<T> DecoderTrait for PngDecoder<T>
where
    T: LByteReaderTrait
{
    fn decode(&mut self) -> Result<Image, ImageErrors> {
        let mut decoder = png::Decoder::new(&mut self.source);
        decoder
            .set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

        let mut reader = decoder.read_info()?;

        let mut buf = vec![0_u8; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut buf)?;
        buf.truncate(frame.buffer_size());

        let width = frame.width as usize;
        let height = frame.height as usize;

        if width > self.options.max_width() || height > self.options.max_height() {
            return Err(ImageErrors::ImageDecodeErrors(format!(
                "png: {width}x{height} exceeds the configured decoder limits"
            )));
        }

        let (pixels, format) = match frame.color_type {
            png::ColorType::Rgb => (buf, PixelFormat::RGB),
            png::ColorType::Rgba => (buf, PixelFormat::RGBA),
            png::ColorType::Grayscale => {
                // replicate luma into the three channels
                let mut expanded = Vec::with_capacity(buf.len() * 3);
                for luma in &buf {
                    expanded.extend_from_slice(&[*luma, *luma, *luma]);
                }
                (expanded, PixelFormat::RGB)
            }
            png::ColorType::GrayscaleAlpha => {
                let mut expanded = Vec::with_capacity(buf.len() * 2);
                for px in buf.chunks_exact(2) {
                    expanded.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
                }
                (expanded, PixelFormat::RGBA)
            }
            // EXPAND already resolved any palette
            png::ColorType::Indexed => {
                return Err(ImageErrors::ImageDecodeErrors(
                    "png: indexed output was not expanded".into()
                ));
            }
        };

        self.dimensions = Some((width, height));
        self.format = Some(format);

        Image::from_vec(pixels, width, height, format)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions
    }

    fn out_format(&self) -> Option<PixelFormat> {
        self.format
    }

    fn name(&self) -> &'static str {
        "PNG Decoder"
    }
}

impl From<png::DecodingError> for ImageErrors {
    fn from(value: png::DecodingError) -> Self {
        Self::ImageDecodeErrors(format!("png: {value}"))
    }
}
