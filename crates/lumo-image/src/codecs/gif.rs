/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! GIF decoding support
//!
//! Decoding is delegated to the [`gif`](https://crates.io/crates/gif)
//! crate, this module only adapts its output into an [`Image`]. Only the
//! first frame of an animation is decoded, always as RGBA.
//!
//! [`Image`]: crate::image::Image
#![cfg(feature = "gif")]

use lumo_core::bytestream::{LByteReaderTrait, LReader};
use lumo_core::options::DecoderOptions;
use lumo_core::pixel_format::PixelFormat;

use crate::errors::ImageErrors;
use crate::image::Image;
use crate::traits::DecoderTrait;

/// A GIF decoder wrapping the `gif` crate
pub struct GifDecoder<T>
where
    T: LByteReaderTrait
{
    source:     LReader<T>,
    options:    DecoderOptions,
    dimensions: Option<(usize, usize)>
}

impl<T> GifDecoder<T>
where
    T: LByteReaderTrait
{
    pub fn new(data: T) -> GifDecoder<T> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: T, options: DecoderOptions) -> GifDecoder<T> {
        GifDecoder {
            source: LReader::new(data),
            options,
            dimensions: None
        }
    }
}

impl<T> DecoderTrait for GifDecoder<T>
where
    T: LByteReaderTrait
{
    fn decode(&mut self) -> Result<Image, ImageErrors> {
        let mut decode_options = gif::DecodeOptions::new();
        decode_options.set_color_output(gif::ColorOutput::RGBA);

        let mut decoder = decode_options.read_info(&mut self.source)?;

        let frame = decoder
            .read_next_frame()?
            .ok_or(ImageErrors::GenericStatic("gif: stream contains no frames"))?;

        let width = usize::from(frame.width);
        let height = usize::from(frame.height);

        if width > self.options.max_width() || height > self.options.max_height() {
            return Err(ImageErrors::ImageDecodeErrors(format!(
                "gif: {width}x{height} exceeds the configured decoder limits"
            )));
        }

        let pixels = frame.buffer.to_vec();
        self.dimensions = Some((width, height));

        Image::from_vec(pixels, width, height, PixelFormat::RGBA)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions
    }

    fn out_format(&self) -> Option<PixelFormat> {
        self.dimensions.map(|_| PixelFormat::RGBA)
    }

    fn name(&self) -> &'static str {
        "GIF Decoder"
    }
}

impl From<gif::DecodingError> for ImageErrors {
    fn from(value: gif::DecodingError) -> Self {
        Self::ImageDecodeErrors(format!("gif: {value}"))
    }
}
