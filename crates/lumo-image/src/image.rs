/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module represents a single image
//!
//! An image is a rectangular grid of pixels stored as one flat,
//! interleaved byte buffer in a known [`PixelFormat`], plus, for
//! palettized images, the palette those pixels index into.
//!
//! An image exclusively owns its pixel and palette storage. Conversions
//! consume the image and hand back a new one, nothing ever aliases.

use lumo_core::pixel_format::PixelFormat;

use crate::conversions;
use crate::errors::ImageErrors;

/// A single decoded image
#[derive(Clone)]
pub struct Image {
    width:          usize,
    height:         usize,
    format:         PixelFormat,
    pixels:         Vec<u8>,
    palette:        Option<Vec<u8>>,
    palette_format: PixelFormat
}

impl Image {
    /// Create a zero filled image in the given format
    ///
    /// Palettized images get a 256 entry all-black RGB palette so the
    /// index bound invariant holds from the start.
    ///
    /// # Returns
    /// - The image, or an error if the format can't back storage
    ///   (the `DontCare` sentinel) or the size calculation overflows
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Result<Image, ImageErrors> {
        if format.pixel_size() == 0 {
            return Err(ImageErrors::GenericStatic(
                "Cannot create an image with a zero sized pixel format"
            ));
        }
        let size = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(format.pixel_size()))
            .ok_or(ImageErrors::GenericStatic("Image dimensions overflow"))?;

        let (palette, palette_format) = if format.is_indexed() {
            (Some(vec![0_u8; 256 * 3]), PixelFormat::RGB)
        } else {
            (None, PixelFormat::DontCare)
        };

        Ok(Image {
            width,
            height,
            format,
            pixels: vec![0; size],
            palette,
            palette_format
        })
    }

    /// Create an image from an owned buffer of interleaved direct color
    /// pixels
    ///
    /// # Returns
    /// - The image, or an error if the buffer length disagrees with
    ///   `width * height * format.pixel_size()` or the format is not a
    ///   direct one
    pub fn from_vec(
        pixels: Vec<u8>, width: usize, height: usize, format: PixelFormat
    ) -> Result<Image, ImageErrors> {
        if !format.is_direct() {
            return Err(ImageErrors::GenericStatic(
                "Expected a direct color pixel format"
            ));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(format.pixel_size()))
            .ok_or(ImageErrors::GenericStatic("Image dimensions overflow"))?;

        if pixels.len() != expected {
            return Err(ImageErrors::DimensionsMisMatch(expected, pixels.len()));
        }

        Ok(Image {
            width,
            height,
            format,
            pixels,
            palette: None,
            palette_format: PixelFormat::DontCare
        })
    }

    /// Create a palettized image from an owned index buffer and its
    /// palette
    ///
    /// Every index must fall inside the palette, palettes are sized in
    /// whole entries of `palette_format`.
    pub fn from_vec_with_palette(
        pixels: Vec<u8>, width: usize, height: usize, palette: Vec<u8>,
        palette_format: PixelFormat
    ) -> Result<Image, ImageErrors> {
        if !palette_format.is_direct() {
            return Err(ImageErrors::GenericStatic(
                "Palette entries must be in a direct color format"
            ));
        }
        let expected = width
            .checked_mul(height)
            .ok_or(ImageErrors::GenericStatic("Image dimensions overflow"))?;

        if pixels.len() != expected {
            return Err(ImageErrors::DimensionsMisMatch(expected, pixels.len()));
        }
        if palette.len() % palette_format.pixel_size() != 0 {
            return Err(ImageErrors::GenericStatic(
                "Palette length is not a whole number of entries"
            ));
        }
        let palette_size = palette.len() / palette_format.pixel_size();

        if pixels.iter().any(|p| usize::from(*p) >= palette_size) {
            return Err(ImageErrors::GenericStatic(
                "Pixel index outside the palette"
            ));
        }

        Ok(Image {
            width,
            height,
            format: PixelFormat::PAL8,
            pixels,
            palette: Some(palette),
            palette_format
        })
    }

    /// Get image dimensions as a tuple of (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Get the format the pixels are stored in
    pub const fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    /// The interleaved pixel bytes, `width * height * pixel_size` of them
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The palette bytes for palettized images, `None` otherwise
    pub fn palette(&self) -> Option<&[u8]> {
        self.palette.as_deref()
    }

    /// The format palette entries are stored in, `DontCare` when there is
    /// no palette
    pub const fn palette_format(&self) -> PixelFormat {
        self.palette_format
    }

    /// Number of palette entries, zero when there is no palette
    pub fn palette_size(&self) -> usize {
        match &self.palette {
            Some(palette) => palette.len() / self.palette_format.pixel_size(),
            None => 0
        }
    }

    /// Consume the image returning the raw pixel buffer
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Convert this image into another pixel format, consuming it.
    ///
    /// The input is consumed unconditionally, on failure the caller gets
    /// the error and the storage is gone. Passing
    /// [DontCare](PixelFormat::DontCare) or the image's own format hands
    /// the image back untouched.
    pub fn convert(self, target_format: PixelFormat) -> Result<Image, ImageErrors> {
        conversions::convert(self, target_format)
    }

    /// Clone this image into another pixel format, leaving the original
    /// as is
    pub fn clone_as(&self, target_format: PixelFormat) -> Result<Image, ImageErrors> {
        self.clone().convert(target_format)
    }
}
