/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel format conversion.
//!
//! Two primitives live here, palette expansion which gathers palette
//! entries into a direct color buffer, and direct-to-direct channel
//! remapping driven by the per-format [`ChannelOrder`] descriptors.
//!
//! [`ChannelOrder`]: lumo_core::pixel_format::ChannelOrder

use lumo_core::pixel_format::PixelFormat;

use crate::errors::ImageErrors;
use crate::image::Image;

/// Convert an image into `target_format`, consuming it.
///
/// - The `DontCare` sentinel and the image's own format return the input
///   unchanged.
/// - Palettized images are first expanded through their palette into the
///   palette's own format, then converted from there.
/// - Any pair without channel descriptors on both sides fails with
///   [`UnsupportedConversion`](ImageErrors::UnsupportedConversion).
///
/// The input is consumed whether or not the conversion succeeds.
pub fn convert(image: Image, target_format: PixelFormat) -> Result<Image, ImageErrors> {
    if target_format == PixelFormat::DontCare || target_format == image.pixel_format() {
        return Ok(image);
    }

    if image.pixel_format().is_indexed() {
        let expanded = expand_palette(image)?;
        return convert(expanded, target_format);
    }

    direct_conversion(image, target_format)
}

/// Expand a palettized image into the direct format its palette entries
/// are stored in
///
/// For each pixel index the corresponding palette entry's bytes are
/// copied verbatim
fn expand_palette(image: Image) -> Result<Image, ImageErrors> {
    let (width, height) = image.dimensions();
    let palette_format = image.palette_format();
    let entry_size = palette_format.pixel_size();

    let palette = match image.palette() {
        Some(palette) => palette,
        None => {
            return Err(ImageErrors::GenericStatic(
                "Palettized image without a palette"
            ));
        }
    };

    let mut pixels = vec![0_u8; width * height * entry_size];

    for (index, out_px) in image.pixels().iter().zip(pixels.chunks_exact_mut(entry_size)) {
        // in bounds, images enforce index < palette_size on construction
        let entry = usize::from(*index) * entry_size;
        out_px.copy_from_slice(&palette[entry..entry + entry_size]);
    }

    Image::from_vec(pixels, width, height, palette_format)
}

/// Remap channel bytes between two direct color formats.
///
/// R, G and B move by offset. The alpha byte, when the target has one,
/// is the source alpha or fully opaque if the source carries none, and
/// is dropped when the target has none.
fn direct_conversion(image: Image, target_format: PixelFormat) -> Result<Image, ImageErrors> {
    let source_format = image.pixel_format();

    let (source_desc, target_desc) =
        match (source_format.channel_order(), target_format.channel_order()) {
            (Some(source_desc), Some(target_desc)) => (source_desc, target_desc),
            _ => {
                return Err(ImageErrors::UnsupportedConversion {
                    from: source_format,
                    to:   target_format
                });
            }
        };

    let (width, height) = image.dimensions();
    let source_size = source_format.pixel_size();
    let target_size = target_format.pixel_size();

    let mut out_pixels = vec![0_u8; width * height * target_size];

    for (in_px, out_px) in image
        .pixels()
        .chunks_exact(source_size)
        .zip(out_pixels.chunks_exact_mut(target_size))
    {
        out_px[target_desc.r] = in_px[source_desc.r];
        out_px[target_desc.g] = in_px[source_desc.g];
        out_px[target_desc.b] = in_px[source_desc.b];

        if target_desc.has_alpha {
            out_px[target_desc.a] = if source_desc.has_alpha {
                in_px[source_desc.a]
            } else {
                255
            };
        }
    }

    Image::from_vec(out_pixels, width, height, target_format)
}
