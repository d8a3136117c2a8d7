/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lumo_core::pixel_format::PixelFormat;
use lumo_image::errors::ImageErrors;
use lumo_image::image::Image;

#[test]
fn converting_to_the_same_format_is_identity() {
    let image = Image::from_vec(vec![1, 2, 3, 4, 5, 6], 2, 1, PixelFormat::RGB).unwrap();
    let same = image.convert(PixelFormat::RGB).unwrap();

    assert_eq!(same.pixels(), [1, 2, 3, 4, 5, 6]);
    assert_eq!(same.pixel_format(), PixelFormat::RGB);
}

#[test]
fn dont_care_requests_no_conversion() {
    let image = Image::from_vec(vec![7, 8, 9], 1, 1, PixelFormat::BGR).unwrap();
    let same = image.convert(PixelFormat::DontCare).unwrap();

    assert_eq!(same.pixel_format(), PixelFormat::BGR);
    assert_eq!(same.pixels(), [7, 8, 9]);
}

#[test]
fn alpha_is_synthesized_as_opaque() {
    let image = Image::from_vec(vec![1, 2, 3, 4, 5, 6], 2, 1, PixelFormat::RGB).unwrap();
    let rgba = image.convert(PixelFormat::RGBA).unwrap();

    assert_eq!(rgba.pixels(), [1, 2, 3, 255, 4, 5, 6, 255]);
}

#[test]
fn alpha_is_dropped_towards_alphaless_targets() {
    let image = Image::from_vec(vec![1, 2, 3, 40, 4, 5, 6, 50], 2, 1, PixelFormat::RGBA).unwrap();
    let rgb = image.convert(PixelFormat::RGB).unwrap();

    assert_eq!(rgb.pixels(), [1, 2, 3, 4, 5, 6]);
}

#[test]
fn source_alpha_is_preserved() {
    let image = Image::from_vec(vec![1, 2, 3, 40], 1, 1, PixelFormat::RGBA).unwrap();
    let bgra = image.convert(PixelFormat::BGRA).unwrap();

    assert_eq!(bgra.pixels(), [3, 2, 1, 40]);
}

#[test]
fn channel_order_swaps_follow_the_descriptors() {
    let image = Image::from_vec(vec![1, 2, 3], 1, 1, PixelFormat::BGR).unwrap();
    let rgba = image.convert(PixelFormat::RGBA).unwrap();

    // BGR stores blue first
    assert_eq!(rgba.pixels(), [3, 2, 1, 255]);
}

#[test]
fn palettized_pixels_gather_their_entries() {
    let image =
        Image::from_vec_with_palette(vec![0], 1, 1, vec![10, 20, 30], PixelFormat::RGB).unwrap();
    let rgba = image.convert(PixelFormat::RGBA).unwrap();

    assert_eq!(rgba.pixel_format(), PixelFormat::RGBA);
    assert_eq!(rgba.pixels(), [10, 20, 30, 255]);
}

#[test]
fn palette_expansion_keeps_entry_bytes_verbatim() {
    let palette = vec![
        1, 2, 3, 255, //
        4, 5, 6, 128,
    ];
    let image =
        Image::from_vec_with_palette(vec![1, 0], 2, 1, palette, PixelFormat::RGBA).unwrap();
    let rgba = image.convert(PixelFormat::RGBA).unwrap();

    assert_eq!(rgba.pixels(), [4, 5, 6, 128, 1, 2, 3, 255]);
}

#[test]
fn indexed_targets_are_unsupported() {
    let image = Image::from_vec(vec![1, 2, 3], 1, 1, PixelFormat::RGB).unwrap();

    assert!(matches!(
        image.convert(PixelFormat::PAL8),
        Err(ImageErrors::UnsupportedConversion { .. })
    ));
}

#[test]
fn out_of_palette_indices_are_rejected_at_construction() {
    let result =
        Image::from_vec_with_palette(vec![2], 1, 1, vec![10, 20, 30], PixelFormat::RGB);
    assert!(result.is_err());
}

#[test]
fn palette_sizes_count_whole_entries() {
    let image =
        Image::from_vec_with_palette(vec![0, 1], 2, 1, vec![0; 6], PixelFormat::RGB).unwrap();
    assert_eq!(image.palette_size(), 2);
    assert_eq!(image.palette_format(), PixelFormat::RGB);
}

#[test]
fn new_images_are_zero_filled() {
    let image = Image::new(2, 2, PixelFormat::RGBA).unwrap();

    assert_eq!(image.dimensions(), (2, 2));
    assert!(image.pixels().iter().all(|p| *p == 0));
    assert_eq!(image.pixels().len(), 16);
}

#[test]
fn clone_as_leaves_the_original_untouched() {
    let image = Image::from_vec(vec![1, 2, 3], 1, 1, PixelFormat::RGB).unwrap();
    let clone = image.clone_as(PixelFormat::BGRA).unwrap();

    assert_eq!(clone.pixels(), [3, 2, 1, 255]);
    assert_eq!(image.pixels(), [1, 2, 3]);
}

#[test]
fn buffer_length_must_match_dimensions() {
    assert!(matches!(
        Image::from_vec(vec![0; 5], 1, 1, PixelFormat::RGB),
        Err(ImageErrors::DimensionsMisMatch(3, 5))
    ));
}
