/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lumo_core::bytestream::LCursor;
use lumo_core::options::DecoderOptions;
use lumo_core::pixel_format::PixelFormat;
use lumo_image::codecs::ImageFormat;
use lumo_image::errors::ImageErrors;
use lumo_image::image::Image;

/// Smallest useful Windows bitmap, 1x1 at 24 bpp
fn tiny_bmp(b: u8, g: u8, r: u8) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&58_u32.to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&54_u32.to_le_bytes());
    out.extend_from_slice(&40_u32.to_le_bytes());
    out.extend_from_slice(&1_u32.to_le_bytes());
    out.extend_from_slice(&1_u32.to_le_bytes());
    out.extend_from_slice(&1_u16.to_le_bytes());
    out.extend_from_slice(&24_u16.to_le_bytes());
    out.extend_from_slice(&[0; 24]);
    out.extend_from_slice(&[b, g, r, 0]);
    out
}

/// 1x1 three plane PCX
fn tiny_pcx(r: u8, g: u8, b: u8) -> Vec<u8> {
    let mut out = vec![0_u8; 128];
    out[0] = 0x0A;
    out[1] = 5;
    out[2] = 1;
    out[3] = 8;
    // bounding box stays 0,0 -> 0,0
    out[65] = 3;
    out[66] = 1;
    out.extend_from_slice(&[r, g, b]);
    out
}

/// 2x1 RLE true-color TGA repeating one BGR pixel
fn tiny_tga_rle(b: u8, g: u8, r: u8) -> Vec<u8> {
    let mut out = vec![0_u8; 18];
    out[2] = 10;
    out[12] = 2;
    out[14] = 1;
    out[16] = 24;
    out.extend_from_slice(&[0x81, b, g, r]);
    out
}

#[test]
fn bmp_streams_are_detected() {
    let image = Image::read(LCursor::new(tiny_bmp(30, 20, 10)), DecoderOptions::default()).unwrap();

    assert_eq!(image.dimensions(), (1, 1));
    assert_eq!(image.pixel_format(), PixelFormat::RGB);
    assert_eq!(image.pixels(), [10, 20, 30]);
}

#[test]
fn pcx_streams_are_detected() {
    let image = Image::read(LCursor::new(tiny_pcx(1, 2, 3)), DecoderOptions::default()).unwrap();

    assert_eq!(image.dimensions(), (1, 1));
    assert_eq!(image.pixels(), [1, 2, 3]);
}

#[test]
fn tga_streams_are_detected_after_earlier_attempts_rewind() {
    // PCX and BMP both run before TGA and consume stream bytes before
    // failing, the rewind between attempts is what makes this pass
    let image =
        Image::read(LCursor::new(tiny_tga_rle(30, 20, 10)), DecoderOptions::default()).unwrap();

    assert_eq!(image.dimensions(), (2, 1));
    assert_eq!(image.pixel_format(), PixelFormat::BGR);
    assert_eq!(image.pixels(), [30, 20, 10, 30, 20, 10]);
}

#[test]
fn decoded_tga_converts_to_rgb_order() {
    let image =
        Image::read(LCursor::new(tiny_tga_rle(30, 20, 10)), DecoderOptions::default()).unwrap();
    let rgb = image.convert(PixelFormat::RGB).unwrap();

    assert_eq!(rgb.pixels(), [10, 20, 30, 10, 20, 30]);
}

#[test]
fn unrecognized_streams_report_no_match() {
    let garbage = b"this is not an image at all, not even close";

    assert!(matches!(
        Image::read(LCursor::new(garbage), DecoderOptions::default()),
        Err(ImageErrors::NoDecoderMatched)
    ));
}

#[test]
fn named_decoders_bypass_detection() {
    let data = tiny_bmp(3, 2, 1);
    let image =
        Image::read_format(LCursor::new(&data), ImageFormat::BMP, DecoderOptions::default())
            .unwrap();

    assert_eq!(image.pixels(), [1, 2, 3]);

    // the same bytes handed to the wrong decoder fail instead of
    // falling through to detection
    assert!(Image::read_format(
        LCursor::new(&data),
        ImageFormat::TGA,
        DecoderOptions::default()
    )
    .is_err());
}

#[test]
fn format_tags_round_trip() {
    for format in lumo_image::codecs::AUTODETECT_ORDER {
        assert_eq!(ImageFormat::from_int(format.to_int()), Some(format));
    }
    assert_eq!(ImageFormat::from_int(0), Some(ImageFormat::Unknown));
    assert_eq!(ImageFormat::from_int(250), None);
}

#[test]
fn options_are_respected_through_detection() {
    let options = DecoderOptions::default().set_max_width(1);
    let mut wide = tiny_bmp(0, 0, 0);
    // widen the image to 2 pixels without supplying the second pixel
    wide[18] = 2;

    assert!(Image::read(LCursor::new(wide), options).is_err());
}
