/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "png")]

use lumo_core::bytestream::LCursor;
use lumo_core::options::DecoderOptions;
use lumo_core::pixel_format::PixelFormat;
use lumo_image::image::Image;

fn encode_png(width: u32, height: u32, rgb: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut data, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(rgb).unwrap();
    }
    data
}

#[test]
fn png_streams_are_detected_first() {
    let data = encode_png(2, 1, &[1, 2, 3, 4, 5, 6]);
    let image = Image::read(LCursor::new(data), DecoderOptions::default()).unwrap();

    assert_eq!(image.dimensions(), (2, 1));
    assert_eq!(image.pixel_format(), PixelFormat::RGB);
    assert_eq!(image.pixels(), [1, 2, 3, 4, 5, 6]);
}

#[test]
fn bmp_decode_matches_the_png_reference() {
    // the same 2x2 picture once as BMP, once as PNG. Decoding both and
    // normalizing to one format must be byte identical
    let rgb: [u8; 12] = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120];

    let mut bmp = Vec::new();
    bmp.extend_from_slice(b"BM");
    bmp.extend_from_slice(&70_u32.to_le_bytes());
    bmp.extend_from_slice(&[0; 4]);
    bmp.extend_from_slice(&54_u32.to_le_bytes());
    bmp.extend_from_slice(&40_u32.to_le_bytes());
    bmp.extend_from_slice(&2_u32.to_le_bytes());
    bmp.extend_from_slice(&2_u32.to_le_bytes());
    bmp.extend_from_slice(&1_u16.to_le_bytes());
    bmp.extend_from_slice(&24_u16.to_le_bytes());
    bmp.extend_from_slice(&[0; 24]);
    // bottom row first, B,G,R order, rows padded to 8 bytes
    bmp.extend_from_slice(&[90, 80, 70, 120, 110, 100, 0, 0]);
    bmp.extend_from_slice(&[30, 20, 10, 60, 50, 40, 0, 0]);

    let from_bmp = Image::read(LCursor::new(bmp), DecoderOptions::default()).unwrap();
    let from_png = Image::read(
        LCursor::new(encode_png(2, 2, &rgb)),
        DecoderOptions::default()
    )
    .unwrap();

    assert_eq!(from_bmp.dimensions(), from_png.dimensions());

    let a = from_bmp.convert(PixelFormat::RGBA).unwrap();
    let b = from_png.convert(PixelFormat::RGBA).unwrap();
    assert_eq!(a.pixels(), b.pixels());
}
