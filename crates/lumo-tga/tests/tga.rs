/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lumo_core::bytestream::LCursor;
use lumo_core::pixel_format::PixelFormat;
use lumo_tga::{TgaDecoder, TgaDecodeErrors};

fn tga_header(image_type: u8, width: u16, height: u16, depth: u8, descriptor: u8) -> Vec<u8> {
    let mut header = vec![0_u8; 18];
    header[2] = image_type;
    header[12..14].copy_from_slice(&width.to_le_bytes());
    header[14..16].copy_from_slice(&height.to_le_bytes());
    header[16] = depth;
    header[17] = descriptor;
    header
}

fn decode(data: &[u8]) -> Result<Vec<u8>, TgaDecodeErrors> {
    TgaDecoder::new(LCursor::new(data)).decode()
}

#[test]
fn uncompressed_24bit_keeps_bgr_order() {
    let mut data = tga_header(2, 2, 1, 24, 0);
    data.extend_from_slice(&[10, 20, 30, 40, 50, 60]);

    let mut decoder = TgaDecoder::new(LCursor::new(&data));
    let pixels = decoder.decode().unwrap();

    assert_eq!(decoder.dimensions(), Some((2, 1)));
    assert_eq!(decoder.pixel_format(), Some(PixelFormat::BGR));
    // no channel reorder happens
    assert_eq!(pixels, [10, 20, 30, 40, 50, 60]);
}

#[test]
fn uncompressed_32bit_reports_bgra() {
    let mut data = tga_header(2, 1, 1, 32, 0);
    data.extend_from_slice(&[1, 2, 3, 4]);

    let mut decoder = TgaDecoder::new(LCursor::new(&data));
    let pixels = decoder.decode().unwrap();

    assert_eq!(decoder.pixel_format(), Some(PixelFormat::BGRA));
    assert_eq!(pixels, [1, 2, 3, 4]);
}

#[test]
fn rle_repeat_packet() {
    // control 0x81 repeats the following pixel twice
    let mut data = tga_header(10, 2, 1, 24, 0);
    data.extend_from_slice(&[0x81, 30, 20, 10]);

    let pixels = decode(&data).unwrap();
    assert_eq!(pixels, [30, 20, 10, 30, 20, 10]);
}

#[test]
fn rle_raw_packet() {
    // control 0x01 copies the following two pixels verbatim
    let mut data = tga_header(10, 2, 1, 24, 0);
    data.extend_from_slice(&[0x01, 1, 2, 3, 4, 5, 6]);

    let pixels = decode(&data).unwrap();
    assert_eq!(pixels, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn rle_packet_overflowing_buffer_fails() {
    // a 4 pixel repeat on a 2 pixel image
    let mut data = tga_header(10, 2, 1, 24, 0);
    data.extend_from_slice(&[0x83, 30, 20, 10]);

    assert!(decode(&data).is_err());
}

#[test]
fn vertical_flip_reverses_rows() {
    // descriptor bit 5
    let mut data = tga_header(2, 1, 2, 24, 1 << 5);
    data.extend_from_slice(&[1, 2, 3, 4, 5, 6]);

    let pixels = decode(&data).unwrap();
    assert_eq!(pixels, [4, 5, 6, 1, 2, 3]);
}

#[test]
fn horizontal_mirror_reverses_row_pixels() {
    // descriptor bit 4
    let mut data = tga_header(2, 2, 1, 24, 1 << 4);
    data.extend_from_slice(&[1, 2, 3, 4, 5, 6]);

    let pixels = decode(&data).unwrap();
    assert_eq!(pixels, [4, 5, 6, 1, 2, 3]);
}

#[test]
fn mirror_and_flip_are_independent() {
    let mut data = tga_header(2, 2, 2, 24, (1 << 4) | (1 << 5));
    #[rustfmt::skip]
    data.extend_from_slice(&[
        1, 1, 1, 2, 2, 2,
        3, 3, 3, 4, 4, 4
    ]);

    let pixels = decode(&data).unwrap();
    #[rustfmt::skip]
    assert_eq!(
        pixels,
        [
            4, 4, 4, 3, 3, 3,
            2, 2, 2, 1, 1, 1
        ]
    );
}

#[test]
fn image_id_and_color_map_are_skipped() {
    let mut data = tga_header(2, 1, 1, 24, 0);
    // 3 byte image id
    data[0] = 3;
    // a declared color map with two 24 bit entries
    data[1] = 1;
    data[5..7].copy_from_slice(&2_u16.to_le_bytes());
    data[7] = 24;

    data.extend_from_slice(b"id!");
    data.extend_from_slice(&[9, 9, 9, 8, 8, 8]);
    data.extend_from_slice(&[10, 20, 30]);

    let pixels = decode(&data).unwrap();
    assert_eq!(pixels, [10, 20, 30]);
}

#[test]
fn color_mapped_images_are_rejected() {
    let data = tga_header(1, 1, 1, 24, 0);
    assert!(matches!(
        decode(&data),
        Err(TgaDecodeErrors::UnsupportedImageType(1))
    ));
}

#[test]
fn odd_depths_are_rejected() {
    let data = tga_header(2, 1, 1, 16, 0);
    assert!(matches!(
        decode(&data),
        Err(TgaDecodeErrors::UnsupportedDepth(16))
    ));
}

#[test]
fn truncated_pixel_data_fails() {
    let mut data = tga_header(2, 2, 2, 24, 0);
    data.extend_from_slice(&[1, 2, 3]);

    assert!(matches!(
        decode(&data),
        Err(TgaDecodeErrors::IoErrors(_))
    ));
}
