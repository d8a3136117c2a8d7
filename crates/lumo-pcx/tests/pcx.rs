/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lumo_core::bytestream::LCursor;
use lumo_pcx::{probe_pcx, PcxDecoder, PcxDecodeErrors};

fn pcx_header(width: u16, height: u16, planes: u8, bytes_per_line: u16) -> Vec<u8> {
    let mut header = vec![0_u8; 128];
    header[0] = 0x0A;
    // version 5, RLE encoding, 8 bits per pixel per plane
    header[1] = 5;
    header[2] = 1;
    header[3] = 8;
    header[8..10].copy_from_slice(&(width - 1).to_le_bytes());
    header[10..12].copy_from_slice(&(height - 1).to_le_bytes());
    header[65] = planes;
    header[66..68].copy_from_slice(&bytes_per_line.to_le_bytes());
    header
}

fn vga_palette() -> Vec<u8> {
    // entry i decodes to (i, i + 1, i + 2) modulo 256
    let mut palette = Vec::with_capacity(256 * 3);
    for i in 0..=255_u8 {
        palette.extend_from_slice(&[i, i.wrapping_add(1), i.wrapping_add(2)]);
    }
    palette
}

fn decode(data: &[u8]) -> Result<Vec<u8>, PcxDecodeErrors> {
    PcxDecoder::new(LCursor::new(data)).decode()
}

#[test]
fn three_plane_scanlines_interleave() {
    let mut data = pcx_header(2, 2, 3, 2);
    // literal scanlines, R plane then G then B
    data.extend_from_slice(&[10, 20, 30, 40, 50, 60]);
    data.extend_from_slice(&[70, 80, 90, 100, 110, 120]);

    let mut decoder = PcxDecoder::new(LCursor::new(&data));
    let pixels = decoder.decode().unwrap();

    assert_eq!(decoder.dimensions(), Some((2, 2)));
    #[rustfmt::skip]
    assert_eq!(
        pixels,
        [
            10, 30, 50,  20, 40, 60,
            70, 90, 110, 80, 100, 120
        ]
    );
}

#[test]
fn one_plane_resolves_through_trailing_palette() {
    let mut data = pcx_header(2, 1, 1, 2);
    data.extend_from_slice(&[1, 2]);
    // one padding byte then the palette block
    data.push(0x0C);
    data.extend_from_slice(&vga_palette());

    let pixels = decode(&data).unwrap();
    assert_eq!(pixels, [1, 2, 3, 2, 3, 4]);
}

#[test]
fn rle_run_expands() {
    let mut data = pcx_header(4, 1, 1, 4);
    // run of 4 copies of palette index 7
    data.extend_from_slice(&[0xC4, 7]);
    data.push(0x0C);
    data.extend_from_slice(&vga_palette());

    let pixels = decode(&data).unwrap();
    assert_eq!(pixels, [7, 8, 9, 7, 8, 9, 7, 8, 9, 7, 8, 9]);
}

#[test]
fn run_crossing_scanline_end_fails() {
    let mut data = pcx_header(4, 1, 1, 4);
    data.extend_from_slice(&[0xC5, 7]);
    data.push(0x0C);
    data.extend_from_slice(&vga_palette());

    assert!(decode(&data).is_err());
}

#[test]
fn truncated_scanline_data_fails() {
    let mut data = pcx_header(4, 2, 1, 4);
    data.extend_from_slice(&[1, 2]);

    assert!(matches!(
        decode(&data),
        Err(PcxDecodeErrors::IoErrors(_))
    ));
}

#[test]
fn missing_palette_fails() {
    let mut data = pcx_header(2, 1, 1, 2);
    data.extend_from_slice(&[1, 2]);
    // padding byte present, palette absent
    data.push(0x0C);

    assert!(decode(&data).is_err());
}

#[test]
fn wrong_manufacturer_is_rejected() {
    let mut data = pcx_header(2, 1, 1, 2);
    data[0] = 0x0B;

    assert!(matches!(
        decode(&data),
        Err(PcxDecodeErrors::WrongManufacturer(0x0B))
    ));
}

#[test]
fn two_planes_are_rejected() {
    let data = pcx_header(2, 1, 2, 2);
    assert!(matches!(
        decode(&data),
        Err(PcxDecodeErrors::UnsupportedPlaneCount(2))
    ));
}

#[test]
fn probe_checks_the_fixed_fields() {
    let data = pcx_header(2, 1, 1, 2);
    assert!(probe_pcx(&data));
    assert!(!probe_pcx(b"BM"));
    // bad encoding byte
    assert!(!probe_pcx(&[0x0A, 5, 9]));
}
