/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use lumo_core::bytestream::{LByteReaderTrait, LReader};
use lumo_core::log::trace;
use lumo_core::options::DecoderOptions;
use lumo_core::pixel_format::PixelFormat;

use crate::errors::PcxDecodeErrors;

/// Probe some bytes to see if they look like the start of a PCX image
pub fn probe_pcx(bytes: &[u8]) -> bool {
    match bytes {
        [manufacturer, version, encoding, ..] => {
            *manufacturer == 0x0A && *version <= 5 && *encoding <= 1
        }
        _ => false
    }
}

#[inline(always)]
fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
}

/// Fields of interest out of the fixed 128 byte header
struct PcxHeader {
    width:          usize,
    height:         usize,
    num_planes:     u8,
    bytes_per_line: usize
}

/// A PCX decoder.
///
/// Single plane images resolve their pixels through the 256 entry VGA
/// palette trailing the scanline data, 3 plane images interleave the
/// R/G/B planes of each scanline. Both come out as 8-bit RGB.
///
/// # Usage
/// ```no_run
/// use lumo_core::bytestream::LCursor;
/// use lumo_pcx::PcxDecoder;
///
/// fn main() -> Result<(), lumo_pcx::PcxDecodeErrors> {
///     let source = LCursor::new(b"\x0A");
///     let mut decoder = PcxDecoder::new(source);
///     let pixels = decoder.decode()?;
///     println!("Pixels length: {}", pixels.len());
///     Ok(())
/// }
/// ```
pub struct PcxDecoder<T>
where
    T: LByteReaderTrait
{
    bytes:   LReader<T>,
    options: DecoderOptions,
    header:  Option<PcxHeader>
}

impl<T> PcxDecoder<T>
where
    T: LByteReaderTrait
{
    /// Create a new decoder that reads a PCX encoded file from `data`
    pub fn new(data: T) -> PcxDecoder<T> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder with options that influence decoding routines
    ///
    /// # Arguments
    /// - `data`: Data source
    /// - `options`: Custom options for the decoder
    pub fn new_with_options(data: T, options: DecoderOptions) -> PcxDecoder<T> {
        PcxDecoder {
            bytes: LReader::new(data),
            options,
            header: None
        }
    }

    /// Parse the fixed 128 byte header.
    ///
    /// After this, dimension queries return values and the stream is
    /// positioned at the first scanline.
    pub fn decode_headers(&mut self) -> Result<(), PcxDecodeErrors> {
        if self.header.is_some() {
            return Ok(());
        }

        let header = self.bytes.read_fixed_bytes_or_error::<128>()?;

        if header[0] != 0x0A {
            return Err(PcxDecodeErrors::WrongManufacturer(header[0]));
        }
        if header[2] > 1 {
            return Err(PcxDecodeErrors::UnknownEncoding(header[2]));
        }

        let depth = header[3];
        let xmin = usize::from(read_u16_le(&header, 4));
        let ymin = usize::from(read_u16_le(&header, 6));
        let xmax = usize::from(read_u16_le(&header, 8));
        let ymax = usize::from(read_u16_le(&header, 10));
        let num_planes = header[65];
        let bytes_per_line = usize::from(read_u16_le(&header, 66));

        if xmax < xmin || ymax < ymin {
            return Err(PcxDecodeErrors::Generic("Empty image bounding box"));
        }
        let width = xmax - xmin + 1;
        let height = ymax - ymin + 1;

        if width > self.options.max_width() {
            return Err(PcxDecodeErrors::LargeDimensions(
                self.options.max_width(),
                width
            ));
        }
        if height > self.options.max_height() {
            return Err(PcxDecodeErrors::LargeDimensions(
                self.options.max_height(),
                height
            ));
        }

        if num_planes != 1 && num_planes != 3 {
            return Err(PcxDecodeErrors::UnsupportedPlaneCount(num_planes));
        }
        if bytes_per_line == 0 {
            return Err(PcxDecodeErrors::ZeroDimensions);
        }
        // a scanline must at least cover the image width
        if bytes_per_line < width {
            return Err(PcxDecodeErrors::Generic(
                "Bytes per line smaller than image width"
            ));
        }
        if self.options.strict_mode() && depth != 8 {
            return Err(PcxDecodeErrors::Generic(
                "Only 8 bits per pixel per plane is supported"
            ));
        }

        trace!("Width: {}", width);
        trace!("Height: {}", height);
        trace!("Planes: {}", num_planes);
        trace!("Bytes per line: {}", bytes_per_line);

        self.header = Some(PcxHeader {
            width,
            height,
            num_planes,
            bytes_per_line
        });

        Ok(())
    }

    /// Get image width and height respectively or `None` if the
    /// headers haven't been decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header.as_ref().map(|h| (h.width, h.height))
    }

    /// Get the pixel format of the decoder output, or `None` if the headers
    /// weren't decoded
    ///
    /// Both plane layouts are normalized to [RGB](PixelFormat::RGB)
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        self.header.as_ref().map(|_| PixelFormat::RGB)
    }

    /// Return the expected size of the output buffer, or `None` if headers
    /// haven't been decoded or the calculation overflows
    pub fn output_buf_size(&self) -> Option<usize> {
        let header = self.header.as_ref()?;
        header
            .width
            .checked_mul(header.height)?
            .checked_mul(PixelFormat::RGB.pixel_size())
    }

    /// Decode the image returning the pixels as an allocated `Vec<u8>`
    /// in RGB order, or an error if decoding could not be completed
    pub fn decode(&mut self) -> Result<Vec<u8>, PcxDecodeErrors> {
        self.decode_headers()?;
        let mut output = vec![
            0_u8;
            self.output_buf_size()
                .ok_or(PcxDecodeErrors::Generic("Output size overflows"))?
        ];

        self.decode_into(&mut output)?;

        Ok(output)
    }

    /// Decode the image into a caller provided buffer
    pub fn decode_into(&mut self, buf: &mut [u8]) -> Result<(), PcxDecodeErrors> {
        self.decode_headers()?;

        let header = match self.header.take() {
            Some(h) => h,
            None => return Err(PcxDecodeErrors::Generic("Headers not decoded"))
        };
        let result = self.decode_into_inner(buf, &header);
        self.header = Some(header);

        result
    }

    fn decode_into_inner(
        &mut self, buf: &mut [u8], header: &PcxHeader
    ) -> Result<(), PcxDecodeErrors> {
        let output_size = header
            .width
            .checked_mul(header.height)
            .and_then(|v| v.checked_mul(3))
            .ok_or(PcxDecodeErrors::Generic("Output size overflows"))?;

        if buf.len() < output_size {
            return Err(PcxDecodeErrors::Generic("Output buffer too small"));
        }
        let buf = &mut buf[0..output_size];

        let width = header.width;
        let bytes_per_line = header.bytes_per_line;

        if header.num_planes == 1 {
            // 256 colors, indices now, palette later
            let image_size = bytes_per_line
                .checked_mul(header.height)
                .ok_or(PcxDecodeErrors::Generic("Scanline size overflows"))?;
            let mut image = vec![0_u8; image_size];

            for row in image.chunks_exact_mut(bytes_per_line) {
                self.read_scanline(row)?;
            }

            // one padding byte, then the 256 entry R,G,B palette
            self.bytes.get_u8_err()?;
            let mut palette = [0_u8; 256 * 3];
            self.bytes.read_exact_bytes(&mut palette)?;

            for (in_row, out_row) in image
                .chunks_exact(bytes_per_line)
                .zip(buf.chunks_exact_mut(width * 3))
            {
                for (index, out_px) in in_row.iter().take(width).zip(out_row.chunks_exact_mut(3)) {
                    let entry = usize::from(*index) * 3;
                    out_px.copy_from_slice(&palette[entry..entry + 3]);
                }
            }
        } else {
            // 24-bit color, each scanline carries its R, G and B planes
            // back to back
            let scan_size = 3 * bytes_per_line;
            let mut scanline = vec![0_u8; scan_size];

            for out_row in buf.chunks_exact_mut(width * 3) {
                self.read_scanline(&mut scanline)?;

                let (r_plane, rest) = scanline.split_at(bytes_per_line);
                let (g_plane, b_plane) = rest.split_at(bytes_per_line);

                for (((r, g), b), out_px) in r_plane
                    .iter()
                    .zip(g_plane)
                    .zip(b_plane)
                    .take(width)
                    .zip(out_row.chunks_exact_mut(3))
                {
                    out_px[0] = *r;
                    out_px[1] = *g;
                    out_px[2] = *b;
                }
            }
        }

        Ok(())
    }

    /// Decode one run length encoded scanline to exactly `scanline.len()`
    /// bytes.
    ///
    /// A byte with its top two bits set is a run header, its low 6 bits
    /// count repetitions of the byte that follows, anything else is a
    /// single literal value.
    fn read_scanline(&mut self, scanline: &mut [u8]) -> Result<(), PcxDecodeErrors> {
        let mut pos = 0;

        while pos < scanline.len() {
            let data = self.bytes.get_u8_err()?;

            if data & 0xC0 == 0xC0 {
                let count = usize::from(data & 0x3F);
                let value = self.bytes.get_u8_err()?;

                if pos + count > scanline.len() {
                    return Err(PcxDecodeErrors::Generic(
                        "RLE run crosses the scanline end"
                    ));
                }
                scanline[pos..pos + count].fill(value);
                pos += count;
            } else {
                scanline[pos] = data;
                pos += 1;
            }
        }

        Ok(())
    }
}
