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

use crate::errors::TgaDecodeErrors;

/*
 * image types
 * 0  = no image data
 * 1  = uncompressed, color-mapped
 * 2  = uncompressed, true-color
 * 3  = uncompressed, black and white
 * 9  = RLE, color-mapped
 * 10 = RLE, true-color
 * 11 = RLE, black and white
 */
const TGA_TRUE_COLOR: u8 = 2;
const TGA_RLE_TRUE_COLOR: u8 = 10;

/// Fields read out of the fixed 18 byte header
struct TgaHeader {
    width:         usize,
    height:        usize,
    image_type:    u8,
    /// 3 or 4 bytes per pixel
    pixel_bytes:   usize,
    id_length:     u8,
    cm_present:    bool,
    cm_length:     u16,
    cm_entry_size: u8,
    /// Descriptor bit 4, reverse each row's pixel order after decoding
    mirrored:      bool,
    /// Descriptor bit 5, reverse the row order after decoding
    flipped:       bool
}

/// A TGA decoder.
///
/// Only true-color images, plain or run length encoded, at 24 or 32 bits
/// per pixel are supported. Color-mapped and grayscale images fail.
///
/// TGA stores pixels in B,G,R\[,A\] byte order and the decoder's output
/// keeps that layout, so the reported pixel format is
/// [BGR](PixelFormat::BGR) or [BGRA](PixelFormat::BGRA).
///
/// # Usage
/// ```no_run
/// use lumo_core::bytestream::LCursor;
/// use lumo_tga::TgaDecoder;
///
/// fn main() -> Result<(), lumo_tga::TgaDecodeErrors> {
///     let source = LCursor::new([0_u8; 18]);
///     let mut decoder = TgaDecoder::new(source);
///     let pixels = decoder.decode()?;
///     println!("Pixels length: {}", pixels.len());
///     Ok(())
/// }
/// ```
pub struct TgaDecoder<T>
where
    T: LByteReaderTrait
{
    bytes:   LReader<T>,
    options: DecoderOptions,
    header:  Option<TgaHeader>
}

impl<T> TgaDecoder<T>
where
    T: LByteReaderTrait
{
    /// Create a new decoder that reads a TGA encoded file from `data`
    pub fn new(data: T) -> TgaDecoder<T> {
        Self::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder with options that influence decoding routines
    ///
    /// # Arguments
    /// - `data`: Data source
    /// - `options`: Custom options for the decoder
    pub fn new_with_options(data: T, options: DecoderOptions) -> TgaDecoder<T> {
        TgaDecoder {
            bytes: LReader::new(data),
            options,
            header: None
        }
    }

    /// Parse the fixed 18 byte header.
    ///
    /// After this, dimension and format queries return values and the
    /// stream is positioned at the image-id block.
    pub fn decode_headers(&mut self) -> Result<(), TgaDecodeErrors> {
        if self.header.is_some() {
            return Ok(());
        }

        let header = self.bytes.read_fixed_bytes_or_error::<18>()?;

        let id_length = header[0];
        let cm_type = header[1];
        let image_type = header[2];
        // color map first-entry index at 3..5 is never needed, we don't
        // decode color-mapped images
        let cm_length = u16::from_le_bytes([header[5], header[6]]);
        let cm_entry_size = header[7];
        let width = usize::from(u16::from_le_bytes([header[12], header[13]]));
        let height = usize::from(u16::from_le_bytes([header[14], header[15]]));
        let pixel_depth = header[16];
        let image_descriptor = header[17];

        if image_type != TGA_TRUE_COLOR && image_type != TGA_RLE_TRUE_COLOR {
            return Err(TgaDecodeErrors::UnsupportedImageType(image_type));
        }
        if pixel_depth != 24 && pixel_depth != 32 {
            return Err(TgaDecodeErrors::UnsupportedDepth(pixel_depth));
        }
        if width == 0 || height == 0 {
            return Err(TgaDecodeErrors::ZeroDimensions);
        }
        if width > self.options.max_width() {
            return Err(TgaDecodeErrors::LargeDimensions(
                self.options.max_width(),
                width
            ));
        }
        if height > self.options.max_height() {
            return Err(TgaDecodeErrors::LargeDimensions(
                self.options.max_height(),
                height
            ));
        }

        trace!("Width: {}", width);
        trace!("Height: {}", height);
        trace!("Image type: {}", image_type);
        trace!("Pixel depth: {}", pixel_depth);

        self.header = Some(TgaHeader {
            width,
            height,
            image_type,
            pixel_bytes: usize::from(pixel_depth / 8),
            id_length,
            cm_present: cm_type != 0,
            cm_length,
            cm_entry_size,
            mirrored: image_descriptor & (1 << 4) != 0,
            flipped: image_descriptor & (1 << 5) != 0
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
    /// 24 bit images come out as [BGR](PixelFormat::BGR), 32 bit images as
    /// [BGRA](PixelFormat::BGRA)
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        self.header.as_ref().map(|h| {
            if h.pixel_bytes == 4 {
                PixelFormat::BGRA
            } else {
                PixelFormat::BGR
            }
        })
    }

    /// Return the expected size of the output buffer, or `None` if headers
    /// haven't been decoded or the calculation overflows
    pub fn output_buf_size(&self) -> Option<usize> {
        let header = self.header.as_ref()?;
        header
            .width
            .checked_mul(header.height)?
            .checked_mul(header.pixel_bytes)
    }

    /// Decode the image returning the pixels as an allocated `Vec<u8>`
    /// in B,G,R\[,A\] order, or an error if decoding could not be completed
    pub fn decode(&mut self) -> Result<Vec<u8>, TgaDecodeErrors> {
        self.decode_headers()?;
        let mut output = vec![
            0_u8;
            self.output_buf_size()
                .ok_or(TgaDecodeErrors::Generic("Output size overflows"))?
        ];

        self.decode_into(&mut output)?;

        Ok(output)
    }

    /// Decode the image into a caller provided buffer
    pub fn decode_into(&mut self, buf: &mut [u8]) -> Result<(), TgaDecodeErrors> {
        self.decode_headers()?;

        let header = match self.header.take() {
            Some(h) => h,
            None => return Err(TgaDecodeErrors::Generic("Headers not decoded"))
        };
        let result = self.decode_into_inner(buf, &header);
        self.header = Some(header);

        result
    }

    fn decode_into_inner(
        &mut self, buf: &mut [u8], header: &TgaHeader
    ) -> Result<(), TgaDecodeErrors> {
        let output_size = header
            .width
            .checked_mul(header.height)
            .and_then(|v| v.checked_mul(header.pixel_bytes))
            .ok_or(TgaDecodeErrors::Generic("Output size overflows"))?;

        if buf.len() < output_size {
            return Err(TgaDecodeErrors::Generic("Output buffer too small"));
        }
        let buf = &mut buf[0..output_size];

        // skip the image-id block
        self.bytes.skip(usize::from(header.id_length))?;

        // skip the color map unread, color-mapped true-color images are
        // not a thing we decode
        if header.cm_present {
            let entry_bytes = (usize::from(header.cm_entry_size) + 7) / 8;
            self.bytes
                .skip(entry_bytes * usize::from(header.cm_length))?;
        }

        if header.image_type == TGA_TRUE_COLOR {
            self.bytes.read_exact_bytes(buf)?;
        } else {
            self.decode_rle(buf, header.pixel_bytes)?;
        }

        if header.mirrored {
            mirror_rows(buf, header.width, header.pixel_bytes);
        }
        if header.flipped {
            flip_vertical(buf, header.width * header.pixel_bytes);
        }

        Ok(())
    }

    /// Decode RLE packets until the pixel buffer is full.
    ///
    /// A control byte with the high bit set repeats the following raw
    /// pixel `low7 + 1` times, with the high bit clear the following
    /// `low7 + 1` raw pixels are copied verbatim.
    fn decode_rle(&mut self, buf: &mut [u8], pixel_bytes: usize) -> Result<(), TgaDecodeErrors> {
        let mut pos = 0;

        while pos < buf.len() {
            let control = self.bytes.get_u8_err()?;
            let count = usize::from(control & 0x7F) + 1;
            let size = count * pixel_bytes;

            if pos + size > buf.len() {
                return Err(TgaDecodeErrors::Generic(
                    "RLE packet overflows the pixel buffer"
                ));
            }

            if control & 0x80 != 0 {
                let mut pixel = [0_u8; 4];
                self.bytes.read_exact_bytes(&mut pixel[..pixel_bytes])?;

                for out_px in buf[pos..pos + size].chunks_exact_mut(pixel_bytes) {
                    out_px.copy_from_slice(&pixel[..pixel_bytes]);
                }
            } else {
                self.bytes.read_exact_bytes(&mut buf[pos..pos + size])?;
            }
            pos += size;
        }

        Ok(())
    }
}

/// Reverse the pixel order of every row in place
fn mirror_rows(buf: &mut [u8], width: usize, pixel_bytes: usize) {
    for row in buf.chunks_exact_mut(width * pixel_bytes) {
        let mut left = 0;
        let mut right = width - 1;

        while left < right {
            for i in 0..pixel_bytes {
                row.swap(left * pixel_bytes + i, right * pixel_bytes + i);
            }
            left += 1;
            right -= 1;
        }
    }
}

/// Reverse the row order in place
fn flip_vertical(buf: &mut [u8], row_length: usize) {
    let mut scanline = vec![0; row_length];
    let mid = buf.len() / 2;
    let (img_top, img_bottom) = buf.split_at_mut(mid);

    for (top_row, bottom_row) in img_top
        .chunks_exact_mut(row_length)
        .zip(img_bottom.rchunks_exact_mut(row_length))
    {
        scanline.copy_from_slice(top_row);
        top_row.copy_from_slice(bottom_row);
        bottom_row.copy_from_slice(&scanline);
    }
}
