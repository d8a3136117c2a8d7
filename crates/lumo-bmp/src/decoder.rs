/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

// BMP is a format that has been extended multiple times, the decoder
// understands the two header families that cover virtually every file in
// the wild:
//
// - The 12 byte OS/2 info header with 16-bit width/height fields and no
//   compression support.
// - The >= 40 byte Windows info header (v3 and the v4/v5 extensions, whose
//   extra fields we skip over) with optional RLE4/RLE8 compression and
//   optional channel bitfields for 16 and 32 bit rasters.
//
// Decoding happens in four phases, file header -> info header ->
// palette/bitfields -> raster, and any phase failing fails the whole
// decode. The raster phase dispatches on the (depth, compression) pair to
// one of eight row decoders.

use alloc::vec::Vec;
use alloc::{format, vec};

use lumo_core::bytestream::{LByteReaderTrait, LReader, LSeekFrom};
use lumo_core::log::trace;
use lumo_core::options::DecoderOptions;
use lumo_core::pixel_format::PixelFormat;

use crate::common::{BmpCompression, ChannelMask, PaletteEntry};
use crate::errors::BmpDecoderErrors;

/// Probe some bytes to see
/// if they consist of a BMP image
pub fn probe_bmp(bytes: &[u8]) -> bool {
    if let Some(magic_bytes) = bytes.get(0..2) {
        if magic_bytes == b"BM" {
            // skip file_size   -> 4
            // skip reserved    -> 4
            // skip data offset -> 4
            // read sz
            if let Some(sz) = bytes.get(14) {
                let sz = *sz;

                return sz == 12
                    || sz == 16 /*os-v2*/
                    || sz == 40
                    || sz == 52
                    || sz == 56
                    || sz == 64 /*os-v2*/
                    || sz == 108
                    || sz == 124;
            }
        }
    }
    false
}

#[inline(always)]
fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
}

#[inline(always)]
fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

/// Everything read out of the headers, fully populated before the raster
/// phase looks at it
struct BmpHeader {
    data_offset:  usize,
    width:        usize,
    height:       usize,
    depth:        u16,
    compression:  BmpCompression,
    /// Bytes per scanline including the 4 byte alignment padding,
    /// zero for RLE rasters
    pitch:        usize,
    image_size:   usize,
    palette:      Vec<PaletteEntry>,
    palette_size: usize,
    /// R, G, B channel masks for 16 and 32 bit rasters
    masks:        [ChannelMask; 3]
}

/// A BMP decoder.
///
/// Decodes Windows and OS/2 bitmaps into interleaved 8-bit RGB pixels,
/// palette and bitfield rasters included.
///
/// # Usage
/// ```no_run
/// use lumo_bmp::BmpDecoder;
/// use lumo_core::bytestream::LCursor;
///
/// fn main() -> Result<(), lumo_bmp::BmpDecoderErrors> {
///     let source = LCursor::new(b"BM");
///     let mut decoder = BmpDecoder::new(source);
///     let pixels = decoder.decode()?;
///     let (w, h) = decoder.dimensions().unwrap();
///     println!("{w}x{h}: {} bytes", pixels.len());
///     Ok(())
/// }
/// ```
pub struct BmpDecoder<T>
where
    T: LByteReaderTrait
{
    bytes:   LReader<T>,
    options: DecoderOptions,
    header:  Option<BmpHeader>
}

impl<T> BmpDecoder<T>
where
    T: LByteReaderTrait
{
    /// Create a new bmp decoder that reads data from `data`
    ///
    /// # Arguments
    /// - `data`: The source from which we will read bytes
    ///
    /// # Returns
    /// - A BMP decoder instance
    pub fn new(data: T) -> BmpDecoder<T> {
        BmpDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new decoder instance with specified options
    ///
    /// # Arguments
    ///
    /// * `data`: The source from which we will read data
    /// * `options`: Specialized options for this decoder
    pub fn new_with_options(data: T, options: DecoderOptions) -> BmpDecoder<T> {
        BmpDecoder {
            bytes: LReader::new(data),
            options,
            header: None
        }
    }

    /// Decode the file and info headers, the palette and the channel
    /// bitfields, leaving the stream positioned for the raster phase
    ///
    /// After calling this, dimension and format queries will return values
    ///
    /// # Returns
    /// - `Ok(())`: Everything was okay during header parsing
    /// - `Err`: The error that occurred when decoding headers
    pub fn decode_headers(&mut self) -> Result<(), BmpDecoderErrors> {
        if self.header.is_some() {
            return Ok(());
        }

        // phase 1: 14 byte file header
        let file_header = self.bytes.read_fixed_bytes_or_error::<14>()?;

        if file_header[0] != b'B' || file_header[1] != b'M' {
            return Err(BmpDecoderErrors::InvalidMagicBytes);
        }
        let data_offset = read_u32_le(&file_header, 10) as usize;

        // phase 2: info header. Read the only part we need and then seek to
        // wherever the header really ends, backwards in the OS/2 case since
        // its fixed region is shorter than what we just read
        const HEADER_READ_SIZE: usize = 24;

        let info = self.bytes.read_fixed_bytes_or_error::<HEADER_READ_SIZE>()?;
        let size = read_u32_le(&info, 0);

        let os2;
        let width;
        let height;
        let planes;
        let depth;
        let compression_code;
        let mut image_size;

        if size < 40 {
            // assume OS/2 bitmap
            if size < 12 {
                return Err(BmpDecoderErrors::GenericStatic(
                    "Info header size below the OS/2 minimum"
                ));
            }
            os2 = true;
            width = usize::from(read_u16_le(&info, 4));
            height = usize::from(read_u16_le(&info, 6));
            planes = read_u16_le(&info, 8);
            depth = read_u16_le(&info, 10);
            compression_code = 0;
            image_size = 0usize;
        } else {
            os2 = false;
            width = read_u32_le(&info, 4) as usize;
            height = read_u32_le(&info, 8) as usize;
            planes = read_u16_le(&info, 12);
            depth = read_u16_le(&info, 14);
            compression_code = read_u32_le(&info, 16);
            image_size = read_u32_le(&info, 20) as usize;
        }

        if planes != 1 {
            return Err(BmpDecoderErrors::GenericStatic("Invalid BMP header"));
        }
        if depth == 0 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Depth is zero, invalid image"
            ));
        }
        let compression = match BmpCompression::from_u32(compression_code) {
            Some(c) => c,
            None => {
                return Err(BmpDecoderErrors::GenericStatic(
                    "Unsupported BMP compression scheme"
                ));
            }
        };

        if width == 0 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Width is zero, invalid image"
            ));
        }
        if height == 0 {
            return Err(BmpDecoderErrors::GenericStatic(
                "Height is zero, invalid image"
            ));
        }
        if width > self.options.max_width() {
            return Err(BmpDecoderErrors::TooLargeDimensions(
                "width",
                self.options.max_width(),
                width
            ));
        }
        if height > self.options.max_height() {
            return Err(BmpDecoderErrors::TooLargeDimensions(
                "height",
                self.options.max_height(),
                height
            ));
        }

        trace!("Width: {}", width);
        trace!("Height: {}", height);
        trace!("Depth: {}", depth);
        trace!("Compression: {:?}", compression);

        // the declared raster size is untrusted for uncompressed and
        // bitfield images, recompute it from the geometry
        let mut pitch = 0usize;
        if compression == BmpCompression::RGB || compression == BmpCompression::BITFIELDS {
            let line = width
                .checked_mul(usize::from(depth))
                .map(|v| (v + 7) / 8)
                .ok_or(BmpDecoderErrors::OverFlowOccurred)?;
            // round up to a 4 byte boundary
            pitch = (line + 3) / 4 * 4;
            image_size = pitch
                .checked_mul(height)
                .ok_or(BmpDecoderErrors::OverFlowOccurred)?;
        }

        // land exactly at the palette/bitfield region
        self.bytes
            .seek(LSeekFrom::Current(i64::from(size) - HEADER_READ_SIZE as i64))?;

        // phase 3: palette or channel bitfields
        let mut palette = vec![PaletteEntry::default(); 256];
        let mut palette_size = 0usize;
        let mut masks = [ChannelMask::default(); 3];

        if depth <= 8 {
            palette_size = 1usize << depth;

            if os2 {
                // OS/2 palettes carry 3 bytes per entry
                for entry in palette.iter_mut().take(palette_size) {
                    let [b, g, r] = self.bytes.read_fixed_bytes_or_error::<3>()?;
                    *entry = PaletteEntry {
                        red:   r,
                        green: g,
                        blue:  b
                    };
                }
            } else {
                // Windows palettes carry 4, the last one is padding
                for entry in palette.iter_mut().take(palette_size) {
                    let [b, g, r, _] = self.bytes.read_fixed_bytes_or_error::<4>()?;
                    *entry = PaletteEntry {
                        red:   r,
                        green: g,
                        blue:  b
                    };
                }
            }
        } else if compression == BmpCompression::BITFIELDS {
            let bitfields = self.bytes.read_fixed_bytes_or_error::<12>()?;

            masks[0] = ChannelMask::from_mask(read_u32_le(&bitfields, 0));
            masks[1] = ChannelMask::from_mask(read_u32_le(&bitfields, 4));
            masks[2] = ChannelMask::from_mask(read_u32_le(&bitfields, 8));
        } else if depth == 16 {
            // format defined default, 5-5-5 at bit positions 10/5/0
            masks[0] = ChannelMask::from_mask(0x7C00);
            masks[1] = ChannelMask::from_mask(0x03E0);
            masks[2] = ChannelMask::from_mask(0x001F);
        } else if depth == 32 {
            // 8-8-8 at byte positions 2/1/0
            masks[0] = ChannelMask::from_mask(0x00FF_0000);
            masks[1] = ChannelMask::from_mask(0x0000_FF00);
            masks[2] = ChannelMask::from_mask(0x0000_00FF);
        }

        self.header = Some(BmpHeader {
            data_offset,
            width,
            height,
            depth,
            compression,
            pitch,
            image_size,
            palette,
            palette_size,
            masks
        });

        Ok(())
    }

    /// Return the expected size of the output buffer for which
    /// a contiguous slice of `&[u8]` can store it without needing
    /// reallocation
    ///
    /// Returns `None` if headers haven't been decoded or if the calculation
    /// overflows
    pub fn output_buf_size(&self) -> Option<usize> {
        let header = self.header.as_ref()?;
        header
            .width
            .checked_mul(header.height)?
            .checked_mul(PixelFormat::RGB.pixel_size())
    }

    /// Get dimensions of the image
    ///
    /// This is a tuple of (width, height)
    ///
    /// # Returns
    /// - `Some((width, height))`: The image dimensions
    /// - `None`: Indicates that the image headers weren't decoded
    ///    or an error occurred during decoding the headers
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header.as_ref().map(|h| (h.width, h.height))
    }

    /// Get the pixel format of the decoder output, or `None` if the headers
    /// weren't decoded
    ///
    /// All raster variants, palettes and bitfields included, are normalized
    /// to [RGB](PixelFormat::RGB)
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        self.header.as_ref().map(|_| PixelFormat::RGB)
    }

    /// Number of palette entries the image declared, zero for direct color
    /// rasters
    pub fn palette_size(&self) -> Option<usize> {
        self.header.as_ref().map(|h| h.palette_size)
    }

    /// Decode an image returning the decoded bytes as an
    /// allocated `Vec<u8>` or an error if decoding could not be completed
    ///
    /// Also see [`decode_into`](Self::decode_into) which decodes into
    /// a pre-allocated buffer
    pub fn decode(&mut self) -> Result<Vec<u8>, BmpDecoderErrors> {
        self.decode_headers()?;
        let mut output = vec![
            0_u8;
            self.output_buf_size()
                .ok_or(BmpDecoderErrors::OverFlowOccurred)?
        ];

        self.decode_into(&mut output)?;

        Ok(output)
    }

    /// Decode an encoded image into a buffer or return an error
    /// if something bad occurred
    ///
    /// Also see [`decode`](Self::decode) which allocates and decodes into
    /// the allocated buffer
    pub fn decode_into(&mut self, buf: &mut [u8]) -> Result<(), BmpDecoderErrors> {
        self.decode_headers()?;

        let header = match self.header.take() {
            Some(h) => h,
            None => return Err(BmpDecoderErrors::GenericStatic("Headers not decoded"))
        };
        let result = self.decode_into_inner(buf, &header);
        self.header = Some(header);

        result
    }

    fn decode_into_inner(
        &mut self, buf: &mut [u8], header: &BmpHeader
    ) -> Result<(), BmpDecoderErrors> {
        let output_size = header
            .width
            .checked_mul(header.height)
            .and_then(|v| v.checked_mul(3))
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;

        if buf.len() < output_size {
            return Err(BmpDecoderErrors::TooSmallBuffer(output_size, buf.len()));
        }
        let buf = &mut buf[0..output_size];

        // bound the raster read against the real stream size before
        // allocating anything, the declared size of an RLE raster is
        // attacker controlled
        let stream_size = self.bytes.seek(LSeekFrom::End(0))? as usize;
        let raster_end = header
            .data_offset
            .checked_add(header.image_size)
            .ok_or(BmpDecoderErrors::OverFlowOccurred)?;
        if raster_end > stream_size {
            return Err(BmpDecoderErrors::GenericStatic(
                "Raster data runs past the end of the stream"
            ));
        }

        self.bytes.set_position(header.data_offset)?;

        let mut raster = vec![0_u8; header.image_size];
        self.bytes.read_exact_bytes(&mut raster)?;

        match (header.depth, header.compression) {
            (1, BmpCompression::RGB) => read_bitmap1(&raster, buf, header),
            (4, BmpCompression::RGB) => read_bitmap4(&raster, buf, header),
            (4, BmpCompression::RLE4) => return decode_rle(&raster, buf, header, true),
            (8, BmpCompression::RGB) => read_bitmap8(&raster, buf, header),
            (8, BmpCompression::RLE8) => return decode_rle(&raster, buf, header, false),
            (16, BmpCompression::RGB | BmpCompression::BITFIELDS) => {
                read_bitmap16(&raster, buf, header)
            }
            (24, BmpCompression::RGB) => read_bitmap24(&raster, buf, header),
            (32, BmpCompression::RGB | BmpCompression::BITFIELDS) => {
                read_bitmap32(&raster, buf, header)
            }
            (depth, compression) => {
                return Err(BmpDecoderErrors::Generic(format!(
                    "Unsupported depth {depth} and compression {compression:?} combination"
                )));
            }
        }

        Ok(())
    }
}

// The uncompressed row decoders below all iterate the raster top of stream
// to bottom while writing rows back to front, BMP stores its rows bottom
// up.
//
//   ┌───────────────┐
//   │               │
//   │               │
//   │[first row in  │
//   │ the stream]   │
//   └───────────────┘
//
// Each stream row is `pitch` wide which includes the padding bytes that
// round a row up to a multiple of 4.

fn read_bitmap1(raster: &[u8], buf: &mut [u8], h: &BmpHeader) {
    for (in_row, out_row) in raster
        .chunks_exact(h.pitch)
        .zip(buf.rchunks_exact_mut(h.width * 3))
    {
        let mut mask = 0x80_u8;
        let mut pos = 0;

        for out_px in out_row.chunks_exact_mut(3) {
            let entry = h.palette[usize::from((in_row[pos] & mask) > 0)];

            out_px[0] = entry.red;
            out_px[1] = entry.green;
            out_px[2] = entry.blue;

            mask >>= 1;
            if mask == 0 {
                pos += 1;
                mask = 0x80;
            }
        }
    }
}

fn read_bitmap4(raster: &[u8], buf: &mut [u8], h: &BmpHeader) {
    for (in_row, out_row) in raster
        .chunks_exact(h.pitch)
        .zip(buf.rchunks_exact_mut(h.width * 3))
    {
        for (x, out_px) in out_row.chunks_exact_mut(3).enumerate() {
            let byte = in_row[x >> 1];
            let index = if x & 1 == 0 { byte >> 4 } else { byte & 0x0F };
            let entry = h.palette[usize::from(index)];

            out_px[0] = entry.red;
            out_px[1] = entry.green;
            out_px[2] = entry.blue;
        }
    }
}

fn read_bitmap8(raster: &[u8], buf: &mut [u8], h: &BmpHeader) {
    for (in_row, out_row) in raster
        .chunks_exact(h.pitch)
        .zip(buf.rchunks_exact_mut(h.width * 3))
    {
        for (index, out_px) in in_row.iter().zip(out_row.chunks_exact_mut(3)) {
            let entry = h.palette[usize::from(*index)];

            out_px[0] = entry.red;
            out_px[1] = entry.green;
            out_px[2] = entry.blue;
        }
    }
}

fn read_bitmap16(raster: &[u8], buf: &mut [u8], h: &BmpHeader) {
    let [rm, gm, bm] = h.masks;

    for (in_row, out_row) in raster
        .chunks_exact(h.pitch)
        .zip(buf.rchunks_exact_mut(h.width * 3))
    {
        for (in_px, out_px) in in_row.chunks_exact(2).zip(out_row.chunks_exact_mut(3)) {
            let v = u32::from(u16::from_le_bytes([in_px[0], in_px[1]]));

            out_px[0] = rm.expand(v);
            out_px[1] = gm.expand(v);
            out_px[2] = bm.expand(v);
        }
    }
}

fn read_bitmap24(raster: &[u8], buf: &mut [u8], h: &BmpHeader) {
    for (in_row, out_row) in raster
        .chunks_exact(h.pitch)
        .zip(buf.rchunks_exact_mut(h.width * 3))
    {
        // rows are stored B,G,R
        for (in_px, out_px) in in_row.chunks_exact(3).zip(out_row.chunks_exact_mut(3)) {
            out_px[0] = in_px[2];
            out_px[1] = in_px[1];
            out_px[2] = in_px[0];
        }
    }
}

fn read_bitmap32(raster: &[u8], buf: &mut [u8], h: &BmpHeader) {
    let [rm, gm, bm] = h.masks;

    for (in_row, out_row) in raster
        .chunks_exact(h.pitch)
        .zip(buf.rchunks_exact_mut(h.width * 3))
    {
        for (in_px, out_px) in in_row.chunks_exact(4).zip(out_row.chunks_exact_mut(3)) {
            let v = u32::from_le_bytes(in_px.try_into().unwrap());

            // 32 bit channels are already byte sized, no widening
            out_px[0] = rm.extract(v);
            out_px[1] = gm.extract(v);
            out_px[2] = bm.extract(v);
        }
    }
}

#[inline(always)]
fn put_pixel(buf: &mut [u8], palette: &[PaletteEntry], width: usize, x: usize, y: usize, index: u8) {
    let entry = palette[usize::from(index)];
    let offset = (y * width + x) * 3;

    buf[offset] = entry.red;
    buf[offset + 1] = entry.green;
    buf[offset + 2] = entry.blue;
}

/// Advance the RLE cursor one pixel, wrapping into the next row at the
/// right edge
#[inline(always)]
fn advance(x: &mut usize, y: &mut usize, width: usize) {
    *x += 1;
    if *x >= width {
        *x = 0;
        *y += 1;
    }
}

/// Decode an RLE4 or RLE8 opcode stream.
///
/// The stream is decoded bottom up through a running `(x, y)` cursor where
/// `y == 0` is the bottom row, and the whole buffer is flipped vertically
/// once the stream ends. Escape codes: 0 = end of line, 1 = end of bitmap,
/// 2 = cursor delta, n >= 3 = run of n raw pixel values padded to an even
/// count of stream bytes.
fn decode_rle(
    raster: &[u8], buf: &mut [u8], h: &BmpHeader, is_rle4: bool
) -> Result<(), BmpDecoderErrors> {
    // pixels no opcode touches stay black
    buf.fill(0);

    let width = h.width;
    let height = h.height;

    let mut x = 0_usize;
    let mut y = 0_usize;
    let mut pos = 0_usize;

    'stream: while pos + 1 < raster.len() {
        let n = raster[pos];
        let c = raster[pos + 1];
        pos += 2;

        if n > 0 {
            // literal run, RLE4 alternates the two nibbles of the value
            // through the palette, RLE8 repeats it directly
            let count = usize::from(n);
            let entries = if is_rle4 { [c >> 4, c & 0x0F] } else { [c, c] };

            for i in 0..count {
                if y >= height {
                    // cursor left the image, nothing further can be drawn
                    break 'stream;
                }
                put_pixel(buf, &h.palette, width, x, y, entries[i & 1]);
                advance(&mut x, &mut y, width);
            }
            continue;
        }

        match c {
            0 => {
                // end of line, y is deliberately kept, the wrap in
                // `advance` already moved it
                x = 0;
                if y >= height {
                    break 'stream;
                }
            }
            1 => {
                // end of bitmap
                break 'stream;
            }
            2 => {
                // delta, the next two stream bytes move the cursor
                if pos + 1 >= raster.len() {
                    break 'stream;
                }
                let dx = usize::from(raster[pos]);
                let dy = usize::from(raster[pos + 1]);
                pos += 2;

                // a column advance past the right edge wraps into extra rows
                let carry = (x + dx) / width;
                x = (x + dx) % width;
                y += dy + carry;

                if y >= height {
                    return Err(BmpDecoderErrors::GenericStatic(
                        "RLE delta moved the cursor past the last row"
                    ));
                }
            }
            c => {
                // absolute run of c raw pixel values. The stream pads the
                // run to an even byte count and the input cursor advances
                // by the padded count no matter how many pixels get drawn
                let count = usize::from(c);
                let padded = if is_rle4 {
                    (count + 3) / 4 * 2
                } else {
                    (count + 1) / 2 * 2
                };
                if pos + padded > raster.len() {
                    break 'stream;
                }

                if is_rle4 {
                    let mut drawn = 0;

                    'pairs: for byte in &raster[pos..pos + padded] {
                        for nibble in [byte >> 4, byte & 0x0F] {
                            if drawn >= count {
                                break 'pairs;
                            }
                            if y >= height {
                                break 'stream;
                            }
                            put_pixel(buf, &h.palette, width, x, y, nibble);
                            drawn += 1;
                            advance(&mut x, &mut y, width);
                        }
                    }
                } else {
                    for index in &raster[pos..pos + count] {
                        if y >= height {
                            break 'stream;
                        }
                        put_pixel(buf, &h.palette, width, x, y, *index);
                        advance(&mut x, &mut y, width);
                    }
                }
                pos += padded;
            }
        }
    }

    // the cursor treated row 0 as the bottom row, flip into top-down order
    let length = width * 3;
    let mut scanline = vec![0; length];
    let mid = buf.len() / 2;
    let (img_top, img_bottom) = buf.split_at_mut(mid);

    for (top_row, bottom_row) in img_top
        .chunks_exact_mut(length)
        .zip(img_bottom.rchunks_exact_mut(length))
    {
        scanline.copy_from_slice(top_row);
        top_row.copy_from_slice(bottom_row);
        bottom_row.copy_from_slice(&scanline);
    }

    Ok(())
}
