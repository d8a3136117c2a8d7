/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! The umbrella image crate.
//!
//! This ties the per-format decoders together behind one [`Image`]
//! container, with auto-detection over a rewindable byte source and
//! pixel format conversion between the canonical in-memory layouts.
//!
//! Format decoders can be switched on and off via cargo features, it is
//! recommended to only enable the ones you use.
//!
//! ```no_run
//! use lumo_core::bytestream::LCursor;
//! use lumo_core::options::DecoderOptions;
//! use lumo_core::pixel_format::PixelFormat;
//! use lumo_image::image::Image;
//!
//! # fn main() -> Result<(), lumo_image::errors::ImageErrors> {
//! let image = Image::read(LCursor::new(b"BM"), DecoderOptions::default())?;
//! let rgba = image.convert(PixelFormat::RGBA)?;
//! # Ok(())
//! # }
//! ```
//!
//! [`Image`]: crate::image::Image

pub mod codecs;
pub mod conversions;
pub mod errors;
pub mod image;
pub mod traits;
