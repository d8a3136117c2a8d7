/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A Truevision TGA reader.
//!
//! Decodes uncompressed and RLE true-color images at 24 and 32 bits per
//! pixel. TGA stores its channels B,G,R\[,A\] and the decoder keeps that
//! order, callers wanting RGB go through a pixel format conversion.
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub use crate::decoder::TgaDecoder;
pub use crate::errors::TgaDecodeErrors;

mod decoder;
mod errors;
