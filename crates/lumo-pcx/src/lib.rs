/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A PCX reader.
//!
//! This crate decodes ZSoft PCX images, the 256 color single plane
//! variant with its trailing VGA palette and the 3 plane 24-bit variant,
//! both into interleaved 8-bit RGB pixels.
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub use crate::decoder::{probe_pcx, PcxDecoder};
pub use crate::errors::PcxDecodeErrors;

mod decoder;
mod errors;
