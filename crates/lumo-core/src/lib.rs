/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all lumo crates
//!
//! This crate provides a set of core routines shared
//! by the decoders under the `lumo` umbrella
//!
//! It currently contains
//!
//! - A bytestream reader with endian aware reads
//! - Pixel format information shared by images
//! - Image decoder options
//!
//! This library is `#[no_std]` with the `alloc` crate needed for defining `Vec`
//! which we need for storing decoded bytes.
//!
//! # Features
//!  - `std`: Enables readers backed by `std::io` (files, `BufReader`).
//!  - `log`: Forwards decoder logging to the [`log`](https://crates.io/crates/log) facade.
#![cfg_attr(not(feature = "std"), no_std)]
#![macro_use]
extern crate alloc;

pub mod bytestream;
pub mod log;
pub mod options;
pub mod pixel_format;
