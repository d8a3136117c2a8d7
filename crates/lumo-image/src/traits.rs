/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lumo_core::pixel_format::PixelFormat;

use crate::errors::ImageErrors;
use crate::image::Image;

/// The common interface every format decoder exposes to the dispatcher
pub trait DecoderTrait {
    /// Decode the whole source into an [`Image`]
    fn decode(&mut self) -> Result<Image, ImageErrors>;

    /// Image dimensions, `None` before headers have been seen
    fn dimensions(&self) -> Option<(usize, usize)>;

    /// The pixel format decoded pixels come out in, `None` before
    /// headers have been seen
    fn out_format(&self) -> Option<PixelFormat>;

    /// Decoder name, for logs and error messages
    fn name(&self) -> &'static str;
}
