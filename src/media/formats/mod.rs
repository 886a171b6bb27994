// SPDX-License-Identifier: GPL-3.0-only

//! Format utilities
//!
//! Frame pixel formats and their mapping onto GL texture formats.

pub mod gl_format;
pub mod pixel_format;

pub use gl_format::{FormatDescriptor, bytes_per_pixel, gl_value_name, map_format};
pub use pixel_format::PixelFormat;
