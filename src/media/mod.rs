// SPDX-License-Identifier: GPL-3.0-only

//! Media format handling
//!
//! The [`formats`] module describes decoded frame layouts and how each one
//! is uploaded into GL textures.

pub mod formats;

pub use formats::{FormatDescriptor, PixelFormat, map_format};
