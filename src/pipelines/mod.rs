// SPDX-License-Identifier: GPL-3.0-only

//! Conversion pipeline
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────────┐
//! │ Capabilities │ ──▶ │  Conversion setup │ ──▶ │ Enable / disable │
//! │ (resolved)   │     │  - combiners      │     │   per frame      │
//! │              │     │  - lookup tables  │     │                  │
//! │              │     │  - program load   │     │                  │
//! └──────────────┘     └───────────────────┘     └──────────────────┘
//! ```
//!
//! - [`conversion`]: one-off setup of a [`YuvConversion`](crate::shaders::YuvConversion)
//! - [`activation`]: toggling the configured state around each draw

pub mod activation;
pub mod conversion;

pub use activation::{disable_yuv_conversion, enable_yuv_conversion};
pub use conversion::{ConversionState, YuvConverter, setup_yuv_conversion};
