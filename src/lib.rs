// SPDX-License-Identifier: GPL-3.0-only

//! glyuv - GL capability negotiation and YUV->RGB program generation
//!
//! Draws planar YUV frames through whatever an immediate-mode GL context
//! offers: NVIDIA register combiners, ATI fragment shaders or ARB fragment
//! programs with optional lookup textures for gamma and bicubic scaling.
//!
//! # Architecture
//!
//! - [`gpu`]: the [`Gl`](gpu::Gl) dispatch trait, capability resolution,
//!   texture helpers and context lifecycle
//! - [`shaders`]: colour math, lookup tables and program text generation
//! - [`pipelines`]: conversion setup and per-frame activation
//! - [`media`]: frame pixel formats and their GL texture formats
//! - [`config`]: persisted render settings
//!
//! # Example
//!
//! ```ignore
//! let functions = context.resolve_functions(gl.get_string(GL_EXTENSIONS).as_deref());
//! let method = supported_methods(&functions)[0];
//! let mut converter = YuvConverter::new();
//! converter.setup(&gl, GL_TEXTURE_2D, &YuvConversion::uniform(Scaler::Bilinear, method),
//!     &ColorAdjustment::NEUTRAL, (1024, 512))?;
//! converter.enable(&gl);
//! ```

pub mod config;
pub mod constants;
pub mod errors;
pub mod gpu;
pub mod media;
pub mod pipelines;
pub mod shaders;

// Re-export commonly used types
pub use config::RenderConfig;
pub use errors::{GlError, GlResult};
pub use gpu::{ExtFunc, ExtensionFunctions, Gl};
pub use media::PixelFormat;
pub use pipelines::{ConversionState, YuvConverter, setup_yuv_conversion};
pub use shaders::{ColorAdjustment, ConversionMethod, Scaler, YuvConversion, supported_methods};
