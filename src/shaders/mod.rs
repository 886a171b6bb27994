// SPDX-License-Identifier: GPL-3.0-only
//! YUV->RGB shader generation
//!
//! Pure code: colour math, lookup tables and fragment program text. Nothing
//! here talks to the driver; [`crate::pipelines`] feeds the results to GL.

mod builder;
mod lookup;
mod templates;
mod yuv_common;
mod yuv_convert;

pub use builder::{ProgramBuilder, fill};
pub use lookup::{SplineTexel, bspline_table, gamma_map, spline_weights, yuv_cube};
pub use yuv_common::{CoefficientMatrix, ColorAdjustment, combiner_coefficients};
pub use yuv_convert::{
    ConversionMethod, GeneratedProgram, Scaler, TextureTarget, TextureUnits, YuvConversion,
    assemble_program, supported_methods,
};
