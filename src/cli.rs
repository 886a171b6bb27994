// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for inspecting conversion setups
//!
//! Everything runs against the recording driver, so no display or GPU is
//! needed:
//! - Printing generated fragment programs and GL call traces
//! - Tracing the sliced upload of one frame
//! - Listing feasible conversion methods for an extension string
//! - Dumping lookup tables and the pixel format table

use clap::Subcommand;
use glyuv::constants::*;
use glyuv::gpu::{GlCall, OfflineResolver, RecordingGl, upload_frame};
use glyuv::media::PixelFormat;
use glyuv::media::formats::{bytes_per_pixel, gl_value_name, map_format};
use glyuv::shaders::{bspline_table, gamma_map};
use glyuv::{
    ConversionMethod, ExtensionFunctions, RenderConfig, Scaler, YuvConverter, supported_methods,
};
use std::path::Path;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Extensions the offline driver advertises for `program`
const OFFLINE_EXTENSIONS: &str =
    "GL_NV_register_combiners GL_ATI_fragment_shader GL_ARB_fragment_program";

#[derive(Subcommand)]
pub enum LutTable {
    /// Gamma curve
    Gamma {
        gamma: f32,

        #[arg(long, default_value_t = LOOKUP_RES)]
        size: usize,
    },
    /// Bicubic spline weights
    Spline {
        #[arg(long, default_value_t = 16)]
        size: usize,
    },
}

pub fn parse_scaler(name: &str) -> Result<Scaler, String> {
    Scaler::from_name(name).ok_or_else(|| {
        let names: Vec<_> = Scaler::ALL.iter().map(|s| s.name()).collect();
        format!("unknown scaler '{}', expected one of {}", name, names.join(", "))
    })
}

pub fn parse_method(name: &str) -> Result<ConversionMethod, String> {
    ConversionMethod::from_name(name).ok_or_else(|| {
        let names: Vec<_> = ConversionMethod::ALL.iter().map(|m| m.name()).collect();
        format!("unknown method '{}', expected one of {}", name, names.join(", "))
    })
}

pub fn load_config(path: Option<&Path>) -> RenderConfig {
    path.map(RenderConfig::load_or_default).unwrap_or_default()
}

/// One line per call; pixel payloads are shown by size only
fn describe_call(call: &GlCall) -> String {
    match call {
        GlCall::TexImage1D {
            target,
            internal_format,
            width,
            pixels,
            ..
        } => format!(
            "TexImage1D target={:#x} internal={} width={} ({} bytes)",
            target,
            gl_value_name(*internal_format),
            width,
            pixels.len()
        ),
        GlCall::TexImage2D {
            target,
            internal_format,
            width,
            height,
            pixels,
            ..
        } => format!(
            "TexImage2D target={:#x} internal={} {}x{} ({} bytes)",
            target,
            gl_value_name(*internal_format),
            width,
            height,
            pixels.len()
        ),
        GlCall::TexSubImage2D {
            x,
            y,
            width,
            height,
            pixels,
            ..
        } => format!(
            "TexSubImage2D at {},{} {}x{} ({} bytes)",
            x,
            y,
            width,
            height,
            pixels.len()
        ),
        GlCall::TexImage3D {
            width,
            height,
            depth,
            pixels,
            ..
        } => format!(
            "TexImage3D {}x{}x{} ({} bytes)",
            width,
            height,
            depth,
            pixels.len()
        ),
        GlCall::ProgramString { source, .. } => {
            format!("ProgramString ({} bytes)", source.len())
        }
        other => format!("{:?}", other),
    }
}

/// Print the program (or call trace) for the configured conversion
pub fn print_program(config: &RenderConfig, texture_size: (u32, u32), trace: bool) -> CliResult {
    let extensions = match &config.extra_extensions {
        Some(extra) => format!("{} {}", OFFLINE_EXTENSIONS, extra),
        None => OFFLINE_EXTENSIONS.to_string(),
    };
    let gl = RecordingGl::with_extensions(&OfflineResolver::all(), &extensions);
    let target = if config.rectangle_textures {
        GL_TEXTURE_RECTANGLE
    } else {
        GL_TEXTURE_2D
    };

    let mut converter = YuvConverter::new();
    let state = converter.setup(
        &gl,
        target,
        &config.conversion,
        &config.adjustment,
        texture_size,
    )?;

    if trace || state.program.is_none() {
        for call in gl.calls() {
            println!("{}", describe_call(&call));
        }
        return Ok(());
    }
    if let Some(program) = &state.program {
        // one instruction per line
        for line in program.source.split_inclusive(';') {
            println!("{}", line.trim_start());
        }
        println!();
        println!(
            "Lookup units: luma {:?}, chroma {:?}, conversion {:?} ({} units in use)",
            program.units.luma_lookup,
            program.units.chroma_lookup,
            program.units.conversion_lookup,
            program.units.required()
        );
    }
    Ok(())
}

/// Print the calls uploading a blank `format` frame with the configured slices
pub fn print_upload(
    config: &RenderConfig,
    fourcc: &str,
    (width, height): (i32, i32),
    bottom_up: bool,
) -> CliResult {
    if width <= 0 || height <= 0 {
        return Err("width and height must be positive".into());
    }
    let format = PixelFormat::from_fourcc(fourcc);
    let desc = map_format(format);
    let bpp = bytes_per_pixel(desc.format, desc.ty).ok_or("format has no byte size")? as usize;
    let row = width as usize * bpp;
    let frame = vec![0u8; row * height as usize];
    let stride = if bottom_up { -(row as isize) } else { row as isize };

    let gl = RecordingGl::default();
    let target = if config.rectangle_textures {
        GL_TEXTURE_RECTANGLE
    } else {
        GL_TEXTURE_2D
    };
    upload_frame(&gl, target, format, &frame, stride, width, height, config.slice_height)?;
    for call in gl.calls() {
        println!("{}", describe_call(&call));
    }
    Ok(())
}

/// List methods whose entry points resolve for `extensions`
pub fn list_methods(extensions: &str, only: Vec<String>) -> CliResult {
    let resolver = if only.is_empty() {
        OfflineResolver::all()
    } else {
        OfflineResolver::only(only)
    };
    let functions = ExtensionFunctions::resolve(Some(&resolver), Some(extensions), None);

    let methods = supported_methods(&functions);
    if methods.is_empty() {
        println!("No YUV conversion method available.");
    } else {
        println!("Available methods (best first):");
        for method in &methods {
            println!("  {:<14} {}", method.name(), method);
        }
    }

    let unavailable: Vec<_> = ConversionMethod::PREFERENCE
        .iter()
        .filter(|m| !methods.contains(m))
        .collect();
    if !unavailable.is_empty() {
        println!();
        println!("Unavailable:");
        for method in unavailable {
            let missing: Vec<_> = functions
                .missing(method.required_functions())
                .iter()
                .map(|f| f.name())
                .collect();
            println!("  {:<14} missing {}", method.name(), missing.join(", "));
        }
    }
    Ok(())
}

pub fn print_lut(table: LutTable) -> CliResult {
    match table {
        LutTable::Gamma { gamma, size } => {
            if gamma <= 0.0 || size == 0 {
                return Err("gamma and size must be positive".into());
            }
            for (i, value) in gamma_map(size, gamma).iter().enumerate() {
                println!("{:5} {:3}", i, value);
            }
        }
        LutTable::Spline { size } => {
            for (i, texel) in bspline_table(size).iter().enumerate() {
                let [left, right, blend, _] = texel.0;
                println!("{:5} {:9.6} {:9.6} {:9.6}", i, left, right, blend);
            }
        }
    }
    Ok(())
}

pub fn print_formats() -> CliResult {
    println!(
        "{:<8} {:>4}  {:<12} {:<12} {:<28} supported",
        "format", "bpp", "internal", "format", "type"
    );
    for format in PixelFormat::ALL {
        let desc = map_format(format);
        println!(
            "{:<8} {:>4}  {:<12} {:<12} {:<28} {}",
            format.to_string(),
            desc.bpp,
            gl_value_name(desc.internal_format),
            gl_value_name(desc.format),
            gl_value_name(desc.ty),
            if desc.supported { "yes" } else { "no" }
        );
    }
    Ok(())
}

pub fn show_config(path: Option<&Path>, write_defaults: bool) -> CliResult {
    if write_defaults {
        let path = path.ok_or("no config directory on this system")?;
        RenderConfig::default().save(path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }
    let config = load_config(path);
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
