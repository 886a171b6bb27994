// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use glyuv::{ConversionMethod, Scaler};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "glyuv")]
#[command(about = "Inspect GL YUV conversion programs and lookup tables")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/glyuv/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fragment program or GL calls for a conversion
    Program {
        /// Luma scaler (bilinear, bicubic)
        #[arg(long, value_parser = cli::parse_scaler)]
        luma: Option<Scaler>,

        /// Chroma scaler (bilinear, bicubic)
        #[arg(long, value_parser = cli::parse_scaler)]
        chroma: Option<Scaler>,

        /// Conversion method (combiners, combiners-ati, fragment, pow, lookup, lookup3d)
        #[arg(short, long, value_parser = cli::parse_method)]
        method: Option<ConversionMethod>,

        /// Luma texture width
        #[arg(long, default_value = "512")]
        width: u32,

        /// Luma texture height
        #[arg(long, default_value = "512")]
        height: u32,

        /// Use rectangle textures
        #[arg(long)]
        rect: bool,

        #[arg(long, allow_hyphen_values = true)]
        brightness: Option<f32>,

        #[arg(long)]
        contrast: Option<f32>,

        /// Hue rotation in radians
        #[arg(long, allow_hyphen_values = true)]
        hue: Option<f32>,

        #[arg(long)]
        saturation: Option<f32>,

        /// Gamma applied to all channels
        #[arg(long)]
        gamma: Option<f32>,

        /// Print every GL call instead of the program text
        #[arg(long)]
        trace: bool,
    },

    /// Print the GL calls for uploading one frame
    Upload {
        /// Pixel format fourcc
        #[arg(short, long, default_value = "YV12")]
        format: String,

        #[arg(long, default_value = "64")]
        width: i32,

        #[arg(long, default_value = "64")]
        height: i32,

        /// Rows per upload (default: from the config, 0 for whole frames)
        #[arg(long)]
        slice_height: Option<i32>,

        /// Rows are stored bottom-to-top
        #[arg(long)]
        bottom_up: bool,
    },

    /// List conversion methods a driver could use
    Methods {
        /// Extension string the driver reports
        #[arg(
            short,
            long,
            default_value = "GL_NV_register_combiners GL_ATI_fragment_shader GL_ARB_fragment_program"
        )]
        extensions: String,

        /// Only these entry-point name fragments resolve (default: all)
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,
    },

    /// Print a lookup table
    Lut {
        #[command(subcommand)]
        table: cli::LutTable,
    },

    /// Print the pixel format table
    Formats,

    /// Print the effective configuration, or write the defaults
    Config {
        /// Write default settings to the config file
        #[arg(long)]
        write_defaults: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=glyuv=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.or_else(glyuv::RenderConfig::default_path);

    match cli.command {
        Commands::Program {
            luma,
            chroma,
            method,
            width,
            height,
            rect,
            brightness,
            contrast,
            hue,
            saturation,
            gamma,
            trace,
        } => {
            let mut config = cli::load_config(config_path.as_deref());
            let conversion = &mut config.conversion;
            if let Some(luma) = luma {
                conversion.luma_scaler = luma;
            }
            if let Some(chroma) = chroma {
                conversion.chroma_scaler = chroma;
            }
            if let Some(method) = method {
                conversion.method = method;
            }
            let adj = &mut config.adjustment;
            adj.brightness = brightness.unwrap_or(adj.brightness);
            adj.contrast = contrast.unwrap_or(adj.contrast);
            adj.hue = hue.unwrap_or(adj.hue);
            adj.saturation = saturation.unwrap_or(adj.saturation);
            if let Some(gamma) = gamma {
                adj.gamma_r = gamma;
                adj.gamma_g = gamma;
                adj.gamma_b = gamma;
            }
            config.rectangle_textures |= rect;
            cli::print_program(&config, (width, height), trace)
        }
        Commands::Upload {
            format,
            width,
            height,
            slice_height,
            bottom_up,
        } => {
            let mut config = cli::load_config(config_path.as_deref());
            if let Some(slice_height) = slice_height {
                config.slice_height = slice_height;
            }
            cli::print_upload(&config, &format, (width, height), bottom_up)
        }
        Commands::Methods { extensions, only } => cli::list_methods(&extensions, only),
        Commands::Lut { table } => cli::print_lut(table),
        Commands::Formats => cli::print_formats(),
        Commands::Config { write_defaults } => {
            cli::show_config(config_path.as_deref(), write_defaults)
        }
    }
}
