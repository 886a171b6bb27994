// SPDX-License-Identifier: GPL-3.0-only
//! YUV->RGB conversion strategies and fragment program assembly
//!
//! A [`YuvConversion`] picks one scaler for luma, one for chroma and a
//! conversion method. The program paths are assembled here as pure text;
//! the GL side (lookup uploads, submission) lives in
//! [`crate::pipelines::conversion`].
//!
//! Texture units 0, 1 and 2 always hold Y, U and V. Lookup textures are
//! assigned consecutive units from 3 on: the luma scaler first, the chroma
//! scaler if it differs, then the conversion method.

use super::builder::ProgramBuilder;
use super::templates;
use super::yuv_common::{CoefficientMatrix, ColorAdjustment};
use crate::constants::{FIRST_LOOKUP_UNIT, GL_TEXTURE_2D, GL_TEXTURE_RECTANGLE, GLenum};
use crate::errors::{GlError, GlResult};
use crate::gpu::{ExtFunc, ExtensionFunctions};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

/// Texture filter used when sampling a plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scaler {
    /// Hardware bilinear filtering
    #[default]
    Bilinear,
    /// Cubic B-spline through a spline-weight lookup texture
    Bicubic,
}

impl Scaler {
    pub const ALL: [Scaler; 2] = [Scaler::Bilinear, Scaler::Bicubic];

    pub fn name(&self) -> &'static str {
        match self {
            Scaler::Bilinear => "bilinear",
            Scaler::Bicubic => "bicubic",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    /// Whether this scaler samples a lookup texture
    pub fn needs_lookup_texture(&self) -> bool {
        *self == Scaler::Bicubic
    }

    fn to_packed(self) -> u32 {
        match self {
            Scaler::Bilinear => 0,
            Scaler::Bicubic => 1,
        }
    }

    fn from_packed(value: u32) -> GlResult<Self> {
        match value {
            0 => Ok(Scaler::Bilinear),
            1 => Ok(Scaler::Bicubic),
            _ => {
                error!(value, "Unknown scaler type");
                Err(GlError::InvalidParameter(format!(
                    "unknown scaler type {}",
                    value
                )))
            }
        }
    }
}

/// How YUV is turned into RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConversionMethod {
    /// No conversion; frames are RGB
    None,
    /// NV_register_combiners
    Combiners,
    /// Matrix plus gamma through a 1D lookup texture
    FragmentLookup,
    /// Matrix plus gamma through POW
    FragmentPow,
    /// Matrix only
    #[default]
    Fragment,
    /// ATI_fragment_shader
    CombinersAti,
    /// Everything through a 3D lookup texture
    FragmentLookup3d,
}

impl ConversionMethod {
    /// Packed order
    pub const ALL: [ConversionMethod; 7] = [
        ConversionMethod::None,
        ConversionMethod::Combiners,
        ConversionMethod::FragmentLookup,
        ConversionMethod::FragmentPow,
        ConversionMethod::Fragment,
        ConversionMethod::CombinersAti,
        ConversionMethod::FragmentLookup3d,
    ];

    /// Best first
    pub const PREFERENCE: [ConversionMethod; 6] = [
        ConversionMethod::FragmentLookup3d,
        ConversionMethod::FragmentLookup,
        ConversionMethod::FragmentPow,
        ConversionMethod::Fragment,
        ConversionMethod::CombinersAti,
        ConversionMethod::Combiners,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConversionMethod::None => "none",
            ConversionMethod::Combiners => "combiners",
            ConversionMethod::FragmentLookup => "lookup",
            ConversionMethod::FragmentPow => "pow",
            ConversionMethod::Fragment => "fragment",
            ConversionMethod::CombinersAti => "combiners-ati",
            ConversionMethod::FragmentLookup3d => "lookup3d",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConversionMethod::None => "No conversion",
            ConversionMethod::Combiners => "NVIDIA register combiners",
            ConversionMethod::FragmentLookup => "Fragment program, gamma lookup texture",
            ConversionMethod::FragmentPow => "Fragment program, POW gamma",
            ConversionMethod::Fragment => "Fragment program",
            ConversionMethod::CombinersAti => "ATI fragment shader",
            ConversionMethod::FragmentLookup3d => "Fragment program, 3D lookup texture",
        }
    }

    pub fn to_packed(self) -> u32 {
        match self {
            ConversionMethod::None => 0,
            ConversionMethod::Combiners => 1,
            ConversionMethod::FragmentLookup => 2,
            ConversionMethod::FragmentPow => 3,
            ConversionMethod::Fragment => 4,
            ConversionMethod::CombinersAti => 5,
            ConversionMethod::FragmentLookup3d => 6,
        }
    }

    pub fn from_packed(value: u32) -> GlResult<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.to_packed() == value)
            .ok_or_else(|| {
                error!(value, "Unknown conversion type");
                GlError::InvalidParameter(format!("unknown conversion type {}", value))
            })
    }

    pub fn is_combiner(&self) -> bool {
        matches!(
            self,
            ConversionMethod::Combiners | ConversionMethod::CombinersAti
        )
    }

    /// Whether this method runs an ARB fragment program
    pub fn is_program(&self) -> bool {
        matches!(
            self,
            ConversionMethod::Fragment
                | ConversionMethod::FragmentPow
                | ConversionMethod::FragmentLookup
                | ConversionMethod::FragmentLookup3d
        )
    }

    /// Whether this method needs a texture unit of its own
    pub fn needs_lookup_texture(&self) -> bool {
        matches!(
            self,
            ConversionMethod::FragmentLookup | ConversionMethod::FragmentLookup3d
        )
    }

    /// Entry points that must resolve before this method is set up
    pub fn required_functions(&self) -> &'static [ExtFunc] {
        match self {
            ConversionMethod::None => &[],
            ConversionMethod::Combiners => &[
                ExtFunc::CombinerInput,
                ExtFunc::CombinerOutput,
                ExtFunc::CombinerParameterfv,
                ExtFunc::CombinerParameteri,
                ExtFunc::ActiveTexture,
            ],
            ConversionMethod::CombinersAti => &[
                ExtFunc::BeginFragmentShader,
                ExtFunc::EndFragmentShader,
                ExtFunc::SetFragmentShaderConstant,
                ExtFunc::SampleMap,
                ExtFunc::ColorFragmentOp2,
                ExtFunc::ColorFragmentOp3,
                ExtFunc::ActiveTexture,
            ],
            ConversionMethod::Fragment | ConversionMethod::FragmentPow => {
                &[ExtFunc::ProgramString]
            }
            ConversionMethod::FragmentLookup => &[ExtFunc::ProgramString, ExtFunc::ActiveTexture],
            ConversionMethod::FragmentLookup3d => &[
                ExtFunc::ProgramString,
                ExtFunc::ActiveTexture,
                ExtFunc::TexImage3D,
            ],
        }
    }
}

impl fmt::Display for ConversionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Methods whose entry points all resolved, best first
pub fn supported_methods(functions: &ExtensionFunctions) -> Vec<ConversionMethod> {
    ConversionMethod::PREFERENCE
        .into_iter()
        .filter(|m| functions.missing(m.required_functions()).is_empty())
        .collect()
}

/// Scalers plus conversion method of one rendering session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct YuvConversion {
    pub luma_scaler: Scaler,
    pub chroma_scaler: Scaler,
    pub method: ConversionMethod,
}

impl YuvConversion {
    const FIELD_MASK: u32 = 0xf;

    pub fn new(luma_scaler: Scaler, chroma_scaler: Scaler, method: ConversionMethod) -> Self {
        Self {
            luma_scaler,
            chroma_scaler,
            method,
        }
    }

    /// Same scaler for every plane
    pub fn uniform(scaler: Scaler, method: ConversionMethod) -> Self {
        Self::new(scaler, scaler, method)
    }

    pub fn is_none(&self) -> bool {
        self.method == ConversionMethod::None
    }

    /// Method in bits 0-3, luma scaler in bits 4-7, chroma scaler in 8-11
    pub fn to_packed(&self) -> u32 {
        self.method.to_packed()
            | (self.luma_scaler.to_packed() << 4)
            | (self.chroma_scaler.to_packed() << 8)
    }

    pub fn from_packed(value: u32) -> GlResult<Self> {
        if value >> 12 != 0 {
            error!(value, "Unknown bits in conversion type");
            return Err(GlError::InvalidParameter(format!(
                "unknown bits in conversion type {:#x}",
                value
            )));
        }
        Ok(Self {
            method: ConversionMethod::from_packed(value & Self::FIELD_MASK)?,
            luma_scaler: Scaler::from_packed((value >> 4) & Self::FIELD_MASK)?,
            chroma_scaler: Scaler::from_packed((value >> 8) & Self::FIELD_MASK)?,
        })
    }

    /// Entry points needed by the method and by the lookup units
    pub fn required_functions(&self) -> Vec<ExtFunc> {
        let mut required = self.method.required_functions().to_vec();
        let scaler_lookup = self.method.is_program()
            && (self.luma_scaler.needs_lookup_texture() || self.chroma_scaler.needs_lookup_texture());
        if scaler_lookup && !required.contains(&ExtFunc::ActiveTexture) {
            required.push(ExtFunc::ActiveTexture);
        }
        required
    }
}

/// Texture target of the Y, U and V planes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureTarget {
    /// Normalised coordinates
    #[default]
    Texture2D,
    /// Texel coordinates (ARB/NV/EXT_texture_rectangle)
    Rectangle,
}

impl TextureTarget {
    pub fn gl_enum(&self) -> GLenum {
        match self {
            TextureTarget::Texture2D => GL_TEXTURE_2D,
            TextureTarget::Rectangle => GL_TEXTURE_RECTANGLE,
        }
    }

    pub fn from_gl(target: GLenum) -> Self {
        if target == GL_TEXTURE_RECTANGLE {
            TextureTarget::Rectangle
        } else {
            TextureTarget::Texture2D
        }
    }

    /// Target keyword of the TEX instruction
    pub fn keyword(&self) -> &'static str {
        match self {
            TextureTarget::Texture2D => "2D",
            TextureTarget::Rectangle => "RECT",
        }
    }
}

/// Lookup texture units claimed by one conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureUnits {
    pub luma_lookup: Option<u32>,
    pub chroma_lookup: Option<u32>,
    pub conversion_lookup: Option<u32>,
    /// One past the highest unit in use
    pub end: u32,
}

impl TextureUnits {
    pub fn plan(conversion: &YuvConversion) -> Self {
        let mut next = FIRST_LOOKUP_UNIT;
        let mut claim = |needed: bool| {
            needed.then(|| {
                let unit = next;
                next += 1;
                unit
            })
        };
        let luma_lookup = claim(conversion.luma_scaler.needs_lookup_texture());
        let chroma_lookup = if conversion.chroma_scaler == conversion.luma_scaler {
            luma_lookup
        } else {
            claim(conversion.chroma_scaler.needs_lookup_texture())
        };
        let conversion_lookup = claim(conversion.method.needs_lookup_texture());
        Self {
            luma_lookup,
            chroma_lookup,
            conversion_lookup,
            end: next,
        }
    }

    /// Units the driver has to provide, Y/U/V included
    pub fn required(&self) -> u32 {
        self.end
    }
}

/// Program text and the lookup units it samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProgram {
    pub source: String,
    pub units: TextureUnits,
}

fn triple(values: [f32; 3]) -> String {
    format!("{:.4}, {:.4}, {:.4}", values[0], values[1], values[2])
}

/// Append the sampling code for one plane
#[allow(clippy::too_many_arguments)]
fn add_scaler(
    builder: &mut ProgramBuilder,
    scaler: Scaler,
    lookup: Option<u32>,
    target: TextureTarget,
    in_unit: u32,
    out: &str,
    width: u32,
    height: u32,
) -> GlResult<()> {
    let input = in_unit.to_string();
    let kind = target.keyword();
    match scaler {
        Scaler::Bilinear => builder.push_template(templates::BILINEAR, &[
            ("IN", input.as_str()),
            ("OUT", out),
            ("KIND", kind),
        ]),
        Scaler::Bicubic => {
            let lut = lookup
                .ok_or_else(|| GlError::InvalidParameter("bicubic scaler without lookup unit".into()))?
                .to_string();
            match target {
                TextureTarget::Rectangle => builder.push_template(templates::BICUBIC_RECT, &[
                    ("IN", input.as_str()),
                    ("OUT", out),
                    ("KIND", kind),
                    ("LUT", lut.as_str()),
                ]),
                TextureTarget::Texture2D => {
                    if width == 0 || height == 0 {
                        return Err(GlError::InvalidParameter(format!(
                            "bicubic scaling of a {}x{} texture",
                            width, height
                        )));
                    }
                    let (w, h) = (width as f32, height as f32);
                    let [sw, sh, dx, dy] = [w, h, 1.0 / w, 1.0 / h].map(|v| format!("{:.6}", v));
                    builder.push_template(templates::BICUBIC_2D, &[
                        ("IN", input.as_str()),
                        ("OUT", out),
                        ("KIND", kind),
                        ("LUT", lut.as_str()),
                        ("SW", sw.as_str()),
                        ("SH", sh.as_str()),
                        ("DX", dx.as_str()),
                        ("DY", dy.as_str()),
                    ])
                }
            }
        }
    }
}

/// Assemble the fragment program for a program-based conversion
///
/// `texture_size` is the luma texture size; chroma planes are half of it.
pub fn assemble_program(
    target: TextureTarget,
    conversion: &YuvConversion,
    adjustment: &ColorAdjustment,
    texture_size: (u32, u32),
) -> GlResult<GeneratedProgram> {
    if !conversion.method.is_program() {
        return Err(GlError::InvalidParameter(format!(
            "{} is not a fragment program method",
            conversion.method.name()
        )));
    }
    let units = TextureUnits::plan(conversion);
    let (texw, texh) = texture_size;

    let mut builder = ProgramBuilder::default();
    builder.push(templates::PREAMBLE)?;
    let luma = conversion.luma_scaler;
    let chroma = conversion.chroma_scaler;
    add_scaler(&mut builder, luma, units.luma_lookup, target, 0, "r", texw, texh)?;
    // chroma planes are half size, but never below one texel
    let half = |v: u32| if v == 0 { 0 } else { (v / 2).max(1) };
    let (chw, chh) = (half(texw), half(texh));
    add_scaler(&mut builder, chroma, units.chroma_lookup, target, 1, "g", chw, chh)?;
    add_scaler(&mut builder, chroma, units.chroma_lookup, target, 2, "b", chw, chh)?;

    let m = CoefficientMatrix::from_adjustment(adjustment);
    let (y, u, v, c) = (
        triple(m.y),
        triple(m.u),
        triple(m.v),
        triple(m.offset),
    );
    let coefficients = [("Y", y.as_str()), ("U", u.as_str()), ("V", v.as_str()), ("C", c.as_str())];
    let lut = units.conversion_lookup.map(|u| u.to_string()).unwrap_or_default();

    match conversion.method {
        ConversionMethod::Fragment => {
            builder.push_template(templates::CONVERT_DIRECT, &coefficients)?;
        }
        ConversionMethod::FragmentPow => {
            let gamma = triple(adjustment.gammas().map(|g| 1.0 / g));
            let mut params = coefficients.to_vec();
            params.push(("G", gamma.as_str()));
            builder.push_template(templates::CONVERT_POW, &params)?;
        }
        ConversionMethod::FragmentLookup => {
            let mut params = coefficients.to_vec();
            params.push(("LUT", lut.as_str()));
            builder.push_template(templates::CONVERT_LOOKUP, &params)?;
        }
        ConversionMethod::FragmentLookup3d => {
            builder.push_template(templates::CONVERT_LOOKUP3D, &[("LUT", lut.as_str())])?;
        }
        ConversionMethod::None | ConversionMethod::Combiners | ConversionMethod::CombinersAti => {}
    }

    Ok(GeneratedProgram {
        source: builder.finish(),
        units,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::{OfflineResolver, ProcAddress};
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_packed_layout() {
        let conv = YuvConversion::new(
            Scaler::Bicubic,
            Scaler::Bilinear,
            ConversionMethod::FragmentPow,
        );
        assert_eq!(conv.to_packed(), 0x013);
        assert_eq!(YuvConversion::from_packed(0x013).unwrap(), conv);
        assert!(YuvConversion::from_packed(0x007).is_err());
        assert!(YuvConversion::from_packed(0x204).is_err());
        assert!(YuvConversion::from_packed(0x1004).is_err());
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unknown_packed_values_are_logged() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            assert!(YuvConversion::from_packed(0x007).is_err());
            assert!(YuvConversion::from_packed(0x204).is_err());
            assert!(YuvConversion::from_packed(0x1004).is_err());
        });
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("ERROR"));
        assert!(output.contains("Unknown conversion type"));
        assert!(output.contains("Unknown scaler type"));
        assert!(output.contains("Unknown bits in conversion type"));
    }

    #[test]
    fn test_unit_plan() {
        let plan = TextureUnits::plan(&YuvConversion::uniform(
            Scaler::Bicubic,
            ConversionMethod::FragmentLookup,
        ));
        assert_eq!(plan.luma_lookup, Some(3));
        assert_eq!(plan.chroma_lookup, Some(3));
        assert_eq!(plan.conversion_lookup, Some(4));
        assert_eq!(plan.required(), 5);

        let plan = TextureUnits::plan(&YuvConversion::new(
            Scaler::Bilinear,
            Scaler::Bicubic,
            ConversionMethod::FragmentLookup3d,
        ));
        assert_eq!(plan.luma_lookup, None);
        assert_eq!(plan.chroma_lookup, Some(3));
        assert_eq!(plan.conversion_lookup, Some(4));

        let plan = TextureUnits::plan(&YuvConversion::default());
        assert_eq!(plan.required(), 3);
    }

    #[test]
    fn test_bilinear_direct_program() {
        let program = assemble_program(
            TextureTarget::Texture2D,
            &YuvConversion::default(),
            &ColorAdjustment::NEUTRAL,
            (640, 480),
        )
        .unwrap();
        let src = &program.source;
        assert!(src.starts_with("!!ARBfp1.0\nOPTION ARB_precision_hint_fastest;"));
        assert!(src.contains("TEX yuv.r, fragment.texcoord[0], texture[0], 2D;"));
        assert!(src.contains("TEX yuv.g, fragment.texcoord[1], texture[1], 2D;"));
        assert!(src.contains("TEX yuv.b, fragment.texcoord[2], texture[2], 2D;"));
        assert!(src.contains("PARAM ycoef = {1.1640, 1.1640, 1.1640};"));
        assert!(src.contains("PARAM vcoef = {1.5960, -0.8130, 0.0000};"));
        assert!(src.ends_with("MAD result.color.rgb, yuv.bbbb, vcoef, res;END"));
    }

    #[test]
    fn test_bicubic_2d_uses_normalised_deltas() {
        let program = assemble_program(
            TextureTarget::Texture2D,
            &YuvConversion::uniform(Scaler::Bicubic, ConversionMethod::Fragment),
            &ColorAdjustment::NEUTRAL,
            (512, 256),
        )
        .unwrap();
        let src = &program.source;
        assert!(src.contains(
            "MAD coord.xy, fragment.texcoord[0], {512.000000, 256.000000}, {0.5, 0.5};"
        ));
        assert!(src.contains("MUL cdelta.xz, parmx.rrgg, {-0.001953, 0, 0.001953, 0};"));
        assert!(src.contains("MAD coord.xy, fragment.texcoord[2], {256.000000, 128.000000}, {0.5, 0.5};"));
        assert!(src.contains("TEX parmx, coord.x, texture[3], 1D;"));
        assert!(src.contains("LRP yuv.b, parmx.b, a.bbbb, a.aaaa;"));
        assert!(src.contains("TEX b.g, coord2.zwzw, texture[1], 2D;"));
    }

    #[test]
    fn test_bicubic_one_texel_texture() {
        let conv = YuvConversion::uniform(Scaler::Bicubic, ConversionMethod::Fragment);
        let program =
            assemble_program(TextureTarget::Texture2D, &conv, &ColorAdjustment::NEUTRAL, (1, 1))
                .unwrap();
        assert!(program.source.contains(
            "MAD coord.xy, fragment.texcoord[1], {1.000000, 1.000000}, {0.5, 0.5};"
        ));
        assert!(
            assemble_program(TextureTarget::Texture2D, &conv, &ColorAdjustment::NEUTRAL, (0, 4))
                .is_err()
        );
    }

    #[test]
    fn test_bicubic_rect_uses_unit_offsets() {
        let program = assemble_program(
            TextureTarget::Rectangle,
            &YuvConversion::new(Scaler::Bicubic, Scaler::Bilinear, ConversionMethod::Fragment),
            &ColorAdjustment::NEUTRAL,
            (0, 0),
        )
        .unwrap();
        let src = &program.source;
        assert!(src.contains("ADD coord, fragment.texcoord[0], {0.5, 0.5};"));
        assert!(src.contains("MUL cdelta.yw, parmy.rrgg, {0, -1, 0, 1};"));
        assert!(src.contains("TEX a.r, coord.xyxy, texture[0], RECT;"));
        assert!(src.contains("TEX yuv.g, fragment.texcoord[1], texture[1], RECT;"));
    }

    #[test]
    fn test_pow_uses_each_channel_gamma() {
        let adj = ColorAdjustment {
            gamma_r: 2.0,
            gamma_g: 4.0,
            gamma_b: 0.5,
            ..ColorAdjustment::NEUTRAL
        };
        let program = assemble_program(
            TextureTarget::Texture2D,
            &YuvConversion::uniform(Scaler::Bilinear, ConversionMethod::FragmentPow),
            &adj,
            (64, 64),
        )
        .unwrap();
        assert!(program.source.contains("PARAM gamma = {0.5000, 0.2500, 2.0000};"));
        assert!(program.source.contains("MAD_SAT res.rgb, yuv.bbbb, vcoef, res;"));
    }

    #[test]
    fn test_lookup_programs_reference_their_unit() {
        let program = assemble_program(
            TextureTarget::Texture2D,
            &YuvConversion::uniform(Scaler::Bicubic, ConversionMethod::FragmentLookup),
            &ColorAdjustment::NEUTRAL,
            (64, 64),
        )
        .unwrap();
        assert!(program.source.contains("PARAM offsets = {"));
        assert!(program.source.contains(", 0.125};"));
        assert_eq!(program.source.matches("texture[4], 2D;").count(), 3);

        let program = assemble_program(
            TextureTarget::Texture2D,
            &YuvConversion::uniform(Scaler::Bilinear, ConversionMethod::FragmentLookup3d),
            &ColorAdjustment::NEUTRAL,
            (64, 64),
        )
        .unwrap();
        assert!(program.source.ends_with("TEX result.color, yuv, texture[3], 3D;END"));
    }

    #[test]
    fn test_combiner_method_is_not_a_program() {
        let err = assemble_program(
            TextureTarget::Texture2D,
            &YuvConversion::uniform(Scaler::Bilinear, ConversionMethod::Combiners),
            &ColorAdjustment::NEUTRAL,
            (64, 64),
        )
        .unwrap_err();
        assert!(matches!(err, GlError::InvalidParameter(_)));
    }

    #[test]
    fn test_supported_methods_order() {
        let all = ExtensionFunctions::resolve(
            Some(&OfflineResolver::all()),
            Some("GL_NV_register_combiners GL_ATI_fragment_shader GL_ARB_fragment_program"),
            None,
        );
        assert_eq!(supported_methods(&all), ConversionMethod::PREFERENCE.to_vec());

        let program_only = |name: &str| name.contains("ProgramString").then(ProcAddress::placeholder);
        let table =
            ExtensionFunctions::resolve(Some(&program_only), Some("GL_ARB_fragment_program"), None);
        assert_eq!(supported_methods(&table), vec![
            ConversionMethod::FragmentPow,
            ConversionMethod::Fragment
        ]);

        assert!(supported_methods(&ExtensionFunctions::empty()).is_empty());
    }

    #[test]
    fn test_bicubic_needs_active_texture() {
        let conv = YuvConversion::uniform(Scaler::Bicubic, ConversionMethod::Fragment);
        assert!(conv.required_functions().contains(&ExtFunc::ActiveTexture));
        let conv = YuvConversion::uniform(Scaler::Bilinear, ConversionMethod::FragmentPow);
        assert!(!conv.required_functions().contains(&ExtFunc::ActiveTexture));
        let conv = YuvConversion::uniform(Scaler::Bicubic, ConversionMethod::Combiners);
        assert_eq!(
            conv.required_functions().iter().filter(|f| **f == ExtFunc::ActiveTexture).count(),
            1
        );
    }
}
