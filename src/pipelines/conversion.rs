// SPDX-License-Identifier: GPL-3.0-only

//! YUV conversion setup
//!
//! Turns a [`YuvConversion`] into driver state: combiner stages for the
//! fixed-function paths, or lookup textures plus a loaded fragment program
//! for the program paths. Capability checks run before any GL call, so a
//! failed setup leaves nothing half-configured.

use super::activation::{disable_yuv_conversion, enable_yuv_conversion};
use crate::constants::*;
use crate::errors::{GlError, GlResult};
use crate::gpu::{
    ExtFunc, Gl, create_clear_texture, load_gpu_program, set_alignment, upload_region,
};
use crate::shaders::{
    ColorAdjustment, ConversionMethod, GeneratedProgram, TextureTarget, YuvConversion,
    assemble_program, bspline_table, combiner_coefficients, gamma_map, yuv_cube,
};
use tracing::{debug, error, info};

/// What a successful setup left in the driver
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionState {
    pub conversion: YuvConversion,
    /// Texture target of the Y, U and V planes
    pub target: GLenum,
    /// Program text and lookup units, program paths only
    pub program: Option<GeneratedProgram>,
    /// Program object bound for the program, if the driver has them
    pub program_object: Option<u32>,
}

impl ConversionState {
    pub fn enable(&self, gl: &dyn Gl) {
        enable_yuv_conversion(gl, self.target, self.conversion.method);
    }

    pub fn disable(&self, gl: &dyn Gl) {
        disable_yuv_conversion(gl, self.target, self.conversion.method);
    }

    /// Delete the program object, if any
    pub fn release(self, gl: &dyn Gl) {
        if let Some(id) = self.program_object {
            delete_program_object(gl, id);
        }
    }
}

fn delete_program_object(gl: &dyn Gl, id: u32) {
    if gl.functions().is_available(ExtFunc::DeletePrograms) {
        debug!(program = id, "Deleting fragment program object");
        gl.delete_program(id);
    }
}

/// Set up YUV->RGB conversion for textures on `target`
///
/// `texture_size` is the luma texture size, used by bicubic scaling on
/// normalised coordinates.
pub fn setup_yuv_conversion(
    gl: &dyn Gl,
    target: GLenum,
    conversion: &YuvConversion,
    adjustment: &ColorAdjustment,
    texture_size: (u32, u32),
) -> GlResult<ConversionState> {
    let method = conversion.method;
    let missing = gl.functions().missing(&conversion.required_functions());
    if !missing.is_empty() {
        let missing: Vec<String> = missing.iter().map(|f| f.name().to_string()).collect();
        error!(
            method = method.name(),
            missing = %missing.join(", "),
            "Functions missing for YUV conversion"
        );
        return Err(GlError::CapabilityMissing {
            what: method.display_name().to_string(),
            missing,
        });
    }

    let mut state = ConversionState {
        conversion: *conversion,
        target,
        program: None,
        program_object: None,
    };
    match method {
        ConversionMethod::None => {}
        ConversionMethod::Combiners => setup_combiners(gl, adjustment),
        ConversionMethod::CombinersAti => setup_combiners_ati(gl, adjustment),
        ConversionMethod::Fragment
        | ConversionMethod::FragmentPow
        | ConversionMethod::FragmentLookup
        | ConversionMethod::FragmentLookup3d => {
            let (program, object) =
                setup_fragment_program(gl, target, conversion, adjustment, texture_size)?;
            state.program = Some(program);
            state.program_object = object;
        }
    }
    info!(
        method = method.name(),
        luma = conversion.luma_scaler.name(),
        chroma = conversion.chroma_scaler.name(),
        "YUV conversion ready"
    );
    Ok(state)
}

fn check_texture_units(gl: &dyn Gl, needed: u32, what: &str) {
    let found = gl.get_integer(GL_MAX_TEXTURE_UNITS);
    if found < needed as i32 {
        error!(needed, found, "Not enough texture units for {}", what);
    }
}

/// NV_register_combiners: `Y + 4 * ((U - 0.5) * ucoef + (V - 0.5) * vcoef)`
fn setup_combiners(gl: &dyn Gl, adjustment: &ColorAdjustment) {
    let found = gl.get_integer(GL_MAX_GENERAL_COMBINERS_NV);
    if found < 2 {
        error!(found, "2 general combiners needed for YUV combiner support");
    }
    check_texture_units(gl, 3, "YUV combiner support");

    let (uvcos, uvsin) = adjustment.uv_rotation();
    let (ucoef, vcoef) = combiner_coefficients(uvcos, uvsin);
    gl.combiner_parameter_fv(GL_CONSTANT_COLOR0_NV, &ucoef);
    gl.combiner_parameter_fv(GL_CONSTANT_COLOR1_NV, &vcoef);

    // UV first, like this green component cannot overflow
    let stage0 = [
        (GL_VARIABLE_A_NV, GL_TEXTURE1),
        (GL_VARIABLE_B_NV, GL_CONSTANT_COLOR0_NV),
        (GL_VARIABLE_C_NV, GL_TEXTURE2),
        (GL_VARIABLE_D_NV, GL_CONSTANT_COLOR1_NV),
    ];
    for (variable, input) in stage0 {
        gl.combiner_input(
            GL_COMBINER0_NV,
            GL_RGB,
            variable,
            input,
            GL_HALF_BIAS_NORMAL_NV,
            GL_RGB,
        );
    }
    gl.combiner_output(
        GL_COMBINER0_NV,
        GL_RGB,
        GL_DISCARD_NV,
        GL_DISCARD_NV,
        GL_SPARE0_NV,
        GL_SCALE_BY_FOUR_NV,
        GL_NONE,
        false,
        false,
        false,
    );

    // A * 1 + C * 1
    let stage1 = [
        (GL_VARIABLE_A_NV, GL_SPARE0_NV, GL_SIGNED_IDENTITY_NV),
        (GL_VARIABLE_B_NV, GL_ZERO, GL_UNSIGNED_INVERT_NV),
        (GL_VARIABLE_C_NV, GL_TEXTURE0, GL_SIGNED_IDENTITY_NV),
        (GL_VARIABLE_D_NV, GL_ZERO, GL_UNSIGNED_INVERT_NV),
    ];
    for (variable, input, mapping) in stage1 {
        gl.combiner_input(GL_COMBINER1_NV, GL_RGB, variable, input, mapping, GL_RGB);
    }
    gl.combiner_output(
        GL_COMBINER1_NV,
        GL_RGB,
        GL_DISCARD_NV,
        GL_DISCARD_NV,
        GL_SPARE0_NV,
        GL_NONE,
        GL_NONE,
        false,
        false,
        false,
    );

    // final combiner stays in default mode
    gl.combiner_parameter_i(GL_NUM_GENERAL_COMBINERS_NV, 2);
}

/// ATI_fragment_shader version of [`setup_combiners`]
fn setup_combiners_ati(gl: &dyn Gl, adjustment: &ColorAdjustment) {
    let found = gl.get_integer(GL_NUM_FRAGMENT_REGISTERS_ATI);
    if found < 3 {
        error!(found, "3 registers needed for YUV combiner (ATI) support");
    }
    check_texture_units(gl, 3, "YUV combiner (ATI) support");

    let (uvcos, uvsin) = adjustment.uv_rotation();
    let (ucoef, vcoef) = combiner_coefficients(uvcos, uvsin);
    gl.begin_fragment_shader();
    gl.set_fragment_shader_constant(GL_CON_0_ATI, &ucoef);
    gl.set_fragment_shader_constant(GL_CON_1_ATI, &vcoef);
    gl.sample_map(GL_REG_0_ATI, GL_TEXTURE0, GL_SWIZZLE_STR_ATI);
    gl.sample_map(GL_REG_1_ATI, GL_TEXTURE1, GL_SWIZZLE_STR_ATI);
    gl.sample_map(GL_REG_2_ATI, GL_TEXTURE2, GL_SWIZZLE_STR_ATI);
    // UV first, like this green component cannot overflow
    gl.color_fragment_op2(
        GL_MUL_ATI,
        GL_REG_1_ATI,
        GL_NONE,
        GL_NONE,
        [GL_REG_1_ATI, GL_NONE, GL_BIAS_BIT_ATI],
        [GL_CON_0_ATI, GL_NONE, GL_BIAS_BIT_ATI],
    );
    gl.color_fragment_op3(
        GL_MAD_ATI,
        GL_REG_2_ATI,
        GL_NONE,
        GL_4X_BIT_ATI,
        [GL_REG_2_ATI, GL_NONE, GL_BIAS_BIT_ATI],
        [GL_CON_1_ATI, GL_NONE, GL_BIAS_BIT_ATI],
        [GL_REG_1_ATI, GL_NONE, GL_NONE],
    );
    gl.color_fragment_op2(
        GL_ADD_ATI,
        GL_REG_0_ATI,
        GL_NONE,
        GL_NONE,
        [GL_REG_0_ATI, GL_NONE, GL_NONE],
        [GL_REG_2_ATI, GL_NONE, GL_NONE],
    );
    gl.end_fragment_shader();
}

/// 1D spline-weight texture for bicubic scaling
fn create_spline_texture(gl: &dyn Gl, unit: u32) {
    let table = bspline_table(LOOKUP_BSPLINE_RES);
    debug!(unit, entries = table.len(), "Creating bicubic lookup texture");
    gl.active_texture(GL_TEXTURE0 + unit);
    gl.tex_image_1d(
        GL_TEXTURE_1D,
        GL_RGBA16,
        LOOKUP_BSPLINE_RES as i32,
        GL_RGBA,
        GL_FLOAT,
        bytemuck::cast_slice(table.as_slice()),
    );
    gl.tex_parameter_f(GL_TEXTURE_1D, GL_TEXTURE_PRIORITY, 1.0);
    gl.tex_parameter_i(GL_TEXTURE_1D, GL_TEXTURE_MIN_FILTER, GL_NEAREST as i32);
    gl.tex_parameter_i(GL_TEXTURE_1D, GL_TEXTURE_MAG_FILTER, GL_NEAREST as i32);
    gl.tex_parameter_i(GL_TEXTURE_1D, GL_TEXTURE_WRAP_S, GL_REPEAT as i32);
    gl.active_texture(GL_TEXTURE0);
}

/// Four-row gamma texture: red, green, blue curves and an unused zero row
fn create_gamma_texture(gl: &dyn Gl, unit: u32, adjustment: &ColorAdjustment) -> GlResult<()> {
    let mut data = Vec::with_capacity(4 * LOOKUP_RES);
    for gamma in adjustment.gammas() {
        data.extend(gamma_map(LOOKUP_RES, gamma));
    }
    data.resize(4 * LOOKUP_RES, 0);

    debug!(unit, "Creating gamma lookup texture");
    gl.active_texture(GL_TEXTURE0 + unit);
    let width = LOOKUP_RES as i32;
    create_clear_texture(gl, GL_TEXTURE_2D, GL_LUMINANCE8, GL_LINEAR, width, 4, 0)?;
    upload_region(
        gl,
        GL_TEXTURE_2D,
        GL_LUMINANCE,
        GL_UNSIGNED_BYTE,
        &data,
        LOOKUP_RES as isize,
        0,
        0,
        width,
        4,
        0,
    )?;
    gl.active_texture(GL_TEXTURE0);
    Ok(())
}

/// 3D YUV->RGB cube with one border texel per side
fn create_cube_texture(gl: &dyn Gl, unit: u32, adjustment: &ColorAdjustment) {
    let side = LOOKUP_3DRES + 2;
    let data = yuv_cube(LOOKUP_3DRES, adjustment);

    debug!(unit, side, "Creating 3D lookup texture");
    gl.active_texture(GL_TEXTURE0 + unit);
    set_alignment(gl, side);
    gl.pixel_store_i(GL_UNPACK_ROW_LENGTH, 0);
    let side = side as i32;
    gl.tex_image_3d(GL_TEXTURE_3D, 3, side, side, side, GL_RGB, GL_UNSIGNED_BYTE, &data);
    gl.tex_parameter_f(GL_TEXTURE_3D, GL_TEXTURE_PRIORITY, 1.0);
    gl.tex_parameter_i(GL_TEXTURE_3D, GL_TEXTURE_MIN_FILTER, GL_LINEAR as i32);
    gl.tex_parameter_i(GL_TEXTURE_3D, GL_TEXTURE_MAG_FILTER, GL_LINEAR as i32);
    for wrap in [GL_TEXTURE_WRAP_S, GL_TEXTURE_WRAP_T, GL_TEXTURE_WRAP_R] {
        gl.tex_parameter_i(GL_TEXTURE_3D, wrap, GL_CLAMP as i32);
    }
    gl.active_texture(GL_TEXTURE0);
}

fn setup_fragment_program(
    gl: &dyn Gl,
    target: GLenum,
    conversion: &YuvConversion,
    adjustment: &ColorAdjustment,
    texture_size: (u32, u32),
) -> GlResult<(GeneratedProgram, Option<u32>)> {
    let program = assemble_program(
        TextureTarget::from_gl(target),
        conversion,
        adjustment,
        texture_size,
    )?;
    let units = program.units;

    if let Some(unit) = units.luma_lookup {
        create_spline_texture(gl, unit);
    }
    if let Some(unit) = units.chroma_lookup.filter(|u| Some(*u) != units.luma_lookup) {
        create_spline_texture(gl, unit);
    }
    if let Some(unit) = units.conversion_lookup {
        match conversion.method {
            ConversionMethod::FragmentLookup => create_gamma_texture(gl, unit, adjustment)?,
            ConversionMethod::FragmentLookup3d => create_cube_texture(gl, unit, adjustment),
            _ => {}
        }
    }
    check_texture_units(gl, units.required(), "this type of YUV fragment support");

    debug!(source = %program.source, "Generated fragment program");

    let functions = gl.functions();
    let object = (functions.is_available(ExtFunc::GenPrograms)
        && functions.is_available(ExtFunc::BindProgram))
    .then(|| {
        let id = gl.gen_program();
        gl.bind_program(GL_FRAGMENT_PROGRAM, id);
        id
    });

    if let Err(err) = load_gpu_program(gl, GL_FRAGMENT_PROGRAM, &program.source) {
        if let Some(id) = object {
            gl.bind_program(GL_FRAGMENT_PROGRAM, 0);
            delete_program_object(gl, id);
        }
        return Err(err);
    }
    Ok((program, object))
}

/// Owns the conversion state of one context
///
/// Re-running [`YuvConverter::setup`] supersedes the previous configuration:
/// an enabled conversion is disabled and its program object deleted first.
#[derive(Debug, Default)]
pub struct YuvConverter {
    state: Option<ConversionState>,
    enabled: bool,
}

impl YuvConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn setup(
        &mut self,
        gl: &dyn Gl,
        target: GLenum,
        conversion: &YuvConversion,
        adjustment: &ColorAdjustment,
        texture_size: (u32, u32),
    ) -> GlResult<&ConversionState> {
        self.reset(gl);
        let state = setup_yuv_conversion(gl, target, conversion, adjustment, texture_size)?;
        Ok(self.state.insert(state))
    }

    pub fn state(&self) -> Option<&ConversionState> {
        self.state.as_ref()
    }

    /// No-op before a successful setup
    pub fn enable(&mut self, gl: &dyn Gl) {
        if let Some(state) = &self.state {
            state.enable(gl);
            self.enabled = true;
        }
    }

    pub fn disable(&mut self, gl: &dyn Gl) {
        if let Some(state) = &self.state {
            state.disable(gl);
        }
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disable and drop the current state, e.g. after the context was recreated
    pub fn reset(&mut self, gl: &dyn Gl) {
        if let Some(state) = self.state.take() {
            if self.enabled {
                state.disable(gl);
            }
            state.release(gl);
        }
        self.enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::{GlCall, OfflineResolver, RecordingGl};
    use crate::shaders::Scaler;

    const ALL_EXTENSIONS: &str =
        "GL_NV_register_combiners GL_ATI_fragment_shader GL_ARB_fragment_program";

    fn full_gl() -> RecordingGl {
        RecordingGl::with_extensions(&OfflineResolver::all(), ALL_EXTENSIONS)
    }

    fn setup(gl: &RecordingGl, conversion: YuvConversion) -> GlResult<ConversionState> {
        setup_yuv_conversion(
            gl,
            GL_TEXTURE_2D,
            &conversion,
            &ColorAdjustment::NEUTRAL,
            (256, 256),
        )
    }

    #[test]
    fn test_nv_combiner_wiring() {
        let gl = full_gl();
        setup(&gl, YuvConversion::uniform(Scaler::Bilinear, ConversionMethod::Combiners)).unwrap();
        let calls = gl.calls();
        let inputs: Vec<_> = calls
            .iter()
            .filter_map(|c| match c {
                GlCall::CombinerInput {
                    stage,
                    variable,
                    input,
                    mapping,
                    ..
                } => Some((*stage, *variable, *input, *mapping)),
                _ => None,
            })
            .collect();
        assert_eq!(inputs.len(), 8);
        assert_eq!(
            inputs[0],
            (GL_COMBINER0_NV, GL_VARIABLE_A_NV, GL_TEXTURE1, GL_HALF_BIAS_NORMAL_NV)
        );
        assert_eq!(
            inputs[3],
            (GL_COMBINER0_NV, GL_VARIABLE_D_NV, GL_CONSTANT_COLOR1_NV, GL_HALF_BIAS_NORMAL_NV)
        );
        assert_eq!(
            inputs[6],
            (GL_COMBINER1_NV, GL_VARIABLE_C_NV, GL_TEXTURE0, GL_SIGNED_IDENTITY_NV)
        );
        assert!(calls.contains(&GlCall::CombinerOutput {
            stage: GL_COMBINER0_NV,
            portion: GL_RGB,
            ab_output: GL_DISCARD_NV,
            cd_output: GL_DISCARD_NV,
            sum_output: GL_SPARE0_NV,
            scale: GL_SCALE_BY_FOUR_NV,
            bias: GL_NONE,
            flags: [false; 3],
        }));
        assert_eq!(
            calls.last(),
            Some(&GlCall::CombinerParameterI(GL_NUM_GENERAL_COMBINERS_NV, 2))
        );
    }

    #[test]
    fn test_ati_shader_sequence() {
        let gl = full_gl();
        setup(&gl, YuvConversion::uniform(Scaler::Bilinear, ConversionMethod::CombinersAti))
            .unwrap();
        let calls = gl.calls();
        assert_eq!(calls.first(), Some(&GlCall::BeginFragmentShader));
        assert_eq!(calls.last(), Some(&GlCall::EndFragmentShader));
        assert!(calls.contains(&GlCall::ColorFragmentOp {
            op: GL_MAD_ATI,
            dst: GL_REG_2_ATI,
            dst_mask: GL_NONE,
            dst_mod: GL_4X_BIT_ATI,
            args: vec![
                [GL_REG_2_ATI, GL_NONE, GL_BIAS_BIT_ATI],
                [GL_CON_1_ATI, GL_NONE, GL_BIAS_BIT_ATI],
                [GL_REG_1_ATI, GL_NONE, GL_NONE],
            ],
        }));
    }

    #[test]
    fn test_capability_failure_issues_no_calls() {
        let gl = RecordingGl::default();
        let err = setup(&gl, YuvConversion::uniform(Scaler::Bilinear, ConversionMethod::Combiners))
            .unwrap_err();
        match err {
            GlError::CapabilityMissing { missing, .. } => {
                assert!(missing.contains(&"CombinerInput".to_string()));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn test_resource_shortfall_is_not_fatal() {
        let mut gl = full_gl();
        gl.set_integer(GL_MAX_GENERAL_COMBINERS_NV, 1);
        gl.set_integer(GL_MAX_TEXTURE_UNITS, 2);
        assert!(setup(&gl, YuvConversion::uniform(Scaler::Bilinear, ConversionMethod::Combiners)).is_ok());
        assert!(setup(&gl, YuvConversion::uniform(Scaler::Bicubic, ConversionMethod::FragmentLookup)).is_ok());
    }

    #[test]
    fn test_gamma_lookup_texture() {
        let gl = full_gl();
        let state = setup(
            &gl,
            YuvConversion::uniform(Scaler::Bilinear, ConversionMethod::FragmentLookup),
        )
        .unwrap();
        assert_eq!(state.program.unwrap().units.conversion_lookup, Some(3));
        let calls = gl.calls();
        assert_eq!(calls[0], GlCall::ActiveTexture(GL_TEXTURE0 + 3));
        let upload = calls
            .iter()
            .find_map(|c| match c {
                GlCall::TexSubImage2D {
                    width,
                    height,
                    pixels,
                    ..
                } => Some((*width, *height, pixels.clone())),
                _ => None,
            })
            .unwrap();
        assert_eq!((upload.0, upload.1), (LOOKUP_RES as i32, 4));
        assert_eq!(upload.2[LOOKUP_RES - 1], 255);
        assert!(upload.2[3 * LOOKUP_RES..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bicubic_shares_spline_texture() {
        let gl = full_gl();
        setup(&gl, YuvConversion::uniform(Scaler::Bicubic, ConversionMethod::Fragment)).unwrap();
        let splines = gl
            .calls()
            .iter()
            .filter(|c| matches!(c, GlCall::TexImage1D { internal_format: GL_RGBA16, .. }))
            .count();
        assert_eq!(splines, 1);

        gl.clear_calls();
        setup(
            &gl,
            YuvConversion::new(Scaler::Bicubic, Scaler::Bilinear, ConversionMethod::Fragment),
        )
        .unwrap();
        assert!(gl.calls().contains(&GlCall::ActiveTexture(GL_TEXTURE0 + 3)));
    }

    #[test]
    fn test_cube_texture_upload() {
        let gl = full_gl();
        setup(&gl, YuvConversion::uniform(Scaler::Bilinear, ConversionMethod::FragmentLookup3d))
            .unwrap();
        let side = (LOOKUP_3DRES + 2) as i32;
        let cube = gl
            .calls()
            .into_iter()
            .find_map(|c| match c {
                GlCall::TexImage3D {
                    width,
                    depth,
                    pixels,
                    ..
                } => Some((width, depth, pixels.len())),
                _ => None,
            })
            .unwrap();
        assert_eq!(cube, (side, side, 3 * (side * side * side) as usize));
    }

    #[test]
    fn test_missing_3d_textures() {
        let resolver = OfflineResolver::only(["Program", "ActiveTexture"]);
        let gl = RecordingGl::with_extensions(&resolver, "GL_ARB_fragment_program");
        let err = setup(
            &gl,
            YuvConversion::uniform(Scaler::Bilinear, ConversionMethod::FragmentLookup3d),
        )
        .unwrap_err();
        assert!(err.is_capability_error());
    }

    #[test]
    fn test_compile_failure_unbinds_program() {
        let mut gl = full_gl();
        gl.set_integer(GL_PROGRAM_ERROR_POSITION, 0);
        let err = setup(&gl, YuvConversion::default()).unwrap_err();
        assert!(matches!(err, GlError::Compile { position: 0, .. }));
        let calls = gl.calls();
        assert!(calls.contains(&GlCall::BindProgram(GL_FRAGMENT_PROGRAM, 0)));
        assert!(calls.contains(&GlCall::DeleteProgram(1)));
    }

    #[test]
    fn test_converter_replaces_program_object() {
        let gl = full_gl();
        let mut converter = YuvConverter::new();
        let conv = YuvConversion::default();
        let first = converter
            .setup(&gl, GL_TEXTURE_2D, &conv, &ColorAdjustment::NEUTRAL, (64, 64))
            .unwrap()
            .program_object;
        assert_eq!(first, Some(1));
        let second = converter
            .setup(&gl, GL_TEXTURE_2D, &conv, &ColorAdjustment::NEUTRAL, (64, 64))
            .unwrap()
            .program_object;
        assert_eq!(second, Some(2));
        assert!(gl.calls().contains(&GlCall::DeleteProgram(1)));

        gl.clear_calls();
        converter.enable(&gl);
        assert_eq!(gl.calls(), vec![GlCall::Enable(GL_FRAGMENT_PROGRAM)]);
    }

    #[test]
    fn test_failed_resetup_disables_enabled_program() {
        let gl = RecordingGl::with_extensions(&OfflineResolver::all(), "GL_ARB_fragment_program");
        let mut converter = YuvConverter::new();
        converter
            .setup(&gl, GL_TEXTURE_2D, &YuvConversion::default(), &ColorAdjustment::NEUTRAL, (8, 8))
            .unwrap();
        converter.enable(&gl);
        assert!(converter.is_enabled());

        gl.clear_calls();
        let combiners = YuvConversion::uniform(Scaler::Bilinear, ConversionMethod::Combiners);
        assert!(
            converter
                .setup(&gl, GL_TEXTURE_2D, &combiners, &ColorAdjustment::NEUTRAL, (8, 8))
                .is_err()
        );
        assert_eq!(gl.calls(), vec![
            GlCall::Disable(GL_FRAGMENT_PROGRAM),
            GlCall::DeleteProgram(1),
        ]);
        assert!(!converter.is_enabled());

        gl.clear_calls();
        converter.disable(&gl);
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn test_reset_disables_combiner_stage() {
        let gl = full_gl();
        let mut converter = YuvConverter::new();
        let conv = YuvConversion::uniform(Scaler::Bilinear, ConversionMethod::Combiners);
        converter
            .setup(&gl, GL_TEXTURE_2D, &conv, &ColorAdjustment::NEUTRAL, (8, 8))
            .unwrap();
        converter.enable(&gl);
        gl.clear_calls();
        converter.reset(&gl);
        assert_eq!(gl.calls().last(), Some(&GlCall::Disable(GL_REGISTER_COMBINERS_NV)));
        assert!(gl.calls().contains(&GlCall::Disable(GL_TEXTURE_2D)));
    }

    #[test]
    fn test_failed_setup_clears_state() {
        let gl = full_gl();
        let mut converter = YuvConverter::new();
        converter
            .setup(&gl, GL_TEXTURE_2D, &YuvConversion::default(), &ColorAdjustment::NEUTRAL, (8, 8))
            .unwrap();
        let bad = YuvConversion::uniform(Scaler::Bicubic, ConversionMethod::Fragment);
        assert!(
            converter
                .setup(&gl, GL_TEXTURE_2D, &bad, &ColorAdjustment::NEUTRAL, (0, 0))
                .is_err()
        );
        assert!(converter.state().is_none());
        gl.clear_calls();
        converter.disable(&gl);
        assert!(gl.calls().is_empty());
    }
}
