// SPDX-License-Identifier: GPL-3.0-only

//! [`Gl`] that records calls instead of issuing them
//!
//! Used for offline program generation (the `program` CLI subcommand) and as
//! the test double throughout the crate. Integer and string queries are
//! answered from configurable maps; everything else is appended to a call log.

use super::api::Gl;
use super::extensions::{ExtFunc, ExtensionFunctions};
use super::loader::ProcResolver;
use crate::constants::*;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use tracing::error;

/// One recorded GL call
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    PixelStore {
        pname: GLenum,
        param: i32,
    },
    TexImage1D {
        target: GLenum,
        internal_format: GLenum,
        width: i32,
        format: GLenum,
        ty: GLenum,
        pixels: Vec<u8>,
    },
    TexImage2D {
        target: GLenum,
        internal_format: GLenum,
        width: i32,
        height: i32,
        format: GLenum,
        ty: GLenum,
        pixels: Vec<u8>,
    },
    TexSubImage2D {
        target: GLenum,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        format: GLenum,
        ty: GLenum,
        pixels: Vec<u8>,
    },
    TexImage3D {
        target: GLenum,
        internal_format: GLenum,
        width: i32,
        height: i32,
        depth: i32,
        format: GLenum,
        ty: GLenum,
        pixels: Vec<u8>,
    },
    TexParameterI {
        target: GLenum,
        pname: GLenum,
        param: i32,
    },
    TexParameterF {
        target: GLenum,
        pname: GLenum,
        param: f32,
    },
    TexParameterFv {
        target: GLenum,
        pname: GLenum,
        params: [f32; 4],
    },
    Enable(GLenum),
    Disable(GLenum),
    Begin(GLenum),
    End,
    TexCoord2f(f32, f32),
    Vertex2f(f32, f32),
    ActiveTexture(GLenum),
    MultiTexCoord2f(GLenum, f32, f32),
    CombinerParameterFv(GLenum, [f32; 4]),
    CombinerParameterI(GLenum, i32),
    CombinerInput {
        stage: GLenum,
        portion: GLenum,
        variable: GLenum,
        input: GLenum,
        mapping: GLenum,
        component_usage: GLenum,
    },
    CombinerOutput {
        stage: GLenum,
        portion: GLenum,
        ab_output: GLenum,
        cd_output: GLenum,
        sum_output: GLenum,
        scale: GLenum,
        bias: GLenum,
        flags: [bool; 3],
    },
    BeginFragmentShader,
    EndFragmentShader,
    SampleMap {
        dst: GLenum,
        interp: GLenum,
        swizzle: GLenum,
    },
    ColorFragmentOp {
        op: GLenum,
        dst: GLenum,
        dst_mask: GLenum,
        dst_mod: GLenum,
        args: Vec<[GLenum; 3]>,
    },
    SetFragmentShaderConstant(GLenum, [f32; 4]),
    GenProgram(u32),
    DeleteProgram(u32),
    BindProgram(GLenum, u32),
    ProgramString {
        target: GLenum,
        format: GLenum,
        source: String,
    },
}

/// Driver double recording every call
pub struct RecordingGl {
    functions: ExtensionFunctions,
    integers: HashMap<GLenum, i32>,
    strings: HashMap<GLenum, String>,
    calls: RefCell<Vec<GlCall>>,
    next_program: Cell<u32>,
}

impl Default for RecordingGl {
    fn default() -> Self {
        Self::new(ExtensionFunctions::empty())
    }
}

impl RecordingGl {
    /// Driver with the given function table and generous resource limits
    pub fn new(functions: ExtensionFunctions) -> Self {
        let integers = HashMap::from([
            (GL_PROGRAM_ERROR_POSITION, -1),
            (GL_MAX_TEXTURE_UNITS, 8),
            (GL_MAX_GENERAL_COMBINERS_NV, 8),
            (GL_NUM_FRAGMENT_REGISTERS_ATI, 6),
        ]);
        let mut strings = HashMap::from([
            (GL_VENDOR, "glyuv".to_string()),
            (GL_RENDERER, "recording".to_string()),
            (GL_VERSION, "1.4".to_string()),
        ]);
        strings.insert(GL_EXTENSIONS, functions.extensions().trim().to_string());
        Self {
            functions,
            integers,
            strings,
            calls: RefCell::new(Vec::new()),
            next_program: Cell::new(1),
        }
    }

    /// Driver advertising `extensions`, with entry points from `resolver`
    pub fn with_extensions(resolver: &dyn ProcResolver, extensions: &str) -> Self {
        Self::new(ExtensionFunctions::resolve(
            Some(resolver),
            Some(extensions),
            None,
        ))
    }

    /// Override the answer to an integer query
    pub fn set_integer(&mut self, pname: GLenum, value: i32) {
        self.integers.insert(pname, value);
    }

    /// Override the answer to a string query
    pub fn set_string(&mut self, name: GLenum, value: impl Into<String>) {
        self.strings.insert(name, value.into());
    }

    /// Snapshot of the recorded calls
    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Every program source handed to the driver, oldest first
    pub fn programs(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                GlCall::ProgramString { source, .. } => Some(source.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    /// Record `call` only if `func` is resolved
    fn record_ext(&self, func: ExtFunc, call: GlCall) {
        if self.functions.is_available(func) {
            self.record(call);
        } else {
            error!(function = func.name(), "Absent GL extension function called");
        }
    }
}

impl Gl for RecordingGl {
    fn functions(&self) -> &ExtensionFunctions {
        &self.functions
    }

    fn get_string(&self, name: GLenum) -> Option<String> {
        self.strings.get(&name).cloned()
    }

    fn get_integer(&self, pname: GLenum) -> i32 {
        self.integers.get(&pname).copied().unwrap_or(0)
    }

    fn pixel_store_i(&self, pname: GLenum, param: i32) {
        self.record(GlCall::PixelStore { pname, param });
    }

    fn tex_image_1d(
        &self,
        target: GLenum,
        internal_format: GLenum,
        width: i32,
        format: GLenum,
        ty: GLenum,
        pixels: &[u8],
    ) {
        self.record(GlCall::TexImage1D {
            target,
            internal_format,
            width,
            format,
            ty,
            pixels: pixels.to_vec(),
        });
    }

    fn tex_image_2d(
        &self,
        target: GLenum,
        internal_format: GLenum,
        width: i32,
        height: i32,
        format: GLenum,
        ty: GLenum,
        pixels: &[u8],
    ) {
        self.record(GlCall::TexImage2D {
            target,
            internal_format,
            width,
            height,
            format,
            ty,
            pixels: pixels.to_vec(),
        });
    }

    fn tex_sub_image_2d(
        &self,
        target: GLenum,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        format: GLenum,
        ty: GLenum,
        pixels: &[u8],
    ) {
        self.record(GlCall::TexSubImage2D {
            target,
            x,
            y,
            width,
            height,
            format,
            ty,
            pixels: pixels.to_vec(),
        });
    }

    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, param: i32) {
        self.record(GlCall::TexParameterI {
            target,
            pname,
            param,
        });
    }

    fn tex_parameter_f(&self, target: GLenum, pname: GLenum, param: f32) {
        self.record(GlCall::TexParameterF {
            target,
            pname,
            param,
        });
    }

    fn tex_parameter_fv(&self, target: GLenum, pname: GLenum, params: &[f32; 4]) {
        self.record(GlCall::TexParameterFv {
            target,
            pname,
            params: *params,
        });
    }

    fn enable(&self, cap: GLenum) {
        self.record(GlCall::Enable(cap));
    }

    fn disable(&self, cap: GLenum) {
        self.record(GlCall::Disable(cap));
    }

    fn begin(&self, mode: GLenum) {
        self.record(GlCall::Begin(mode));
    }

    fn end(&self) {
        self.record(GlCall::End);
    }

    fn tex_coord_2f(&self, s: f32, t: f32) {
        self.record(GlCall::TexCoord2f(s, t));
    }

    fn vertex_2f(&self, x: f32, y: f32) {
        self.record(GlCall::Vertex2f(x, y));
    }

    fn active_texture(&self, unit: GLenum) {
        self.record_ext(ExtFunc::ActiveTexture, GlCall::ActiveTexture(unit));
    }

    fn multi_tex_coord_2f(&self, unit: GLenum, s: f32, t: f32) {
        self.record_ext(
            ExtFunc::MultiTexCoord2f,
            GlCall::MultiTexCoord2f(unit, s, t),
        );
    }

    fn tex_image_3d(
        &self,
        target: GLenum,
        internal_format: GLenum,
        width: i32,
        height: i32,
        depth: i32,
        format: GLenum,
        ty: GLenum,
        pixels: &[u8],
    ) {
        self.record_ext(ExtFunc::TexImage3D, GlCall::TexImage3D {
            target,
            internal_format,
            width,
            height,
            depth,
            format,
            ty,
            pixels: pixels.to_vec(),
        });
    }

    fn combiner_parameter_fv(&self, pname: GLenum, params: &[f32; 4]) {
        self.record_ext(
            ExtFunc::CombinerParameterfv,
            GlCall::CombinerParameterFv(pname, *params),
        );
    }

    fn combiner_parameter_i(&self, pname: GLenum, param: i32) {
        self.record_ext(
            ExtFunc::CombinerParameteri,
            GlCall::CombinerParameterI(pname, param),
        );
    }

    fn combiner_input(
        &self,
        stage: GLenum,
        portion: GLenum,
        variable: GLenum,
        input: GLenum,
        mapping: GLenum,
        component_usage: GLenum,
    ) {
        self.record_ext(ExtFunc::CombinerInput, GlCall::CombinerInput {
            stage,
            portion,
            variable,
            input,
            mapping,
            component_usage,
        });
    }

    fn combiner_output(
        &self,
        stage: GLenum,
        portion: GLenum,
        ab_output: GLenum,
        cd_output: GLenum,
        sum_output: GLenum,
        scale: GLenum,
        bias: GLenum,
        ab_dot_product: bool,
        cd_dot_product: bool,
        mux_sum: bool,
    ) {
        self.record_ext(ExtFunc::CombinerOutput, GlCall::CombinerOutput {
            stage,
            portion,
            ab_output,
            cd_output,
            sum_output,
            scale,
            bias,
            flags: [ab_dot_product, cd_dot_product, mux_sum],
        });
    }

    fn begin_fragment_shader(&self) {
        self.record_ext(ExtFunc::BeginFragmentShader, GlCall::BeginFragmentShader);
    }

    fn end_fragment_shader(&self) {
        self.record_ext(ExtFunc::EndFragmentShader, GlCall::EndFragmentShader);
    }

    fn sample_map(&self, dst: GLenum, interp: GLenum, swizzle: GLenum) {
        self.record_ext(ExtFunc::SampleMap, GlCall::SampleMap {
            dst,
            interp,
            swizzle,
        });
    }

    fn color_fragment_op2(
        &self,
        op: GLenum,
        dst: GLenum,
        dst_mask: GLenum,
        dst_mod: GLenum,
        arg1: [GLenum; 3],
        arg2: [GLenum; 3],
    ) {
        self.record_ext(ExtFunc::ColorFragmentOp2, GlCall::ColorFragmentOp {
            op,
            dst,
            dst_mask,
            dst_mod,
            args: vec![arg1, arg2],
        });
    }

    fn color_fragment_op3(
        &self,
        op: GLenum,
        dst: GLenum,
        dst_mask: GLenum,
        dst_mod: GLenum,
        arg1: [GLenum; 3],
        arg2: [GLenum; 3],
        arg3: [GLenum; 3],
    ) {
        self.record_ext(ExtFunc::ColorFragmentOp3, GlCall::ColorFragmentOp {
            op,
            dst,
            dst_mask,
            dst_mod,
            args: vec![arg1, arg2, arg3],
        });
    }

    fn set_fragment_shader_constant(&self, dst: GLenum, value: &[f32; 4]) {
        self.record_ext(
            ExtFunc::SetFragmentShaderConstant,
            GlCall::SetFragmentShaderConstant(dst, *value),
        );
    }

    fn gen_program(&self) -> u32 {
        if !self.functions.is_available(ExtFunc::GenPrograms) {
            error!(function = "GenPrograms", "Absent GL extension function called");
            return 0;
        }
        let id = self.next_program.get();
        self.next_program.set(id + 1);
        self.record(GlCall::GenProgram(id));
        id
    }

    fn delete_program(&self, program: u32) {
        self.record_ext(ExtFunc::DeletePrograms, GlCall::DeleteProgram(program));
    }

    fn bind_program(&self, target: GLenum, program: u32) {
        self.record_ext(ExtFunc::BindProgram, GlCall::BindProgram(target, program));
    }

    fn program_string(&self, target: GLenum, format: GLenum, source: &str) {
        self.record_ext(ExtFunc::ProgramString, GlCall::ProgramString {
            target,
            format,
            source: source.to_string(),
        });
    }

    fn get_program_iv(&self, _target: GLenum, pname: GLenum) -> i32 {
        if !self.functions.is_available(ExtFunc::GetProgramiv) {
            error!(function = "GetProgramiv", "Absent GL extension function called");
            return 0;
        }
        self.get_integer(pname)
    }
}
