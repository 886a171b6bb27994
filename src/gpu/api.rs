// SPDX-License-Identifier: GPL-3.0-only

//! The GL calls issued by this crate
//!
//! Core GL 1.x calls and the optional extension calls go through one trait so
//! the conversion logic never touches raw entry points. Extension methods may
//! only be called when [`Gl::functions`] reports the matching [`ExtFunc`];
//! calling an absent one is a programming error and implementations log it
//! and do nothing.
//!
//! All methods assume the context is current on the calling thread.
//!
//! [`ExtFunc`]: super::extensions::ExtFunc

use super::extensions::ExtensionFunctions;
use crate::constants::GLenum;

#[allow(clippy::too_many_arguments)]
pub trait Gl {
    /// Optional entry points resolved for this context
    fn functions(&self) -> &ExtensionFunctions;

    // === Core ===

    fn get_string(&self, name: GLenum) -> Option<String>;
    fn get_integer(&self, pname: GLenum) -> i32;
    fn pixel_store_i(&self, pname: GLenum, param: i32);
    fn tex_image_1d(
        &self,
        target: GLenum,
        internal_format: GLenum,
        width: i32,
        format: GLenum,
        ty: GLenum,
        pixels: &[u8],
    );
    fn tex_image_2d(
        &self,
        target: GLenum,
        internal_format: GLenum,
        width: i32,
        height: i32,
        format: GLenum,
        ty: GLenum,
        pixels: &[u8],
    );
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
    );
    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, param: i32);
    fn tex_parameter_f(&self, target: GLenum, pname: GLenum, param: f32);
    fn tex_parameter_fv(&self, target: GLenum, pname: GLenum, params: &[f32; 4]);
    fn enable(&self, cap: GLenum);
    fn disable(&self, cap: GLenum);
    fn begin(&self, mode: GLenum);
    fn end(&self);
    fn tex_coord_2f(&self, s: f32, t: f32);
    fn vertex_2f(&self, x: f32, y: f32);

    // === Multitexture / 3D textures ===

    fn active_texture(&self, unit: GLenum);
    fn multi_tex_coord_2f(&self, unit: GLenum, s: f32, t: f32);
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
    );

    // === NV_register_combiners ===

    fn combiner_parameter_fv(&self, pname: GLenum, params: &[f32; 4]);
    fn combiner_parameter_i(&self, pname: GLenum, param: i32);
    fn combiner_input(
        &self,
        stage: GLenum,
        portion: GLenum,
        variable: GLenum,
        input: GLenum,
        mapping: GLenum,
        component_usage: GLenum,
    );
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
    );

    // === ATI_fragment_shader ===

    fn begin_fragment_shader(&self);
    fn end_fragment_shader(&self);
    fn sample_map(&self, dst: GLenum, interp: GLenum, swizzle: GLenum);
    fn color_fragment_op2(
        &self,
        op: GLenum,
        dst: GLenum,
        dst_mask: GLenum,
        dst_mod: GLenum,
        arg1: [GLenum; 3],
        arg2: [GLenum; 3],
    );
    fn color_fragment_op3(
        &self,
        op: GLenum,
        dst: GLenum,
        dst_mask: GLenum,
        dst_mod: GLenum,
        arg1: [GLenum; 3],
        arg2: [GLenum; 3],
        arg3: [GLenum; 3],
    );
    fn set_fragment_shader_constant(&self, dst: GLenum, value: &[f32; 4]);

    // === ARB/NV programs ===

    fn gen_program(&self) -> u32;
    fn delete_program(&self, program: u32);
    fn bind_program(&self, target: GLenum, program: u32);
    fn program_string(&self, target: GLenum, format: GLenum, source: &str);
    fn get_program_iv(&self, target: GLenum, pname: GLenum) -> i32;
}
