// SPDX-License-Identifier: GPL-3.0-only

//! [`Gl`] backed by real driver entry points
//!
//! Core GL 1.1 symbols are required and resolved once at load time. The
//! optional ones live in an [`ExtensionFunctions`] table that is rebuilt with
//! [`NativeGl::reload_functions`] whenever the context reports a reinit.

use super::api::Gl;
use super::extensions::{ExtFunc, ExtensionFunctions};
use super::loader::ProcResolver;
use crate::constants::*;
use crate::errors::{GlError, GlResult};
use crate::media::formats::bytes_per_pixel;
use std::cell::Cell;
use std::ffi::{CStr, c_char, c_void};
use tracing::{debug, error};

type GetStringFn = unsafe extern "system" fn(GLenum) -> *const u8;
type GetIntegervFn = unsafe extern "system" fn(GLenum, *mut i32);
type PixelStoreiFn = unsafe extern "system" fn(GLenum, i32);
type TexImage1DFn =
    unsafe extern "system" fn(GLenum, i32, i32, i32, i32, GLenum, GLenum, *const c_void);
type TexImage2DFn =
    unsafe extern "system" fn(GLenum, i32, i32, i32, i32, i32, GLenum, GLenum, *const c_void);
type TexSubImage2DFn =
    unsafe extern "system" fn(GLenum, i32, i32, i32, i32, i32, GLenum, GLenum, *const c_void);
type TexParameteriFn = unsafe extern "system" fn(GLenum, GLenum, i32);
type TexParameterfFn = unsafe extern "system" fn(GLenum, GLenum, f32);
type TexParameterfvFn = unsafe extern "system" fn(GLenum, GLenum, *const f32);
type CapFn = unsafe extern "system" fn(GLenum);
type EndFn = unsafe extern "system" fn();
type Float2Fn = unsafe extern "system" fn(f32, f32);

type ActiveTextureFn = unsafe extern "system" fn(GLenum);
type MultiTexCoord2fFn = unsafe extern "system" fn(GLenum, f32, f32);
type TexImage3DFn = unsafe extern "system" fn(
    GLenum,
    i32,
    i32,
    i32,
    i32,
    i32,
    i32,
    GLenum,
    GLenum,
    *const c_void,
);
type CombinerParameterfvFn = unsafe extern "system" fn(GLenum, *const f32);
type CombinerParameteriFn = unsafe extern "system" fn(GLenum, i32);
type CombinerInputFn = unsafe extern "system" fn(GLenum, GLenum, GLenum, GLenum, GLenum, GLenum);
type CombinerOutputFn = unsafe extern "system" fn(
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    u8,
    u8,
    u8,
);
type VoidFn = unsafe extern "system" fn();
type SampleMapFn = unsafe extern "system" fn(GLenum, GLenum, GLenum);
type ColorFragmentOp2Fn = unsafe extern "system" fn(
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
);
type ColorFragmentOp3Fn = unsafe extern "system" fn(
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
    GLenum,
);
type SetFragmentShaderConstantFn = unsafe extern "system" fn(GLenum, *const f32);
type GenProgramsFn = unsafe extern "system" fn(i32, *mut u32);
type DeleteProgramsFn = unsafe extern "system" fn(i32, *const u32);
type BindProgramFn = unsafe extern "system" fn(GLenum, u32);
type ProgramStringFn = unsafe extern "system" fn(GLenum, GLenum, i32, *const c_void);
type GetProgramivFn = unsafe extern "system" fn(GLenum, GLenum, *mut i32);

/// Resolve a required core symbol into a typed pointer
macro_rules! core_fn {
    ($resolver:expr, $name:literal, $ty:ty) => {{
        let addr = $resolver
            .resolve($name)
            .ok_or_else(|| GlError::EntryPointMissing($name.to_string()))?;
        // SAFETY: `$name` is a GL 1.1 entry point whose C signature is `$ty`.
        unsafe { std::mem::transmute::<*const c_void, $ty>(addr.as_ptr()) }
    }};
}

/// Fetch an optional entry point as a typed pointer, logging if absent
macro_rules! ext_fn {
    ($self:ident, $func:ident, $ty:ty) => {
        match $self.functions.get(ExtFunc::$func) {
            // SAFETY: every candidate symbol of this logical function shares
            // the C signature `$ty`.
            Some(addr) => Some(unsafe { std::mem::transmute::<*const c_void, $ty>(addr.as_ptr()) }),
            None => {
                error!(
                    function = ExtFunc::$func.name(),
                    "Absent GL extension function called"
                );
                None
            }
        }
    };
}

fn data_ptr(pixels: &[u8]) -> *const c_void {
    if pixels.is_empty() {
        std::ptr::null()
    } else {
        pixels.as_ptr() as *const c_void
    }
}

/// Bytes per pixel and per component of `format`/`ty` client data
fn pixel_layout(format: GLenum, ty: GLenum) -> Option<(usize, usize)> {
    if let Some(bpp) = bytes_per_pixel(format, ty) {
        // packed types count as one component
        let packed = ty != GL_UNSIGNED_BYTE;
        let bpp = bpp as usize;
        return Some((bpp, if packed { bpp } else { 1 }));
    }
    let components = match format {
        GL_LUMINANCE | GL_ALPHA | GL_RED => 1,
        GL_LUMINANCE_ALPHA => 2,
        GL_RGB | GL_BGR => 3,
        GL_RGBA | GL_BGRA => 4,
        _ => return None,
    };
    let size = match ty {
        GL_BYTE | GL_UNSIGNED_BYTE => 1,
        GL_SHORT | GL_UNSIGNED_SHORT => 2,
        GL_INT | GL_UNSIGNED_INT | GL_FLOAT => 4,
        _ => return None,
    };
    Some((components * size, size))
}

/// Bytes the driver reads for `rows` rows of `width` pixels
fn unpack_len(
    (pixel, component): (usize, usize),
    width: usize,
    rows: usize,
    row_length: usize,
    alignment: usize,
) -> usize {
    let row_pixels = if row_length > 0 { row_length } else { width };
    let mut row_stride = row_pixels * pixel;
    if component < alignment {
        row_stride = row_stride.div_ceil(alignment) * alignment;
    }
    (rows - 1) * row_stride + width * pixel
}

fn gl_bool(value: bool) -> u8 {
    u8::from(value)
}

struct CoreFunctions {
    get_string: GetStringFn,
    get_integerv: GetIntegervFn,
    pixel_storei: PixelStoreiFn,
    tex_image_1d: TexImage1DFn,
    tex_image_2d: TexImage2DFn,
    tex_sub_image_2d: TexSubImage2DFn,
    tex_parameteri: TexParameteriFn,
    tex_parameterf: TexParameterfFn,
    tex_parameterfv: TexParameterfvFn,
    enable: CapFn,
    disable: CapFn,
    begin: CapFn,
    end: EndFn,
    tex_coord_2f: Float2Fn,
    vertex_2f: Float2Fn,
}

impl CoreFunctions {
    fn load(resolver: &dyn ProcResolver) -> GlResult<Self> {
        Ok(Self {
            get_string: core_fn!(resolver, "glGetString", GetStringFn),
            get_integerv: core_fn!(resolver, "glGetIntegerv", GetIntegervFn),
            pixel_storei: core_fn!(resolver, "glPixelStorei", PixelStoreiFn),
            tex_image_1d: core_fn!(resolver, "glTexImage1D", TexImage1DFn),
            tex_image_2d: core_fn!(resolver, "glTexImage2D", TexImage2DFn),
            tex_sub_image_2d: core_fn!(resolver, "glTexSubImage2D", TexSubImage2DFn),
            tex_parameteri: core_fn!(resolver, "glTexParameteri", TexParameteriFn),
            tex_parameterf: core_fn!(resolver, "glTexParameterf", TexParameterfFn),
            tex_parameterfv: core_fn!(resolver, "glTexParameterfv", TexParameterfvFn),
            enable: core_fn!(resolver, "glEnable", CapFn),
            disable: core_fn!(resolver, "glDisable", CapFn),
            begin: core_fn!(resolver, "glBegin", CapFn),
            end: core_fn!(resolver, "glEnd", EndFn),
            tex_coord_2f: core_fn!(resolver, "glTexCoord2f", Float2Fn),
            vertex_2f: core_fn!(resolver, "glVertex2f", Float2Fn),
        })
    }
}

/// Dispatch through the entry points of the current context
pub struct NativeGl {
    core: CoreFunctions,
    functions: ExtensionFunctions,
    unpack_alignment: Cell<i32>,
    unpack_row_length: Cell<i32>,
}

impl NativeGl {
    /// Resolve core and optional entry points for the current context
    ///
    /// # Safety
    ///
    /// A GL context must be current on the calling thread, and must stay
    /// current whenever the returned value is used. `resolver` must return
    /// genuine entry points of that context.
    pub unsafe fn load(
        resolver: &dyn ProcResolver,
        extra_extensions: Option<&str>,
    ) -> GlResult<Self> {
        let core = CoreFunctions::load(resolver)?;
        let mut gl = Self {
            core,
            functions: ExtensionFunctions::empty(),
            unpack_alignment: Cell::new(4),
            unpack_row_length: Cell::new(0),
        };
        // SAFETY: forwarded from the caller.
        unsafe { gl.reload_functions(resolver, extra_extensions) };
        Ok(gl)
    }

    /// Rebuild the optional function table, e.g. after a context reinit
    ///
    /// # Safety
    ///
    /// Same contract as [`NativeGl::load`]: `resolver` must return genuine
    /// entry points of the context current on this thread.
    pub unsafe fn reload_functions(&mut self, resolver: &dyn ProcResolver, extra: Option<&str>) {
        let driver_extensions = self.get_string(GL_EXTENSIONS);
        self.functions =
            ExtensionFunctions::resolve(Some(resolver), driver_extensions.as_deref(), extra);
        debug!(
            resolved = self.functions.available().count(),
            "Native GL function table rebuilt"
        );
    }

    /// Whether `pixels` covers what the driver reads for this upload
    ///
    /// An empty slice passes null, which only allocates.
    #[allow(clippy::too_many_arguments)]
    fn pixels_fit(
        &self,
        call: &'static str,
        format: GLenum,
        ty: GLenum,
        width: i32,
        height: i32,
        depth: i32,
        pixels: &[u8],
    ) -> bool {
        if pixels.is_empty() || width <= 0 || height <= 0 || depth <= 0 {
            return true;
        }
        let Some(layout) = pixel_layout(format, ty) else {
            error!(call, format, ty, "Unknown pixel layout, upload skipped");
            return false;
        };
        let needed = unpack_len(
            layout,
            width as usize,
            height as usize * depth as usize,
            self.unpack_row_length.get().max(0) as usize,
            self.unpack_alignment.get().max(1) as usize,
        );
        if pixels.len() < needed {
            error!(call, needed, got = pixels.len(), "Pixel data too short, upload skipped");
            return false;
        }
        true
    }
}

impl Gl for NativeGl {
    fn functions(&self) -> &ExtensionFunctions {
        &self.functions
    }

    fn get_string(&self, name: GLenum) -> Option<String> {
        // SAFETY: context is current (see `load`); the result is NUL-terminated
        // or null.
        unsafe {
            let ptr = (self.core.get_string)(name);
            if ptr.is_null() {
                return None;
            }
            Some(
                CStr::from_ptr(ptr as *const c_char)
                    .to_string_lossy()
                    .into_owned(),
            )
        }
    }

    fn get_integer(&self, pname: GLenum) -> i32 {
        let mut value = 0;
        // SAFETY: single-value queries write one GLint.
        unsafe { (self.core.get_integerv)(pname, &mut value) };
        value
    }

    fn pixel_store_i(&self, pname: GLenum, param: i32) {
        match pname {
            GL_UNPACK_ALIGNMENT => self.unpack_alignment.set(param),
            GL_UNPACK_ROW_LENGTH => self.unpack_row_length.set(param),
            _ => {}
        }
        unsafe { (self.core.pixel_storei)(pname, param) }
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
        if !self.pixels_fit("glTexImage1D", format, ty, width, 1, 1, pixels) {
            return;
        }
        unsafe {
            (self.core.tex_image_1d)(
                target,
                0,
                internal_format as i32,
                width,
                0,
                format,
                ty,
                data_ptr(pixels),
            )
        }
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
        if !self.pixels_fit("glTexImage2D", format, ty, width, height, 1, pixels) {
            return;
        }
        unsafe {
            (self.core.tex_image_2d)(
                target,
                0,
                internal_format as i32,
                width,
                height,
                0,
                format,
                ty,
                data_ptr(pixels),
            )
        }
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
        if !self.pixels_fit("glTexSubImage2D", format, ty, width, height, 1, pixels) {
            return;
        }
        unsafe {
            (self.core.tex_sub_image_2d)(
                target,
                0,
                x,
                y,
                width,
                height,
                format,
                ty,
                data_ptr(pixels),
            )
        }
    }

    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, param: i32) {
        unsafe { (self.core.tex_parameteri)(target, pname, param) }
    }

    fn tex_parameter_f(&self, target: GLenum, pname: GLenum, param: f32) {
        unsafe { (self.core.tex_parameterf)(target, pname, param) }
    }

    fn tex_parameter_fv(&self, target: GLenum, pname: GLenum, params: &[f32; 4]) {
        unsafe { (self.core.tex_parameterfv)(target, pname, params.as_ptr()) }
    }

    fn enable(&self, cap: GLenum) {
        unsafe { (self.core.enable)(cap) }
    }

    fn disable(&self, cap: GLenum) {
        unsafe { (self.core.disable)(cap) }
    }

    fn begin(&self, mode: GLenum) {
        unsafe { (self.core.begin)(mode) }
    }

    fn end(&self) {
        unsafe { (self.core.end)() }
    }

    fn tex_coord_2f(&self, s: f32, t: f32) {
        unsafe { (self.core.tex_coord_2f)(s, t) }
    }

    fn vertex_2f(&self, x: f32, y: f32) {
        unsafe { (self.core.vertex_2f)(x, y) }
    }

    fn active_texture(&self, unit: GLenum) {
        if let Some(f) = ext_fn!(self, ActiveTexture, ActiveTextureFn) {
            unsafe { f(unit) }
        }
    }

    fn multi_tex_coord_2f(&self, unit: GLenum, s: f32, t: f32) {
        if let Some(f) = ext_fn!(self, MultiTexCoord2f, MultiTexCoord2fFn) {
            unsafe { f(unit, s, t) }
        }
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
        if !self.pixels_fit("glTexImage3D", format, ty, width, height, depth, pixels) {
            return;
        }
        if let Some(f) = ext_fn!(self, TexImage3D, TexImage3DFn) {
            unsafe {
                f(
                    target,
                    0,
                    internal_format as i32,
                    width,
                    height,
                    depth,
                    0,
                    format,
                    ty,
                    data_ptr(pixels),
                )
            }
        }
    }

    fn combiner_parameter_fv(&self, pname: GLenum, params: &[f32; 4]) {
        if let Some(f) = ext_fn!(self, CombinerParameterfv, CombinerParameterfvFn) {
            unsafe { f(pname, params.as_ptr()) }
        }
    }

    fn combiner_parameter_i(&self, pname: GLenum, param: i32) {
        if let Some(f) = ext_fn!(self, CombinerParameteri, CombinerParameteriFn) {
            unsafe { f(pname, param) }
        }
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
        if let Some(f) = ext_fn!(self, CombinerInput, CombinerInputFn) {
            unsafe { f(stage, portion, variable, input, mapping, component_usage) }
        }
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
        if let Some(f) = ext_fn!(self, CombinerOutput, CombinerOutputFn) {
            unsafe {
                f(
                    stage,
                    portion,
                    ab_output,
                    cd_output,
                    sum_output,
                    scale,
                    bias,
                    gl_bool(ab_dot_product),
                    gl_bool(cd_dot_product),
                    gl_bool(mux_sum),
                )
            }
        }
    }

    fn begin_fragment_shader(&self) {
        if let Some(f) = ext_fn!(self, BeginFragmentShader, VoidFn) {
            unsafe { f() }
        }
    }

    fn end_fragment_shader(&self) {
        if let Some(f) = ext_fn!(self, EndFragmentShader, VoidFn) {
            unsafe { f() }
        }
    }

    fn sample_map(&self, dst: GLenum, interp: GLenum, swizzle: GLenum) {
        if let Some(f) = ext_fn!(self, SampleMap, SampleMapFn) {
            unsafe { f(dst, interp, swizzle) }
        }
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
        if let Some(f) = ext_fn!(self, ColorFragmentOp2, ColorFragmentOp2Fn) {
            unsafe {
                f(
                    op, dst, dst_mask, dst_mod, arg1[0], arg1[1], arg1[2], arg2[0], arg2[1],
                    arg2[2],
                )
            }
        }
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
        if let Some(f) = ext_fn!(self, ColorFragmentOp3, ColorFragmentOp3Fn) {
            unsafe {
                f(
                    op, dst, dst_mask, dst_mod, arg1[0], arg1[1], arg1[2], arg2[0], arg2[1],
                    arg2[2], arg3[0], arg3[1], arg3[2],
                )
            }
        }
    }

    fn set_fragment_shader_constant(&self, dst: GLenum, value: &[f32; 4]) {
        if let Some(f) = ext_fn!(self, SetFragmentShaderConstant, SetFragmentShaderConstantFn) {
            unsafe { f(dst, value.as_ptr()) }
        }
    }

    fn gen_program(&self) -> u32 {
        let mut program = 0;
        if let Some(f) = ext_fn!(self, GenPrograms, GenProgramsFn) {
            unsafe { f(1, &mut program) }
        }
        program
    }

    fn delete_program(&self, program: u32) {
        if let Some(f) = ext_fn!(self, DeletePrograms, DeleteProgramsFn) {
            unsafe { f(1, &program) }
        }
    }

    fn bind_program(&self, target: GLenum, program: u32) {
        if let Some(f) = ext_fn!(self, BindProgram, BindProgramFn) {
            unsafe { f(target, program) }
        }
    }

    fn program_string(&self, target: GLenum, format: GLenum, source: &str) {
        if let Some(f) = ext_fn!(self, ProgramString, ProgramStringFn) {
            unsafe {
                f(
                    target,
                    format,
                    source.len() as i32,
                    source.as_ptr() as *const c_void,
                )
            }
        }
    }

    fn get_program_iv(&self, target: GLenum, pname: GLenum) -> i32 {
        let mut value = 0;
        if let Some(f) = ext_fn!(self, GetProgramiv, GetProgramivFn) {
            unsafe { f(target, pname, &mut value) }
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::ProcAddress;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static UPLOADS: AtomicUsize = AtomicUsize::new(0);

    unsafe extern "system" fn fake_get_string(_: GLenum) -> *const u8 {
        std::ptr::null()
    }

    unsafe extern "system" fn fake_pixel_storei(_: GLenum, _: i32) {}

    unsafe extern "system" fn fake_tex_image_2d(
        _: GLenum,
        _: i32,
        _: i32,
        _: i32,
        _: i32,
        _: i32,
        _: GLenum,
        _: GLenum,
        _: *const c_void,
    ) {
        UPLOADS.fetch_add(1, Ordering::SeqCst);
    }

    unsafe extern "system" fn never_called() {}

    fn fake_entry_point(name: &str) -> Option<ProcAddress> {
        let ptr = match name {
            "glGetString" => fake_get_string as *const c_void,
            "glPixelStorei" => fake_pixel_storei as *const c_void,
            "glTexImage2D" | "glTexSubImage2D" => fake_tex_image_2d as *const c_void,
            _ => never_called as *const c_void,
        };
        ProcAddress::from_ptr(ptr)
    }

    #[test]
    fn test_pixel_layout() {
        assert_eq!(pixel_layout(GL_RGB, GL_UNSIGNED_BYTE), Some((3, 1)));
        assert_eq!(pixel_layout(GL_RGBA, GL_FLOAT), Some((16, 4)));
        assert_eq!(pixel_layout(GL_BGRA, GL_UNSIGNED_SHORT_1_5_5_5_REV), Some((2, 2)));
        assert_eq!(pixel_layout(GL_RGB, GL_2_BYTES), None);
        // 34 RGB texels with 2-byte alignment need no padding
        assert_eq!(unpack_len((3, 1), 34, 2, 0, 2), 204);
        assert_eq!(unpack_len((3, 1), 3, 2, 0, 4), 21);
    }

    #[test]
    fn test_short_pixel_slices_are_not_dispatched() {
        // SAFETY: the fakes match the GL signatures they stand in for.
        let gl = unsafe { NativeGl::load(&fake_entry_point, None) }.unwrap();

        gl.tex_image_2d(GL_TEXTURE_2D, 3, 4, 4, GL_RGB, GL_UNSIGNED_BYTE, &[0; 47]);
        assert_eq!(UPLOADS.load(Ordering::SeqCst), 0);
        gl.tex_image_2d(GL_TEXTURE_2D, 3, 4, 4, GL_RGB, GL_UNSIGNED_BYTE, &[0; 48]);
        assert_eq!(UPLOADS.load(Ordering::SeqCst), 1);

        gl.pixel_store_i(GL_UNPACK_ROW_LENGTH, 8);
        gl.tex_sub_image_2d(GL_TEXTURE_2D, 0, 0, 4, 2, GL_RGB, GL_UNSIGNED_BYTE, &[0; 30]);
        assert_eq!(UPLOADS.load(Ordering::SeqCst), 1);
        gl.tex_sub_image_2d(GL_TEXTURE_2D, 0, 0, 4, 2, GL_RGB, GL_UNSIGNED_BYTE, &[0; 36]);
        assert_eq!(UPLOADS.load(Ordering::SeqCst), 2);

        gl.tex_sub_image_2d(GL_TEXTURE_2D, 0, 0, 1, 1, GL_RGB, GL_2_BYTES, &[0; 64]);
        assert_eq!(UPLOADS.load(Ordering::SeqCst), 2);
        gl.tex_image_2d(GL_TEXTURE_2D, 3, 4, 4, GL_RGB, GL_UNSIGNED_BYTE, &[]);
        assert_eq!(UPLOADS.load(Ordering::SeqCst), 3);
    }
}
