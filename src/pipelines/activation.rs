// SPDX-License-Identifier: GPL-3.0-only

//! Per-frame enabling of a configured conversion

use crate::constants::*;
use crate::gpu::Gl;
use crate::shaders::ConversionMethod;

/// Fixed-function stage toggled by a combiner method
fn combiner_stage(method: ConversionMethod) -> Option<GLenum> {
    match method {
        ConversionMethod::Combiners => Some(GL_REGISTER_COMBINERS_NV),
        ConversionMethod::CombinersAti => Some(GL_FRAGMENT_SHADER_ATI),
        _ => None,
    }
}

fn toggle(gl: &dyn Gl, target: GLenum, method: ConversionMethod, on: bool) {
    let set = |cap| if on { gl.enable(cap) } else { gl.disable(cap) };
    if let Some(stage) = combiner_stage(method) {
        // chroma planes on units 1 and 2
        gl.active_texture(GL_TEXTURE1);
        set(target);
        gl.active_texture(GL_TEXTURE2);
        set(target);
        gl.active_texture(GL_TEXTURE0);
        set(stage);
    } else if method.is_program() {
        set(GL_FRAGMENT_PROGRAM);
    }
}

/// Turn on the state `method` renders with; no-op for [`ConversionMethod::None`]
pub fn enable_yuv_conversion(gl: &dyn Gl, target: GLenum, method: ConversionMethod) {
    toggle(gl, target, method, true);
}

/// Undo [`enable_yuv_conversion`]
pub fn disable_yuv_conversion(gl: &dyn Gl, target: GLenum, method: ConversionMethod) {
    toggle(gl, target, method, false);
}
