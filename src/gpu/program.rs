// SPDX-License-Identifier: GPL-3.0-only

//! Fragment program submission

use super::api::Gl;
use super::extensions::ExtFunc;
use crate::constants::*;
use crate::errors::{GlError, GlResult};
use tracing::{Level, debug, error};

/// Load `source` into the program currently bound to `target`
///
/// Fails with [`GlError::Compile`] if the driver reports an error position.
/// Resource usage is logged at debug level when the driver can report it.
pub fn load_gpu_program(gl: &dyn Gl, target: GLenum, source: &str) -> GlResult<()> {
    if !gl.functions().is_available(ExtFunc::ProgramString) {
        error!("Missing GPU program function");
        return Err(GlError::capability("GPU program", ExtFunc::ProgramString.name()));
    }

    gl.program_string(target, GL_PROGRAM_FORMAT_ASCII, source);
    let position = gl.get_integer(GL_PROGRAM_ERROR_POSITION);
    if position != -1 {
        let message = gl.get_string(GL_PROGRAM_ERROR_STRING).unwrap_or_default();
        let context = usize::try_from(position)
            .ok()
            .and_then(|pos| source.as_bytes().get(pos..))
            .map(|rest| String::from_utf8_lossy(&rest[..rest.len().min(10)]).into_owned())
            .unwrap_or_default();
        error!(
            position,
            message = %message,
            context = %context,
            "Error compiling fragment program, make sure your card supports GL_ARB_fragment_program"
        );
        return Err(GlError::Compile {
            position,
            message,
            context,
        });
    }

    if gl.functions().is_available(ExtFunc::GetProgramiv) && tracing::enabled!(Level::DEBUG) {
        for (name, cur, max) in PROGRAM_STATS {
            let used = gl.get_program_iv(target, cur);
            let limit = gl.get_program_iv(target, max);
            debug!(stat = name, used, limit, "Program statistics");
        }
    }
    Ok(())
}
