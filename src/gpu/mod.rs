// SPDX-License-Identifier: GPL-3.0-only

//! GL dispatch, capability resolution and context plumbing
//!
//! Everything that talks to the driver goes through the [`Gl`] trait. The
//! conversion code is written against it and runs unchanged on the
//! [`NativeGl`] driver and the [`RecordingGl`] double.

mod api;
mod context;
mod extensions;
#[cfg(all(feature = "glx", target_os = "linux"))]
mod glx;
mod loader;
mod native;
mod program;
mod recording;
mod texture;

pub use api::Gl;
pub use context::{ContextStatus, GraphicsContext, OfflineContext, WindowHandle};
pub use extensions::{ExtFunc, ExtFuncDesc, ExtensionFunctions};
#[cfg(all(feature = "glx", target_os = "linux"))]
pub use glx::{GlxContext, GlxResolver};
pub use loader::{DlResolver, OfflineResolver, ProcAddress, ProcResolver};
pub use native::NativeGl;
pub use program::load_gpu_program;
pub use recording::{GlCall, RecordingGl};
pub use texture::{
    PpmInfo, TextureRect, alignment_for, create_clear_texture, create_ppm_texture, draw_texture,
    set_alignment, upload_frame, upload_region,
};
