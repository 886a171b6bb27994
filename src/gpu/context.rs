// SPDX-License-Identifier: GPL-3.0-only

//! Context lifecycle interface
//!
//! The conversion core never creates contexts. It relies on a
//! [`GraphicsContext`] to bind one to a window and to tell it, through
//! [`ContextStatus::Reinit`], when the capability table has to be rebuilt.

use super::extensions::ExtensionFunctions;
use super::loader::{OfflineResolver, ProcResolver};
use std::cell::Cell;
use tracing::{debug, warn};

/// Native window identifier (an X11 `Window`, a Win32 `HWND`, ...)
pub type WindowHandle = u64;

/// Outcome of binding a context to a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextStatus {
    /// No usable context; nothing changed
    Failed,
    /// The existing context was kept; resolved functions stay valid
    Ok,
    /// A new context is current; capability resolution must run again
    Reinit,
}

impl ContextStatus {
    pub fn needs_reinit(self) -> bool {
        self == ContextStatus::Reinit
    }
}

/// A GL context bound to a native window
pub trait GraphicsContext {
    /// Acquire a context for `window`, or transfer the current one to it
    fn set_window(&mut self, window: WindowHandle) -> ContextStatus;

    /// Finish pending work, unbind and destroy the context
    fn release(&mut self);

    fn swap_buffers(&self);

    /// Name resolver valid for the current context
    fn resolver(&self) -> &dyn ProcResolver;

    /// Extension names reported by the window system rather than the driver
    fn extra_extensions(&self) -> Option<&str>;

    /// Rebuild a capability table for the current context
    fn resolve_functions(&self, driver_extensions: Option<&str>) -> ExtensionFunctions {
        ExtensionFunctions::resolve(
            Some(self.resolver()),
            driver_extensions,
            self.extra_extensions(),
        )
    }
}

/// Context without a window system
///
/// Behaves like a windowed context for lifecycle purposes: the first window
/// gets a fresh context (`Reinit`), the same window again keeps it (`Ok`), a
/// different window forces a new one. Window `0` is invalid. Names resolve
/// through an [`OfflineResolver`].
#[derive(Debug, Default)]
pub struct OfflineContext {
    window: Option<WindowHandle>,
    resolver: OfflineResolver,
    extra_extensions: Option<String>,
    swaps: Cell<u64>,
}

impl OfflineContext {
    pub fn new(resolver: OfflineResolver, extra_extensions: Option<String>) -> Self {
        Self {
            window: None,
            resolver,
            extra_extensions,
            swaps: Cell::new(0),
        }
    }

    pub fn window(&self) -> Option<WindowHandle> {
        self.window
    }

    /// Number of presented frames
    pub fn swap_count(&self) -> u64 {
        self.swaps.get()
    }
}

impl GraphicsContext for OfflineContext {
    fn set_window(&mut self, window: WindowHandle) -> ContextStatus {
        if window == 0 {
            warn!("Cannot bind a context to window 0");
            return ContextStatus::Failed;
        }
        if self.window == Some(window) {
            return ContextStatus::Ok;
        }
        debug!(window, "Offline context (re)created");
        self.window = Some(window);
        ContextStatus::Reinit
    }

    fn release(&mut self) {
        self.window = None;
    }

    fn swap_buffers(&self) {
        if self.window.is_some() {
            self.swaps.set(self.swaps.get() + 1);
        }
    }

    fn resolver(&self) -> &dyn ProcResolver {
        &self.resolver
    }

    fn extra_extensions(&self) -> Option<&str> {
        self.extra_extensions.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::extensions::ExtFunc;

    #[test]
    fn test_lifecycle_statuses() {
        let mut ctx = OfflineContext::default();
        assert_eq!(ctx.set_window(0), ContextStatus::Failed);
        assert_eq!(ctx.set_window(7), ContextStatus::Reinit);
        assert_eq!(ctx.set_window(7), ContextStatus::Ok);
        assert!(ctx.set_window(9).needs_reinit());
        ctx.release();
        assert_eq!(ctx.window(), None);
        assert_eq!(ctx.set_window(9), ContextStatus::Reinit);
    }

    #[test]
    fn test_swaps_only_counted_with_window() {
        let mut ctx = OfflineContext::default();
        ctx.swap_buffers();
        ctx.set_window(1);
        ctx.swap_buffers();
        assert_eq!(ctx.swap_count(), 1);
    }

    #[test]
    fn test_extra_extensions_reach_resolver() {
        let ctx = OfflineContext::new(
            OfflineResolver::all(),
            Some("GLX_SGI_swap_control".to_string()),
        );
        let table = ctx.resolve_functions(Some("GL_ARB_multitexture"));
        assert!(table.is_available(ExtFunc::SwapInterval));
        assert!(table.has_extension("GL_ARB_multitexture"));
    }
}
