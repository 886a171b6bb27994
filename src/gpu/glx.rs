// SPDX-License-Identifier: GPL-3.0-only

//! GLX implementation of [`GraphicsContext`]

use super::context::{ContextStatus, GraphicsContext, WindowHandle};
use super::loader::{DlResolver, ProcAddress, ProcResolver};
use std::ffi::{CStr, CString, c_void};
use std::ptr;
use tracing::{debug, error};
use x11::{glx, xlib};

type GetProcAddressFn = unsafe extern "C" fn(*const u8) -> *const c_void;
type FinishFn = unsafe extern "C" fn();

/// Resolves through `glXGetProcAddress(ARB)`, or the dynamic linker if the
/// GL library exports neither
#[derive(Debug, Default, Clone, Copy)]
pub struct GlxResolver {
    get_proc_address: Option<GetProcAddressFn>,
}

impl GlxResolver {
    pub fn detect() -> Self {
        let get_proc_address = ["glXGetProcAddress", "glXGetProcAddressARB"]
            .iter()
            .find_map(|name| DlResolver.resolve(name))
            // SAFETY: both symbols share this signature.
            .map(|addr| unsafe {
                std::mem::transmute::<*const c_void, GetProcAddressFn>(addr.as_ptr())
            });
        if get_proc_address.is_none() {
            debug!("glXGetProcAddress unavailable, falling back to dlsym");
        }
        Self { get_proc_address }
    }
}

impl ProcResolver for GlxResolver {
    fn resolve(&self, name: &str) -> Option<ProcAddress> {
        match self.get_proc_address {
            Some(get_proc_address) => {
                let name = CString::new(name).ok()?;
                // SAFETY: reads the NUL-terminated name only.
                let ptr = unsafe { get_proc_address(name.as_ptr() as *const u8) };
                ProcAddress::from_ptr(ptr)
            }
            None => DlResolver.resolve(name),
        }
    }
}

/// A GLX context following an X11 window
pub struct GlxContext {
    display: *mut xlib::Display,
    context: glx::GLXContext,
    visual_id: xlib::VisualID,
    window: WindowHandle,
    size: (u32, u32),
    resolver: GlxResolver,
    extensions: Option<String>,
}

impl GlxContext {
    /// # Safety
    ///
    /// `display` must be an open X connection that outlives the returned
    /// value and is only used from the calling thread.
    pub unsafe fn new(display: *mut xlib::Display) -> Self {
        Self {
            display,
            context: ptr::null_mut(),
            visual_id: 0,
            window: 0,
            size: (0, 0),
            resolver: GlxResolver::detect(),
            extensions: None,
        }
    }

    /// Size of the bound window at the last `set_window`
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    fn finish(&self) {
        if let Some(addr) = self.resolver.resolve("glFinish") {
            // SAFETY: glFinish takes no arguments; a context is current.
            unsafe { std::mem::transmute::<*const c_void, FinishFn>(addr.as_ptr())() }
        }
    }

    /// Visual of `window`; free the result with `XFree`
    unsafe fn visual_info(&self, window: WindowHandle) -> Option<*mut xlib::XVisualInfo> {
        unsafe {
            let mut attrs: xlib::XWindowAttributes = std::mem::zeroed();
            if xlib::XGetWindowAttributes(self.display, window as xlib::Window, &mut attrs) == 0 {
                return None;
            }
            let mut template: xlib::XVisualInfo = std::mem::zeroed();
            template.visualid = xlib::XVisualIDFromVisual(attrs.visual);
            let mut count = 0;
            let info =
                xlib::XGetVisualInfo(self.display, xlib::VisualIDMask, &mut template, &mut count);
            (!info.is_null() && count > 0).then_some(info)
        }
    }

    fn update_geometry(&mut self) {
        let mut root = 0;
        let (mut x, mut y) = (0, 0);
        let (mut width, mut height, mut border, mut depth) = (0, 0, 0, 0);
        // SAFETY: out-pointers are valid locals.
        let ok = unsafe {
            xlib::XGetGeometry(
                self.display,
                self.window as xlib::Drawable,
                &mut root,
                &mut x,
                &mut y,
                &mut width,
                &mut height,
                &mut border,
                &mut depth,
            )
        };
        if ok != 0 {
            self.size = (width, height);
        }
    }

    fn query_extensions(&self) -> Option<String> {
        // SAFETY: display is open; the returned string is owned by Xlib.
        unsafe {
            let screen = xlib::XDefaultScreen(self.display);
            let ptr = glx::glXQueryExtensionsString(self.display, screen);
            (!ptr.is_null()).then(|| CStr::from_ptr(ptr).to_string_lossy().into_owned())
        }
    }
}

impl GraphicsContext for GlxContext {
    fn set_window(&mut self, window: WindowHandle) -> ContextStatus {
        if !self.context.is_null() {
            self.finish();
        }

        // SAFETY: display validity is guaranteed by `new`.
        let Some(vinfo) = (unsafe { self.visual_info(window) }) else {
            error!(window, "No visual info for window");
            return ContextStatus::Failed;
        };
        let visual_id = unsafe { (*vinfo).visualid };

        let mut new_context: glx::GLXContext = ptr::null_mut();
        if self.context.is_null() || visual_id != self.visual_id {
            new_context =
                unsafe { glx::glXCreateContext(self.display, vinfo, ptr::null_mut(), xlib::True) };
        }
        unsafe { xlib::XFree(vinfo as *mut c_void) };
        if new_context.is_null() && (self.context.is_null() || visual_id != self.visual_id) {
            error!(window, "Could not create GLX context");
            return ContextStatus::Failed;
        }

        let current = if new_context.is_null() {
            self.context
        } else {
            new_context
        };
        if unsafe { glx::glXMakeCurrent(self.display, window as xlib::XID, current) } == 0 {
            error!(window, "Could not set GLX context");
            if !new_context.is_null() {
                unsafe { glx::glXDestroyContext(self.display, new_context) };
            }
            return ContextStatus::Failed;
        }

        self.window = window;
        self.update_geometry();
        if new_context.is_null() {
            return ContextStatus::Ok;
        }

        if !self.context.is_null() {
            unsafe { glx::glXDestroyContext(self.display, self.context) };
        }
        self.context = new_context;
        self.visual_id = visual_id;
        self.resolver = GlxResolver::detect();
        self.extensions = self.query_extensions();
        debug!(window, visual_id, width = self.size.0, height = self.size.1, "GLX context created");
        ContextStatus::Reinit
    }

    fn release(&mut self) {
        if self.context.is_null() {
            return;
        }
        self.finish();
        unsafe {
            glx::glXMakeCurrent(self.display, 0, ptr::null_mut());
            glx::glXDestroyContext(self.display, self.context);
        }
        self.context = ptr::null_mut();
        self.visual_id = 0;
    }

    fn swap_buffers(&self) {
        if !self.context.is_null() {
            unsafe { glx::glXSwapBuffers(self.display, self.window as xlib::XID) };
        }
    }

    fn resolver(&self) -> &dyn ProcResolver {
        &self.resolver
    }

    fn extra_extensions(&self) -> Option<&str> {
        self.extensions.as_deref()
    }
}

impl Drop for GlxContext {
    fn drop(&mut self) {
        self.release();
    }
}
