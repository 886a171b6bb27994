// SPDX-License-Identifier: GPL-3.0-only

//! Entry-point name resolution
//!
//! A [`ProcResolver`] turns a symbol name such as `glProgramStringARB` into an
//! address. Resolvers come from the platform context (`glXGetProcAddress`,
//! `wglGetProcAddress`), from the dynamic linker, or from test fakes.

#[cfg(unix)]
use std::ffi::CString;
use std::ffi::c_void;
use std::ptr::NonNull;

/// Address of a resolved GL entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcAddress(NonNull<c_void>);

impl ProcAddress {
    /// Wrap a raw address, `None` for null
    pub fn from_ptr(ptr: *const c_void) -> Option<Self> {
        NonNull::new(ptr as *mut c_void).map(Self)
    }

    /// Placeholder address for drivers that never dispatch through it
    pub fn placeholder() -> Self {
        Self(NonNull::dangling())
    }

    pub fn as_ptr(self) -> *const c_void {
        self.0.as_ptr()
    }
}

/// Resolves GL symbol names to entry points
pub trait ProcResolver {
    fn resolve(&self, name: &str) -> Option<ProcAddress>;
}

impl<F> ProcResolver for F
where
    F: Fn(&str) -> Option<ProcAddress>,
{
    fn resolve(&self, name: &str) -> Option<ProcAddress> {
        self(name)
    }
}

/// Resolver backed by the dynamic linker's global symbol scope
///
/// Works for any GL library already loaded into the process. Used as the last
/// resort when the window system offers no `GetProcAddress`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DlResolver;

impl ProcResolver for DlResolver {
    #[cfg(unix)]
    fn resolve(&self, name: &str) -> Option<ProcAddress> {
        let name = CString::new(name).ok()?;
        // SAFETY: dlsym with RTLD_DEFAULT only reads the NUL-terminated name.
        let ptr = unsafe { libc::dlsym(libc::RTLD_DEFAULT, name.as_ptr()) };
        ProcAddress::from_ptr(ptr as *const c_void)
    }

    #[cfg(not(unix))]
    fn resolve(&self, _name: &str) -> Option<ProcAddress> {
        None
    }
}

/// Resolver for the recording driver
///
/// Answers every symbol (or only those whose name contains one of the
/// allowed fragments) with a placeholder address. The recording driver
/// never calls through these addresses; only their presence matters.
#[derive(Debug, Default, Clone)]
pub struct OfflineResolver {
    allowed: Option<Vec<String>>,
}

impl OfflineResolver {
    /// Resolve every symbol
    pub fn all() -> Self {
        Self { allowed: None }
    }

    /// Resolve only symbols containing one of `fragments`
    pub fn only<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: Some(fragments.into_iter().map(Into::into).collect()),
        }
    }
}

impl ProcResolver for OfflineResolver {
    fn resolve(&self, name: &str) -> Option<ProcAddress> {
        match &self.allowed {
            None => Some(ProcAddress::placeholder()),
            Some(allowed) if allowed.iter().any(|a| name.contains(a.as_str())) => {
                Some(ProcAddress::placeholder())
            }
            Some(_) => None,
        }
    }
}
