// SPDX-License-Identifier: GPL-3.0-only

//! Capability resolution
//!
//! Builds the table of optional entry points for the current context. Each
//! logical function is gated on an extension substring (if any) and tried
//! under several vendor/ARB symbol names in priority order. The table is
//! owned by whoever owns the context and is rebuilt wholesale after a
//! context change.

use super::loader::{ProcAddress, ProcResolver};
use tracing::debug;

/// Logical optional functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtFunc {
    GenBuffers,
    DeleteBuffers,
    BindBuffer,
    MapBuffer,
    UnmapBuffer,
    BufferData,
    CombinerParameterfv,
    CombinerParameteri,
    CombinerInput,
    CombinerOutput,
    BeginFragmentShader,
    EndFragmentShader,
    SampleMap,
    ColorFragmentOp2,
    ColorFragmentOp3,
    SetFragmentShaderConstant,
    ActiveTexture,
    BindTexture,
    MultiTexCoord2f,
    GenPrograms,
    DeletePrograms,
    BindProgram,
    ProgramString,
    GetProgramiv,
    ProgramEnvParameter4f,
    SwapInterval,
    TexImage3D,
}

impl ExtFunc {
    pub const COUNT: usize = 27;

    /// Every logical function, in table order
    pub const ALL: [ExtFunc; Self::COUNT] = [
        ExtFunc::GenBuffers,
        ExtFunc::DeleteBuffers,
        ExtFunc::BindBuffer,
        ExtFunc::MapBuffer,
        ExtFunc::UnmapBuffer,
        ExtFunc::BufferData,
        ExtFunc::CombinerParameterfv,
        ExtFunc::CombinerParameteri,
        ExtFunc::CombinerInput,
        ExtFunc::CombinerOutput,
        ExtFunc::BeginFragmentShader,
        ExtFunc::EndFragmentShader,
        ExtFunc::SampleMap,
        ExtFunc::ColorFragmentOp2,
        ExtFunc::ColorFragmentOp3,
        ExtFunc::SetFragmentShaderConstant,
        ExtFunc::ActiveTexture,
        ExtFunc::BindTexture,
        ExtFunc::MultiTexCoord2f,
        ExtFunc::GenPrograms,
        ExtFunc::DeletePrograms,
        ExtFunc::BindProgram,
        ExtFunc::ProgramString,
        ExtFunc::GetProgramiv,
        ExtFunc::ProgramEnvParameter4f,
        ExtFunc::SwapInterval,
        ExtFunc::TexImage3D,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Descriptor for this function
    pub fn descriptor(self) -> &'static ExtFuncDesc {
        &EXT_FUNCS[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
}

/// How a logical function is found
#[derive(Debug)]
pub struct ExtFuncDesc {
    pub func: ExtFunc,
    pub name: &'static str,
    /// Substring that must appear in the extension string, `None` for core
    pub extension: Option<&'static str>,
    /// Candidate symbols, tried in order
    pub symbols: &'static [&'static str],
}

const NV_COMBINERS: Option<&str> = Some("NV_register_combiners");
const ATI_SHADER: Option<&str> = Some("ATI_fragment_shader");
const ANY_PROGRAM: Option<&str> = Some("_program");

static EXT_FUNCS: [ExtFuncDesc; ExtFunc::COUNT] = [
    ExtFuncDesc {
        func: ExtFunc::GenBuffers,
        name: "GenBuffers",
        extension: None,
        symbols: &["glGenBuffers", "glGenBuffersARB"],
    },
    ExtFuncDesc {
        func: ExtFunc::DeleteBuffers,
        name: "DeleteBuffers",
        extension: None,
        symbols: &["glDeleteBuffers", "glDeleteBuffersARB"],
    },
    ExtFuncDesc {
        func: ExtFunc::BindBuffer,
        name: "BindBuffer",
        extension: None,
        symbols: &["glBindBuffer", "glBindBufferARB"],
    },
    ExtFuncDesc {
        func: ExtFunc::MapBuffer,
        name: "MapBuffer",
        extension: None,
        symbols: &["glMapBuffer", "glMapBufferARB"],
    },
    ExtFuncDesc {
        func: ExtFunc::UnmapBuffer,
        name: "UnmapBuffer",
        extension: None,
        symbols: &["glUnmapBuffer", "glUnmapBufferARB"],
    },
    ExtFuncDesc {
        func: ExtFunc::BufferData,
        name: "BufferData",
        extension: None,
        symbols: &["glBufferData", "glBufferDataARB"],
    },
    ExtFuncDesc {
        func: ExtFunc::CombinerParameterfv,
        name: "CombinerParameterfv",
        extension: NV_COMBINERS,
        symbols: &["glCombinerParameterfv", "glCombinerParameterfvNV"],
    },
    ExtFuncDesc {
        func: ExtFunc::CombinerParameteri,
        name: "CombinerParameteri",
        extension: NV_COMBINERS,
        symbols: &["glCombinerParameteri", "glCombinerParameteriNV"],
    },
    ExtFuncDesc {
        func: ExtFunc::CombinerInput,
        name: "CombinerInput",
        extension: NV_COMBINERS,
        symbols: &["glCombinerInput", "glCombinerInputNV"],
    },
    ExtFuncDesc {
        func: ExtFunc::CombinerOutput,
        name: "CombinerOutput",
        extension: NV_COMBINERS,
        symbols: &["glCombinerOutput", "glCombinerOutputNV"],
    },
    ExtFuncDesc {
        func: ExtFunc::BeginFragmentShader,
        name: "BeginFragmentShader",
        extension: ATI_SHADER,
        symbols: &["glBeginFragmentShaderATI"],
    },
    ExtFuncDesc {
        func: ExtFunc::EndFragmentShader,
        name: "EndFragmentShader",
        extension: ATI_SHADER,
        symbols: &["glEndFragmentShaderATI"],
    },
    ExtFuncDesc {
        func: ExtFunc::SampleMap,
        name: "SampleMap",
        extension: ATI_SHADER,
        symbols: &["glSampleMapATI"],
    },
    ExtFuncDesc {
        func: ExtFunc::ColorFragmentOp2,
        name: "ColorFragmentOp2",
        extension: ATI_SHADER,
        symbols: &["glColorFragmentOp2ATI"],
    },
    ExtFuncDesc {
        func: ExtFunc::ColorFragmentOp3,
        name: "ColorFragmentOp3",
        extension: ATI_SHADER,
        symbols: &["glColorFragmentOp3ATI"],
    },
    ExtFuncDesc {
        func: ExtFunc::SetFragmentShaderConstant,
        name: "SetFragmentShaderConstant",
        extension: ATI_SHADER,
        symbols: &["glSetFragmentShaderConstantATI"],
    },
    ExtFuncDesc {
        func: ExtFunc::ActiveTexture,
        name: "ActiveTexture",
        extension: None,
        symbols: &["glActiveTexture", "glActiveTextureARB"],
    },
    ExtFuncDesc {
        func: ExtFunc::BindTexture,
        name: "BindTexture",
        extension: None,
        symbols: &["glBindTexture", "glBindTextureARB", "glBindTextureEXT"],
    },
    ExtFuncDesc {
        func: ExtFunc::MultiTexCoord2f,
        name: "MultiTexCoord2f",
        extension: None,
        symbols: &["glMultiTexCoord2f", "glMultiTexCoord2fARB"],
    },
    ExtFuncDesc {
        func: ExtFunc::GenPrograms,
        name: "GenPrograms",
        extension: ANY_PROGRAM,
        symbols: &["glGenPrograms", "glGenProgramsARB", "glGenProgramsNV"],
    },
    ExtFuncDesc {
        func: ExtFunc::DeletePrograms,
        name: "DeletePrograms",
        extension: ANY_PROGRAM,
        symbols: &[
            "glDeletePrograms",
            "glDeleteProgramsARB",
            "glDeleteProgramsNV",
        ],
    },
    ExtFuncDesc {
        func: ExtFunc::BindProgram,
        name: "BindProgram",
        extension: ANY_PROGRAM,
        symbols: &["glBindProgram", "glBindProgramARB", "glBindProgramNV"],
    },
    ExtFuncDesc {
        func: ExtFunc::ProgramString,
        name: "ProgramString",
        extension: ANY_PROGRAM,
        symbols: &["glProgramString", "glProgramStringARB", "glProgramStringNV"],
    },
    ExtFuncDesc {
        func: ExtFunc::GetProgramiv,
        name: "GetProgramiv",
        extension: ANY_PROGRAM,
        symbols: &["glGetProgramiv", "glGetProgramivARB", "glGetProgramivNV"],
    },
    ExtFuncDesc {
        func: ExtFunc::ProgramEnvParameter4f,
        name: "ProgramEnvParameter4f",
        extension: ANY_PROGRAM,
        symbols: &[
            "glProgramEnvParameter4f",
            "glProgramEnvParameter4fARB",
            "glProgramEnvParameter4fNV",
        ],
    },
    ExtFuncDesc {
        func: ExtFunc::SwapInterval,
        name: "SwapInterval",
        extension: Some("_swap_control"),
        symbols: &[
            "glXSwapInterval",
            "glXSwapIntervalEXT",
            "glXSwapIntervalSGI",
            "wglSwapInterval",
            "wglSwapIntervalEXT",
            "wglSwapIntervalSGI",
        ],
    },
    ExtFuncDesc {
        func: ExtFunc::TexImage3D,
        name: "TexImage3D",
        extension: None,
        symbols: &["glTexImage3D"],
    },
];

/// Resolved optional entry points of one context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFunctions {
    entries: [Option<ProcAddress>; ExtFunc::COUNT],
    extensions: String,
}

impl Default for ExtensionFunctions {
    fn default() -> Self {
        Self::empty()
    }
}

impl ExtensionFunctions {
    /// Table with every entry absent
    pub fn empty() -> Self {
        Self {
            entries: [None; ExtFunc::COUNT],
            extensions: String::new(),
        }
    }

    /// Resolve all entries against the combined extension string
    ///
    /// `driver_extensions` is what the driver reports for `GL_EXTENSIONS`;
    /// `extra_extensions` carries names reported through other channels
    /// (e.g. GLX). Without a resolver every entry stays absent. Re-running
    /// with the same inputs yields an identical table.
    pub fn resolve(
        resolver: Option<&dyn ProcResolver>,
        driver_extensions: Option<&str>,
        extra_extensions: Option<&str>,
    ) -> Self {
        let extensions = format!(
            "{} {}",
            driver_extensions.unwrap_or(""),
            extra_extensions.unwrap_or("")
        );
        debug!(extensions = %extensions, "OpenGL extensions string");

        let mut entries = [None; ExtFunc::COUNT];
        if let Some(resolver) = resolver {
            for desc in &EXT_FUNCS {
                let advertised = desc
                    .extension
                    .is_none_or(|required| extensions.contains(required));
                if !advertised {
                    continue;
                }
                entries[desc.func.index()] = desc
                    .symbols
                    .iter()
                    .find_map(|symbol| resolver.resolve(symbol));
            }
        }

        let table = Self {
            entries,
            extensions,
        };
        debug!(
            resolved = table.available().count(),
            total = ExtFunc::COUNT,
            "Resolved optional GL functions"
        );
        table
    }

    pub fn get(&self, func: ExtFunc) -> Option<ProcAddress> {
        self.entries[func.index()]
    }

    pub fn is_available(&self, func: ExtFunc) -> bool {
        self.get(func).is_some()
    }

    /// Entries of `required` that are absent
    pub fn missing(&self, required: &[ExtFunc]) -> Vec<ExtFunc> {
        required
            .iter()
            .copied()
            .filter(|func| !self.is_available(*func))
            .collect()
    }

    /// Resolved entries, in table order
    pub fn available(&self) -> impl Iterator<Item = ExtFunc> + '_ {
        ExtFunc::ALL
            .into_iter()
            .filter(|func| self.is_available(*func))
    }

    /// The combined extension string the table was resolved against
    pub fn extensions(&self) -> &str {
        &self.extensions
    }

    /// Whether `name` appears in the combined extension string
    pub fn has_extension(&self, name: &str) -> bool {
        !name.is_empty() && self.extensions.contains(name)
    }
}
