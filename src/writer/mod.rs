//! Source emission: serializes an assembled [`Program`] to target-language
//! text. HLSL and Cg share the semantic-annotated emitter; GLSL has its own
//! shape (no parameter semantics in the language).

mod glsl;
mod hlsl;

use std::fmt::Write;

use log::debug;

use crate::program::Program;
use crate::types::TargetLanguage;

pub struct ProgramWriter {
    target_language: TargetLanguage,
}

impl ProgramWriter {
    pub fn new(target_language: TargetLanguage) -> Self {
        Self { target_language }
    }

    pub fn target_language(&self) -> TargetLanguage {
        self.target_language
    }

    /// Emit one complete translation unit for `program`.
    ///
    /// Takes the program mutably: each function's atoms are sorted into
    /// execution order before their source is written.
    pub fn write_source_code(&self, out: &mut String, program: &mut Program) {
        for function in program.functions_mut() {
            function.sort_atom_instances();
        }

        match self.target_language {
            TargetLanguage::Hlsl | TargetLanguage::Cg => {
                hlsl::write_program(out, program, self.target_language)
            }
            TargetLanguage::Glsl => glsl::write_program(out, program),
        }

        debug!(
            "emitted {} source for program {} ({} bytes)",
            self.target_language.display_name(),
            program.name(),
            out.len()
        );
    }
}

const TITLE_RULE: &str =
    "//-----------------------------------------------------------------------------\n";

/// Shared title comment block naming the stage type and target language.
fn write_program_title(out: &mut String, program: &Program, language: TargetLanguage) {
    out.push_str(TITLE_RULE);
    writeln!(out, "// Program Type: {}", program.shader_type().display_name()).ok();
    writeln!(out, "// Language: {}", language.display_name()).ok();
    writeln!(out, "// Program Name: {}", program.name()).ok();
    if !program.description().is_empty() {
        writeln!(out, "// Description: {}", program.description()).ok();
    }
    out.push_str(TITLE_RULE);
    out.push('\n');
}

fn write_function_title(out: &mut String, name: &str, description: &str) {
    out.push_str(TITLE_RULE);
    writeln!(out, "// Function: {name}").ok();
    if !description.is_empty() {
        writeln!(out, "// Description: {description}").ok();
    }
    out.push_str(TITLE_RULE);
}
