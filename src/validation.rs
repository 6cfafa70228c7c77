//! GLSL validation using the naga library.
//!
//! The writer's output is handed to an external shader compiler in
//! production; these helpers let tests (and callers who want an early check)
//! prove emitted GLSL is syntactically sound without a GPU.

use anyhow::{Context, Result, anyhow};

use crate::types::ShaderType;

fn naga_stage(stage: ShaderType) -> Result<naga::ShaderStage> {
    match stage {
        ShaderType::Vertex => Ok(naga::ShaderStage::Vertex),
        ShaderType::Fragment => Ok(naga::ShaderStage::Fragment),
        ShaderType::Compute => Ok(naga::ShaderStage::Compute),
        other => Err(anyhow!("naga has no GLSL frontend for {other:?} stages")),
    }
}

/// Parse GLSL source with naga's GLSL frontend.
///
/// Returns the parsed module on success, or an error carrying the
/// line-numbered source on failure.
pub fn validate_glsl(source: &str, stage: ShaderType) -> Result<naga::Module> {
    let options = naga::front::glsl::Options {
        stage: naga_stage(stage)?,
        defines: Default::default(),
    };
    naga::front::glsl::Frontend::default()
        .parse(&options, source)
        .map_err(|e| anyhow!("GLSL validation failed:\n{}", format_parse_error(source, &e)))
}

/// Validate GLSL and name the program that generated it in the error.
pub fn validate_glsl_with_context(
    source: &str,
    stage: ShaderType,
    context: &str,
) -> Result<naga::Module> {
    validate_glsl(source, stage).with_context(|| format!("{context} generated invalid GLSL"))
}

/// Cross-compile emitted GLSL to WGSL, running naga's full validator in
/// between.
pub fn glsl_to_wgsl(source: &str, stage: ShaderType) -> Result<String> {
    let module = validate_glsl(source, stage)?;

    let info = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| anyhow!("GLSL validation failed: {e:?}"))?;

    naga::back::wgsl::write_string(
        &module,
        &info,
        naga::back::wgsl::WriterFlags::EXPLICIT_TYPES,
    )
    .map_err(|e| anyhow!("WGSL writer failed: {e:?}"))
}

/// Format a naga parse error with line-numbered source for easier debugging.
fn format_parse_error(source: &str, error: &impl std::fmt::Debug) -> String {
    let mut output = String::new();
    output.push_str(&format!("  {error:?}\n"));
    output.push_str("\nGenerated GLSL:\n---\n");
    for (line_num, line) in source.lines().enumerate() {
        output.push_str(&format!("{:4} | {}\n", line_num + 1, line));
    }
    output.push_str("---\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_glsl_parses() {
        let source = r#"#version 450

layout(location = 0) in vec4 i_position_0;

void main() {
    gl_Position = i_position_0;
}
"#;
        assert!(validate_glsl(source, ShaderType::Vertex).is_ok());
    }

    #[test]
    fn invalid_glsl_is_rejected() {
        let source = "#version 450\nvoid main( { }\n";
        assert!(validate_glsl(source, ShaderType::Vertex).is_err());
    }

    #[test]
    fn glsl_cross_compiles_to_wgsl() {
        let source = r#"#version 450

layout(location = 0) in vec4 i_position_0;

void main() {
    gl_Position = i_position_0;
}
"#;
        let wgsl = glsl_to_wgsl(source, ShaderType::Vertex).unwrap();
        assert!(wgsl.contains("fn main"));
    }

    #[test]
    fn context_is_attached_to_failures() {
        let result = validate_glsl_with_context("not glsl", ShaderType::Fragment, "test program");
        let err_msg = format!("{:#}", result.unwrap_err());
        assert!(err_msg.contains("test program"));
    }
}
