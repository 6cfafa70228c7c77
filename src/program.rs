//! One compilable shader stage: global (uniform) parameters, dependency
//! includes, and the functions that make up the stage body.

use std::rc::Rc;

use log::{debug, trace};

use crate::error::{GenError, Result};
use crate::function::Function;
use crate::parameter::{Parameter, ParameterPtr};
use crate::types::{AutoConstant, AutoConstantData, AutoConstantType, Content, NumericType, Semantic, ShaderType};

pub struct Program {
    name: String,
    description: String,
    shader_type: ShaderType,
    parameters: Vec<ParameterPtr>,
    functions: Vec<Function>,
    dependencies: Vec<String>,
}

impl Program {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        shader_type: ShaderType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            shader_type,
            parameters: Vec::new(),
            functions: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn shader_type(&self) -> ShaderType {
        self.shader_type
    }

    pub fn parameters(&self) -> &[ParameterPtr] {
        &self.parameters
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut [Function] {
        &mut self.functions
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Register a global parameter. Names are unique within a program.
    pub fn add_parameter(&mut self, param: ParameterPtr) -> Result<()> {
        if self.parameters.iter().any(|p| p.name() == param.name()) {
            return Err(GenError::DuplicateParameterName {
                name: param.name().to_string(),
                owner: self.name.clone(),
            });
        }
        trace!("program {}: added parameter {}", self.name, param.name());
        self.parameters.push(param);
        Ok(())
    }

    /// Remove by identity; absent parameter is a no-op.
    pub fn remove_parameter(&mut self, param: &ParameterPtr) {
        self.parameters.retain(|p| !Rc::ptr_eq(p, param));
    }

    /// Get-or-create a global parameter auto-bound to an engine constant with
    /// a real payload. Reuse requires the same auto type and identical
    /// payload; distinct payloads coexist as distinct parameters.
    pub fn resolve_auto_parameter_real(
        &mut self,
        auto_type: AutoConstantType,
        data: f32,
    ) -> Result<ParameterPtr> {
        self.resolve_auto(AutoConstant {
            auto_type,
            data: AutoConstantData::Real(data),
        })
    }

    /// Integer-payload counterpart of [`resolve_auto_parameter_real`].
    ///
    /// [`resolve_auto_parameter_real`]: Program::resolve_auto_parameter_real
    pub fn resolve_auto_parameter_int(
        &mut self,
        auto_type: AutoConstantType,
        data: u32,
    ) -> Result<ParameterPtr> {
        self.resolve_auto(AutoConstant {
            auto_type,
            data: AutoConstantData::Int(data),
        })
    }

    fn resolve_auto(&mut self, auto_constant: AutoConstant) -> Result<ParameterPtr> {
        if let Some(existing) = self
            .parameters
            .iter()
            .find(|p| p.auto_constant() == Some(auto_constant))
        {
            return Ok(Rc::clone(existing));
        }

        let base = auto_constant.auto_type.uniform_name();
        let name = if auto_constant.data.is_zero() {
            base.to_string()
        } else {
            // Payload becomes part of the name so same-type constants with
            // different payloads can coexist.
            let suffix = match auto_constant.data {
                AutoConstantData::Real(v) => v.to_string().replace(['.', '-'], "_"),
                AutoConstantData::Int(v) => v.to_string(),
            };
            format!("{base}_{suffix}")
        };

        let param = Rc::new(Parameter::auto(name, auto_constant));
        self.add_parameter(Rc::clone(&param))?;
        Ok(param)
    }

    /// Get-or-create a plain (non-auto) global parameter by `(type, index)`.
    ///
    /// `index == -1` requests the next free index among same-typed non-auto
    /// parameters. New parameters are named `suggested_name` + index. An
    /// existing parameter already holding the generated name with a different
    /// type is a type mismatch.
    pub fn resolve_parameter(
        &mut self,
        numeric_type: NumericType,
        index: i32,
        suggested_name: &str,
    ) -> Result<ParameterPtr> {
        let index = if index < 0 {
            self.parameters
                .iter()
                .filter(|p| !p.is_auto() && p.numeric_type() == numeric_type)
                .count() as i32
        } else {
            if let Some(existing) = self.parameters.iter().find(|p| {
                !p.is_auto() && p.numeric_type() == numeric_type && p.index() == index
            }) {
                return Ok(Rc::clone(existing));
            }
            index
        };

        let name = format!("{suggested_name}{index}");
        if let Some(existing) = self.parameters.iter().find(|p| p.name() == name) {
            return Err(GenError::ParameterTypeMismatch {
                name,
                requested: numeric_type,
                existing: existing.numeric_type(),
                owner: self.name.clone(),
            });
        }

        let param = Rc::new(Parameter::new(
            name,
            Semantic::Unknown,
            Content::Unknown,
            numeric_type,
            index,
        ));
        self.add_parameter(Rc::clone(&param))?;
        Ok(param)
    }

    pub fn get_parameter_by_name(&self, name: &str) -> Option<&ParameterPtr> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    pub fn get_parameter_by_type(
        &self,
        numeric_type: NumericType,
        index: i32,
    ) -> Option<&ParameterPtr> {
        self.parameters
            .iter()
            .find(|p| !p.is_auto() && p.numeric_type() == numeric_type && p.index() == index)
    }

    pub fn get_parameter_by_auto_type(
        &self,
        auto_type: AutoConstantType,
    ) -> Option<&ParameterPtr> {
        self.parameters
            .iter()
            .find(|p| p.auto_constant().is_some_and(|ac| ac.auto_type == auto_type))
    }

    /// Create and register a function. Function names are unique within a
    /// program.
    pub fn create_function(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<&mut Function> {
        let name = name.into();
        if self.functions.iter().any(|f| f.name() == name) {
            return Err(GenError::DuplicateFunctionName {
                name,
                program: self.name.clone(),
            });
        }
        debug!("program {}: created function {name}", self.name);
        self.functions.push(Function::new(name, description));
        Ok(self.functions.last_mut().expect("just pushed"))
    }

    pub fn get_function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name() == name)
    }

    pub fn get_function_mut(&mut self, name: &str) -> Option<&mut Function> {
        self.functions.iter_mut().find(|f| f.name() == name)
    }

    /// Append a dependency include name; duplicates are suppressed and
    /// first-seen order is preserved.
    pub fn add_dependency(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.dependencies.iter().any(|d| *d == name) {
            self.dependencies.push(name);
        }
    }
}
