//! A shader function: ordered input/output/local parameter lists plus the
//! atoms that make up its body.

use std::rc::Rc;

use log::{debug, trace};

use crate::atom::FunctionAtom;
use crate::error::{GenError, Result};
use crate::parameter::{Parameter, ParameterFactory, ParameterPtr};
use crate::types::{Content, Direction, NumericType, Semantic};

pub struct Function {
    name: String,
    description: String,
    inputs: Vec<ParameterPtr>,
    outputs: Vec<ParameterPtr>,
    locals: Vec<ParameterPtr>,
    atoms: Vec<Rc<dyn FunctionAtom>>,
    local_ordinal: u32,
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("locals", &self.locals)
            .field("atoms", &self.atoms.len())
            .field("local_ordinal", &self.local_ordinal)
            .finish()
    }
}

impl Function {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            locals: Vec::new(),
            atoms: Vec::new(),
            local_ordinal: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn input_parameters(&self) -> &[ParameterPtr] {
        &self.inputs
    }

    pub fn output_parameters(&self) -> &[ParameterPtr] {
        &self.outputs
    }

    pub fn local_parameters(&self) -> &[ParameterPtr] {
        &self.locals
    }

    pub fn atoms(&self) -> &[Rc<dyn FunctionAtom>] {
        &self.atoms
    }

    /// Get-or-create an input parameter by `(content, type)` or
    /// `(semantic, index)`.
    ///
    /// `index == -1` requests the next free index for the semantic. Returns
    /// `Ok(None)` when the semantic has no factory constructor and no
    /// existing parameter matches.
    pub fn resolve_input_parameter(
        &mut self,
        semantic: Semantic,
        index: i32,
        content: Content,
        numeric_type: NumericType,
    ) -> Result<Option<ParameterPtr>> {
        self.resolve_directed(Direction::In, semantic, index, content, numeric_type)
    }

    /// Output-list counterpart of [`resolve_input_parameter`].
    ///
    /// [`resolve_input_parameter`]: Function::resolve_input_parameter
    pub fn resolve_output_parameter(
        &mut self,
        semantic: Semantic,
        index: i32,
        content: Content,
        numeric_type: NumericType,
    ) -> Result<Option<ParameterPtr>> {
        self.resolve_directed(Direction::Out, semantic, index, content, numeric_type)
    }

    fn resolve_directed(
        &mut self,
        direction: Direction,
        semantic: Semantic,
        index: i32,
        content: Content,
        numeric_type: NumericType,
    ) -> Result<Option<ParameterPtr>> {
        let list = match direction {
            Direction::In => &self.inputs,
            Direction::Out => &self.outputs,
        };

        // Content is the stronger identity when the caller supplies one.
        if content != Content::Unknown {
            if let Some(existing) = list
                .iter()
                .find(|p| p.content() == content && p.numeric_type() == numeric_type)
            {
                return Ok(Some(Rc::clone(existing)));
            }
        }

        let index = if index < 0 {
            list.iter().filter(|p| p.semantic() == semantic).count() as i32
        } else {
            if let Some(existing) = list
                .iter()
                .find(|p| p.semantic() == semantic && p.index() == index)
            {
                if existing.numeric_type() != numeric_type {
                    return Err(GenError::ParameterTypeMismatch {
                        name: existing.name().to_string(),
                        requested: numeric_type,
                        existing: existing.numeric_type(),
                        owner: self.name.clone(),
                    });
                }
                return Ok(Some(Rc::clone(existing)));
            }
            index
        };

        let Some(param) = ParameterFactory::create(semantic, index, direction, content, numeric_type)
        else {
            return Ok(None);
        };

        trace!(
            "function {}: created {direction:?} parameter {} ({semantic:?}{index})",
            self.name,
            param.name()
        );
        match direction {
            Direction::In => self.add_input_parameter(Rc::clone(&param))?,
            Direction::Out => self.add_output_parameter(Rc::clone(&param))?,
        }
        Ok(Some(param))
    }

    /// Get-or-create a local parameter by exact name. An existing local must
    /// agree on type, semantic, and index.
    pub fn resolve_local_parameter(
        &mut self,
        semantic: Semantic,
        index: i32,
        name: &str,
        numeric_type: NumericType,
    ) -> Result<ParameterPtr> {
        if let Some(existing) = self.locals.iter().find(|p| p.name() == name) {
            if existing.numeric_type() != numeric_type
                || existing.semantic() != semantic
                || existing.index() != index
            {
                return Err(GenError::ParameterTypeMismatch {
                    name: name.to_string(),
                    requested: numeric_type,
                    existing: existing.numeric_type(),
                    owner: self.name.clone(),
                });
            }
            return Ok(Rc::clone(existing));
        }

        let param = Rc::new(Parameter::new(
            name,
            semantic,
            Content::Unknown,
            numeric_type,
            index,
        ));
        self.add_local(Rc::clone(&param))?;
        Ok(param)
    }

    /// Get-or-create a local parameter by `(content, type)`, synthesizing a
    /// generated name when creating anew.
    pub fn resolve_local_parameter_by_content(
        &mut self,
        content: Content,
        numeric_type: NumericType,
    ) -> Result<ParameterPtr> {
        if let Some(existing) = self
            .locals
            .iter()
            .find(|p| p.content() == content && p.numeric_type() == numeric_type)
        {
            return Ok(Rc::clone(existing));
        }

        let name = format!("l_local_param_{}", self.local_ordinal);
        self.local_ordinal += 1;
        let param = Rc::new(Parameter::new(
            name,
            Semantic::Unknown,
            content,
            numeric_type,
            0,
        ));
        self.add_local(Rc::clone(&param))?;
        Ok(param)
    }

    pub fn add_input_parameter(&mut self, param: ParameterPtr) -> Result<()> {
        if self
            .inputs
            .iter()
            .any(|p| p.semantic() == param.semantic() && p.index() == param.index())
        {
            return Err(GenError::DuplicateSemanticIndex {
                semantic: param.semantic(),
                index: param.index(),
                function: self.name.clone(),
            });
        }
        self.ensure_unique_name(param.name())?;
        self.inputs.push(param);
        Ok(())
    }

    pub fn add_output_parameter(&mut self, param: ParameterPtr) -> Result<()> {
        if self
            .outputs
            .iter()
            .any(|p| p.semantic() == param.semantic() && p.index() == param.index())
        {
            return Err(GenError::DuplicateSemanticIndex {
                semantic: param.semantic(),
                index: param.index(),
                function: self.name.clone(),
            });
        }
        self.ensure_unique_name(param.name())?;
        self.outputs.push(param);
        Ok(())
    }

    fn add_local(&mut self, param: ParameterPtr) -> Result<()> {
        self.ensure_unique_name(param.name())?;
        self.locals.push(param);
        Ok(())
    }

    // One name namespace across input, output, and local lists.
    fn ensure_unique_name(&self, name: &str) -> Result<()> {
        let taken = self
            .inputs
            .iter()
            .chain(self.outputs.iter())
            .chain(self.locals.iter())
            .any(|p| p.name() == name);
        if taken {
            return Err(GenError::DuplicateParameterName {
                name: name.to_string(),
                owner: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Remove by identity; absent parameter is a no-op.
    pub fn delete_input_parameter(&mut self, param: &ParameterPtr) {
        self.inputs.retain(|p| !Rc::ptr_eq(p, param));
    }

    /// Remove by identity; absent parameter is a no-op.
    pub fn delete_output_parameter(&mut self, param: &ParameterPtr) {
        self.outputs.retain(|p| !Rc::ptr_eq(p, param));
    }

    pub fn add_atom_instance(&mut self, atom: Rc<dyn FunctionAtom>) {
        self.atoms.push(atom);
    }

    /// Remove an atom by identity. Returns whether a removal occurred.
    pub fn delete_atom_instance(&mut self, atom: &Rc<dyn FunctionAtom>) -> bool {
        let before = self.atoms.len();
        self.atoms.retain(|a| !Rc::ptr_eq(a, atom));
        self.atoms.len() != before
    }

    /// Stable sort by `(group, internal)` execution order. Idempotent; must
    /// run before code emission.
    pub fn sort_atom_instances(&mut self) {
        self.atoms.sort_by_key(|a| {
            (a.group_execution_order(), a.internal_execution_order())
        });
    }

    /// Rebuild this function's input list to mirror `upstream`'s outputs.
    ///
    /// For each upstream output, an original input with the same
    /// `(semantic, index)` is reused by reference; otherwise the output is
    /// deep-copied and marked as an input. Inputs with no corresponding
    /// upstream output are dropped. This is the single enforcement point for
    /// the wire-format contract between adjacent pipeline stages.
    pub fn synchronize_input_params_to(&mut self, upstream: &Function) {
        let previous = std::mem::take(&mut self.inputs);
        for out in &upstream.outputs {
            match previous
                .iter()
                .find(|p| p.semantic() == out.semantic() && p.index() == out.index())
            {
                Some(existing) => self.inputs.push(Rc::clone(existing)),
                None => self.inputs.push(Rc::new(out.clone_as_input())),
            }
        }
        debug!(
            "function {}: inputs synchronized to outputs of {} ({} parameters)",
            self.name,
            upstream.name,
            self.inputs.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::{AssignmentAtom, FunctionInvocation, Operand};
    use crate::types::TargetLanguage;
    use proptest::prelude::*;

    fn func() -> Function {
        Function::new("main", "test function")
    }

    #[test]
    fn resolve_input_is_idempotent_get_or_create() {
        let mut f = func();
        let a = f
            .resolve_input_parameter(
                Semantic::Texcoord,
                0,
                Content::TextureCoordinate,
                NumericType::Float2,
            )
            .unwrap()
            .unwrap();
        let b = f
            .resolve_input_parameter(
                Semantic::Texcoord,
                0,
                Content::TextureCoordinate,
                NumericType::Float2,
            )
            .unwrap()
            .unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(f.input_parameters().len(), 1);
    }

    #[test]
    fn resolve_with_free_index_counts_per_semantic() {
        let mut f = func();
        let a = f
            .resolve_input_parameter(
                Semantic::Texcoord,
                -1,
                Content::Unknown,
                NumericType::Float2,
            )
            .unwrap()
            .unwrap();
        let b = f
            .resolve_input_parameter(
                Semantic::Texcoord,
                -1,
                Content::Unknown,
                NumericType::Float3,
            )
            .unwrap()
            .unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
    }

    #[test]
    fn resolve_type_mismatch_on_existing_semantic_index_fails() {
        let mut f = func();
        f.resolve_input_parameter(
            Semantic::Texcoord,
            0,
            Content::TextureCoordinate,
            NumericType::Float2,
        )
        .unwrap();
        let err = f
            .resolve_input_parameter(
                Semantic::Texcoord,
                0,
                Content::Unknown,
                NumericType::Float3,
            )
            .unwrap_err();
        assert!(matches!(err, GenError::ParameterTypeMismatch { .. }));
    }

    #[test]
    fn resolve_unsupported_semantic_returns_none() {
        let mut f = func();
        let resolved = f
            .resolve_input_parameter(
                Semantic::BlendWeights,
                0,
                Content::BlendWeights,
                NumericType::Float4,
            )
            .unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn duplicate_semantic_index_is_rejected_regardless_of_name() {
        let mut f = func();
        f.add_input_parameter(ParameterFactory::in_texcoord(0, NumericType::Float2))
            .unwrap();
        let other = Rc::new(Parameter::with_direction(
            "my_uv",
            Semantic::Texcoord,
            Content::TextureCoordinate,
            NumericType::Float2,
            0,
            Direction::In,
        ));
        let err = f.add_input_parameter(other).unwrap_err();
        assert!(matches!(err, GenError::DuplicateSemanticIndex { .. }));
    }

    #[test]
    fn parameter_names_share_one_namespace_across_lists() {
        let mut f = func();
        f.resolve_local_parameter(Semantic::Unknown, 0, "shared", NumericType::Float)
            .unwrap();
        let clash = Rc::new(Parameter::with_direction(
            "shared",
            Semantic::Texcoord,
            Content::Unknown,
            NumericType::Float2,
            0,
            Direction::In,
        ));
        let err = f.add_input_parameter(clash).unwrap_err();
        assert!(matches!(err, GenError::DuplicateParameterName { .. }));
    }

    #[test]
    fn local_resolve_by_name_verifies_identity() {
        let mut f = func();
        let a = f
            .resolve_local_parameter(Semantic::Unknown, 0, "tmp", NumericType::Float4)
            .unwrap();
        let b = f
            .resolve_local_parameter(Semantic::Unknown, 0, "tmp", NumericType::Float4)
            .unwrap();
        assert!(Rc::ptr_eq(&a, &b));

        let err = f
            .resolve_local_parameter(Semantic::Unknown, 0, "tmp", NumericType::Float3)
            .unwrap_err();
        assert!(matches!(err, GenError::ParameterTypeMismatch { .. }));
    }

    #[test]
    fn local_resolve_by_content_generates_names() {
        let mut f = func();
        let a = f
            .resolve_local_parameter_by_content(Content::NormalViewSpace, NumericType::Float3)
            .unwrap();
        assert_eq!(a.name(), "l_local_param_0");
        let b = f
            .resolve_local_parameter_by_content(Content::NormalViewSpace, NumericType::Float3)
            .unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        let c = f
            .resolve_local_parameter_by_content(Content::PositionViewSpace, NumericType::Float4)
            .unwrap();
        assert_eq!(c.name(), "l_local_param_1");
    }

    #[test]
    fn delete_parameter_is_idempotent() {
        let mut f = func();
        let p = f
            .resolve_input_parameter(
                Semantic::Normal,
                0,
                Content::NormalObjectSpace,
                NumericType::Float3,
            )
            .unwrap()
            .unwrap();
        f.delete_input_parameter(&p);
        assert!(f.input_parameters().is_empty());
        f.delete_input_parameter(&p);
        assert!(f.input_parameters().is_empty());
    }

    #[test]
    fn delete_atom_by_identity() {
        let mut f = func();
        f.add_atom_instance(Rc::new(FunctionInvocation::new("A", 0, 0)));
        let b: Rc<dyn FunctionAtom> = Rc::new(FunctionInvocation::new("B", 0, 1));
        f.add_atom_instance(Rc::clone(&b));

        assert!(f.delete_atom_instance(&b));
        assert_eq!(f.atoms().len(), 1);
        // Deleting again is a no-op.
        assert!(!f.delete_atom_instance(&b));
        assert_eq!(f.atoms().len(), 1);
    }

    fn emitted_order(f: &mut Function) -> String {
        f.sort_atom_instances();
        let mut out = String::new();
        for atom in f.atoms() {
            atom.write_source(&mut out, TargetLanguage::Hlsl);
        }
        out
    }

    #[test]
    fn atoms_sort_by_group_then_internal_with_stable_ties() {
        let mut f = func();
        f.add_atom_instance(Rc::new(FunctionInvocation::new("fog", 20, 0)));
        f.add_atom_instance(Rc::new(FunctionInvocation::new("light_a", 10, 5)));
        f.add_atom_instance(Rc::new(FunctionInvocation::new("light_tie_1", 10, 5)));
        f.add_atom_instance(Rc::new(FunctionInvocation::new("transform", 0, 0)));

        let first = emitted_order(&mut f);
        let lines: Vec<&str> = first.lines().collect();
        assert!(lines[0].contains("transform"));
        assert!(lines[1].contains("light_a"));
        assert!(lines[2].contains("light_tie_1"));
        assert!(lines[3].contains("fog"));

        // Sorting again changes nothing.
        let second = emitted_order(&mut f);
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn sort_is_idempotent_and_ordered(orders in proptest::collection::vec((0u32..8, 0u32..8), 0..32)) {
            let mut f = Function::new("prop", "");
            for (i, (group, internal)) in orders.iter().enumerate() {
                f.add_atom_instance(Rc::new(FunctionInvocation::new(format!("a{i}"), *group, *internal)));
            }
            f.sort_atom_instances();
            let keys: Vec<(u32, u32)> = f
                .atoms()
                .iter()
                .map(|a| (a.group_execution_order(), a.internal_execution_order()))
                .collect();
            prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));

            let once = emitted_order(&mut f);
            let twice = emitted_order(&mut f);
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn synchronize_reuses_clones_and_drops() {
        let mut vs = Function::new("vs_main", "");
        vs.resolve_output_parameter(
            Semantic::Position,
            0,
            Content::PositionProjectiveSpace,
            NumericType::Float4,
        )
        .unwrap();
        vs.resolve_output_parameter(
            Semantic::Texcoord,
            0,
            Content::TextureCoordinate,
            NumericType::Float2,
        )
        .unwrap();

        let mut fs = Function::new("fs_main", "");
        let my_uv = Rc::new(Parameter::with_direction(
            "my_uv",
            Semantic::Texcoord,
            Content::TextureCoordinate,
            NumericType::Float2,
            0,
            Direction::In,
        ));
        fs.add_input_parameter(Rc::clone(&my_uv)).unwrap();
        let stale = Rc::new(Parameter::with_direction(
            "stale_normal",
            Semantic::Normal,
            Content::NormalObjectSpace,
            NumericType::Float3,
            0,
            Direction::In,
        ));
        fs.add_input_parameter(Rc::clone(&stale)).unwrap();

        fs.synchronize_input_params_to(&vs);

        let inputs = fs.input_parameters();
        assert_eq!(inputs.len(), 2);

        // Upstream order is preserved: position first, then texcoord.
        assert_eq!(inputs[0].semantic(), Semantic::Position);
        assert_eq!(inputs[0].direction(), Some(Direction::In));
        assert!(!Rc::ptr_eq(&inputs[0], &vs.output_parameters()[0]));

        // The pre-existing texcoord input is reused by reference.
        assert!(Rc::ptr_eq(&inputs[1], &my_uv));

        // The stale normal input is gone.
        assert!(!inputs.iter().any(|p| p.semantic() == Semantic::Normal));
    }

    #[test]
    fn assignment_atoms_participate_in_ordering() {
        let mut f = func();
        let a = f
            .resolve_local_parameter(Semantic::Unknown, 0, "a", NumericType::Float4)
            .unwrap();
        let b = f
            .resolve_local_parameter(Semantic::Unknown, 0, "b", NumericType::Float4)
            .unwrap();
        f.add_atom_instance(Rc::new(AssignmentAtom::new(
            Operand::new(Rc::clone(&b)),
            Operand::new(Rc::clone(&a)),
            5,
            0,
        )));
        f.add_atom_instance(Rc::new(AssignmentAtom::new(
            Operand::new(a),
            Operand::new(b),
            1,
            0,
        )));
        let emitted = emitted_order(&mut f);
        let first_line = emitted.lines().next().unwrap();
        assert_eq!(first_line.trim(), "a = b;");
    }
}
