//! Per-build naming context.
//!
//! [`BuildCtx`] is created by the compiler at the start of one build, threaded
//! by `&mut` through the traversal, and dropped when the build returns. It
//! tracks:
//! - Variable → identifier, in first-seen order
//! - Param → parameter name, in first-seen order, together with the value
//! - The reverse name → owner tables used to detect naming conflicts
//!
//! Nothing is cached on the model objects themselves, so two builds never
//! share naming state.
//!
//! # Naming scheme
//!
//! ```text
//! explicit name        -> used verbatim (conflict if another instance holds it)
//! node                 -> <node_prefix><k>           e.g. n1
//! relationship         -> <relationship_prefix><k>   e.g. r2
//! plain variable       -> <variable_prefix><k>       e.g. v3
//! parameter            -> <param_prefix><j>          e.g. param0
//! ```
//! `k` is one counter shared by all variable kinds, starting at 1. `j` is an
//! independent parameter counter starting at 0. Generated names skip names
//! that are already bound.

pub mod errors;

use std::collections::HashMap;

use crate::{
    config::BuildConfig,
    cypher_ast::{
        errors::UnsupportedValueError,
        variable::{Param, ParamId, Variable, VariableId},
    },
};
use errors::NamingConflict;

#[derive(Debug)]
pub struct BuildCtx<'a> {
    config: &'a BuildConfig,
    variable_names: HashMap<VariableId, String>,
    variable_owners: HashMap<String, VariableId>,
    variable_order: Vec<String>,
    next_variable: usize,
    param_names: HashMap<ParamId, String>,
    param_owners: HashMap<String, ParamId>,
    /// Params in first-seen order, for the output map
    params: Vec<(String, Param)>,
    next_param: usize,
}

impl<'a> BuildCtx<'a> {
    pub fn new(config: &'a BuildConfig) -> Self {
        Self {
            config,
            variable_names: HashMap::new(),
            variable_owners: HashMap::new(),
            variable_order: Vec::new(),
            next_variable: 1,
            param_names: HashMap::new(),
            param_owners: HashMap::new(),
            params: Vec::new(),
            next_param: 0,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        self.config
    }

    /// Identifier of `variable`, assigned on first encounter.
    pub fn name_of(&mut self, variable: &Variable) -> Result<String, NamingConflict> {
        let id = variable.id();
        if let Some(name) = self.variable_names.get(&id) {
            return Ok(name.clone());
        }

        let name = match variable.explicit_name() {
            Some(explicit) => {
                if self.variable_owners.contains_key(explicit) {
                    return Err(NamingConflict::variable(explicit));
                }
                explicit.to_string()
            }
            None => {
                let prefix = self.config.prefix_for(variable.kind());
                let (name, next) = next_free_name(prefix, self.next_variable, |candidate| {
                    self.variable_owners.contains_key(candidate)
                });
                self.next_variable = next;
                name
            }
        };

        log::trace!("Assigned '{}' to {} {:?}", name, variable.kind().as_str(), id);
        self.variable_names.insert(id, name.clone());
        self.variable_owners.insert(name.clone(), id);
        self.variable_order.push(name.clone());
        Ok(name)
    }

    /// Parameter name of `param` (without the `$`), assigned on first encounter.
    pub fn param_name_of(&mut self, param: &Param) -> Result<String, NamingConflict> {
        let id = param.id();
        if let Some(name) = self.param_names.get(&id) {
            return Ok(name.clone());
        }

        let name = match param.explicit_name() {
            Some(explicit) => {
                if self.param_owners.contains_key(explicit) {
                    return Err(NamingConflict::parameter(explicit));
                }
                explicit.to_string()
            }
            None => {
                let (name, next) =
                    next_free_name(&self.config.param_prefix, self.next_param, |candidate| {
                        self.param_owners.contains_key(candidate)
                    });
                self.next_param = next;
                name
            }
        };

        log::trace!("Assigned '${}' to parameter {:?}", name, id);
        self.param_names.insert(id, name.clone());
        self.param_owners.insert(name.clone(), id);
        self.params.push((name.clone(), param.clone()));
        Ok(name)
    }

    /// Variable identifiers in assignment order
    pub fn variable_names(&self) -> &[String] {
        &self.variable_order
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Consume the context, converting every recorded parameter value.
    pub fn into_params(
        self,
    ) -> Result<serde_json::Map<String, serde_json::Value>, UnsupportedValueError> {
        let mut params = serde_json::Map::new();
        for (name, param) in self.params {
            let value = param.value().to_json(&format!("parameter ${}", name))?;
            params.insert(name, value);
        }
        Ok(params)
    }
}

/// First `<prefix><n>` at or after `counter` not rejected by `is_taken`,
/// along with the counter value to continue from.
fn next_free_name(prefix: &str, mut counter: usize, is_taken: impl Fn(&str) -> bool) -> (String, usize) {
    loop {
        let candidate = format!("{}{}", prefix, counter);
        counter += 1;
        if !is_taken(&candidate) {
            return (candidate, counter);
        }
        log::warn!("Generated name '{}' is already bound, skipping", candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cypher_ast::{
        value::Value,
        variable::{Node, Relationship, Var},
    };

    #[test]
    fn test_names_are_idempotent_and_sequential() {
        let config = BuildConfig::default();
        let mut ctx = BuildCtx::new(&config);
        let a: Variable = Node::new(["Person"]).into();
        let r: Variable = Relationship::new("KNOWS").into();
        let b: Variable = Node::new(["Person"]).into();

        assert_eq!(ctx.name_of(&a).unwrap(), "n1");
        assert_eq!(ctx.name_of(&r).unwrap(), "r2");
        assert_eq!(ctx.name_of(&b).unwrap(), "n3");
        assert_eq!(ctx.name_of(&a).unwrap(), "n1");
        assert_eq!(ctx.variable_names(), ["n1", "r2", "n3"]);
    }

    #[test]
    fn test_params_use_independent_counter() {
        let config = BuildConfig::default();
        let mut ctx = BuildCtx::new(&config);
        let n: Variable = Node::unlabeled().into();
        let p1 = Param::new("X");
        let p2 = Param::new("X");

        assert_eq!(ctx.name_of(&n).unwrap(), "n1");
        assert_eq!(ctx.param_name_of(&p1).unwrap(), "param0");
        assert_eq!(ctx.param_name_of(&p2).unwrap(), "param1");
        assert_eq!(ctx.param_name_of(&p1).unwrap(), "param0");
        assert_eq!(ctx.param_count(), 2);
    }

    #[test]
    fn test_explicit_variable_name_conflict() {
        let config = BuildConfig::default();
        let mut ctx = BuildCtx::new(&config);
        let first: Variable = Node::builder().name("m").build().into();
        let second: Variable = Var::named("m").into();

        assert_eq!(ctx.name_of(&first).unwrap(), "m");
        assert_eq!(ctx.name_of(&first).unwrap(), "m");
        assert_eq!(
            ctx.name_of(&second).unwrap_err(),
            NamingConflict::variable("m")
        );
    }

    #[test]
    fn test_explicit_param_name_conflict() {
        let config = BuildConfig::default();
        let mut ctx = BuildCtx::new(&config);
        let first = Param::named("title", "X");
        let second = Param::named("title", "X");

        assert_eq!(ctx.param_name_of(&first).unwrap(), "title");
        assert_eq!(
            ctx.param_name_of(&second).unwrap_err(),
            NamingConflict::parameter("title")
        );
    }

    #[test]
    fn test_generated_names_skip_bound_names() {
        let config = BuildConfig::default();
        let mut ctx = BuildCtx::new(&config);
        let explicit = Param::named("param0", 1);
        let generated = Param::new(2);

        assert_eq!(ctx.param_name_of(&explicit).unwrap(), "param0");
        assert_eq!(ctx.param_name_of(&generated).unwrap(), "param1");
    }

    #[test]
    fn test_into_params_keeps_first_seen_order() {
        let config = BuildConfig::default();
        let mut ctx = BuildCtx::new(&config);
        ctx.param_name_of(&Param::named("z", "last-name")).unwrap();
        ctx.param_name_of(&Param::new(42)).unwrap();

        let params = ctx.into_params().unwrap();
        let keys: Vec<&str> = params.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "param0"]);
        assert_eq!(params["param0"], serde_json::json!(42));
    }

    #[test]
    fn test_into_params_rejects_unsupported_values() {
        let config = BuildConfig::default();
        let mut ctx = BuildCtx::new(&config);
        ctx.param_name_of(&Param::new(Value::Bytes(vec![0xff]))).unwrap();

        let err = ctx.into_params().unwrap_err();
        assert_eq!(err.context, "parameter $param0");
    }
}
