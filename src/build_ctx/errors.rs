use thiserror::Error;

/// Two distinct variables (or two distinct parameters) bound to one name in a
/// single build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Name '{name}' is bound to two different {namespace}s in one statement (use distinct names or share one instance)")]
pub struct NamingConflict {
    pub name: String,
    pub namespace: &'static str,
}

impl NamingConflict {
    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: "variable",
        }
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: "parameter",
        }
    }
}
