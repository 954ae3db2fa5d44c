//! Step descriptions accepted by the task builder.
use std::fmt::Debug;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::StepError;

/// Result from a single executed inline step.
pub type StepResult = anyhow::Result<()>;

/// Step function pointer used for inline, directly-executable steps. This
/// function is provided by the user from the userland, but it is invoked by
/// the external engine once the task it belongs to runs.
type StepFnPtr = Arc<dyn Fn() -> StepResult + Send + Sync>;

/// Wraps `StepFnPtr` and implements `Debug` trait for function pointer.
#[derive(Clone)]
pub struct InlineFn(StepFnPtr);

impl InlineFn {
    /// Create new inline step function pointer.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn() -> StepResult + Send + Sync + 'static,
    {
        Self(Arc::new(func))
    }

    /// Call the contained step function.
    pub fn call(&self) -> StepResult {
        (self.0)()
    }
}

impl Debug for InlineFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InlineFn(*)")
    }
}

/// A single step added to a task under construction.
///
/// The three variants correspond to the three things a task can be composed
/// of: an inline callable run directly by the engine, a reference to another
/// task by name, and an invocation of a configured plugin.
#[derive(Debug)]
pub enum Step {
    /// An inline step function, registered with the engine as a
    /// directly-executable task under a generated name.
    Func(InlineFn),
    /// A bare reference to another task. The referenced task may be declared
    /// later in the same session; no existence check is performed.
    Alias(String),
    /// A plugin invocation. The options payload is opaque to this crate and
    /// is merged into the configuration tree under a generated name.
    Plugin { name: String, options: Value },
}

impl Step {
    /// Creates an inline step from a callable.
    pub fn func<F>(func: F) -> Self
    where
        F: Fn() -> StepResult + Send + Sync + 'static,
    {
        Step::Func(InlineFn::new(func))
    }

    /// Creates a reference to another task by name.
    pub fn alias(name: impl Into<String>) -> Self {
        Step::Alias(name.into())
    }

    /// Creates a plugin invocation with an options payload.
    pub fn plugin(name: impl Into<String>, options: impl Into<Value>) -> Self {
        Step::Plugin {
            name: name.into(),
            options: options.into(),
        }
    }

    /// Creates a plugin invocation from a typed options struct.
    pub fn plugin_with<T>(name: impl Into<String>, options: &T) -> Result<Self, StepError>
    where
        T: Serialize,
    {
        Ok(Step::Plugin {
            name: name.into(),
            options: serde_json::to_value(options)?,
        })
    }

    /// Resolves a dynamically supplied step description, for callers which
    /// read task definitions from data rather than writing them in code.
    ///
    /// A string target with options is a plugin invocation, a string target
    /// without options is a task alias. Anything else fails with
    /// [`StepError::InvalidArgumentKind`]; inline callables cannot be
    /// described by a JSON value and must go through [`Step::func`].
    pub fn from_value(target: Value, options: Option<Value>) -> Result<Self, StepError> {
        match (target, options) {
            (Value::String(name), Some(options)) => Ok(Step::Plugin { name, options }),
            (Value::String(name), None) => Ok(Step::Alias(name)),
            (other, _) => Err(StepError::InvalidArgumentKind(json_kind(&other))),
        }
    }
}

impl From<&str> for Step {
    fn from(name: &str) -> Self {
        Step::Alias(name.to_string())
    }
}

impl From<String> for Step {
    fn from(name: String) -> Self {
        Step::Alias(name)
    }
}

impl<S, V> From<(S, V)> for Step
where
    S: Into<String>,
    V: Into<Value>,
{
    fn from((name, options): (S, V)) -> Self {
        Step::Plugin {
            name: name.into(),
            options: options.into(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_value_dispatch() {
        let step = Step::from_value(json!("uglify"), Some(json!({"mangle": true}))).unwrap();
        assert!(matches!(step, Step::Plugin { ref name, .. } if name == "uglify"));

        let step = Step::from_value(json!("other"), None).unwrap();
        assert!(matches!(step, Step::Alias(ref name) if name == "other"));
    }

    #[test]
    fn test_from_value_rejects_non_string() {
        let err = Step::from_value(json!(42), None).unwrap_err();
        assert!(matches!(err, StepError::InvalidArgumentKind("a number")));

        let err = Step::from_value(json!(null), Some(json!({}))).unwrap_err();
        assert!(matches!(err, StepError::InvalidArgumentKind("null")));
    }

    #[test]
    fn test_conversions() {
        assert!(matches!(Step::from("clean"), Step::Alias(_)));
        assert!(matches!(
            Step::from(("uglify", json!({"mangle": false}))),
            Step::Plugin { .. }
        ));
    }

    #[test]
    fn test_inline_fn_call() {
        let func = InlineFn::new(|| Ok(()));
        assert!(func.call().is_ok());
        assert_eq!(format!("{:?}", func), "InlineFn(*)");
    }
}
