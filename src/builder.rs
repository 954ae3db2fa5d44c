//! Fluent builder for a single task's step sequence.
use serde_json::Value;

use crate::error::StepError;
use crate::registry::Registry;
use crate::step::Step;

/// A fluent builder for the step sequence of one task.
///
/// Obtained from [`Registry::task`]. Every call to [`sub`](Self::sub)
/// appends one step and returns the builder again, so steps can be chained:
///
/// ```rust
/// use serde_json::json;
/// use stagehand::{Registry, Step};
///
/// let mut registry = Registry::new(json!({"name": "demo"}));
/// registry
///     .task("default")
///     .sub(("uglify", json!({"mangle": true})))
///     .sub(Step::func(|| Ok(())))
///     .sub("other");
/// ```
///
/// Names generated for plugin configs and inline steps follow the pattern
/// `<task>_sub<N>`, where `N` is a per-builder counter incremented on every
/// call regardless of the step kind. Aliases consume a counter value without
/// producing a name, which keeps the generated names collision-free however
/// the step kinds are interleaved.
pub struct TaskBuilder<'a> {
    registry: &'a mut Registry,
    name: String,
    counter: usize,
}

impl<'a> TaskBuilder<'a> {
    pub(crate) fn new(registry: &'a mut Registry, name: String) -> Self {
        Self {
            registry,
            name,
            counter: 0,
        }
    }

    /// Appends one step to the task.
    pub fn sub(&mut self, step: impl Into<Step>) -> &mut Self {
        let ordinal = self.counter;
        self.counter += 1;

        match step.into() {
            Step::Func(func) => {
                let generated = format!("{}_sub{}", self.name, ordinal);
                tracing::trace!(task = %self.name, step = %generated, "inline step");
                self.registry.register_func(generated.clone(), func);
                self.registry.append_step(&self.name, generated);
            }
            Step::Alias(target) => {
                tracing::trace!(task = %self.name, step = %target, "task alias");
                self.registry.append_step(&self.name, target);
            }
            Step::Plugin { name, options } => {
                let generated = format!("{}_sub{}", self.name, ordinal);
                tracing::trace!(task = %self.name, plugin = %name, config = %generated, "plugin step");
                self.registry.merge_config(&name, generated.clone(), options);
                self.registry.append_step(&self.name, format!("{name}:{generated}"));
            }
        }

        self
    }

    /// Appends a dynamically described step, see [`Step::from_value`].
    ///
    /// A target which is neither a string nor a callable fails with
    /// [`StepError::InvalidArgumentKind`], leaving the task untouched.
    pub fn sub_value(
        &mut self,
        target: Value,
        options: Option<Value>,
    ) -> Result<&mut Self, StepError> {
        let step = Step::from_value(target, options)?;
        Ok(self.sub(step))
    }

    /// Appends a reference to another task.
    #[deprecated(note = "use `sub` with a task name instead")]
    pub fn other(&mut self, task: impl Into<String>) -> &mut Self {
        self.sub(Step::Alias(task.into()))
    }

    /// The name of the task under construction.
    pub fn name(&self) -> &str {
        &self.name
    }
}
