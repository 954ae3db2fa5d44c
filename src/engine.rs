//! The seam between this crate and the external build engine.
use serde_json::Value;

use crate::step::InlineFn;

/// Binding to the external build-automation engine.
///
/// The engine consumes the artifacts this crate compiles: a merged
/// configuration tree and named tasks. Implementations are also responsible
/// for plugin discovery, which runs before any task registration and is
/// expected to install plugin-specific handlers as a side effect.
///
/// Tasks come in two shapes and the engine must keep them apart: a task
/// registered through [`add_task`](Self::add_task) is a name bound to an
/// ordered list of step references, while one registered through
/// [`add_task_fn`](Self::add_task_fn) is an executable unit the engine
/// invokes directly.
pub trait Engine {
    /// Auto-loads all available build plugins.
    fn load_plugins(&mut self) -> anyhow::Result<()>;

    /// Pushes the merged configuration tree into the engine's
    /// configuration store.
    fn configure(&mut self, config: Value) -> anyhow::Result<()>;

    /// Registers a task as an ordered list of step references.
    fn add_task(&mut self, name: &str, steps: &[String]) -> anyhow::Result<()>;

    /// Registers a directly-executable task.
    fn add_task_fn(&mut self, name: &str, func: InlineFn) -> anyhow::Result<()>;
}

/// Records every engine call instead of executing anything.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingEngine {
    pub plugins_loaded: bool,
    pub config: Option<Value>,
    pub tasks: Vec<(String, Vec<String>)>,
    pub funcs: Vec<(String, InlineFn)>,
}

#[cfg(test)]
impl Engine for RecordingEngine {
    fn load_plugins(&mut self) -> anyhow::Result<()> {
        self.plugins_loaded = true;
        Ok(())
    }

    fn configure(&mut self, config: Value) -> anyhow::Result<()> {
        self.config = Some(config);
        Ok(())
    }

    fn add_task(&mut self, name: &str, steps: &[String]) -> anyhow::Result<()> {
        self.tasks.push((name.to_string(), steps.to_vec()));
        Ok(())
    }

    fn add_task_fn(&mut self, name: &str, func: InlineFn) -> anyhow::Result<()> {
        self.funcs.push((name.to_string(), func));
        Ok(())
    }
}
