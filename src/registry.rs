//! The per-session accumulator for task and plugin configuration state.
use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::builder::TaskBuilder;
use crate::step::InlineFn;

/// Reserved configuration-tree entry holding the project manifest.
pub const MANIFEST_KEY: &str = "pkg";

/// A task as it will be handed to the engine: either an ordered list of step
/// references, or a single callable the engine executes directly. The engine
/// binding must preserve this distinction, see [`Engine`](crate::Engine).
#[derive(Debug, Clone)]
pub enum TaskEntry {
    Steps(Vec<String>),
    Func(InlineFn),
}

/// Single source of truth for all tasks and all plugin configuration
/// produced during one registration session.
///
/// The registry owns the merged configuration tree (plugin name → named
/// option-sets, plus the reserved [`MANIFEST_KEY`] entry) and the mapping
/// from task name to its ordered step references. Task builders obtained
/// from [`Registry::task`] mutate it through short-lived borrows; the
/// registry itself is constructed fresh for every session and flattened
/// once at the end.
#[derive(Debug)]
pub struct Registry {
    /// Plugin name → object of named option-sets, plus the manifest entry.
    tree: Map<String, Value>,
    /// Task name → its steps, in name order.
    tasks: BTreeMap<String, TaskEntry>,
}

impl Registry {
    /// Constructs an empty session, seeding the configuration tree with the
    /// project manifest under [`MANIFEST_KEY`].
    pub fn new(manifest: Value) -> Self {
        let mut tree = Map::new();
        tree.insert(MANIFEST_KEY.to_string(), manifest);

        Self {
            tree,
            tasks: BTreeMap::new(),
        }
    }

    /// Registers a task name and returns a builder for its steps.
    ///
    /// Reusing a name silently resets the step list registered before; the
    /// last writer wins.
    pub fn task(&mut self, name: impl Into<String>) -> TaskBuilder<'_> {
        let name = name.into();
        tracing::debug!(task = %name, "registering task");
        self.tasks.insert(name.clone(), TaskEntry::Steps(vec![]));

        TaskBuilder::new(self, name)
    }

    /// Inserts an options payload into the configuration tree under
    /// `[plugin][config]`, creating the intermediate object if absent.
    ///
    /// An existing entry for the same `(plugin, config)` pair is silently
    /// overwritten. Generated config names are unique per builder, so this
    /// only happens when the caller crafts a colliding name by hand.
    pub fn merge_config(&mut self, plugin: &str, config: impl Into<String>, options: Value) {
        let config = config.into();
        tracing::trace!(%plugin, %config, "merging plugin config");

        let entry = self
            .tree
            .entry(plugin.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        match entry {
            Value::Object(map) => {
                map.insert(config, options);
            }
            other => {
                let mut map = Map::new();
                map.insert(config, options);
                *other = Value::Object(map);
            }
        }
    }

    /// Appends a step reference to the ordered list of a registered task.
    ///
    /// # Panics
    /// This method will panic if the task was never registered, or if it was
    /// registered as a directly-executable task, indicating a severe logic
    /// error in the calling code.
    pub fn append_step(&mut self, task: &str, step: impl Into<String>) {
        match self.tasks.get_mut(task) {
            Some(TaskEntry::Steps(steps)) => steps.push(step.into()),
            Some(TaskEntry::Func(_)) => {
                panic!("Task '{task}' is directly executable and has no step list")
            }
            None => panic!("Task '{task}' was never registered"),
        }
    }

    /// Registers a directly-executable task under the given name.
    pub fn register_func(&mut self, name: impl Into<String>, func: InlineFn) {
        self.tasks.insert(name.into(), TaskEntry::Func(func));
    }

    /// Returns the accumulated configuration tree and task map for handoff
    /// to the engine. Pure and idempotent; inline callables are shared.
    pub fn flatten(&self) -> (Value, BTreeMap<String, TaskEntry>) {
        (Value::Object(self.tree.clone()), self.tasks.clone())
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_manifest_seeded() {
        let registry = Registry::new(json!({"name": "demo", "version": "0.1.0"}));
        let (config, _) = registry.flatten();
        assert_eq!(config[MANIFEST_KEY]["name"], "demo");
    }

    #[test]
    fn test_merge_config_siblings_coexist() {
        let mut registry = Registry::new(Value::Null);
        registry.merge_config("uglify", "build_sub0", json!({"opt": 1}));
        registry.merge_config("uglify", "build_sub1", json!({"opt": 2}));

        let (config, _) = registry.flatten();
        assert_eq!(config["uglify"]["build_sub0"], json!({"opt": 1}));
        assert_eq!(config["uglify"]["build_sub1"], json!({"opt": 2}));
    }

    #[test]
    fn test_merge_config_overwrites_colliding_name() {
        let mut registry = Registry::new(Value::Null);
        registry.merge_config("uglify", "build_sub0", json!({"opt": 1}));
        registry.merge_config("uglify", "build_sub0", json!({"opt": 2}));

        let (config, _) = registry.flatten();
        assert_eq!(config["uglify"]["build_sub0"], json!({"opt": 2}));
    }

    #[test]
    fn test_reregistration_resets_steps() {
        let mut registry = Registry::new(Value::Null);
        registry.task("build").sub("first");
        registry.task("build").sub("second");

        let (_, tasks) = registry.flatten();
        match &tasks["build"] {
            TaskEntry::Steps(steps) => assert_eq!(steps, &["second".to_string()]),
            TaskEntry::Func(_) => panic!("expected a step list"),
        }
    }

    #[test]
    fn test_flatten_idempotent() {
        let mut registry = Registry::new(json!({"name": "demo"}));
        registry
            .task("build")
            .sub(("uglify", json!({"mangle": true})))
            .sub("clean");

        let (config_a, tasks_a) = registry.flatten();
        let (config_b, tasks_b) = registry.flatten();

        assert_eq!(config_a, config_b);
        assert_eq!(tasks_a.keys().collect::<Vec<_>>(), tasks_b.keys().collect::<Vec<_>>());
    }

    #[test]
    #[should_panic(expected = "never registered")]
    fn test_append_to_unregistered_task_panics() {
        let mut registry = Registry::new(Value::Null);
        registry.append_step("ghost", "clean");
    }
}
