#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod builder;
mod engine;
mod error;
mod manifest;
mod registry;
mod step;
#[cfg(feature = "logging")]
mod utils;

use camino::Utf8Path;

pub use crate::builder::TaskBuilder;
pub use crate::engine::Engine;
pub use crate::error::*;
pub use crate::manifest::DEFAULT_MANIFEST;
pub use crate::registry::{MANIFEST_KEY, Registry, TaskEntry};
pub use crate::step::{InlineFn, Step, StepResult};
#[cfg(feature = "logging")]
pub use crate::utils::init_logging;

/// Compiles the tasks described by `setup` and registers them with the
/// engine, reading the project manifest from [`DEFAULT_MANIFEST`].
///
/// See [`register_with`] for the full pipeline.
pub fn register<E>(
    engine: &mut E,
    setup: impl FnOnce(&mut Registry) -> anyhow::Result<()>,
) -> Result<(), StagehandError>
where
    E: Engine,
{
    register_with(engine, DEFAULT_MANIFEST, setup)
}

/// Runs one full registration session against the engine.
///
/// This will:
/// 1. Ask the engine to auto-load all available build plugins.
/// 2. Read the project manifest and seed a fresh [`Registry`] with it.
/// 3. Run the caller's `setup` routine, which describes the tasks.
/// 4. Flatten the registry and push the configuration tree into the engine.
/// 5. Register every compiled task with the engine under its name.
///
/// The session is synchronous and runs to completion; any error aborts it
/// outright, there is no partial recovery.
pub fn register_with<E>(
    engine: &mut E,
    manifest: impl AsRef<Utf8Path>,
    setup: impl FnOnce(&mut Registry) -> anyhow::Result<()>,
) -> Result<(), StagehandError>
where
    E: Engine,
{
    engine
        .load_plugins()
        .map_err(|err| StagehandError::Engine("plugin discovery".to_string(), err))?;

    let manifest = manifest::read(manifest)?;
    let mut registry = Registry::new(manifest);

    setup(&mut registry).map_err(StagehandError::Setup)?;

    let (config, tasks) = registry.flatten();
    let total = tasks.len();

    engine
        .configure(config)
        .map_err(|err| StagehandError::Engine("configuration".to_string(), err))?;

    for (name, entry) in tasks {
        let result = match entry {
            TaskEntry::Steps(steps) => engine.add_task(&name, &steps),
            TaskEntry::Func(func) => engine.add_task_fn(&name, func),
        };

        result.map_err(|err| StagehandError::Engine(name, err))?;
    }

    tracing::info!("Registered {total} tasks with the engine");

    Ok(())
}
