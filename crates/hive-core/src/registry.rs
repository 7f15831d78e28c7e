//! Directory of every bee factory known to the process.
//!
//! The registry is populated once, during start-up, through
//! [`register`](FactoryRegistry::register) (which takes `&mut self`), and is
//! then moved behind an `Arc` and shared read-only.  The borrow checker thus
//! enforces the single-writer / many-readers lifecycle; lookups need no lock.
//!
//! ```rust,ignore
//! let mut registry = FactoryRegistry::new();
//! registry.register(Arc::new(HueBeeFactory::new()))?;
//! let registry = Arc::new(registry);
//!
//! let factory = registry.lookup("huebee")?;
//! ```
//!
//! Registering an identifier twice is rejected with
//! [`HiveError::DuplicateFactory`]; it indicates a build defect and callers
//! are expected to abort start-up.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info};

use crate::descriptor::ActionDescriptor;
use crate::error::{HiveError, HiveResult};
use crate::factory::{BoxedFactory, FactoryInfo};

/// Lookup table from factory identifier to factory.
#[derive(Default)]
pub struct FactoryRegistry {
    factories: BTreeMap<String, BoxedFactory>,
}

impl FactoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `factory` under its identifier.
    ///
    /// Fails on a duplicate identifier, on malformed descriptors, or when one
    /// of the factory's actions is already provided by another factory.  On
    /// failure the registry is left unchanged.
    pub fn register(&mut self, factory: BoxedFactory) -> HiveResult<()> {
        let id = factory.id().to_string();

        if self.factories.contains_key(&id) {
            return Err(HiveError::DuplicateFactory(id));
        }
        check_descriptors(&factory)?;

        for action in factory.actions() {
            if let Some((owner, _)) = self.find_action(&action.namespace, &action.name) {
                return Err(HiveError::DuplicateAction {
                    namespace: action.namespace,
                    name: action.name,
                    factory: id,
                    owner: owner.id().to_string(),
                });
            }
        }

        debug!(
            factory = %id,
            options = factory.options().len(),
            events = factory.events().len(),
            actions = factory.actions().len(),
            "Registered factory"
        );
        self.factories.insert(id, factory);
        Ok(())
    }

    /// Registers every factory in `factories`, stopping at the first error.
    pub fn register_all(
        &mut self,
        factories: impl IntoIterator<Item = BoxedFactory>,
    ) -> HiveResult<()> {
        for factory in factories {
            self.register(factory)?;
        }
        info!(count = self.factories.len(), "Factory registry populated");
        Ok(())
    }

    /// Returns the factory registered under `id`, if any.
    pub fn get(&self, id: &str) -> Option<BoxedFactory> {
        self.factories.get(id).cloned()
    }

    /// Returns the factory registered under `id`, or [`HiveError::FactoryNotFound`].
    pub fn lookup(&self, id: &str) -> HiveResult<BoxedFactory> {
        self.get(id)
            .ok_or_else(|| HiveError::FactoryNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Returns all identifiers, sorted.
    pub fn ids(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    /// Returns all factories, sorted by identifier.
    pub fn factories(&self) -> Vec<BoxedFactory> {
        self.factories.values().cloned().collect()
    }

    /// Returns a snapshot of every factory, sorted by identifier.
    pub fn infos(&self) -> Vec<FactoryInfo> {
        self.factories
            .values()
            .map(|f| FactoryInfo::from_factory(f.as_ref()))
            .collect()
    }

    /// Finds the factory providing action `namespace/name`.
    pub fn find_action(
        &self,
        namespace: &str,
        name: &str,
    ) -> Option<(BoxedFactory, ActionDescriptor)> {
        self.factories.values().find_map(|factory| {
            factory
                .actions()
                .into_iter()
                .find(|a| a.namespace == namespace && a.name == name)
                .map(|a| (factory.clone(), a))
        })
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("factories", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Rejects descriptors that would make lookups by name ambiguous.
fn check_descriptors(factory: &BoxedFactory) -> HiveResult<()> {
    let id = factory.id();
    if id.trim().is_empty() {
        return Err(HiveError::invalid_descriptor(id, "identifier is empty"));
    }

    unique(id, "option", factory.options().iter().map(|o| o.name.as_str()))?;

    let events = factory.events();
    unique(
        id,
        "event",
        events.iter().map(|e| format!("{}/{}", e.namespace, e.name)),
    )?;
    for event in &events {
        unique(
            id,
            "placeholder",
            event.options.iter().map(|p| p.name.as_str()),
        )?;
    }

    let actions = factory.actions();
    unique(
        id,
        "action",
        actions.iter().map(|a| format!("{}/{}", a.namespace, a.name)),
    )?;
    for action in &actions {
        if action.name.is_empty() {
            return Err(HiveError::invalid_descriptor(id, "action name is empty"));
        }
        unique(
            id,
            "placeholder",
            action.options.iter().map(|p| p.name.as_str()),
        )?;
    }

    Ok(())
}

fn unique<T>(factory: &str, kind: &str, names: impl Iterator<Item = T>) -> HiveResult<()>
where
    T: AsRef<str> + Eq + std::hash::Hash,
{
    let mut seen = HashSet::new();
    for name in names {
        if name.as_ref().is_empty() {
            return Err(HiveError::invalid_descriptor(
                factory,
                format!("{kind} name is empty"),
            ));
        }
        let duplicate = name.as_ref().to_string();
        if !seen.insert(name) {
            return Err(HiveError::invalid_descriptor(
                factory,
                format!("duplicate {kind} '{duplicate}'"),
            ));
        }
    }
    Ok(())
}
