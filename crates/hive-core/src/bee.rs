//! The live bee (plugin instance) contract.
//!
//! A bee is created by its [`BeeFactory`](crate::BeeFactory) and afterwards
//! owned by the hive.  The hive relies on three things from it:
//!
//! - identity ([`name`](Bee::name), [`namespace`](Bee::namespace)) to route
//!   actions and attribute events,
//! - [`reload_options`](Bee::reload_options) to apply configuration edits,
//! - [`action`](Bee::action) / [`run`](Bee::run) to perform its side effects.
//!
//! [`BeeBase`] implements the bookkeeping half of that contract so concrete
//! bees only have to describe how to turn options into typed settings.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::BeeResult;
use crate::event::{Action, EventSink};
use crate::value::{BeeOptions, Placeholders};

/// A live, configured bee.
#[async_trait]
pub trait Bee: Send + Sync {
    /// Instance name chosen by the user.
    fn name(&self) -> &str;

    /// Identifier of the factory that built this bee.
    fn namespace(&self) -> &str;

    /// Free-text description chosen by the user.
    fn description(&self) -> &str;

    /// Currently applied options.
    fn options(&self) -> BeeOptions;

    /// Replaces the configuration.
    ///
    /// Implementations must either apply `options` completely or leave the
    /// previous configuration in place and return an error.
    fn reload_options(&self, options: BeeOptions) -> BeeResult<()>;

    /// Produces events until the bee has nothing more to report.
    ///
    /// The hive spawns this once per bee.  Bees that emit no events keep the
    /// default, which returns immediately.
    async fn run(&self, _events: EventSink) -> BeeResult<()> {
        Ok(())
    }

    /// Executes a dispatched action and returns its output values.
    async fn action(&self, action: &Action) -> BeeResult<Placeholders>;
}

/// A shared bee trait object.
pub type BoxedBee = Arc<dyn Bee>;

/// Options together with the settings parsed from them.
#[derive(Debug, Clone)]
struct Configured<S> {
    options: BeeOptions,
    settings: S,
}

/// Identity and configuration storage shared by concrete bees.
///
/// `S` is the bee's typed view of its options.  Both are swapped together
/// under one write lock, so readers never see options and settings from two
/// different reloads.
#[derive(Debug)]
pub struct BeeBase<S> {
    name: String,
    namespace: String,
    description: String,
    state: RwLock<Configured<S>>,
}

impl<S: Clone> BeeBase<S> {
    /// Creates a base whose options have already been parsed into `settings`.
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        description: impl Into<String>,
        options: BeeOptions,
        settings: S,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            description: description.into(),
            state: RwLock::new(Configured { options, settings }),
        }
    }

    /// Parses `options` and builds the base in one step.
    pub fn configure<F>(
        name: impl Into<String>,
        namespace: impl Into<String>,
        description: impl Into<String>,
        options: BeeOptions,
        parse: F,
    ) -> BeeResult<Self>
    where
        F: FnOnce(&BeeOptions) -> BeeResult<S>,
    {
        let settings = parse(&options)?;
        Ok(Self::new(name, namespace, description, options, settings))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns a copy of the applied options.
    pub fn options(&self) -> BeeOptions {
        self.state.read().options.clone()
    }

    /// Returns a copy of the applied settings.
    pub fn settings(&self) -> S {
        self.state.read().settings.clone()
    }

    /// Parses `options` and, on success, swaps them in.
    ///
    /// `parse` runs before the lock is taken; a parse error leaves the
    /// current configuration untouched.
    pub fn reload_with<F>(&self, options: BeeOptions, parse: F) -> BeeResult<()>
    where
        F: FnOnce(&BeeOptions) -> BeeResult<S>,
    {
        let settings = parse(&options)?;
        *self.state.write() = Configured { options, settings };
        debug!(bee = %self.name, namespace = %self.namespace, "Options reloaded");
        Ok(())
    }
}
