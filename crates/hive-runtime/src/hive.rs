//! The hive: owns the factory registry and every running bee.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hive_runtime::Hive;
//!
//! let hive = Hive::builder()
//!     .factory(Arc::new(HueBeeFactory::new()))
//!     .config_file("hive.toml")
//!     .build()?;
//!
//! hive.run().await?;
//! ```
//!
//! Bees are created from the `[[bees]]` entries of the configuration when
//! the hive starts, or at any time through [`Hive::create_bee`].  Actions
//! reach a bee through [`Hive::dispatch`]; events flow back through the
//! [`EventSink`] each bee receives in [`Bee::run`](hive_core::Bee::run).

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;
use hive_core::{
    Action, BeeOptions, BoxedBee, BoxedFactory, Event, EventSink, FactoryInfo, FactoryRegistry,
    HiveError, Placeholders, validate_action, validate_event, validate_options,
};
use parking_lot::{Mutex, RwLock};
use tokio::signal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::config::{BeeConfig, ConfigLoader, HiveConfig, validate_config};
use crate::error::{RuntimeError, RuntimeResult};
use crate::logging;

/// Callback invoked for every accepted event.
pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

/// A bee together with the factory that built it.
struct ManagedBee {
    bee: BoxedBee,
    factory: BoxedFactory,
    task: Option<JoinHandle<()>>,
}

/// The host engine.
///
/// Construct it with [`Hive::builder`].  All methods take `&self`; the
/// instance table is guarded by a lock that is never held across `.await`.
pub struct Hive {
    config: HiveConfig,
    registry: Arc<FactoryRegistry>,
    bees: RwLock<HashMap<String, ManagedBee>>,
    sink: EventSink,
    events: Mutex<Option<mpsc::UnboundedReceiver<Event>>>,
    handlers: Vec<EventHandler>,
}

impl Hive {
    /// Creates a hive builder.
    pub fn builder() -> HiveBuilder {
        HiveBuilder::new()
    }

    /// Returns the configuration the hive was built with.
    pub fn config(&self) -> &HiveConfig {
        &self.config
    }

    /// Returns the factory registry.
    pub fn registry(&self) -> &Arc<FactoryRegistry> {
        &self.registry
    }

    /// Lists every registered factory, ordered by id.
    pub fn factories(&self) -> Vec<FactoryInfo> {
        self.registry.infos()
    }

    /// Returns the running bee called `name`.
    pub fn bee(&self, name: &str) -> Option<BoxedBee> {
        self.bees.read().get(name).map(|m| m.bee.clone())
    }

    /// Names of all running bees, sorted.
    pub fn bee_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.bees.read().keys().cloned().collect();
        names.sort();
        names
    }

    // =========================================================================
    // Bee Lifecycle
    // =========================================================================

    /// Creates a bee from its configuration and starts its event loop.
    ///
    /// The options are validated against the factory before the factory sees
    /// them.  Must be called from within a tokio runtime.
    pub async fn create_bee(&self, config: BeeConfig) -> RuntimeResult<BoxedBee> {
        if self.bees.read().contains_key(&config.name) {
            return Err(RuntimeError::BeeExists(config.name));
        }

        let factory = self.registry.lookup(&config.class)?;
        validate_options(&factory.options(), &config.options).map_err(|e| {
            HiveError::from(e.within(format!("options of bee '{}'", config.name)))
        })?;

        let bee = factory.new_bee(&config.name, &config.description, config.options)?;

        let mut bees = self.bees.write();
        if bees.contains_key(&config.name) {
            return Err(RuntimeError::BeeExists(config.name));
        }
        let task = self.spawn_bee(&bee);
        bees.insert(
            config.name.clone(),
            ManagedBee {
                bee: bee.clone(),
                factory,
                task: Some(task),
            },
        );

        info!(bee = %config.name, factory = %config.class, "Bee created");
        Ok(bee)
    }

    fn spawn_bee(&self, bee: &BoxedBee) -> JoinHandle<()> {
        let bee = bee.clone();
        let sink = self.sink.clone();
        let span = info_span!("bee", bee = %bee.name());
        tokio::spawn(
            async move {
                match bee.run(sink).await {
                    Ok(()) => debug!("Bee event loop finished"),
                    Err(e) => error!(error = %e, "Bee event loop failed"),
                }
            }
            .instrument(span),
        )
    }

    /// Creates every enabled bee in the configuration.
    ///
    /// Failures are logged and skipped; bees that already exist are left
    /// alone.  Returns the number of bees created.
    pub async fn start_bees(&self) -> usize {
        let mut started = 0;

        for config in &self.config.bees {
            if !config.enabled {
                debug!(bee = %config.name, "Bee disabled, skipping");
                continue;
            }
            if self.bees.read().contains_key(&config.name) {
                debug!(bee = %config.name, "Bee already running");
                continue;
            }

            match self.create_bee(config.clone()).await {
                Ok(_) => started += 1,
                Err(e) => {
                    error!(bee = %config.name, factory = %config.class, error = %e, "Failed to create bee");
                }
            }
        }

        info!(started, configured = self.config.bees.len(), "Bees started");
        started
    }

    /// Replaces a bee's options.
    ///
    /// On any error the bee keeps its previous options.
    pub fn reload_bee(&self, name: &str, options: BeeOptions) -> RuntimeResult<()> {
        let (bee, factory) = self.lookup_bee(name)?;

        validate_options(&factory.options(), &options)
            .map_err(|e| HiveError::from(e.within(format!("options of bee '{name}'"))))?;
        bee.reload_options(options)?;

        info!(bee = %name, factory = %factory.id(), "Bee options reloaded");
        Ok(())
    }

    /// Stops and removes a bee.
    pub fn remove_bee(&self, name: &str) -> RuntimeResult<BoxedBee> {
        let managed = self
            .bees
            .write()
            .remove(name)
            .ok_or_else(|| RuntimeError::BeeNotFound(name.to_string()))?;

        if let Some(task) = managed.task {
            task.abort();
        }
        info!(bee = %name, "Bee removed");
        Ok(managed.bee)
    }

    fn lookup_bee(&self, name: &str) -> RuntimeResult<(BoxedBee, BoxedFactory)> {
        self.bees
            .read()
            .get(name)
            .map(|m| (m.bee.clone(), m.factory.clone()))
            .ok_or_else(|| RuntimeError::BeeNotFound(name.to_string()))
    }

    // =========================================================================
    // Actions and Events
    // =========================================================================

    /// Executes `action` on the bee it names.
    ///
    /// The action must be declared by the bee's factory and its parameters
    /// must satisfy the declared placeholders.
    pub async fn dispatch(&self, action: Action) -> RuntimeResult<Placeholders> {
        let (bee, factory) = self.lookup_bee(&action.bee)?;
        validate_action(&factory.actions(), &action).map_err(HiveError::from)?;

        let span = info_span!(
            "dispatch",
            bee = %action.bee,
            namespace = %action.namespace,
            action = %action.name,
        );
        let output = bee.action(&action).instrument(span).await?;

        debug!(bee = %action.bee, action = %action.name, outputs = output.len(), "Action executed");
        Ok(output)
    }

    /// Validates an emitted event and hands it to the event handlers.
    ///
    /// Returns `false` if the event was dropped.
    fn handle_event(&self, event: Event) -> bool {
        let factory = match self.bees.read().get(&event.bee) {
            Some(managed) => managed.factory.clone(),
            None => {
                warn!(bee = %event.bee, event = %event.name, "Dropping event from unknown bee");
                return false;
            }
        };

        if let Err(e) = validate_event(&factory.events(), &event) {
            warn!(bee = %event.bee, error = %e, "Dropping invalid event");
            return false;
        }

        info!(
            bee = %event.bee,
            namespace = %event.namespace,
            event = %event.name,
            fields = event.options.len(),
            "Event received"
        );
        for handler in &self.handlers {
            handler(&event);
        }
        true
    }

    // =========================================================================
    // Running
    // =========================================================================

    /// Starts the configured bees and processes events until Ctrl+C.
    pub async fn run(&self) -> RuntimeResult<()> {
        info!("Hive is now running. Press Ctrl+C to stop.");
        self.run_until(wait_for_shutdown()).await
    }

    /// Starts the configured bees and processes events until `shutdown`
    /// completes.
    pub async fn run_until<F>(&self, shutdown: F) -> RuntimeResult<()>
    where
        F: Future<Output = ()>,
    {
        let Some(mut events) = self.events.lock().take() else {
            warn!("Hive is already running");
            return Ok(());
        };

        self.start_bees().await;

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                received = events.recv() => match received {
                    Some(event) => {
                        self.handle_event(event);
                    }
                    None => break,
                },
            }
        }

        *self.events.lock() = Some(events);
        self.stop().await;
        Ok(())
    }

    /// Stops every bee's event loop. The bees stay registered.
    async fn stop(&self) {
        let tasks: Vec<_> = self
            .bees
            .write()
            .values_mut()
            .filter_map(|m| m.task.take())
            .collect();

        for task in &tasks {
            task.abort();
        }
        join_all(tasks).await;

        info!("Hive stopped");
    }
}

impl std::fmt::Debug for Hive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hive")
            .field("registry", &self.registry)
            .field("bees", &self.bee_names())
            .finish_non_exhaustive()
    }
}

/// Waits for Ctrl+C, or SIGTERM on unix.
async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = signal::ctrl_c() => info!("Received Ctrl+C, shutting down"),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
                }
                return;
            }
            Err(e) => warn!(error = %e, "Failed to register SIGTERM handler"),
        }
    }

    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => error!(error = %e, "Failed to listen for Ctrl+C, shutting down"),
    }
}

// =============================================================================
// HiveBuilder
// =============================================================================

/// Builder for a [`Hive`].
///
/// Factories are registered in the order given; a duplicate or malformed
/// factory makes [`build`](Self::build) fail.
#[derive(Default)]
pub struct HiveBuilder {
    factories: Vec<BoxedFactory>,
    config: Option<HiveConfig>,
    config_loader: Option<ConfigLoader>,
    handlers: Vec<EventHandler>,
    init_logging: bool,
}

impl HiveBuilder {
    /// Creates a builder with no factories and the default configuration.
    pub fn new() -> Self {
        Self {
            init_logging: true,
            ..Default::default()
        }
    }

    /// Adds a factory.
    pub fn factory(mut self, factory: BoxedFactory) -> Self {
        self.factories.push(factory);
        self
    }

    /// Adds several factories.
    pub fn factories(mut self, factories: impl IntoIterator<Item = BoxedFactory>) -> Self {
        self.factories.extend(factories);
        self
    }

    /// Uses an already loaded configuration.
    pub fn config(mut self, config: HiveConfig) -> Self {
        self.config = Some(config);
        self.config_loader = None;
        self
    }

    /// Loads the configuration from `path` plus `HIVE_*` environment variables.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = Some(ConfigLoader::new().file(path));
        self.config = None;
        self
    }

    /// Loads the configuration through a custom loader.
    pub fn config_loader(mut self, loader: ConfigLoader) -> Self {
        self.config_loader = Some(loader);
        self.config = None;
        self
    }

    /// Registers a callback for every accepted event.
    pub fn on_event<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Whether `build` installs the global log subscriber (default: true).
    pub fn init_logging(mut self, enabled: bool) -> Self {
        self.init_logging = enabled;
        self
    }

    /// Registers the factories, loads the configuration and builds the hive.
    pub fn build(self) -> RuntimeResult<Hive> {
        let config = match (self.config, self.config_loader) {
            (Some(config), _) => {
                validate_config(&config)?;
                config
            }
            (None, Some(loader)) => loader.load()?,
            (None, None) => HiveConfig::default(),
        };

        if self.init_logging {
            logging::init_from_config(&config.logging);
        }

        let mut registry = FactoryRegistry::new();
        registry.register_all(self.factories)?;

        let (sink, events) = EventSink::channel();

        info!(
            factories = registry.len(),
            bees = config.bees.len(),
            log_level = %config.logging.level,
            "Hive initialized"
        );

        Ok(Hive {
            config,
            registry: Arc::new(registry),
            bees: RwLock::new(HashMap::new()),
            sink,
            events: Mutex::new(Some(events)),
            handlers: self.handlers,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use hive_core::{
        ActionDescriptor, Bee, BeeBase, BeeError, BeeFactory, BeeResult, EventDescriptor,
        OptionDescriptor, PlaceholderDescriptor, ValueType,
    };

    use super::*;
    use crate::config::ConfigError;

    /// Emits one `tick` event when started and echoes `ping` actions.
    struct TickBee {
        base: BeeBase<u64>,
    }

    fn parse_interval(options: &BeeOptions) -> BeeResult<u64> {
        let interval: u64 = options.bind("interval")?;
        if interval == 0 {
            return Err(BeeError::invalid_option("interval", "must be positive"));
        }
        Ok(interval)
    }

    #[async_trait]
    impl Bee for TickBee {
        fn name(&self) -> &str {
            self.base.name()
        }

        fn namespace(&self) -> &str {
            self.base.namespace()
        }

        fn description(&self) -> &str {
            self.base.description()
        }

        fn options(&self) -> BeeOptions {
            self.base.options()
        }

        fn reload_options(&self, options: BeeOptions) -> BeeResult<()> {
            self.base.reload_with(options, parse_interval)
        }

        async fn run(&self, events: EventSink) -> BeeResult<()> {
            events.emit(Event::new(
                self.name(),
                "Ticker",
                "tick",
                Placeholders::new().with("count", ValueType::Int, 1),
            ))?;
            events.emit(Event::new(self.name(), "Ticker", "bogus", Placeholders::new()))?;
            Ok(())
        }

        async fn action(&self, action: &Action) -> BeeResult<Placeholders> {
            match action.name.as_str() {
                "ping" => Ok(Placeholders::new().with(
                    "interval",
                    ValueType::Int,
                    self.base.settings(),
                )),
                other => Err(BeeError::UnknownAction(other.to_string())),
            }
        }
    }

    struct TickFactory;

    impl BeeFactory for TickFactory {
        fn id(&self) -> &str {
            "tickbee"
        }

        fn name(&self) -> &str {
            "Ticker"
        }

        fn description(&self) -> &str {
            "Emits ticks"
        }

        fn logo_color(&self) -> &str {
            "#000000"
        }

        fn options(&self) -> Vec<OptionDescriptor> {
            vec![OptionDescriptor::new("interval", "Seconds between ticks", ValueType::Int).mandatory()]
        }

        fn events(&self) -> Vec<EventDescriptor> {
            vec![EventDescriptor::new("Ticker", "tick", "A tick").placeholder(
                PlaceholderDescriptor::new("count", "Tick number", ValueType::Int).mandatory(),
            )]
        }

        fn actions(&self) -> Vec<ActionDescriptor> {
            vec![ActionDescriptor::new("Ticker", "ping", "Reports the interval")]
        }

        fn new_bee(&self, name: &str, description: &str, options: BeeOptions) -> BeeResult<BoxedBee> {
            let base = BeeBase::configure(name, self.id(), description, options, parse_interval)?;
            Ok(Arc::new(TickBee { base }))
        }
    }

    fn tick_config(name: &str, interval: i64) -> BeeConfig {
        BeeConfig::new(name, "tickbee", BeeOptions::new().with("interval", interval))
    }

    fn hive_with(config: HiveConfig) -> Hive {
        Hive::builder()
            .init_logging(false)
            .factory(Arc::new(TickFactory))
            .config(config)
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_rejects_duplicate_factory() {
        let result = Hive::builder()
            .init_logging(false)
            .factory(Arc::new(TickFactory))
            .factory(Arc::new(TickFactory))
            .build();
        assert!(matches!(
            result,
            Err(RuntimeError::Hive(HiveError::DuplicateFactory(id))) if id == "tickbee"
        ));
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = HiveConfig {
            bees: vec![tick_config("a", 1), tick_config("a", 2)],
            ..Default::default()
        };
        let result = Hive::builder()
            .init_logging(false)
            .factory(Arc::new(TickFactory))
            .config(config)
            .build();
        assert!(matches!(
            result,
            Err(RuntimeError::Config(ConfigError::DuplicateBeeName(_)))
        ));
    }

    #[test]
    fn test_factories_listing() {
        let hive = hive_with(HiveConfig::default());
        let infos = hive.factories();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].id, "tickbee");
        assert!(hive.registry().contains("tickbee"));
    }

    #[tokio::test]
    async fn test_create_bee() {
        let hive = hive_with(HiveConfig::default());

        let bee = hive.create_bee(tick_config("clock", 5)).await.unwrap();
        assert_eq!(bee.namespace(), "tickbee");
        assert_eq!(hive.bee_names(), ["clock"]);

        assert!(matches!(
            hive.create_bee(tick_config("clock", 5)).await,
            Err(RuntimeError::BeeExists(name)) if name == "clock"
        ));

        let unknown = BeeConfig::new("x", "nope", BeeOptions::new());
        assert!(matches!(
            hive.create_bee(unknown).await,
            Err(RuntimeError::Hive(HiveError::FactoryNotFound(id))) if id == "nope"
        ));

        let missing = BeeConfig::new("y", "tickbee", BeeOptions::new());
        match hive.create_bee(missing).await.err() {
            Some(RuntimeError::Hive(HiveError::Schema(e))) => assert!(e.is_missing("interval")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(hive.bee("y").is_none());
    }

    #[tokio::test]
    async fn test_start_bees_skips_failures() {
        let mut disabled = tick_config("off", 1);
        disabled.enabled = false;
        let config = HiveConfig {
            bees: vec![
                tick_config("good", 3),
                tick_config("zero", 0),
                BeeConfig::new("ghost", "nope", BeeOptions::new()),
                disabled,
            ],
            ..Default::default()
        };
        let hive = hive_with(config);

        assert_eq!(hive.start_bees().await, 1);
        assert_eq!(hive.bee_names(), ["good"]);
        assert_eq!(hive.start_bees().await, 0);
    }

    #[tokio::test]
    async fn test_reload_bee() {
        let hive = hive_with(HiveConfig::default());
        hive.create_bee(tick_config("clock", 5)).await.unwrap();

        assert!(matches!(
            hive.reload_bee("clock", BeeOptions::new().with("interval", "soon")),
            Err(RuntimeError::Hive(HiveError::Schema(_)))
        ));
        assert!(matches!(
            hive.reload_bee("clock", BeeOptions::new().with("interval", 0)),
            Err(RuntimeError::Bee(BeeError::InvalidOption { .. }))
        ));
        let bee = hive.bee("clock").unwrap();
        assert_eq!(bee.options(), BeeOptions::new().with("interval", 5));

        hive.reload_bee("clock", BeeOptions::new().with("interval", 9))
            .unwrap();
        assert_eq!(bee.options(), BeeOptions::new().with("interval", 9));

        assert!(matches!(
            hive.reload_bee("nobody", BeeOptions::new()),
            Err(RuntimeError::BeeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_dispatch() {
        let hive = hive_with(HiveConfig::default());
        hive.create_bee(tick_config("clock", 7)).await.unwrap();

        let output = hive
            .dispatch(Action::new("clock", "Ticker", "ping", Placeholders::new()))
            .await
            .unwrap();
        assert_eq!(output.bind::<u64>("interval").unwrap(), 7);

        let undeclared = Action::new("clock", "Ticker", "pong", Placeholders::new());
        assert!(matches!(
            hive.dispatch(undeclared).await,
            Err(RuntimeError::Hive(HiveError::Schema(_)))
        ));

        let unknown_bee = Action::new("nobody", "Ticker", "ping", Placeholders::new());
        assert!(matches!(
            hive.dispatch(unknown_bee).await,
            Err(RuntimeError::BeeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_run_until_validates_events() {
        let accepted = Arc::new(AtomicUsize::new(0));
        let counter = accepted.clone();
        let hive = Hive::builder()
            .init_logging(false)
            .factory(Arc::new(TickFactory))
            .config(HiveConfig {
                bees: vec![tick_config("clock", 1)],
                ..Default::default()
            })
            .on_event(move |event| {
                assert_eq!(event.name, "tick");
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        hive.run_until(tokio::time::sleep(Duration::from_millis(100)))
            .await
            .unwrap();

        assert_eq!(accepted.load(Ordering::SeqCst), 1);
        assert_eq!(hive.bee_names(), ["clock"]);
    }

    #[tokio::test]
    async fn test_remove_bee() {
        let hive = hive_with(HiveConfig::default());
        hive.create_bee(tick_config("clock", 1)).await.unwrap();

        let removed = hive.remove_bee("clock").unwrap();
        assert_eq!(removed.name(), "clock");
        assert!(hive.bee_names().is_empty());
        assert!(matches!(
            hive.remove_bee("clock"),
            Err(RuntimeError::BeeNotFound(_))
        ));
    }
}
