//! # Theme Service
//!
//! [ThemeService] owns the active theme, the display mode and the resolved
//! dark flag. It validates and activates themes, persists the user's choice,
//! follows the system preference in auto mode, projects the result onto a
//! [StyleSurface] and heals itself when something goes wrong.
//!
//! ## Frames
//!
//! Mutations never touch the style surface directly. They mark a
//! projection as pending, and the host calls [ThemeService::run_frame] at
//! its paint boundary:
//!
//! ```rust
//! use lumen_theme::manager::ThemeService;
//! use lumen_theme::mode::DisplayMode;
//! use lumen_theme::surface::{MemorySurface, StyleSurface};
//!
//! let surface = MemorySurface::new();
//! let service = ThemeService::builder()
//!     .with_surface(surface.clone())
//!     .build();
//!
//! service.change_theme("icarus").unwrap();
//! service.set_mode(DisplayMode::Dark).unwrap();
//! service.run_frame().unwrap();
//!
//! assert_eq!(surface.property("--bb-primary").as_deref(), Some("#f0a202"));
//! assert_eq!(surface.property("--bb-background").as_deref(), Some("#121212"));
//! ```
//!
//! ## Fallbacks
//!
//! When a requested theme is unknown or invalid and fallbacks are enabled,
//! the service activates the configured default theme instead. The default
//! is trusted: if it fails too, the error is returned and nothing changes.
//! In strict mode, validation failures are returned to the caller instead of
//! falling back.

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};
use std::time::SystemTime;

use indexmap::IndexMap;

use crate::builtin::DEFAULT_THEME;
use crate::config::ThemeServiceConfig;
use crate::error::{ThemeError, ThemeResult};
use crate::events::{ThemeChange, ThemeChangeEvent, ThemeSnapshot};
use crate::mode::DisplayMode;
use crate::preference::{StaticPreference, SystemPreference};
use crate::projection::{base_properties, compute_properties, ApplyReport, Projector, PROPERTY_PREFIX};
use crate::registry::ThemeRegistry;
use crate::storage::{MemoryStorage, ThemeStorage};
use crate::surface::{MemorySurface, StyleSurface};
use crate::theme::ThemeConfig;
use crate::validator::validate;

type ThemeListener = Rc<dyn Fn(&ThemeChangeEvent)>;
type StateListener = Rc<dyn Fn(&ThemeSnapshot)>;

/// Prefix of the registry keys generated by [ThemeService::apply_custom_theme].
pub const TEMP_THEME_PREFIX: &str = "__temp_";

/// Result of [ThemeService::validate_system_state].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemStateReport {
    /// `true` when no issue was found.
    pub is_valid: bool,
    /// Human-readable problems.
    pub issues: Vec<String>,
}

#[derive(Debug, Clone)]
struct ServiceState {
    active_theme: String,
    mode: DisplayMode,
    is_dark: bool,
}

struct Inner {
    config: ThemeServiceConfig,
    registry: RefCell<ThemeRegistry>,
    state: RefCell<ServiceState>,
    projector: RefCell<Projector>,
    storage: RefCell<Box<dyn ThemeStorage>>,
    surface: RefCell<Box<dyn StyleSurface>>,
    preference: Rc<dyn SystemPreference>,
    theme_listeners: RefCell<Vec<ThemeListener>>,
    state_listeners: RefCell<Vec<StateListener>>,
    next_temp_id: Cell<u64>,
}

/// The theme state machine.
///
/// `ThemeService` is single-threaded. Construct it once at startup and pass
/// it by reference to everything that needs it.
pub struct ThemeService {
    inner: Rc<Inner>,
}

/// Builder for [ThemeService] with in-memory defaults for every
/// collaborator.
pub struct ThemeServiceBuilder {
    config: ThemeServiceConfig,
    storage: Option<Box<dyn ThemeStorage>>,
    preference: Option<Rc<dyn SystemPreference>>,
    surface: Option<Box<dyn StyleSurface>>,
    themes: Vec<ThemeConfig>,
}

impl ThemeServiceBuilder {
    fn new() -> Self {
        Self {
            config: ThemeServiceConfig::default(),
            storage: None,
            preference: None,
            surface: None,
            themes: Vec::new(),
        }
    }

    /// Use `config` instead of the default configuration.
    pub fn with_config(mut self, config: ThemeServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Persist preferences to `storage`.
    pub fn with_storage(mut self, storage: impl ThemeStorage + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Read the system light/dark preference from `preference`.
    pub fn with_preference(mut self, preference: Rc<dyn SystemPreference>) -> Self {
        self.preference = Some(preference);
        self
    }

    /// Project themes onto `surface`.
    pub fn with_surface(mut self, surface: impl StyleSurface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Register an extra theme before the persisted choice is restored, so
    /// that a persisted custom theme can be reactivated.
    pub fn with_theme(mut self, theme: ThemeConfig) -> Self {
        self.themes.push(theme);
        self
    }

    /// Register several extra themes. See [ThemeServiceBuilder::with_theme].
    pub fn with_themes(mut self, themes: impl IntoIterator<Item = ThemeConfig>) -> Self {
        self.themes.extend(themes);
        self
    }

    /// Build the service.
    pub fn build(self) -> ThemeService {
        ThemeService::init(
            self.config,
            self.storage.unwrap_or_else(|| Box::new(MemoryStorage::new())),
            self.preference
                .unwrap_or_else(|| Rc::new(StaticPreference::light())),
            self.surface.unwrap_or_else(|| Box::new(MemorySurface::new())),
            self.themes,
        )
    }
}

impl ThemeService {
    /// Create a service with injected collaborators.
    ///
    /// The registry is seeded with the built-in themes, the persisted theme
    /// and mode are restored, and the initial projection is scheduled.
    pub fn new(
        config: ThemeServiceConfig,
        storage: Box<dyn ThemeStorage>,
        preference: Rc<dyn SystemPreference>,
        surface: Box<dyn StyleSurface>,
    ) -> Self {
        Self::init(config, storage, preference, surface, Vec::new())
    }

    /// Start building a service with in-memory collaborators.
    pub fn builder() -> ThemeServiceBuilder {
        ThemeServiceBuilder::new()
    }

    fn init(
        config: ThemeServiceConfig,
        storage: Box<dyn ThemeStorage>,
        preference: Rc<dyn SystemPreference>,
        surface: Box<dyn StyleSurface>,
        extra_themes: Vec<ThemeConfig>,
    ) -> Self {
        log::debug!("Initializing theme service");

        let mut registry = ThemeRegistry::with_builtins();
        for theme in extra_themes {
            if config.validate_themes {
                if let Err(err) = validate(&theme).into_result(theme.name.clone()) {
                    log::error!("Skipping theme: {}", err);
                    continue;
                }
            }
            registry.register(theme);
        }

        let default_theme = if registry.contains(&config.default_theme) {
            config.default_theme.clone()
        } else {
            log::error!(
                "Default theme '{}' not found in registry, using '{}'",
                config.default_theme,
                DEFAULT_THEME
            );
            DEFAULT_THEME.to_string()
        };

        let read = |key: &str| -> Option<String> {
            if !config.persist_theme {
                return None;
            }
            match storage.get(key) {
                Ok(value) => value,
                Err(err) => {
                    log::warn!("Failed to read saved preference '{}': {}", key, err);
                    None
                },
            }
        };

        let active_theme = match read(&config.storage_key_theme) {
            Some(saved) if registry.contains(&saved) => saved,
            Some(saved) => {
                log::warn!("Saved theme '{}' is not registered, using '{}'", saved, default_theme);
                default_theme
            },
            None => default_theme,
        };

        let saved_mode = read(&config.storage_key_mode).and_then(|saved| match saved.parse::<DisplayMode>() {
            Ok(mode) => Some(mode),
            Err(err) => {
                log::warn!("Ignoring saved mode: {}", err);
                None
            },
        });

        let prefers_dark = preference.prefers_dark();
        let (mode, is_dark) = match saved_mode {
            Some(mode) => (mode, mode.resolve(prefers_dark)),
            None if config.enable_system_mode => (DisplayMode::explicit(prefers_dark), prefers_dark),
            None => (DisplayMode::Light, false),
        };

        let mut projector = Projector::new(config.strict_mode);
        projector.schedule();

        let inner = Rc::new(Inner {
            registry: RefCell::new(registry),
            state: RefCell::new(ServiceState {
                active_theme,
                mode,
                is_dark,
            }),
            projector: RefCell::new(projector),
            storage: RefCell::new(storage),
            surface: RefCell::new(surface),
            preference,
            theme_listeners: RefCell::new(Vec::new()),
            state_listeners: RefCell::new(Vec::new()),
            next_temp_id: Cell::new(1),
            config,
        });

        if inner.config.enable_system_mode {
            let weak: Weak<Inner> = Rc::downgrade(&inner);
            inner.preference.subscribe(Box::new(move |dark| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_system_preference(dark);
                }
            }));
        }

        {
            let state = inner.state.borrow();
            log::debug!(
                "Theme service ready: theme '{}', mode {}, dark {}",
                state.active_theme,
                state.mode,
                state.is_dark
            );
        }

        Self { inner }
    }

    /// Activate the theme registered under `name`.
    ///
    /// # Errors
    ///
    /// - [ThemeError::ValidationFailed] in strict mode when the theme is invalid.
    /// - [ThemeError::ThemeNotFound] or [ThemeError::ValidationFailed] when
    ///   the theme is unusable and no fallback applies (fallbacks disabled, or
    ///   `name` is the default theme).
    pub fn change_theme(&self, name: &str) -> ThemeResult<ThemeChange> {
        log::debug!("change_theme called with: {}", name);
        self.inner.change_theme(name)
    }

    /// Set the display mode.
    ///
    /// [DisplayMode::Auto] resolves the dark flag from the system
    /// preference. Later system changes are followed only when
    /// [ThemeServiceConfig::enable_system_mode] is set; otherwise the
    /// flag is resolved once, here. The active theme is never changed
    /// and no [ThemeChangeEvent] is emitted.
    pub fn set_mode(&self, mode: DisplayMode) -> ThemeResult<()> {
        self.inner.set_mode(mode);
        Ok(())
    }

    /// Switch to the opposite of the resolved mode. Leaves auto mode.
    pub fn toggle_mode(&self) -> ThemeResult<()> {
        let is_dark = self.is_dark();
        log::debug!(
            "toggle_mode called: {} -> {}",
            DisplayMode::explicit(is_dark),
            DisplayMode::explicit(!is_dark)
        );
        self.set_mode(DisplayMode::explicit(!is_dark))
    }

    /// Register a theme, replacing any theme with the same key.
    ///
    /// Returns the validation warnings (empty when validation is disabled).
    ///
    /// # Errors
    ///
    /// [ThemeError::ValidationFailed] when validation is enabled and the
    /// theme is invalid. The registry is left unchanged.
    pub fn register_theme(&self, theme: ThemeConfig) -> ThemeResult<Vec<String>> {
        self.inner.register_theme(theme)
    }

    /// Register several themes, returning how many were accepted.
    pub fn register_themes(&self, themes: impl IntoIterator<Item = ThemeConfig>) -> usize {
        themes
            .into_iter()
            .filter_map(|theme| {
                self.register_theme(theme)
                    .map_err(|err| log::error!("Theme registration failed: {}", err))
                    .ok()
            })
            .count()
    }

    /// Remove a theme from the registry.
    ///
    /// # Errors
    ///
    /// [ThemeError::ActiveThemeRemoval] for the active theme and
    /// [ThemeError::ThemeNotFound] when no such theme is registered.
    pub fn unregister_theme(&self, name: &str) -> ThemeResult<ThemeConfig> {
        if self.inner.state.borrow().active_theme == name {
            log::warn!("Cannot unregister currently active theme '{}'", name);
            return Err(ThemeError::ActiveThemeRemoval {
                name: name.to_string(),
            });
        }

        self.inner
            .registry
            .borrow_mut()
            .unregister(name)
            .ok_or_else(|| ThemeError::not_found(name))
    }

    /// Register a copy of `theme` under a generated key and activate it.
    ///
    /// Returns the generated key. The entry stays registered until the
    /// caller passes the key to [ThemeService::unregister_theme].
    pub fn apply_custom_theme(&self, theme: ThemeConfig) -> ThemeResult<String> {
        let key = self.inner.next_temp_key();
        let mut copy = theme.renamed(key.clone());
        copy.is_custom = true;

        self.register_theme(copy)?;
        match self.change_theme(&key)? {
            ThemeChange::Applied => Ok(key),
            ThemeChange::FellBack { .. } => Err(ThemeError::not_found(key)),
        }
    }

    /// Activate the default theme and switch to light mode.
    ///
    /// Light mode is applied even when the default theme cannot be
    /// activated; that failure is returned afterwards.
    pub fn reset_to_default(&self) -> ThemeResult<()> {
        let default_theme = self.inner.config.default_theme.clone();
        let changed = self.change_theme(&default_theme);
        self.set_mode(DisplayMode::Light)?;
        changed.map(|_| ())
    }

    /// Best-effort self-heal after an error in `context`.
    ///
    /// With fallbacks enabled, the default theme is reactivated and dark mode
    /// is switched off. Repeated calls converge. Returns whether anything
    /// changed.
    pub fn recover_from_error(&self, context: &str) -> bool {
        self.inner.recover_from_error(context)
    }

    /// Check that the active and default themes are registered and that the
    /// style surface carries the projected primary color.
    ///
    /// A pending projection is run first. If a problem is found and
    /// fallbacks are enabled, [ThemeService::recover_from_error] is invoked.
    pub fn validate_system_state(&self) -> SystemStateReport {
        if self.inner.projector.borrow().is_pending() {
            if let Err(err) = self.run_frame() {
                log::warn!("Projection failed during state validation: {}", err);
            }
        }

        let mut issues = Vec::new();
        {
            let registry = self.inner.registry.borrow();
            let state = self.inner.state.borrow();
            if !registry.contains(&state.active_theme) {
                issues.push(format!(
                    "Current theme \"{}\" not found in registry",
                    state.active_theme
                ));
            }
            let default_theme = &self.inner.config.default_theme;
            if !registry.contains(default_theme) {
                issues.push(format!("Default theme \"{}\" not found in registry", default_theme));
            }
        }

        let primary = self
            .inner
            .surface
            .borrow()
            .property(&format!("{}primary", PROPERTY_PREFIX));
        if primary.map_or(true, |value| value.is_empty()) {
            issues.push("CSS custom properties not detected - theme may not be applying".to_string());
        }

        let is_valid = issues.is_empty();
        if !is_valid {
            log::warn!("System state validation failed: {:?}", issues);
            if self.inner.config.enable_fallbacks {
                log::debug!("Attempting system state recovery");
                self.recover_from_error("validate_system_state");
            }
        }

        SystemStateReport { is_valid, issues }
    }

    /// Apply the pending projection, if any.
    ///
    /// Returns `Ok(None)` when nothing was pending. A failed projection
    /// triggers [ThemeService::recover_from_error]; if recovery changed the
    /// state, another frame is scheduled.
    pub fn run_frame(&self) -> ThemeResult<Option<ApplyReport>> {
        if !self.inner.projector.borrow_mut().take_pending() {
            return Ok(None);
        }

        let (active, is_dark) = {
            let state = self.inner.state.borrow();
            (state.active_theme.clone(), state.is_dark)
        };
        let Some(theme) = self.inner.registry.borrow().get(&active).cloned() else {
            log::warn!("No theme configuration found, skipping CSS update");
            return Ok(None);
        };

        log::debug!(
            "Updating CSS variables for theme: {}, dark mode: {}",
            theme.name,
            is_dark
        );
        let updates = compute_properties(&theme, is_dark);
        let result = {
            let mut surface = self.inner.surface.borrow_mut();
            self.inner
                .projector
                .borrow_mut()
                .apply(surface.as_mut(), &theme, is_dark, &updates)
        };

        match result {
            Ok(report) => Ok(Some(report)),
            Err(err) => {
                self.recover_from_error("run_frame");
                Err(err)
            },
        }
    }

    /// Register a callback for successful theme changes.
    pub fn on_theme_change(&self, listener: impl Fn(&ThemeChangeEvent) + 'static) {
        self.inner.theme_listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Register a callback invoked after every state mutation.
    pub fn on_state_change(&self, listener: impl Fn(&ThemeSnapshot) + 'static) {
        self.inner.state_listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Registry key of the active theme.
    pub fn active_theme(&self) -> String {
        self.inner.state.borrow().active_theme.clone()
    }

    /// Definition of the active theme.
    pub fn active_theme_config(&self) -> Option<ThemeConfig> {
        self.theme(&self.active_theme())
    }

    /// The chosen display mode.
    pub fn mode(&self) -> DisplayMode {
        self.inner.state.borrow().mode
    }

    /// The resolved dark flag.
    pub fn is_dark(&self) -> bool {
        self.inner.state.borrow().is_dark
    }

    /// The observable state.
    pub fn snapshot(&self) -> ThemeSnapshot {
        self.inner.snapshot()
    }

    /// Look up a registered theme.
    pub fn theme(&self, name: &str) -> Option<ThemeConfig> {
        self.inner.registry.borrow().get(name).cloned()
    }

    /// All registered themes, in registration order.
    pub fn all_themes(&self) -> Vec<ThemeConfig> {
        self.inner.registry.borrow().all().cloned().collect()
    }

    /// The service configuration.
    pub fn config(&self) -> &ThemeServiceConfig {
        &self.inner.config
    }

    /// Borrow the registry.
    pub fn registry(&self) -> Ref<'_, ThemeRegistry> {
        self.inner.registry.borrow()
    }

    /// The base `--bb-<key>` colors of the active theme, without mode
    /// overrides or derived tokens.
    pub fn theme_custom_properties(&self) -> IndexMap<String, String> {
        self.active_theme_config()
            .map(|theme| {
                base_properties(&theme)
                    .into_iter()
                    .map(|update| (update.property, update.value))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether a projection is waiting for [ThemeService::run_frame].
    pub fn has_pending_frame(&self) -> bool {
        self.inner.projector.borrow().is_pending()
    }

    /// Number of projections applied so far.
    pub fn frames_applied(&self) -> usize {
        self.inner.projector.borrow().frames()
    }
}

impl Inner {
    fn change_theme(&self, name: &str) -> ThemeResult<ThemeChange> {
        let err = match self.activate(name) {
            Ok(()) => return Ok(ThemeChange::Applied),
            Err(err) => err,
        };

        match &err {
            ThemeError::ThemeNotFound { .. } => {
                log::error!("Theme \"{}\" not found in registry", name);
                log::debug!(
                    "Available themes: {:?}",
                    self.registry.borrow().names().collect::<Vec<_>>()
                );
            },
            _ => log::error!("{}", err),
        }

        if self.config.strict_mode && matches!(err, ThemeError::ValidationFailed { .. }) {
            return Err(err);
        }

        let default_theme = &self.config.default_theme;
        if !self.config.enable_fallbacks || name == default_theme {
            return Err(err);
        }

        log::debug!("Falling back to default theme: {}", default_theme);
        self.activate(default_theme)?;
        Ok(ThemeChange::FellBack {
            requested: name.to_string(),
            active: default_theme.clone(),
        })
    }

    fn activate(&self, name: &str) -> ThemeResult<()> {
        let theme = self
            .registry
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| ThemeError::not_found(name))?;

        if self.config.validate_themes {
            validate(&theme).into_result(name)?;
        }

        let (previous_theme, is_dark) = {
            let mut state = self.state.borrow_mut();
            let previous = std::mem::replace(&mut state.active_theme, name.to_string());
            (previous, state.is_dark)
        };

        if self.config.persist_theme {
            self.persist(&self.config.storage_key_theme, name);
        }
        log::debug!("Theme changed from {} to {}", previous_theme, name);

        let event = ThemeChangeEvent {
            previous_theme,
            current_theme: name.to_string(),
            is_dark,
            timestamp: SystemTime::now(),
        };
        let listeners: Vec<ThemeListener> = self.theme_listeners.borrow().clone();
        for listener in listeners {
            listener(&event);
        }

        self.state_changed();
        Ok(())
    }

    fn set_mode(&self, mode: DisplayMode) {
        let is_dark = mode.resolve(self.preference.prefers_dark());
        {
            let mut state = self.state.borrow_mut();
            state.mode = mode;
            state.is_dark = is_dark;
        }

        if self.config.persist_theme {
            self.persist(&self.config.storage_key_mode, mode.as_str());
        }
        log::debug!("Display mode set to {} (dark: {})", mode, is_dark);

        self.state_changed();
    }

    fn register_theme(&self, theme: ThemeConfig) -> ThemeResult<Vec<String>> {
        let warnings = if self.config.validate_themes {
            validate(&theme).into_result(theme.name.clone())?
        } else {
            Vec::new()
        };
        for warning in &warnings {
            log::warn!("Theme '{}': {}", theme.name, warning);
        }

        let name = theme.name.clone();
        self.registry.borrow_mut().register(theme);
        log::debug!("Registered theme '{}'", name);

        if self.state.borrow().active_theme == name {
            self.projector.borrow_mut().schedule();
        }
        Ok(warnings)
    }

    fn recover_from_error(&self, context: &str) -> bool {
        log::error!("Error in {}", context);
        if !self.config.enable_fallbacks {
            return false;
        }
        log::debug!("Attempting error recovery for {}", context);

        let default_theme = &self.config.default_theme;
        let default_registered = self.registry.borrow().contains(default_theme);
        let mut changed = false;
        {
            let mut state = self.state.borrow_mut();
            if state.active_theme != *default_theme && default_registered {
                log::debug!("Resetting to default theme due to error");
                state.active_theme = default_theme.clone();
                changed = true;
            }
            if state.is_dark {
                log::debug!("Disabling dark mode due to error");
                state.is_dark = false;
                state.mode = DisplayMode::Light;
                changed = true;
            }
        }

        if changed {
            self.state_changed();
        }
        changed
    }

    fn on_system_preference(&self, dark: bool) {
        let changed = {
            let mut state = self.state.borrow_mut();
            if state.mode != DisplayMode::Auto || state.is_dark == dark {
                false
            } else {
                state.is_dark = dark;
                true
            }
        };

        if changed {
            log::debug!("System preference changed (dark: {})", dark);
            self.state_changed();
        }
    }

    fn next_temp_key(&self) -> String {
        let registry = self.registry.borrow();
        loop {
            let id = self.next_temp_id.get();
            self.next_temp_id.set(id + 1);
            let key = format!("{}{}", TEMP_THEME_PREFIX, id);
            if !registry.contains(&key) {
                return key;
            }
        }
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(err) = self.storage.borrow_mut().set(key, value) {
            log::warn!("Failed to persist '{}': {}", key, err);
        }
    }

    fn snapshot(&self) -> ThemeSnapshot {
        let state = self.state.borrow();
        ThemeSnapshot {
            active_theme: state.active_theme.clone(),
            mode: state.mode,
            is_dark: state.is_dark,
        }
    }

    fn state_changed(&self) {
        self.projector.borrow_mut().schedule();

        let snapshot = self.snapshot();
        let listeners: Vec<StateListener> = self.state_listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}
