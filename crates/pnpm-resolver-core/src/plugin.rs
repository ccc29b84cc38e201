//! Host plugin interface.
//!
//! A Rollup-compatible subset of build-tool hooks: enough to register a
//! resolver and let the host fall through to its default resolution when a
//! plugin has no opinion.
//!
//! ## Example
//!
//! ```ignore
//! use pnpm_resolver_core::plugin::{HookResult, Plugin, PluginContext, ResolveIdResult};
//!
//! struct Vendored;
//!
//! impl Plugin for Vendored {
//!     fn name(&self) -> &str { "vendored" }
//!
//!     fn resolve_id(
//!         &self,
//!         specifier: &str,
//!         _importer: Option<&str>,
//!         _ctx: &PluginContext,
//!     ) -> HookResult<Option<ResolveIdResult>> {
//!         if specifier == "lit" {
//!             return Ok(Some(ResolveIdResult::resolved("/vendor/lit/index.js")));
//!         }
//!         Ok(None)
//!     }
//! }
//! ```

/// Result type for plugin hooks.
pub type HookResult<T> = Result<T, PluginError>;

/// Error from a plugin.
#[derive(Debug)]
pub struct PluginError {
    /// Plugin name that caused the error.
    pub plugin: String,
    /// Hook that failed.
    pub hook: &'static str,
    /// Error message.
    pub message: String,
}

impl PluginError {
    /// Create a new plugin error.
    pub fn new(plugin: impl Into<String>, hook: &'static str, message: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            hook,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for PluginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.plugin, self.hook, self.message)
    }
}

impl std::error::Error for PluginError {}

/// Context passed to plugin hooks.
///
/// Carries no host state yet; hooks take it so the signatures match the
/// host's hook shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct PluginContext;

/// Result of resolve hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveIdResult {
    /// Resolved module ID (an absolute file path).
    pub id: String,
}

impl ResolveIdResult {
    /// Create a resolved module result.
    pub fn resolved(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Plugin enforcement ordering.
///
/// Controls where a plugin runs relative to others in the pipeline.
/// Mirrors Vite's `enforce` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum PluginEnforce {
    /// Runs before normal plugins (e.g., alias resolution).
    Pre,
    /// Default ordering (no enforcement).
    #[default]
    Normal,
    /// Runs after normal plugins.
    Post,
}

/// The plugin trait.
///
/// All hooks have default implementations that do nothing, so a plugin
/// only implements what it needs.
pub trait Plugin: Send + Sync {
    /// Plugin name for debugging and error messages.
    fn name(&self) -> &str;

    /// Plugin ordering: `Pre`, `Normal` (default), or `Post`.
    fn enforce(&self) -> PluginEnforce {
        PluginEnforce::Normal
    }

    /// Called at the start of the build.
    fn build_start(&self, _ctx: &PluginContext) -> HookResult<()> {
        Ok(())
    }

    /// Resolve a module specifier to an ID.
    ///
    /// Return `Some(result)` to handle this resolution, or `None` to let
    /// the next plugin or default resolver handle it.
    fn resolve_id(
        &self,
        _specifier: &str,
        _importer: Option<&str>,
        _ctx: &PluginContext,
    ) -> HookResult<Option<ResolveIdResult>> {
        Ok(None)
    }
}

/// A container for managing multiple plugins.
///
/// Plugins are sorted by their `enforce()` ordering: `Pre` → `Normal` → `Post`.
/// Within the same enforcement level, insertion order is preserved.
pub struct PluginContainer {
    plugins: Vec<Box<dyn Plugin>>,
    ctx: PluginContext,
}

impl Default for PluginContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginContainer {
    /// Create an empty plugin container.
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            ctx: PluginContext,
        }
    }

    /// Add a plugin, keeping the list ordered by `enforce()`.
    pub fn add(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
        // stable: preserves insertion order within a level
        self.plugins.sort_by_key(|p| p.enforce());
    }

    /// Plugin names in hook order.
    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Call build_start on all plugins.
    pub fn build_start(&self) -> HookResult<()> {
        for plugin in &self.plugins {
            plugin.build_start(&self.ctx)?;
        }
        Ok(())
    }

    /// Try to resolve a module ID through plugins.
    /// Returns None if no plugin handled the resolution.
    pub fn resolve_id(
        &self,
        specifier: &str,
        importer: Option<&str>,
    ) -> HookResult<Option<ResolveIdResult>> {
        for plugin in &self.plugins {
            if let Some(result) = plugin.resolve_id(specifier, importer, &self.ctx)? {
                return Ok(Some(result));
            }
        }
        Ok(None)
    }

    /// Check if any plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }
}
