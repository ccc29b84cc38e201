use crate::config::{DefaultLayout, ResolverConfig, ResolverOptions};
use crate::error::Error;
use crate::fs::{RealFs, ResolverFs};
use crate::plugin::{HookResult, Plugin, PluginContext, ResolveIdResult};
use crate::resolver::Resolver;
use std::path::{Path, PathBuf};

/// Plugin name reported to the host.
pub const ESBUILD_PLUGIN_NAME: &str = "pnpm-deps-resolver";

/// The `filter` regex string a host passes to `build.onResolve` when it
/// registers [`EsbuildAdapter::on_resolve`]. The host evaluates it, not this
/// crate; [`EsbuildAdapter::matches_filter`] is the same predicate in Rust.
pub const ON_RESOLVE_FILTER: &str = "^[^.]";

/// Namespace esbuild uses for files on disk.
const FILE_NAMESPACE: &str = "file";

/// Arguments of an esbuild `onResolve` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnResolveArgs {
    /// The import path as written.
    pub path: String,
    /// The importing file; empty for entry points.
    pub importer: String,
    pub namespace: String,
    /// Directory of the importer.
    pub resolve_dir: String,
}

impl OnResolveArgs {
    /// Arguments for `path` imported from `importer` in the file namespace.
    pub fn new(path: impl Into<String>, importer: impl Into<String>) -> Self {
        let importer = importer.into();
        let resolve_dir = Path::new(&importer)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path: path.into(),
            importer,
            namespace: FILE_NAMESPACE.to_string(),
            resolve_dir,
        }
    }
}

/// Result of an esbuild `onResolve` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnResolveResult {
    pub path: PathBuf,
    pub namespace: String,
}

/// Esbuild-style adapter: an `onResolve` callback plus a [`Plugin`] bridge.
#[derive(Debug, Clone)]
pub struct EsbuildAdapter<F = RealFs> {
    resolver: Resolver<F>,
}

impl EsbuildAdapter<RealFs> {
    /// Build the adapter with esbuild layout defaults relative to `anchor`.
    pub fn new(options: ResolverOptions, anchor: &Path) -> Result<Self, Error> {
        let config = ResolverConfig::from_options(options, anchor, DefaultLayout::Esbuild)?;
        Ok(Self::from_resolver(Resolver::new(config)))
    }
}

impl<F: ResolverFs> EsbuildAdapter<F> {
    /// Wrap an existing resolver.
    pub fn from_resolver(resolver: Resolver<F>) -> Self {
        Self { resolver }
    }

    /// The shared resolver.
    pub fn resolver(&self) -> &Resolver<F> {
        &self.resolver
    }

    /// Whether esbuild would invoke the callback for `path` at all, i.e.
    /// whether [`ON_RESOLVE_FILTER`] matches it: at least one character, and
    /// the first is not `.`.
    pub fn matches_filter(path: &str) -> bool {
        path.chars().next().is_some_and(|c| c != '.')
    }

    /// The `onResolve` callback. `None` lets esbuild continue with its own
    /// resolution.
    pub fn on_resolve(&self, args: &OnResolveArgs) -> Option<OnResolveResult> {
        if !Self::matches_filter(&args.path) {
            return None;
        }

        let importer = Some(args.importer.as_str()).filter(|s| !s.is_empty());
        let resolved = self.resolver.resolve(&args.path, importer).resolved?;
        Some(OnResolveResult {
            path: resolved,
            namespace: FILE_NAMESPACE.to_string(),
        })
    }
}

impl<F: ResolverFs> Plugin for EsbuildAdapter<F> {
    fn name(&self) -> &str {
        ESBUILD_PLUGIN_NAME
    }

    fn resolve_id(
        &self,
        specifier: &str,
        importer: Option<&str>,
        _ctx: &PluginContext,
    ) -> HookResult<Option<ResolveIdResult>> {
        let args = OnResolveArgs::new(specifier, importer.unwrap_or_default());
        Ok(self
            .on_resolve(&args)
            .map(|result| ResolveIdResult::resolved(result.path.to_string_lossy())))
    }
}
