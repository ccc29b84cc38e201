use crate::config::{DefaultLayout, ResolverConfig, ResolverOptions};
use crate::error::Error;
use crate::fs::{RealFs, ResolverFs};
use crate::plugin::{HookResult, Plugin, PluginContext, ResolveIdResult};
use crate::resolver::Resolver;
use std::path::Path;

/// Rollup-style adapter: a [`Plugin`] whose `resolve_id` returns the entry
/// file path or `None`.
#[derive(Debug, Clone)]
pub struct RollupAdapter<F = RealFs> {
    resolver: Resolver<F>,
}

/// Plugin name reported to the host.
pub const ROLLUP_PLUGIN_NAME: &str = "rollup-plugin-pnpm-deps-resolver";

impl RollupAdapter<RealFs> {
    /// Build the adapter with rollup layout defaults relative to `anchor`.
    pub fn new(options: ResolverOptions, anchor: &Path) -> Result<Self, Error> {
        let config = ResolverConfig::from_options(options, anchor, DefaultLayout::Rollup)?;
        Ok(Self::from_resolver(Resolver::new(config)))
    }
}

impl<F: ResolverFs> RollupAdapter<F> {
    /// Wrap an existing resolver.
    pub fn from_resolver(resolver: Resolver<F>) -> Self {
        Self { resolver }
    }

    /// The shared resolver.
    pub fn resolver(&self) -> &Resolver<F> {
        &self.resolver
    }
}

impl<F: ResolverFs> Plugin for RollupAdapter<F> {
    fn name(&self) -> &str {
        ROLLUP_PLUGIN_NAME
    }

    /// Entry points (no importer) are left to the host.
    fn resolve_id(
        &self,
        specifier: &str,
        importer: Option<&str>,
        _ctx: &PluginContext,
    ) -> HookResult<Option<ResolveIdResult>> {
        let Some(importer) = importer else {
            return Ok(None);
        };

        let resolution = self.resolver.resolve(specifier, Some(importer));
        Ok(resolution
            .resolved
            .map(|path| ResolveIdResult::resolved(path.to_string_lossy())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::PluginContainer;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// `<repo>/packages/rollup-plugin/dist` as the anchor.
    fn fixture() -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let anchor = dir.path().join("packages/rollup-plugin/dist");
        fs::create_dir_all(&anchor).unwrap();
        (dir, anchor)
    }

    #[test]
    fn test_resolves_from_root_store() {
        let (dir, anchor) = fixture();
        let pkg = dir
            .path()
            .join("node_modules/.store/lit-npm-3.1.0-x1/node_modules/lit");
        write(&pkg.join("package.json"), r#"{"module": "index.js"}"#);
        write(&pkg.join("index.js"), "");

        let adapter = RollupAdapter::new(ResolverOptions::default(), &anchor).unwrap();
        let result = adapter
            .resolve_id("lit", Some("/src/app.js"), &PluginContext::default())
            .unwrap();
        assert_eq!(
            result,
            Some(ResolveIdResult::resolved(
                pkg.join("index.js").to_string_lossy()
            ))
        );
    }

    #[test]
    fn test_workspace_default_is_parent_node_modules() {
        let (dir, anchor) = fixture();
        let pkg = dir.path().join("packages/rollup-plugin/node_modules/dep");
        write(&pkg.join("package.json"), r#"{"main": "main.js"}"#);
        write(&pkg.join("main.js"), "");

        let adapter = RollupAdapter::new(ResolverOptions::default(), &anchor).unwrap();
        let result = adapter
            .resolve_id("dep", Some("/src/app.js"), &PluginContext::default())
            .unwrap()
            .unwrap();
        assert_eq!(PathBuf::from(result.id), pkg.join("main.js"));
    }

    #[test]
    fn test_no_importer_is_no_opinion() {
        let (dir, anchor) = fixture();
        let pkg = dir.path().join("node_modules/dep");
        write(&pkg.join("index.js"), "");
        write(&pkg.join("package.json"), "{}");

        let adapter = RollupAdapter::new(ResolverOptions::default(), &anchor).unwrap();
        let ctx = PluginContext::default();
        assert_eq!(adapter.resolve_id("dep", None, &ctx).unwrap(), None);
        assert!(adapter.resolve_id("dep", Some("/src/a.js"), &ctx).unwrap().is_some());
    }

    #[test]
    fn test_relative_and_allow_list() {
        let (dir, anchor) = fixture();
        write(&dir.path().join("node_modules/dep/index.js"), "");
        write(&dir.path().join("node_modules/dep/package.json"), "{}");

        let options = ResolverOptions {
            packages: Some(vec!["other".to_string()]),
            ..ResolverOptions::default()
        };
        let adapter = RollupAdapter::new(options, &anchor).unwrap();
        let ctx = PluginContext::default();
        assert_eq!(adapter.resolve_id("dep", Some("/a.js"), &ctx).unwrap(), None);
        assert_eq!(adapter.resolve_id("./dep", Some("/a.js"), &ctx).unwrap(), None);
    }

    #[test]
    fn test_malformed_manifest_is_not_a_hook_error() {
        let (dir, anchor) = fixture();
        write(&dir.path().join("node_modules/dep/package.json"), "{,}");

        let mut container = PluginContainer::new();
        container.add(Box::new(
            RollupAdapter::new(ResolverOptions::default(), &anchor).unwrap(),
        ));
        assert_eq!(container.resolve_id("dep", Some("/a.js")).unwrap(), None);
    }
}
