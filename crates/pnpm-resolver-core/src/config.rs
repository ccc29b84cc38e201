//! Resolver configuration.
//!
//! Options are collected once, when a plugin adapter is constructed, and
//! frozen into a [`ResolverConfig`]. Default search paths are derived from an
//! explicit anchor directory (typically the directory holding the build
//! configuration) so resolution never depends on the caller's working
//! directory.

use crate::error::Error;
use pnpm_resolver_util::layout::is_store_path;
use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the modules directory at every level.
pub const NODE_MODULES: &str = "node_modules";

/// Name of the content-store directory under the root `node_modules`.
pub const STORE_DIR: &str = ".store";

/// User-facing, partial resolver options.
///
/// Every field is optional; missing fields fall back to [`DefaultLayout`]
/// defaults. Keys use the camelCase names build configs already use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverOptions {
    /// Restrict resolution to these specifiers (empty = all).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<String>>,
    /// Emit diagnostic lines for every resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    /// First search location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_modules_path: Option<PathBuf>,
    /// Second search location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_modules_path: Option<PathBuf>,
    /// Third search location (store lookup).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnpm_store_path: Option<PathBuf>,
}

impl ResolverOptions {
    /// Load options from a JSON file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Where the default search paths sit relative to the anchor.
///
/// The two host adapters are installed at different depths inside a
/// workspace package, so their defaults climb a different number of levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultLayout {
    /// `<anchor>/node_modules`, `<anchor>/../../node_modules`.
    #[default]
    Esbuild,
    /// `<anchor>/../node_modules`, `<anchor>/../../../node_modules`.
    Rollup,
}

impl DefaultLayout {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Esbuild => "esbuild",
            Self::Rollup => "rollup",
        }
    }

    /// Levels above the anchor holding the workspace-local `node_modules`.
    fn workspace_depth(self) -> usize {
        match self {
            Self::Esbuild => 0,
            Self::Rollup => 1,
        }
    }

    /// Levels above the anchor holding the root `node_modules`.
    fn root_depth(self) -> usize {
        match self {
            Self::Esbuild => 2,
            Self::Rollup => 3,
        }
    }

    /// Default workspace-local modules path for `anchor`.
    #[must_use]
    pub fn workspace_modules_path(self, anchor: &Path) -> PathBuf {
        ancestor(anchor, self.workspace_depth()).join(NODE_MODULES)
    }

    /// Default root-hoisted modules path for `anchor`.
    #[must_use]
    pub fn root_modules_path(self, anchor: &Path) -> PathBuf {
        ancestor(anchor, self.root_depth()).join(NODE_MODULES)
    }

    /// Default content store path for `anchor`.
    #[must_use]
    pub fn pnpm_store_path(self, anchor: &Path) -> PathBuf {
        self.root_modules_path(anchor).join(STORE_DIR)
    }
}

impl fmt::Display for DefaultLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefaultLayout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "esbuild" => Ok(Self::Esbuild),
            "rollup" => Ok(Self::Rollup),
            other => Err(Error::other(format!("unknown layout: {other}"))),
        }
    }
}

fn ancestor(anchor: &Path, levels: usize) -> PathBuf {
    let mut path = anchor.to_path_buf();
    for _ in 0..levels {
        path.push("..");
    }
    path.clean()
}

/// How a search path is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// `<base>/<specifier>`.
    DirectJoin,
    /// Prefix match on store directory names.
    Store,
}

impl LookupStrategy {
    /// Classify a base directory by its store marker.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        if is_store_path(path) {
            Self::Store
        } else {
            Self::DirectJoin
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectJoin => "direct",
            Self::Store => "store",
        }
    }
}

/// Immutable resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    packages: BTreeSet<String>,
    debug: bool,
    workspace_modules_path: PathBuf,
    root_modules_path: PathBuf,
    pnpm_store_path: PathBuf,
}

impl ResolverConfig {
    /// Create a config with explicit search paths and no allow-list.
    #[must_use]
    pub fn new(
        workspace_modules_path: impl Into<PathBuf>,
        root_modules_path: impl Into<PathBuf>,
        pnpm_store_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            packages: BTreeSet::new(),
            debug: false,
            workspace_modules_path: workspace_modules_path.into(),
            root_modules_path: root_modules_path.into(),
            pnpm_store_path: pnpm_store_path.into(),
        }
    }

    /// Build a config from partial options, filling gaps from `layout`
    /// defaults computed relative to `anchor`.
    ///
    /// A relative `anchor` is made absolute against the current directory
    /// here, once. Relative path overrides are taken relative to the anchor.
    pub fn from_options(
        options: ResolverOptions,
        anchor: &Path,
        layout: DefaultLayout,
    ) -> Result<Self, Error> {
        if anchor.as_os_str().is_empty() {
            return Err(Error::InvalidAnchor {
                path: anchor.to_path_buf(),
            });
        }
        let anchor = if anchor.is_absolute() {
            anchor.clean()
        } else {
            std::env::current_dir()?.join(anchor).clean()
        };

        let resolve = |over: Option<PathBuf>, default: PathBuf| match over {
            Some(p) if p.is_absolute() => p.clean(),
            Some(p) => anchor.join(p).clean(),
            None => default,
        };

        Ok(Self {
            packages: options.packages.unwrap_or_default().into_iter().collect(),
            debug: options.debug.unwrap_or(false),
            workspace_modules_path: resolve(
                options.workspace_modules_path,
                layout.workspace_modules_path(&anchor),
            ),
            root_modules_path: resolve(options.root_modules_path, layout.root_modules_path(&anchor)),
            pnpm_store_path: resolve(options.pnpm_store_path, layout.pnpm_store_path(&anchor)),
        })
    }

    /// Load a config from a JSON options file, anchored at the file's directory.
    pub fn load(path: &Path, layout: DefaultLayout) -> Result<Self, Error> {
        let options = ResolverOptions::load(path)?;
        let anchor = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Self::from_options(options, anchor, layout)
    }

    /// Restrict resolution to the given specifiers.
    #[must_use]
    pub fn with_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages = packages.into_iter().map(Into::into).collect();
        self
    }

    /// Enable diagnostic logging.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Allow-list of specifiers; empty means every bare specifier is allowed.
    #[must_use]
    pub fn packages(&self) -> &BTreeSet<String> {
        &self.packages
    }

    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    #[must_use]
    pub fn workspace_modules_path(&self) -> &Path {
        &self.workspace_modules_path
    }

    #[must_use]
    pub fn root_modules_path(&self) -> &Path {
        &self.root_modules_path
    }

    #[must_use]
    pub fn pnpm_store_path(&self) -> &Path {
        &self.pnpm_store_path
    }

    /// The three search paths in priority order: workspace, root, store.
    #[must_use]
    pub fn search_paths(&self) -> [&Path; 3] {
        [
            &self.workspace_modules_path,
            &self.root_modules_path,
            &self.pnpm_store_path,
        ]
    }
}
