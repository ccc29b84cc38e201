pub mod paths;
pub mod resolve;
pub mod version;

use pnpm_resolver_core::{DefaultLayout, ResolverConfig, ResolverOptions};
use std::path::{Path, PathBuf};

/// Resolver configuration flags shared by every command.
#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// JSON options file (`packages`, `debug`, `workspaceModulesPath`, `rootModulesPath`, `pnpmStorePath`)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Which adapter's default search paths to use (esbuild or rollup)
    #[arg(long, value_name = "LAYOUT", default_value_t = DefaultLayout::Esbuild)]
    pub layout: DefaultLayout,

    /// Directory default search paths are computed from
    /// [default: the config file's directory, else the working directory]
    #[arg(long, value_name = "DIR")]
    pub anchor: Option<PathBuf>,

    /// Only resolve these specifiers (repeatable)
    #[arg(long = "package", value_name = "NAME")]
    pub packages: Vec<String>,

    /// Override the workspace-local node_modules
    #[arg(long, value_name = "DIR")]
    pub workspace_modules: Option<PathBuf>,

    /// Override the root node_modules
    #[arg(long, value_name = "DIR")]
    pub root_modules: Option<PathBuf>,

    /// Override the content store directory
    #[arg(long, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Log every resolution attempt, success, and failure
    #[arg(long)]
    pub debug: bool,
}

impl ConfigArgs {
    /// Merge the options file (if any) with flags and build the config.
    ///
    /// Flags win over the file. Relative flag paths are taken relative to
    /// `cwd`; relative paths inside the file are taken relative to the anchor.
    pub fn build(&self, cwd: &Path) -> Result<ResolverConfig, pnpm_resolver_core::Error> {
        let absolute = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                cwd.join(p)
            }
        };

        let config_file = self.config.as_deref().map(absolute);
        let mut options = match &config_file {
            Some(path) => ResolverOptions::load(path)?,
            None => ResolverOptions::default(),
        };

        if !self.packages.is_empty() {
            options.packages = Some(self.packages.clone());
        }
        if self.debug {
            options.debug = Some(true);
        }
        if let Some(p) = &self.workspace_modules {
            options.workspace_modules_path = Some(absolute(p));
        }
        if let Some(p) = &self.root_modules {
            options.root_modules_path = Some(absolute(p));
        }
        if let Some(p) = &self.store {
            options.pnpm_store_path = Some(absolute(p));
        }

        let anchor = match (&self.anchor, &config_file) {
            (Some(anchor), _) => absolute(anchor),
            (None, Some(file)) => file
                .parent()
                .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf),
            (None, None) => cwd.to_path_buf(),
        };

        ResolverConfig::from_options(options, &anchor, self.layout)
    }
}
