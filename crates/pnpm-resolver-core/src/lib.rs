#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

//! Resolve bare import specifiers across a content-addressed package layout.
//!
//! Packages installed by a content-addressed package manager live in
//! uniquely named store directories and reach consumers only through
//! symlinks. This crate finds a package's entry file by searching, in order,
//! the workspace-local `node_modules`, the root-hoisted `node_modules`, and
//! the store itself, then reading the package's `module`/`main`/`exports`
//! fields. The [`adapters`] translate rollup- and esbuild-style resolve hooks
//! into calls on one shared [`Resolver`].

pub mod adapters;
pub mod config;
pub mod error;
pub mod fs;
pub mod manifest;
pub mod plugin;
pub mod resolver;
pub mod version;

/// `tracing` target for every event emitted by this crate.
pub const LOG_TARGET: &str = "pnpm_resolver";

pub use config::{DefaultLayout, LookupStrategy, ResolverConfig, ResolverOptions};
pub use error::Error;
pub use fs::{RealFs, ResolverFs};
pub use manifest::{EntryField, Exports, PackageManifest};
pub use resolver::{
    Resolution, ResolutionWithTrace, ResolveReasonCode, ResolveStatus, ResolveTrace, Resolver,
};
pub use version::VERSION;
