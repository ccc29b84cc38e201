//! Host adapters.
//!
//! Each adapter picks its default search-path layout, applies the host's
//! own pre-filtering, and translates the host's resolve hook into a call on
//! the shared [`Resolver`](crate::Resolver). They add no resolution logic of
//! their own.

mod esbuild;
mod rollup;

pub use esbuild::{
    EsbuildAdapter, OnResolveArgs, OnResolveResult, ESBUILD_PLUGIN_NAME, ON_RESOLVE_FILTER,
};
pub use rollup::{RollupAdapter, ROLLUP_PLUGIN_NAME};
