//! Resolution tracing.
//!
//! Records every probe a resolution makes, so `pnpm-resolve resolve --trace`
//! can explain why a specifier resolved to a particular file (or didn't).

use serde::Serialize;
use std::path::PathBuf;

/// A single step in the resolution trace.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveTraceStep {
    /// Step name (see [`steps`]).
    pub step: &'static str,
    /// Whether this step succeeded.
    pub ok: bool,
    /// Human-readable description of what happened.
    pub detail: String,
    /// File path involved in this step, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ResolveTraceStep {
    /// Create a new trace step.
    pub fn new(step: &'static str, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            step,
            ok,
            detail: detail.into(),
            path: None,
        }
    }

    /// Set the path for this step.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Warning generated during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceWarning {
    /// Warning code (see [`warning_codes`]).
    pub code: String,
    /// Human-readable warning message.
    pub message: String,
}

impl TraceWarning {
    /// Create a new warning.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Complete resolution trace.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolveTrace {
    /// Ordered list of resolution steps.
    pub steps: Vec<ResolveTraceStep>,
    /// Warnings generated during resolution.
    pub warnings: Vec<TraceWarning>,
}

impl ResolveTrace {
    /// Create a new empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step to the trace.
    pub fn add_step(&mut self, step: ResolveTraceStep) {
        self.steps.push(step);
    }

    /// Add a warning to the trace.
    pub fn add_warning(&mut self, warning: TraceWarning) {
        self.warnings.push(warning);
    }

    /// Add a simple success step.
    pub fn success(&mut self, step: &'static str, detail: impl Into<String>) {
        self.steps.push(ResolveTraceStep::new(step, true, detail));
    }

    /// Add a simple failure step.
    pub fn failure(&mut self, step: &'static str, detail: impl Into<String>) {
        self.steps.push(ResolveTraceStep::new(step, false, detail));
    }
}

/// Step names used in resolution tracing.
pub mod steps {
    pub const FILTER_SPECIFIER: &str = "filter_specifier";
    pub const SEARCH_PATH: &str = "search_path";
    pub const STORE_LOOKUP: &str = "store_lookup";
    pub const FIND_PACKAGE_DIR: &str = "find_package_dir";
    pub const READ_MANIFEST: &str = "read_manifest";
    pub const ENTRY_FIELD: &str = "entry_field";
    pub const PROBE_FILE: &str = "probe_file";
    pub const FALLBACK_INDEX: &str = "fallback_index";
    pub const FINAL_PATH: &str = "final_path";
}

/// Warning codes used in resolution tracing.
pub mod warning_codes {
    pub const MANIFEST_PARSE_ERROR: &str = "manifest_parse_error";
    pub const MANIFEST_READ_ERROR: &str = "manifest_read_error";
    pub const UNSUPPORTED_EXPORTS: &str = "unsupported_exports";
    pub const STORE_UNREADABLE: &str = "store_unreadable";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_records_steps_in_order() {
        let mut trace = ResolveTrace::new();
        trace.success(steps::FILTER_SPECIFIER, "eligible");
        trace.failure(steps::FIND_PACKAGE_DIR, "missing");
        trace.add_step(
            ResolveTraceStep::new(steps::FINAL_PATH, true, "done").with_path("/nm/a/index.js"),
        );

        let names: Vec<_> = trace.steps.iter().map(|s| s.step).collect();
        assert_eq!(
            names,
            vec![steps::FILTER_SPECIFIER, steps::FIND_PACKAGE_DIR, steps::FINAL_PATH]
        );
        assert!(!trace.steps[1].ok);
        assert_eq!(trace.steps[2].path, Some(PathBuf::from("/nm/a/index.js")));
    }

    #[test]
    fn test_trace_serializes_without_empty_path() {
        let mut trace = ResolveTrace::new();
        trace.success(steps::SEARCH_PATH, "direct");
        trace.add_warning(TraceWarning::new(warning_codes::MANIFEST_PARSE_ERROR, "bad"));

        let json = serde_json::to_value(&trace).unwrap();
        assert!(json["steps"][0].get("path").is_none());
        assert_eq!(json["warnings"][0]["code"], "manifest_parse_error");
    }
}
