use super::ConfigArgs;
use miette::{IntoDiagnostic, Result};
use pnpm_resolver_core::resolver::{ResolveTraceStep, TraceWarning};
use pnpm_resolver_core::{ResolveReasonCode, ResolveStatus, Resolver};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// What to resolve.
#[derive(Debug)]
pub struct ResolveAction {
    pub specifiers: Vec<String>,
    pub importer: Option<String>,
    pub trace: bool,
}

/// One specifier's result (stable JSON contract).
#[derive(Debug, Serialize)]
struct ResolveOutput {
    specifier: String,
    status: ResolveStatus,
    resolved: Option<String>,
    reason: Option<ResolveReasonCode>,
    warnings: Vec<TraceWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<Vec<ResolveTraceStep>>,
}

/// Run the resolve command.
///
/// Exits with status 1 when any specifier is left unresolved.
pub fn run(cwd: &Path, args: &ConfigArgs, action: ResolveAction, json: bool) -> Result<()> {
    let config = args.build(cwd).into_diagnostic()?;
    let resolver = Arc::new(Resolver::new(config));

    let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;
    let outputs = runtime.block_on(resolve_all(resolver, action))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outputs).into_diagnostic()?);
    } else {
        print_human(&outputs);
    }

    if outputs.iter().any(|o| o.status == ResolveStatus::Unresolved) {
        std::process::exit(1);
    }
    Ok(())
}

/// Resolve every specifier concurrently against one shared resolver.
///
/// Output order follows argument order regardless of completion order.
async fn resolve_all(resolver: Arc<Resolver>, action: ResolveAction) -> Result<Vec<ResolveOutput>> {
    let ResolveAction {
        specifiers,
        importer,
        trace,
    } = action;

    let handles: Vec<_> = specifiers
        .into_iter()
        .map(|specifier| {
            let resolver = Arc::clone(&resolver);
            let importer = importer.clone();
            tokio::task::spawn_blocking(move || {
                let result = resolver.resolve_with_trace(&specifier, importer.as_deref());
                let resolution = result.resolution;
                ResolveOutput {
                    specifier,
                    status: resolution.status,
                    resolved: resolution.resolved.map(|p| p.display().to_string()),
                    reason: resolution.reason,
                    warnings: resolution.warnings,
                    trace: trace.then_some(result.trace.steps),
                }
            })
        })
        .collect();

    let mut outputs = Vec::with_capacity(handles.len());
    for handle in handles {
        outputs.push(handle.await.into_diagnostic()?);
    }
    Ok(outputs)
}

fn print_human(outputs: &[ResolveOutput]) {
    for (n, output) in outputs.iter().enumerate() {
        if n > 0 {
            println!();
        }
        println!("Specifier: {}", output.specifier);
        match (&output.resolved, output.reason) {
            (Some(resolved), _) => println!("Resolved: {resolved}"),
            (None, reason) => {
                println!("Status: UNRESOLVED");
                if let Some(code) = reason {
                    println!("Reason: {code}");
                }
            }
        }

        for warning in &output.warnings {
            println!("Warning [{}]: {}", warning.code, warning.message);
        }

        if let Some(steps) = &output.trace {
            println!("Resolution trace:");
            for (i, step) in steps.iter().enumerate() {
                let status = if step.ok { "OK" } else { "FAIL" };
                println!("  {}. [{}] {}: {}", i + 1, status, step.step, step.detail);
                if let Some(path) = &step.path {
                    println!("      path: {}", path.display());
                }
            }
        }
    }
}
