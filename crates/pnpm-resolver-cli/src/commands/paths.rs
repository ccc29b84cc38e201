use super::ConfigArgs;
use miette::{IntoDiagnostic, Result};
use pnpm_resolver_core::LookupStrategy;
use serde::Serialize;
use std::path::Path;

/// One search path for JSON output.
#[derive(Serialize)]
struct SearchPathOutput {
    role: &'static str,
    path: String,
    strategy: &'static str,
    exists: bool,
}

#[derive(Serialize)]
struct PathsOutput {
    packages: Vec<String>,
    debug: bool,
    search_paths: Vec<SearchPathOutput>,
}

/// Run the paths command.
pub fn run(cwd: &Path, args: &ConfigArgs, json: bool) -> Result<()> {
    let config = args.build(cwd).into_diagnostic()?;

    let roles = ["workspace", "root", "store"];
    let search_paths: Vec<SearchPathOutput> = roles
        .iter()
        .zip(config.search_paths())
        .map(|(&role, path)| SearchPathOutput {
            role,
            path: path.display().to_string(),
            strategy: LookupStrategy::for_path(path).as_str(),
            exists: path.exists(),
        })
        .collect();

    let output = PathsOutput {
        packages: config.packages().iter().cloned().collect(),
        debug: config.debug(),
        search_paths,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
        return Ok(());
    }

    for (i, sp) in output.search_paths.iter().enumerate() {
        let marker = if sp.exists { "" } else { " (missing)" };
        println!(
            "{}. {:<9} [{}] {}{marker}",
            i + 1,
            sp.role,
            sp.strategy,
            sp.path
        );
    }
    if !output.packages.is_empty() {
        println!();
        println!("Allowed packages: {}", output.packages.join(", "));
    }
    Ok(())
}
