use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::convert::ConverterRegistry;
use crate::echo::EchoResponse;
use crate::manifest::Manifest;
use crate::router::Router;
use crate::template::{CompiledRoute, ParameterSpec};

/// Command-line interface for typeroute
#[derive(Debug, Parser)]
#[command(name = "typeroute")]
#[command(about = "Typed path router manifest tool", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log every route match attempt
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile a route manifest and list its routes
    Check {
        /// Path to the manifest file (YAML or JSON)
        #[arg(short, long, env = "TYPEROUTE_MANIFEST")]
        manifest: PathBuf,
    },
    /// Print the compiled route table grouped by result type
    Routes {
        /// Path to the manifest file (YAML or JSON)
        #[arg(short, long, env = "TYPEROUTE_MANIFEST")]
        manifest: PathBuf,
    },
    /// Dispatch paths through the manifest's echo router
    Match {
        /// Path to the manifest file (YAML or JSON)
        #[arg(short, long, env = "TYPEROUTE_MANIFEST")]
        manifest: PathBuf,

        /// Paths to resolve, e.g. `/venue/2/gold`
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,
    },
}

/// Run a parsed command line, writing command output to stdout.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or compiled, or if any
/// path passed to `match` is unmatched.
pub async fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    execute(&cli.command, &mut stdout).await
}

/// Run one command, writing its output to `out`.
///
/// # Errors
///
/// See [`run_cli`].
pub async fn execute(command: &Commands, out: &mut (dyn Write + Send)) -> anyhow::Result<()> {
    match command {
        Commands::Check { manifest } => {
            let router = load_router(manifest)?;
            writeln!(
                out,
                "✅ {}: {} route(s) compiled",
                manifest.display(),
                router.table().len()
            )?;
            for route in router.table().routes() {
                writeln!(out, "  {}", describe_route(route))?;
            }
            Ok(())
        }
        Commands::Routes { manifest } => {
            let router = load_router(manifest)?;
            router.dump_routes();
            for group in router.table().groups() {
                writeln!(out, "{} ({} route(s))", group.result_type(), group.len())?;
                for (index, route) in group.routes().iter().enumerate() {
                    writeln!(out, "  [{}] {}", index, describe_route(route))?;
                }
            }
            Ok(())
        }
        Commands::Match { manifest, paths } => {
            let router = load_router(manifest)?;
            let mut unmatched = 0usize;
            for path in paths {
                match router.route::<EchoResponse>(path).await {
                    Ok(response) => {
                        writeln!(out, "{}", serde_json::to_string(&response)?)?;
                    }
                    Err(err) if err.is_unmatched() => {
                        unmatched += 1;
                        writeln!(out, "❌ {}", err)?;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            if unmatched > 0 {
                anyhow::bail!("{} of {} path(s) unmatched", unmatched, paths.len());
            }
            Ok(())
        }
    }
}

fn load_router(path: &Path) -> anyhow::Result<Router> {
    let manifest = Manifest::load(path)?;
    let registry = ConverterRegistry::with_builtins();
    manifest
        .router(&registry)
        .with_context(|| format!("Manifest {} does not compile", path.display()))
}

/// `/venue/:venueID -> venue (venueID: i64, page: Option<i64>)`
fn describe_route(route: &CompiledRoute) -> String {
    let params: Vec<String> = route.parameters.iter().map(describe_parameter).collect();
    format!(
        "{} -> {} ({})",
        route.template,
        route.handler_name,
        params.join(", ")
    )
}

fn describe_parameter(spec: &ParameterSpec) -> String {
    let label = if spec.name.is_some() { "" } else { "_ " };
    if spec.is_optional {
        format!("{}{}: Option<{}>", label, spec.binding, spec.declared_type)
    } else {
        format!("{}{}: {}", label, spec.binding, spec.declared_type)
    }
}
