//! spa-router CLI
//!
//! Offline tooling around the router: resolve paths against declared
//! routes, render templates, validate configuration files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use spa_router::config::load_config;
use spa_router::observability::logging::init_logging;
use spa_router::templates::TemplateRegistration;
use spa_router::{Host, MemoryHost, RouteMatch, Router, RouterConfig, RouterError};

const OUTPUT_SELECTOR: &str = "#out";
const TEMPLATE_NAME: &str = "cli";

#[derive(Parser)]
#[command(name = "spa-router")]
#[command(about = "Resolve routes and render templates offline", long_about = None)]
struct Cli {
    /// Log level (overridden by RUST_LOG).
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match paths against the routes declared in a config file
    Resolve {
        #[arg(short, long)]
        config: PathBuf,

        /// Paths to resolve, e.g. /users/42
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Render a template with key=value substitutions
    Render {
        /// Template source: literal HTML or an http(s) URL
        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        source: Option<String>,

        /// Read the template HTML from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Origin for relative template URLs
        #[arg(long)]
        base_url: Option<String>,

        /// Substitutions, e.g. -v name=Ada
        #[arg(short = 'v', long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,
    },
    /// Validate a config file
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn parse_var(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Resolve { config, paths } => resolve(config, paths),
        Commands::Render {
            source,
            file,
            base_url,
            vars,
        } => render(source, file, base_url, vars).await,
        Commands::Check { config } => check(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn resolve(config_path: PathBuf, paths: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&config_path)?;
    let results = resolve_paths(&config, &paths)?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// Match each path against the routes declared in `config`.
///
/// Unmatched paths report `"match": null`.
fn resolve_paths(config: &RouterConfig, paths: &[String]) -> Result<Vec<Value>, RouterError> {
    let mut router = Router::new(config, MemoryHost::default())?;

    for declaration in &config.routes {
        let pattern = declaration.pattern.clone();
        router.route_fn(&declaration.pattern, move |m: &RouteMatch| {
            tracing::debug!(pattern = %pattern, url = %m.url(), "Declared route matched");
        })?;
    }

    let results = paths
        .iter()
        .map(|path| {
            let matched = router.resolve(Some(path)).map(|m| {
                let name = config
                    .routes
                    .iter()
                    .find(|d| d.pattern == m.route().pattern())
                    .and_then(|d| d.name.clone());
                json!({ "route": m.summary(), "name": name })
            });
            json!({ "path": path, "match": matched })
        })
        .collect();

    Ok(results)
}

async fn render(
    source: Option<String>,
    file: Option<PathBuf>,
    base_url: Option<String>,
    vars: Vec<(String, String)>,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = render_template(source, file, base_url, vars).await?;
    println!("{html}");
    Ok(())
}

/// Load a template from `source` or `file` and render it with `vars`.
async fn render_template(
    source: Option<String>,
    file: Option<PathBuf>,
    base_url: Option<String>,
    vars: Vec<(String, String)>,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = RouterConfig::default();
    config.templates.base_url = base_url;

    let host = MemoryHost::default().with_element(OUTPUT_SELECTOR, "");
    let mut router = Router::new(&config, host)?;

    match (source, file) {
        (Some(source), _) => {
            let registration = router.template(TEMPLATE_NAME, &source)?;
            if let TemplateRegistration::Pending(pending) = registration {
                pending.wait().await?;
            }
        }
        (None, Some(file)) => {
            let html = std::fs::read_to_string(&file)?;
            router.templates().insert(TEMPLATE_NAME, html);
        }
        (None, None) => return Err("either --source or --file is required".into()),
    }
    router.render(TEMPLATE_NAME, OUTPUT_SELECTOR, vars)?;

    Ok(router.host().inner_html(OUTPUT_SELECTOR).unwrap_or_default())
}

fn check(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&config_path)?;
    println!(
        "{}: ok ({} routes, continue_on_exceptions = {})",
        config_path.display(),
        config.routes.len(),
        config.continue_on_exceptions
    );
    Ok(())
}
