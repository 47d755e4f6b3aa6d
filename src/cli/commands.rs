use crate::config::{
    parse_group_middlewares, split_names, GeneratorConfig, DEFAULT_GLOBAL_MIDDLEWARE,
};
use crate::generator::{format_output, generate_routes_file, OutputMode, WriteOutcome};
use crate::ident::import_alias;
use crate::tree::build_tree;
use crate::watch::watch_api_root;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Quiet period after a filesystem event before regenerating.
const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);

/// Command-line interface for fsrouter
///
/// Generates a Go `gorilla/mux` router from a directory of handler packages.
#[derive(Parser, Debug)]
#[command(name = "fsrouter", version)]
#[command(about = "Filesystem-based router generator for gorilla/mux", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available fsrouter commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the routes file from the API directory
    Generate(GenerateArgs),
    /// Print the route table without generating code
    Routes {
        /// Directory containing the handler packages
        #[arg(long, default_value = crate::config::DEFAULT_API_ROOT)]
        api: PathBuf,
    },
}

/// Options of `fsrouter generate`
///
/// Every option left unset falls back to the config file, then to the
/// built-in default.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// TOML file with generator options
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory containing the handler packages
    #[arg(long)]
    pub api: Option<PathBuf>,

    /// Generated Go file
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Package name of the generated file
    #[arg(long)]
    pub pkg: Option<String>,

    /// Import path of the API directory (e.g. example.com/app/api)
    #[arg(long, alias = "importPREFIX")]
    pub import_prefix: Option<String>,

    /// Import path of the middleware package, referenced as `mw`
    #[arg(long)]
    pub middleware: Option<String>,

    /// Global middleware, comma-separated (default: loggingMiddleware)
    #[arg(long)]
    pub middlewares: Option<String>,

    /// Per-group middleware as JSON, e.g. '{"users":"auth,rate"}'
    #[arg(long, alias = "groupMiddlewares")]
    pub group_middlewares: Option<String>,

    /// Custom 404 handler as import/path.Symbol
    #[arg(long, alias = "notFound")]
    pub not_found: Option<String>,

    /// Print the generated source instead of writing it
    #[arg(long, default_value_t = false, conflicts_with = "check")]
    pub dry_run: bool,

    /// Fail if the routes file is missing or out of date
    #[arg(long, default_value_t = false)]
    pub check: bool,

    /// Run gofmt on the written file
    #[arg(long, default_value_t = false)]
    pub fmt: bool,

    /// Keep running and regenerate when the API directory changes
    #[arg(long, default_value_t = false, conflicts_with_all = ["dry_run", "check"])]
    pub watch: bool,
}

impl GenerateArgs {
    /// Merge the config file (if any) with the command-line overrides.
    ///
    /// `--middlewares` falls back to `loggingMiddleware` only when no config
    /// file is given; a config file's middleware list is taken as written.
    pub fn to_config(&self) -> anyhow::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig {
                global_middlewares: vec![DEFAULT_GLOBAL_MIDDLEWARE.to_string()],
                ..GeneratorConfig::default()
            },
        };

        if let Some(api) = &self.api {
            config.api_root = api.clone();
        }
        if let Some(out) = &self.out {
            config.output_path = out.clone();
        }
        if let Some(pkg) = &self.pkg {
            config.package_name = pkg.clone();
        }
        if let Some(prefix) = &self.import_prefix {
            config.import_prefix = prefix.clone();
        }
        if let Some(pkg) = &self.middleware {
            config.middleware_package = Some(pkg.clone()).filter(|p| !p.trim().is_empty());
        }
        if let Some(list) = &self.middlewares {
            config.global_middlewares = split_names(list);
        }
        if let Some(json) = &self.group_middlewares {
            config.group_middlewares = parse_group_middlewares(json)?;
        }
        if let Some(handler) = &self.not_found {
            config.not_found_handler = Some(handler.clone()).filter(|h| !h.trim().is_empty());
        }
        Ok(config)
    }

    fn mode(&self) -> OutputMode {
        if self.dry_run {
            OutputMode::DryRun
        } else if self.check {
            OutputMode::Check
        } else {
            OutputMode::Write
        }
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when embedded in another binary.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The options or config file are invalid
/// - The API directory cannot be scanned or breaks a naming rule
/// - The routes file cannot be written, or is stale under `--check`
/// - gofmt fails under `--fmt`
/// - The watcher cannot be installed under `--watch`
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

/// Execute an already parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate(args) => {
            let config = args.to_config()?;
            run_generate(&config, &args)?;
            if args.watch {
                watch(&config, &args)?;
            }
            Ok(())
        }
        Commands::Routes { api } => print_routes(api),
    }
}

fn run_generate(config: &GeneratorConfig, args: &GenerateArgs) -> anyhow::Result<()> {
    let mode = args.mode();
    let (generated, outcome) = generate_routes_file(config, mode)?;
    for warning in &generated.warnings {
        eprintln!("⚠️  {warning}");
    }

    let out = config.output_path.display();
    let routes = generated.tree.route_count();
    match outcome {
        WriteOutcome::Printed => {}
        WriteOutcome::Written => println!("✅ Generated {out} ({routes} routes)"),
        WriteOutcome::Unchanged => println!("✅ {out} unchanged ({routes} routes)"),
        WriteOutcome::UpToDate => println!("✅ {out} is up to date"),
        WriteOutcome::Stale => {
            anyhow::bail!("{out} is out of date; run `fsrouter generate` to refresh it")
        }
    }

    if args.fmt && mode == OutputMode::Write {
        format_output(&config.output_path)
            .with_context(|| format!("failed to format {out}"))?;
    }
    Ok(())
}

fn watch(config: &GeneratorConfig, args: &GenerateArgs) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel();
    let _watcher = watch_api_root(
        &config.api_root,
        Some(config.output_path.clone()),
        move |path| {
            let _ = tx.send(path);
        },
    )
    .with_context(|| format!("failed to watch {}", config.api_root.display()))?;

    println!("👀 Watching {} for changes", config.api_root.display());
    while let Ok(first) = rx.recv() {
        // Let the burst of events from one save settle.
        let mut changed = 1usize;
        while rx.recv_timeout(WATCH_DEBOUNCE).is_ok() {
            changed += 1;
        }
        tracing::debug!(path = %first.display(), events = changed, "regenerating");
        if let Err(e) = run_generate(config, args) {
            error!(error = %e, "regeneration failed");
            eprintln!("❌ {e:#}");
        }
    }
    Ok(())
}

fn print_routes(api: PathBuf) -> anyhow::Result<()> {
    let tree = build_tree(&api)?;
    for (group, leaf) in tree.routes() {
        println!(
            "{:<7} {:<40} {}.{}",
            leaf.method,
            group.route_pattern(),
            import_alias(&group.segments),
            leaf.exported_symbol
        );
    }
    Ok(())
}
