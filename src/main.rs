use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use famtree::{
    config::Config,
    error::FamilyError,
    pipeline::FamilyTree,
    reports::ReportGenerator,
    types::{OutputFormat, RegistryOrder},
};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "famtree")]
#[command(about = "Validate family relationship records and report each person parents-first")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    report: ReportArgs,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FAMTREE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (overrides the config file)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Registry order used for cycle detection and output seeding (insertion, name)
    #[arg(long, global = true)]
    order: Option<RegistryOrder>,

    /// Treat unknown keywords as errors
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Args, Clone, Default)]
struct ReportArgs {
    /// Input file (defaults to stdin)
    input: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every person, parents before children (the default)
    Report(ReportArgs),

    /// Validate the input without printing the report
    Check {
        /// Input file (defaults to stdin)
        input: Option<PathBuf>,
    },

    /// List everyone descended from a person
    Descendants {
        /// Person to start from
        name: String,

        /// Input file (defaults to stdin)
        input: Option<PathBuf>,
    },

    /// List every ancestor of a person
    Ancestors {
        /// Person to start from
        name: String,

        /// Input file (defaults to stdin)
        input: Option<PathBuf>,
    },

    /// Summarize the family graph
    Stats {
        /// Input file (defaults to stdin)
        input: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Write a default configuration file
    Init {
        /// Configuration file path
        #[arg(long, default_value = "famtree.yml")]
        config_file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let result = load_config(&cli).and_then(|config| {
        init_tracing(&config.logging.level)?;
        run(cli, &config, &mut io::stdout().lock())
    });

    ExitCode::from(finish(result, &mut io::stderr().lock()))
}

/// Exit status for a finished run. A failure writes exactly one diagnostic line.
fn finish(result: Result<()>, stderr: &mut dyn Write) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(stderr, "{}", diagnostic(&e));
            1
        }
    }
}

/// Input problems print their own message; anything else gets the whole chain.
fn diagnostic(error: &anyhow::Error) -> String {
    match error.chain().find_map(|cause| cause.downcast_ref::<FamilyError>()) {
        Some(family_error) => family_error.to_string(),
        None => format!("Error: {:#}", error).replace('\n', " "),
    }
}

fn run(cli: Cli, config: &Config, out: &mut dyn Write) -> Result<()> {
    debug!("Effective configuration: {:?}", config);

    match cli.command {
        None => report(cli.report, config, out),
        Some(Commands::Report(args)) => report(args, config, out),
        Some(Commands::Check { input }) => check(input.as_deref(), config, out),
        Some(Commands::Descendants { name, input }) => {
            let tree = load_tree(input.as_deref(), config)?;
            print_names(&tree.graph().descendants(&name)?, out)
        }
        Some(Commands::Ancestors { name, input }) => {
            let tree = load_tree(input.as_deref(), config)?;
            print_names(&tree.graph().ancestors(&name)?, out)
        }
        Some(Commands::Stats { input, format }) => {
            let format = format.unwrap_or(config.output.format);
            stats(input.as_deref(), format, config, out)
        }
        Some(Commands::Init { config_file, force }) => init_config(&config_file, force, out),
    }
}

/// Initialize tracing with the specified log level
fn init_tracing(log_level: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level))
        .context("Failed to create env filter")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(env_filter)
        .init();

    Ok(())
}

/// Resolve configuration: file, then environment, then command-line flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) if path.exists() => Config::load_from_file(path)?,
        Some(path) => bail!("Configuration file not found: {:?}", path),
        None => Config::default(),
    };

    config.apply_overrides(|key| std::env::var(key).ok())?;

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(order) = cli.order {
        config.output.order = order;
    }
    if cli.strict {
        config.input.strict_keywords = true;
    }

    config.validate()?;
    Ok(config)
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {:?}", path))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

fn load_tree(path: Option<&Path>, config: &Config) -> Result<FamilyTree> {
    let reader = open_input(path)?;
    Ok(FamilyTree::from_reader(reader, config)?)
}

/// Build, validate and print the parents-first report.
fn report(args: ReportArgs, config: &Config, out: &mut dyn Write) -> Result<()> {
    let tree = load_tree(args.input.as_deref(), config)?;
    let format = args.format.unwrap_or(config.output.format);
    let content = ReportGenerator::new().generate(&tree.report(), format)?;

    match args.output {
        Some(file_path) => {
            std::fs::write(&file_path, &content)
                .with_context(|| format!("Failed to write output to: {:?}", file_path))?;
            info!("Report written to: {:?}", file_path);
        }
        None => {
            out.write_all(content.as_bytes())?;
            out.flush()?;
        }
    }

    Ok(())
}

fn check(path: Option<&Path>, config: &Config, out: &mut dyn Write) -> Result<()> {
    let tree = load_tree(path, config)?;
    writeln!(out, "OK: {} people", tree.len())?;
    Ok(())
}

fn stats(
    path: Option<&Path>,
    format: OutputFormat,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    let stats = load_tree(path, config)?.graph().statistics();

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?,
        OutputFormat::Text => {
            writeln!(out, "People: {}", stats.total_people)?;
            writeln!(out, "Parent links: {}", stats.parent_links)?;
            writeln!(out, "Root people: {}", stats.root_people)?;
            writeln!(out, "Leaf people: {}", stats.leaf_people)?;
            writeln!(out, "Generations: {}", stats.max_generations)?;
        }
    }

    Ok(())
}

fn print_names(names: &[String], out: &mut dyn Write) -> Result<()> {
    for name in names {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

/// Initialize configuration file
fn init_config(config_file: &Path, force: bool, out: &mut dyn Write) -> Result<()> {
    info!("Initializing configuration file: {:?}", config_file);

    if config_file.exists() && !force {
        bail!(
            "Configuration file already exists: {:?} (use --force to overwrite)",
            config_file
        );
    }

    Config::default()
        .save_to_file(config_file)
        .with_context(|| format!("Failed to write configuration file: {:?}", config_file))?;

    writeln!(out, "Configuration file created: {:?}", config_file)?;
    Ok(())
}
