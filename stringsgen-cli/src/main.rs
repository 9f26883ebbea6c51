use clap::{ArgAction, Parser, Subcommand};
use stringsgen::{AccessLevel, DuplicatePolicy};
use stringsgen_cli::{
    FileConfig, OptionOverrides, resolve_inputs, run_check_command, run_generate_command,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Options shared by every command that runs the generator.
#[derive(clap::Args, Debug)]
struct GenerationArgs {
    /// .strings and .stringsdict files. Defaults to Xcode's SCRIPT_INPUT_FILE_* variables.
    inputs: Vec<String>,

    /// Configuration file (defaults to ./stringsgen.toml when present)
    #[arg(long)]
    config: Option<String>,

    /// Name of the outermost generated struct
    #[arg(long)]
    root_name: Option<String>,

    /// Access level of the generated declarations
    #[arg(long, value_name = "public|internal")]
    access: Option<AccessLevel>,

    /// Look strings up in the Swift package bundle (Bundle.module)
    #[arg(long)]
    package: bool,

    /// Strings table to look up instead of Localizable
    #[arg(long)]
    table: Option<String>,

    /// Message placed in the header comment of the generated file
    #[arg(short, long)]
    message: Option<String>,

    /// How to treat a key defined more than once
    #[arg(long, value_name = "overwrite|reject")]
    on_duplicate: Option<DuplicatePolicy>,

    /// Fail on unreadable or malformed inputs instead of skipping them
    #[arg(long)]
    strict: bool,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate Swift accessors from localization files.
    Generate {
        #[command(flatten)]
        generation: GenerationArgs,

        /// The Swift file to write
        #[arg(short, long, env = "SCRIPT_OUTPUT_FILE_0")]
        output: Option<String>,

        /// Print the namespace tree after generating
        #[arg(long)]
        debug: bool,
    },

    /// Validate localization files without writing anything.
    Check {
        #[command(flatten)]
        generation: GenerationArgs,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn prepare(
    generation: GenerationArgs,
) -> Result<(stringsgen_cli::InputFiles, stringsgen::GenerateOptions, bool), String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Cannot determine working directory: {}", e))?;
    let file_config = FileConfig::load(generation.config.as_deref(), &cwd)?;
    let options = file_config.into_options(OptionOverrides {
        root_name: generation.root_name,
        access: generation.access,
        package: generation.package,
        table: generation.table,
        message: generation.message,
        duplicates: generation.on_duplicate,
    });
    let inputs = resolve_inputs(&generation.inputs, |key| std::env::var(key).ok())?;
    Ok((inputs, options, generation.strict))
}

fn run(commands: Commands) -> Result<(), String> {
    match commands {
        Commands::Generate {
            generation,
            output,
            debug,
        } => {
            let (inputs, options, strict) = prepare(generation)?;
            run_generate_command(&inputs, output.as_deref(), &options, strict, debug)?;
        }
        Commands::Check { generation } => {
            let (inputs, options, strict) = prepare(generation)?;
            run_check_command(&inputs, &options, strict)?;
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(args.commands) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
