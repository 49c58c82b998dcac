use std::process::ExitCode;

use bpaf::Bpaf;
use tracing_subscriber::prelude::*;

mod commands;

#[derive(Debug, Clone, Bpaf)]
pub struct CliOptions {
    /// Log which config files and annotation rules were used
    #[bpaf(short('v'), long("verbose"), switch, fallback(false))]
    pub verbose: bool,
}

#[derive(Debug, Clone, Bpaf)]
pub struct RenderArgs {
    /// Columns per nesting level (overrides helm-yaml.toml)
    #[bpaf(long("indent"), argument("COLUMNS"))]
    pub indent: Option<usize>,

    /// Comment wrap budget in columns, 0 disables (overrides helm-yaml.toml)
    #[bpaf(long("wrap"), argument("COLUMNS"))]
    pub wrap: Option<usize>,

    /// Directory to start the helm-yaml.toml search from
    #[bpaf(long("config-dir"), argument("DIR"))]
    pub config_dir: Option<String>,

    /// Values files (.json, .yaml, .yml, .toml), one document each
    #[bpaf(positional("FILE"))]
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version, fallback_to_usage)]
/// Render values files into Helm-ready YAML with comments and template guards
struct Cli {
    #[bpaf(external(commands))]
    command: Commands,
}

#[derive(Debug, Clone, Bpaf)]
enum Commands {
    #[bpaf(command("render"))]
    /// Encode values files as YAML documents on stdout
    Render(
        #[bpaf(external(cli_options), hide_usage)] CliOptions,
        #[bpaf(external(render_args))] RenderArgs,
    ),

    #[bpaf(command("schema"))]
    /// Print the JSON Schema of helm-yaml.toml
    Schema,

    #[bpaf(command("version"))]
    /// Print version information
    Version,
}

fn init_tracing(verbose: bool) {
    // HELM_RENDER_LOG wins over --verbose when set.
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("HELM_RENDER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = cli().run();

    let result = match cli.command {
        Commands::Render(cli_options, args) => {
            init_tracing(cli_options.verbose);
            commands::render::run(&args)
        }
        Commands::Schema => commands::schema::run(),
        Commands::Version => {
            println!("helm-render {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
