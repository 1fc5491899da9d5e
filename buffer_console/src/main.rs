use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use buffer_console::{
    run_interactive, run_menu, run_script, select_capacity, Console, ConsoleSettings,
};
use buffer_core::EditorSession;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bufed")]
#[command(about = "Cursor-addressed text buffer driven by a small command language")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON settings file (capacity, transcript_path)
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from stdin
    Interactive {
        /// Buffer capacity (prompted for when not set)
        #[arg(short, long)]
        capacity: Option<usize>,
    },
    /// Run a command file and write the transcript
    Script {
        /// Command file to run
        input: PathBuf,

        /// Transcript output path
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Buffer capacity
        #[arg(short, long)]
        capacity: Option<usize>,
    },
}

fn init_logging() {
    // Logs go to stderr so rendered text on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let settings = ConsoleSettings::load(cli.settings.as_deref())
        .context("failed to load settings")?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    match cli.command {
        Some(Commands::Interactive { capacity }) => {
            let settings = settings.with_capacity(capacity)?;
            let capacity = if settings.capacity_overridden {
                settings.capacity
            } else {
                select_capacity(&mut console)?
            };
            let mut session = EditorSession::with_capacity(capacity)?;
            run_interactive(&mut session, &mut console).context("interactive session failed")?;
        }
        Some(Commands::Script {
            input,
            output,
            capacity,
        }) => {
            let settings = settings
                .with_capacity(capacity)?
                .with_transcript_path(output);
            run_script(&input, &settings, &mut console)
                .with_context(|| format!("failed to run script {}", input.display()))?;
        }
        None => run_menu(&settings, &mut console)?,
    }

    Ok(())
}
