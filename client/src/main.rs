use clap::{Parser, Subcommand};
use client::{ClientConfig, Command, Session};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "minigit")]
#[command(about = "A minimal single-branch commit history")]
struct Cli {
    /// TOML file with a [display] section
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render timestamps in UTC instead of local time
    #[arg(long)]
    utc: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Repl,
    /// Run each argument as one session command, e.g. `run "create repo" "commit init"`
    Run {
        /// Commands to execute in order
        #[arg(required = true)]
        commands: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            ClientConfig::load(path)?
        }
        None => ClientConfig::default(),
    }
    .with_utc(cli.utc);

    let mut session = Session::new(config.display);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => interactive_session(&mut session)?,
        Commands::Run { commands } => run_commands(&mut session, &commands)?,
    }

    Ok(())
}

fn interactive_session(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    println!("minigit interactive session");
    println!("Type 'help' for commands, 'quit' or 'exit' to leave.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        match session.active_name() {
            Some(name) => print!("{}> ", name),
            None => print!("> "),
        }
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        let input = line.trim();

        if input.is_empty() {
            continue;
        }

        let command = match Command::parse(input) {
            Ok(command) => command,
            Err(e) => {
                println!("Error: {}", e);
                continue;
            }
        };
        let quit = command == Command::Quit;

        match session.execute(command) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{}", output);
                }
            }
            Err(e) => {
                error!("Command failed: {}", e);
                println!("Error: {}", e);
            }
        }

        if quit {
            break;
        }
    }

    Ok(())
}

fn run_commands(
    session: &mut Session,
    commands: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    for line in commands {
        let command = Command::parse(line)?;
        if command == Command::Quit {
            break;
        }

        let output = session.execute(command)?;
        if !output.is_empty() {
            println!("{}", output);
        }
    }

    Ok(())
}
