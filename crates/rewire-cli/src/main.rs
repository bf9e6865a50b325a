use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rewire", version, about = "Rewire streak tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Begin the first streak
    Start,
    /// Record a setback and restart the clock
    Reset {
        /// Skip the double-activation guard
        #[arg(long)]
        force: bool,
    },
    /// Spend a freeze token instead of resetting
    Freeze {
        /// Skip the double-activation guard
        #[arg(long)]
        force: bool,
    },
    /// Set your daily spend on the habit
    Cost {
        /// Amount per day, in (0, 10000]
        amount: f64,
    },
    /// Print the current streak summary as JSON
    Status,
    /// List milestones with their unlocked and seen state
    Milestones,
    /// Answer today's check-in
    Checkin,
    /// Mood journal
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Show a live ticking clock of the current streak
    Watch {
        /// Stop after this many seconds (default: until Ctrl-C)
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// List the built-in app variants
    Variants,
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Start => commands::streak::start(),
        Commands::Reset { force } => commands::streak::reset(force),
        Commands::Freeze { force } => commands::streak::freeze(force),
        Commands::Cost { amount } => commands::streak::cost(amount),
        Commands::Status => commands::status::run(),
        Commands::Milestones => commands::status::milestones(),
        Commands::Checkin => commands::checkin::run(),
        Commands::Journal { action } => commands::journal::run(action),
        Commands::Watch { seconds } => commands::watch::run(seconds),
        Commands::Config { action } => commands::config::run(action),
        Commands::Variants => commands::variants::run(),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "rewire", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
