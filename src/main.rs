use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::info;

use milemark::auth::LocalIdentityProvider;
use milemark::cli::{
    handle_audit_command, handle_auth_command, handle_car_command, handle_catalog_command,
    handle_config_command, handle_dashboard_command, handle_maintenance_command,
    handle_reminder_command, ConfigCommands,
};
use milemark::config::{paths::MileMarkPaths, settings::Settings};
use milemark::logging::{init_logging, Verbosity};
use milemark::notify::FileReminderScheduler;
use milemark::services::ServiceContext;
use milemark::storage::{init, Storage};

#[derive(Parser)]
#[command(
    name = "milemark",
    version,
    about = "Track your cars' mileage and upcoming maintenance",
    long_about = "MileMark keeps a service history for each of your cars and tells \
                  you which maintenance task comes up next and how many miles are \
                  left until it is due."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign up, log in and out
    #[command(subcommand)]
    Auth(milemark::cli::AuthCommands),

    /// Car management commands
    #[command(subcommand)]
    Car(milemark::cli::CarCommands),

    /// Maintenance logging and due dates
    #[command(subcommand, alias = "mx")]
    Maintenance(milemark::cli::MaintenanceCommands),

    /// Default maintenance catalog
    #[command(subcommand)]
    Catalog(milemark::cli::CatalogCommands),

    /// Mileage reminders
    #[command(subcommand)]
    Reminder(milemark::cli::ReminderCommands),

    /// Your cars and what is due next
    Dashboard,

    /// Show recent changes you made
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.verbose, cli.quiet));

    // Initialize paths and settings
    let paths = MileMarkPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("MileMark - vehicle maintenance tracker");
        println!();
        println!("Run 'milemark --help' for usage information.");
        println!("Run 'milemark auth signup' to create an account.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing MileMark at: {}", paths.base_dir().display());
            init::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default maintenance types:");
            for (name, interval) in init::DEFAULT_MAINTENANCE {
                println!("  - {} (every {} mi)", name, interval);
            }
            println!();
            println!("Run 'milemark auth signup' to create an account.");
            return Ok(());
        }
        Commands::Config { action } => {
            handle_config_command(&paths, settings, action.unwrap_or(ConfigCommands::Show))?;
            return Ok(());
        }
        _ => {}
    }

    if init::needs_initialization(&paths) {
        info!("first run, seeding data directory");
        init::initialize_storage(&paths)?;
    }

    // Initialize collaborators
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    let identity = LocalIdentityProvider::open(&paths)?;
    let reminders = FileReminderScheduler::open(&paths, settings.notifications_enabled)?;

    let ctx = ServiceContext {
        store: &storage,
        identity: &identity,
        reminders: &reminders,
        audit: storage.audit(),
        settings: &settings,
    };

    match command {
        Commands::Auth(cmd) => handle_auth_command(&identity, cmd)?,
        Commands::Car(cmd) => handle_car_command(ctx, cmd)?,
        Commands::Maintenance(cmd) => handle_maintenance_command(ctx, cmd)?,
        Commands::Catalog(cmd) => handle_catalog_command(ctx, cmd)?,
        Commands::Reminder(cmd) => handle_reminder_command(ctx, cmd)?,
        Commands::Dashboard => handle_dashboard_command(ctx)?,
        Commands::Audit { limit } => handle_audit_command(ctx, limit)?,
        Commands::Init | Commands::Config { .. } => {}
    }

    Ok(())
}
