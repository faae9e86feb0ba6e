//! Config CLI commands

use clap::Subcommand;
use tracing::info;

use crate::config::{paths::MileMarkPaths, settings::Settings};
use crate::error::{MileMarkError, MileMarkResult};

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,
    /// Change one or more settings
    Set {
        /// Allow mileage reminders to be scheduled (true/false)
        #[arg(long)]
        notifications: Option<bool>,
        /// Days until the "log your mileage" reminder fires
        #[arg(long)]
        reminder_delay: Option<u32>,
        /// Date format (strftime)
        #[arg(long)]
        date_format: Option<String>,
        /// Unit label shown next to distances
        #[arg(long)]
        distance_unit: Option<String>,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &MileMarkPaths,
    mut settings: Settings,
    cmd: ConfigCommands,
) -> MileMarkResult<()> {
    match cmd {
        ConfigCommands::Show => print_config(paths, &settings),
        ConfigCommands::Set {
            notifications,
            reminder_delay,
            date_format,
            distance_unit,
        } => {
            if notifications.is_none()
                && reminder_delay.is_none()
                && date_format.is_none()
                && distance_unit.is_none()
            {
                return Err(MileMarkError::Validation(
                    "Nothing to change. Pass at least one setting.".into(),
                ));
            }

            if let Some(enabled) = notifications {
                settings.notifications_enabled = enabled;
            }
            if let Some(days) = reminder_delay {
                settings.reminder_delay_days = days;
            }
            if let Some(format) = date_format {
                settings.date_format = format;
            }
            if let Some(unit) = distance_unit {
                settings.distance_unit = unit.trim().to_string();
            }

            settings.save(paths)?;
            info!("settings updated");
            println!("Settings saved.");
            print_settings(&settings);
        }
    }

    Ok(())
}

fn print_config(paths: &MileMarkPaths, settings: &Settings) {
    println!("MileMark Configuration");
    println!("======================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!(
        "Initialized:      {}",
        if paths.is_initialized() { "Yes" } else { "No" }
    );
    println!();
    print_settings(settings);
}

fn print_settings(settings: &Settings) {
    println!("Settings:");
    println!("  Notifications enabled: {}", settings.notifications_enabled);
    println!("  Reminder delay:        {} days", settings.reminder_delay_days);
    println!("  Date format:           {}", settings.date_format);
    println!("  Distance unit:         {}", settings.distance_unit);
}
