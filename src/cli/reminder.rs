//! Reminder and dashboard CLI commands

use chrono::Utc;
use clap::Subcommand;

use crate::display::{format_dashboard, format_reminders};
use crate::error::MileMarkResult;
use crate::services::{DashboardService, ReminderService, ServiceContext};

/// Reminder subcommands
#[derive(Subcommand)]
pub enum ReminderCommands {
    /// List reminders that have not fired yet
    List,
    /// Show reminders that are due now and mark them as fired
    Due,
}

/// Handle a reminder command
pub fn handle_reminder_command(ctx: ServiceContext<'_>, cmd: ReminderCommands) -> MileMarkResult<()> {
    let service = ReminderService::new(ctx);

    match cmd {
        ReminderCommands::List => {
            let pending = service.pending()?;
            print!("{}", format_reminders(&pending, ctx.settings));
            if pending.is_empty() {
                println!();
            }
        }

        ReminderCommands::Due => {
            let fired = service.fire_due(Utc::now())?;
            if fired.is_empty() {
                println!("Nothing due.");
            } else {
                print!("{}", format_reminders(&fired, ctx.settings));
            }
        }
    }

    Ok(())
}

/// Show the dashboard
pub fn handle_dashboard_command(ctx: ServiceContext<'_>) -> MileMarkResult<()> {
    let dashboard = DashboardService::new(ctx).build()?;
    print!("{}", format_dashboard(&dashboard, ctx.settings));
    Ok(())
}

/// Show the signed-in user's most recent audit log entries
pub fn handle_audit_command(ctx: ServiceContext<'_>, limit: usize) -> MileMarkResult<()> {
    let user = ctx.require_user()?;
    let entries = ctx.audit.read_recent_by(user, limit)?;

    if entries.is_empty() {
        println!("No changes recorded.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
