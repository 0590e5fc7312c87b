//! Thaibooks month-end close runner.
//!
//! Closes accounting months and reports on the period lock from the
//! command line, against the database configured in `THAIBOOKS__*`.
//!
//! Exit status: 0 on success, 2 when a period rule stops the command (month
//! already closed, write date in a closed month, invalid period), 1 for
//! anything else.

mod command;

use std::process::ExitCode;

use chrono::Utc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use thaibooks_core::PeriodLockGuard;
use thaibooks_core::period::AccountingPeriod;
use thaibooks_db::{PeriodLockRepository, connect_with};
use thaibooks_shared::config::LoggingConfig;
use thaibooks_shared::{AppConfig, AppError};

use command::Command;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", describe(&err));
            ExitCode::from(exit_status(&err))
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let config = AppConfig::load().map_err(AppError::from)?;
    init_tracing(&config.logging);

    let db = connect_with(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Connected to database");

    let guard = PeriodLockGuard::new(PeriodLockRepository::new(db));

    match command {
        Command::Close { year, month, note } => {
            let record = guard
                .close(year, month, note)
                .await
                .map_err(AppError::from)?;
            println!("Closed {} at {}", record.period, record.closed_at.to_rfc3339());
        }
        Command::Status { year, month } => {
            let period = AccountingPeriod::new(year, month).map_err(AppError::from)?;
            let closed = guard
                .is_period_closed(period)
                .await
                .map_err(AppError::from)?;
            let (start, end) = period.date_range();
            println!(
                "{period} ({start} .. {end}): {}",
                if closed { "closed" } else { "open" }
            );
        }
        Command::List { year } => {
            let closes = guard.closed_periods(year).await.map_err(AppError::from)?;
            if closes.is_empty() {
                println!("No closed periods");
            }
            for close in closes {
                println!(
                    "{}\t{}\t{}",
                    close.period,
                    close.closed_at.to_rfc3339(),
                    close.note.unwrap_or_default()
                );
            }
        }
        Command::Check { date } => {
            let date = match date {
                Some(date) => date,
                None => Utc::now().with_timezone(&config.accounting.tz()?).date_naive(),
            };
            guard.assert_open(date).await.map_err(AppError::from)?;
            println!("{date}: period open");
        }
    }

    Ok(())
}

fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<AppError>() {
        Some(app) => format!("error[{}]: {app}", app.error_code()),
        None => format!("error: {err:#}"),
    }
}

fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<AppError>() {
        Some(app) if app.is_user_facing() => 2,
        _ => 1,
    }
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
