use chrono::Local;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use projwatch::{run, Config, PgNameSource, SmtpMailer, SnapshotStore};

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn main() {
    setup_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(action = "error", component = "config", error = %e, "Configuration error");
            std::process::exit(1);
        }
    };

    let mut source = PgNameSource::new(config.db.clone(), config.property_id);
    let store = SnapshotStore::new(config.snapshot_dir.clone());
    let mailer = SmtpMailer::new(config.smtp.clone(), config.recipients.clone());

    let today = Local::now().date_naive();
    match run(today, &mut source, &store, &mailer) {
        Ok(report) => {
            info!(
                action = "complete",
                component = "main",
                total = report.total,
                added = report.diff.added.len(),
                removed = report.diff.removed.len(),
                "Daily project name report finished"
            );
        }
        Err(e) => {
            error!(action = "error", component = "main", error = %e, "Run failed");
            std::process::exit(1);
        }
    }
}
