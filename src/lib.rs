pub mod config;
pub mod diff;
pub mod error;
pub mod fetch;
pub mod notify;
pub mod report;
pub mod snapshot;

pub use config::{Config, DbConfig, SmtpConfig};
pub use diff::{diff, Change, ChangeStatus, DiffResult};
pub use error::{ConfigError, FetchError, NotifyError, PersistError, RunError};
pub use fetch::{NameSource, PgNameSource};
pub use notify::{compose, Email, Mailer, SmtpMailer};
pub use report::{run, RunReport};
pub use snapshot::SnapshotStore;
