use thiserror::Error;

/// Missing or invalid required configuration. Detected at startup, before
/// any database, filesystem, or network I/O.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("recipient list is empty (set EMAIL_RECEIVER to a comma-separated address list)")]
    NoRecipients,
}

/// Database connection or query failure. Fatal for the run: no snapshot is
/// written and no notification is sent.
#[derive(Debug, Error)]
#[error("project name fetch failed: {0:#}")]
pub struct FetchError(pub anyhow::Error);

impl From<anyhow::Error> for FetchError {
    fn from(err: anyhow::Error) -> Self {
        FetchError(err)
    }
}

/// Snapshot read or write failure. A write failure does not prevent
/// notification, but the run still exits non-zero.
#[derive(Debug, Error)]
#[error("snapshot persistence failed: {0:#}")]
pub struct PersistError(pub anyhow::Error);

impl From<anyhow::Error> for PersistError {
    fn from(err: anyhow::Error) -> Self {
        PersistError(err)
    }
}

/// Email transport or authentication failure. The snapshot written earlier
/// in the run stands regardless.
#[derive(Debug, Error)]
#[error("notification failed: {0:#}")]
pub struct NotifyError(pub anyhow::Error);

impl From<anyhow::Error> for NotifyError {
    fn from(err: anyhow::Error) -> Self {
        NotifyError(err)
    }
}

/// First fatal failure of a run, keyed by the step that produced it so the
/// binary can report which stage broke before exiting non-zero.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}
