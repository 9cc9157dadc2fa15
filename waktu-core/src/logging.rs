use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::errors::{Result, WaktuError};

/// Installs the process-wide subscriber for the waktu service.
///
/// `RUST_LOG` wins when set. Otherwise `level` (default `info`) applies to
/// the service crates while sqlx statement logging stays at `warn`.
pub fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(atty::is(atty::Stream::Stdout))
        .try_init()
        .map_err(|err| WaktuError::GeneralError(err.to_string()))?;

    Ok(())
}

fn default_directives(level: Option<&str>) -> String {
    format!("{},sqlx=warn", level.unwrap_or("info"))
}
