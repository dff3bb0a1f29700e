use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// `RUST_LOG` wins when set; otherwise `default_level` applies to the app
/// and HTTP spans while sqlx is held at `warn`.
pub(crate) fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(default_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn default_directives(level: &str) -> String {
    format!("{level},blog_api={level},tower_http={level},sqlx=warn")
}

#[cfg(test)]
mod tests {
    use super::default_directives;

    #[test]
    fn default_directives_quiet_sqlx() {
        assert_eq!(
            default_directives("debug"),
            "debug,blog_api=debug,tower_http=debug,sqlx=warn"
        );
    }
}
