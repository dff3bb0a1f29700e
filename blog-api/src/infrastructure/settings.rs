use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) database_url: String,
    pub(crate) database_max_connections: u32,
    pub(crate) jwt_secret: String,
    pub(crate) jwt_ttl_seconds: i64,
    pub(crate) http_addr: String,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) log_level: String,
    pub(crate) http_request_body_limit_bytes: usize,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = get_required(&lookup, "DATABASE_URL")?;
        let jwt_secret = get_required(&lookup, "JWT_SECRET")?;
        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }

        let jwt_ttl_seconds: i64 = lookup("JWT_TTL_SECONDS")
            .unwrap_or_else(|| "3600".to_string())
            .parse()
            .context("Failed to parse JWT_TTL_SECONDS, expecting integer")?;

        let database_max_connections = parse_positive(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?;
        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            &lookup("CORS_ORIGINS")
                .unwrap_or_else(|| "http://localhost:3000,http://127.0.0.1:3000".to_string()),
        );
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let http_request_body_limit_bytes =
            parse_positive(&lookup, "HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024usize)?;

        Ok(Self {
            database_url,
            database_max_connections,
            jwt_secret,
            jwt_ttl_seconds,
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
        })
    }
}

fn get_required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    let value = lookup(key).ok_or_else(|| anyhow!("{key} is required"))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + Default + ToString,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = lookup(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<T>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value <= T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
