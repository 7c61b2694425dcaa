use anyhow::{Context as _, anyhow};

/// Default access-token lifetime (30 days).
const DEFAULT_JWT_EXPIRES_IN: &str = "30d";

/// Clinic service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ClinicConfig {
    /// Database connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for signing access tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// Access-token lifetime in seconds. Env var: `JWT_EXPIRES_IN` (`3600`, `90m`, `12h`, `30d`).
    pub jwt_expires_in_secs: u64,
    /// TCP port to listen on (default 5000). Env var: `PORT`.
    pub port: u16,
    /// Apply pending migrations at startup (default true). Env var: `RUN_MIGRATIONS`.
    pub run_migrations: bool,
}

impl ClinicConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| get(key).filter(|v| !v.is_empty()).context(key.to_owned());

        let expires_in = get("JWT_EXPIRES_IN").unwrap_or_else(|| DEFAULT_JWT_EXPIRES_IN.into());
        let jwt_expires_in_secs =
            parse_duration_secs(&expires_in).context("JWT_EXPIRES_IN")?;

        let port = match get("PORT") {
            Some(v) => v.parse().context("PORT")?,
            None => 5000,
        };

        let run_migrations = match get("RUN_MIGRATIONS").as_deref() {
            None => true,
            Some("1" | "true" | "yes") => true,
            Some("0" | "false" | "no") => false,
            Some(other) => return Err(anyhow!("RUN_MIGRATIONS: unrecognised value {other:?}")),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expires_in_secs,
            port,
            run_migrations,
        })
    }
}

/// Parse `90`, `90s`, `15m`, `12h`, `30d` into seconds.
pub fn parse_duration_secs(value: &str) -> anyhow::Result<u64> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(split);
    let amount: u64 = digits
        .parse()
        .with_context(|| format!("invalid duration {value:?}"))?;
    let scale = match unit {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        other => return Err(anyhow!("unknown duration unit {other:?}")),
    };
    let secs = amount
        .checked_mul(scale)
        .ok_or_else(|| anyhow!("duration {value:?} overflows"))?;
    if secs == 0 {
        return Err(anyhow!("duration must be positive"));
    }
    Ok(secs)
}
