use tracing::warn;

pub const DEFAULT_ACCESS_SECRET: &str = "defaultsecret";
pub const DEFAULT_REFRESH_SECRET: &str = "defaultrefreshsecret";

/// Upper bound for configured token lifetimes (ten years).
pub const MAX_TTL_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

/// Signing and lifetime settings for the access/refresh token pair.
#[derive(Clone, Debug)]
pub struct TokenSettings {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
    pub issuer: String,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            access_secret: DEFAULT_ACCESS_SECRET.to_string(),
            refresh_secret: DEFAULT_REFRESH_SECRET.to_string(),
            access_ttl_seconds: 15 * 60,
            refresh_ttl_seconds: 7 * 24 * 60 * 60,
            issuer: "inkwell".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,

    /// Unset means the in-memory stores are used.
    pub mongodb_uri: Option<String>,
    pub db_name: String,

    pub tokens: TokenSettings,

    /// 0 disables the expired refresh token sweeper.
    pub refresh_sweep_interval_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            mongodb_uri: None,
            db_name: "inkwell".to_string(),
            tokens: TokenSettings::default(),
            refresh_sweep_interval_seconds: 60 * 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let ttl = |key: &str, default: i64| -> i64 {
            let Some(raw) = lookup(key) else {
                return default;
            };
            match raw.trim().parse::<i64>() {
                Ok(secs) if (1..=MAX_TTL_SECONDS).contains(&secs) => secs,
                _ => {
                    warn!(key, value = %raw, default, "token lifetime out of range, using default");
                    default
                }
            }
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or(defaults.bind_addr);
        let mongodb_uri = lookup("MONGODB_URI").filter(|v| !v.trim().is_empty());
        let db_name = lookup("DB_NAME").unwrap_or(defaults.db_name);

        let access_secret = lookup("ACCESS_TOKEN_SECRET").unwrap_or_else(|| {
            warn!("ACCESS_TOKEN_SECRET not set, using the built-in default");
            defaults.tokens.access_secret.clone()
        });
        let refresh_secret = lookup("REFRESH_TOKEN_SECRET").unwrap_or_else(|| {
            warn!("REFRESH_TOKEN_SECRET not set, using the built-in default");
            defaults.tokens.refresh_secret.clone()
        });

        let tokens = TokenSettings {
            access_secret,
            refresh_secret,
            access_ttl_seconds: ttl(
                "ACCESS_TOKEN_TTL_SECONDS",
                defaults.tokens.access_ttl_seconds,
            ),
            refresh_ttl_seconds: ttl(
                "REFRESH_TOKEN_TTL_SECONDS",
                defaults.tokens.refresh_ttl_seconds,
            ),
            issuer: lookup("TOKEN_ISSUER").unwrap_or(defaults.tokens.issuer),
        };

        let refresh_sweep_interval_seconds = lookup("REFRESH_SWEEP_INTERVAL_SECONDS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.refresh_sweep_interval_seconds);

        Self {
            bind_addr,
            mongodb_uri,
            db_name,
            tokens,
            refresh_sweep_interval_seconds,
        }
    }
}
