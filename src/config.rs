use serde::Deserialize;

/// Longest accepted access token lifetime, one year
const MAX_JWT_TTL_HOURS: i64 = 24 * 365;
/// Work factor range accepted by bcrypt
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Secret used when `JWT_SECRET` is not set. Only suitable for local development.
pub const DEVELOPMENT_JWT_SECRET: &str = "forecast-api-development-secret";

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// OpenWeatherMap API key. Without it the server answers with fixed weather.
    #[serde(default)]
    pub weather_api_key: Option<String>,

    /// OpenWeatherMap API base URL
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,

    /// HS256 secret for signing access tokens
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Access token lifetime in hours
    #[serde(default = "default_jwt_ttl_hours")]
    pub jwt_ttl_hours: i64,

    /// bcrypt work factor for password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Redis connection URL; enables weather caching when set
    #[serde(default)]
    pub redis_url: Option<String>,

    /// How long a cached weather reading stays valid, in seconds
    #[serde(default = "default_weather_cache_ttl_secs")]
    pub weather_cache_ttl_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_weather_api_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_jwt_ttl_hours() -> i64 {
    24
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_weather_cache_ttl_secs() -> u64 {
    600
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would only fail later, at request time
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(1..=MAX_JWT_TTL_HOURS).contains(&self.jwt_ttl_hours) {
            anyhow::bail!(
                "JWT_TTL_HOURS must be between 1 and {}, got {}",
                MAX_JWT_TTL_HOURS,
                self.jwt_ttl_hours
            );
        }
        if !BCRYPT_COST_RANGE.contains(&self.bcrypt_cost) {
            anyhow::bail!(
                "BCRYPT_COST must be between {} and {}, got {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end(),
                self.bcrypt_cost
            );
        }
        Ok(())
    }

    /// Signing secret, falling back to the development secret
    pub fn jwt_secret(&self) -> &str {
        match self.jwt_secret.as_deref() {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                DEVELOPMENT_JWT_SECRET
            }
        }
    }

    /// Weather API key, ignoring blank values
    pub fn weather_api_key(&self) -> Option<&str> {
        self.weather_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        envy::from_iter::<_, Config>(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.jwt_ttl_hours, 24);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.weather_cache_ttl_secs, 600);
        assert!(config.weather_api_key().is_none());
        assert!(config.redis_url.is_none());
        assert_eq!(config.jwt_secret(), DEVELOPMENT_JWT_SECRET);
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("PORT", "3000"),
            ("WEATHER_API_KEY", "abc"),
            ("JWT_SECRET", "s3cret"),
            ("BCRYPT_COST", "4"),
        ]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.weather_api_key(), Some("abc"));
        assert_eq!(config.jwt_secret(), "s3cret");
        assert_eq!(config.bcrypt_cost, 4);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(from_pairs(&[]).validate().is_ok());
        assert!(from_pairs(&[("JWT_TTL_HOURS", "8760"), ("BCRYPT_COST", "31")])
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_ttl() {
        for ttl in ["0", "-5", "9223372036854775807"] {
            let err = from_pairs(&[("JWT_TTL_HOURS", ttl)]).validate().unwrap_err();
            assert!(err.to_string().contains("JWT_TTL_HOURS"), "{err}");
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_bcrypt_cost() {
        for cost in ["3", "32"] {
            let err = from_pairs(&[("BCRYPT_COST", cost)]).validate().unwrap_err();
            assert!(err.to_string().contains("BCRYPT_COST"), "{err}");
        }
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let config = from_pairs(&[("WEATHER_API_KEY", "  ")]);
        assert!(config.weather_api_key().is_none());
    }
}
