use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub api_base_url: String,
    pub geocode_url: String,
    pub geocode_app_id: String,

    /// Lifetime of the stored token/user pair, seconds.
    pub session_ttl_secs: u64,
    /// How long a success notification stays up before navigation, ms.
    pub notify_delay_ms: u64,

    pub report_limit: u32,
    pub report_timezone: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            api_base_url: env::var("API_BASE_URL").expect("API_BASE_URL must be set"),
            geocode_url: env::var("GEOCODE_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org/geo/1.0/reverse".to_string()),
            geocode_app_id: env::var("GEOCODE_APP_ID").unwrap_or_default(),
            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string()) // matches the cookie maxAge
                .parse()
                .unwrap(),
            notify_delay_ms: env::var("NOTIFY_DELAY_MS")
                .unwrap_or_else(|_| "2000".to_string())
                .parse()
                .unwrap(),
            report_limit: env::var("REPORT_LIMIT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap(),
            report_timezone: env::var("REPORT_TIMEZONE").unwrap_or_else(|_| "UTC".to_string()),
        }
    }
}
