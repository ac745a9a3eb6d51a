use std::time::Duration;

use chrono::NaiveTime;
use chrono_tz::Tz;
use sms_transport::TextBeeConfig;

/// Notifier configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | ROSTER_PATH | iei_processed_members.xlsx | roster loaded at startup |
/// | SIMULATION_MODE | true | console transport instead of the SMS gateway |
/// | SMS_API_KEY | - | gateway API key |
/// | SMS_DEVICE_ID | - | gateway device id |
/// | SMS_API_BASE_URL | https://api.textbee.dev | gateway base URL |
/// | SMS_COUNTRY_CODE | +91 | prefix for numbers without `+` |
/// | SMS_TIMEOUT_MS | 15000 | gateway request timeout |
/// | AUDIT_LOG_CAPACITY | 5000 | sent-log ceiling |
/// | DEFAULT_BATCH_SIZE | 5 | bulk-send batch size |
/// | DEFAULT_DELAY_MS | 3000 | pause between bulk batches |
/// | AUTO_RUN_BULK | false | run one full bulk send at startup |
/// | BIRTHDAY_ENABLED | true | daily birthday greetings |
/// | BIRTHDAY_TIME | 09:00 | time of the daily run (HH:MM) |
/// | TIMEZONE | Asia/Kolkata | business timezone |
/// | PORTAL_NAME | IEI | organisation name in default templates |
/// | LOG_LEVEL | info | default tracing level |
/// | LOG_DIR | - | enables daily rolling log files |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub environment: String,
    pub roster_path: String,
    pub simulation_mode: bool,
    pub sms: TextBeeConfig,
    pub audit_capacity: usize,
    pub default_batch_size: usize,
    pub default_delay_ms: u64,
    pub auto_run_bulk: bool,
    pub birthday_enabled: bool,
    pub birthday_time: NaiveTime,
    pub timezone: Tz,
    pub portal_name: String,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            environment: "development".into(),
            roster_path: "iei_processed_members.xlsx".into(),
            simulation_mode: true,
            sms: TextBeeConfig::default(),
            audit_capacity: 5000,
            default_batch_size: 5,
            default_delay_ms: 3000,
            auto_run_bulk: false,
            birthday_enabled: true,
            birthday_time: default_birthday_time(),
            timezone: chrono_tz::Asia::Kolkata,
            portal_name: "IEI".into(),
            log_level: "info".into(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to the defaults above.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            http_port: parsed("HTTP_PORT").unwrap_or(defaults.http_port),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            roster_path: std::env::var("ROSTER_PATH").unwrap_or(defaults.roster_path),
            simulation_mode: flag("SIMULATION_MODE").unwrap_or(defaults.simulation_mode),
            sms: TextBeeConfig {
                base_url: std::env::var("SMS_API_BASE_URL").unwrap_or(defaults.sms.base_url),
                api_key: non_empty("SMS_API_KEY"),
                device_id: non_empty("SMS_DEVICE_ID"),
                country_code: std::env::var("SMS_COUNTRY_CODE")
                    .unwrap_or(defaults.sms.country_code),
                timeout: parsed("SMS_TIMEOUT_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.sms.timeout),
            },
            audit_capacity: parsed("AUDIT_LOG_CAPACITY")
                .filter(|c: &usize| *c > 0)
                .unwrap_or(defaults.audit_capacity),
            default_batch_size: parsed("DEFAULT_BATCH_SIZE")
                .filter(|b: &usize| *b > 0)
                .unwrap_or(defaults.default_batch_size),
            default_delay_ms: parsed("DEFAULT_DELAY_MS").unwrap_or(defaults.default_delay_ms),
            auto_run_bulk: flag("AUTO_RUN_BULK").unwrap_or(defaults.auto_run_bulk),
            birthday_enabled: flag("BIRTHDAY_ENABLED").unwrap_or(defaults.birthday_enabled),
            birthday_time: std::env::var("BIRTHDAY_TIME")
                .ok()
                .and_then(|t| NaiveTime::parse_from_str(t.trim(), "%H:%M").ok())
                .unwrap_or(defaults.birthday_time),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse::<Tz>().ok())
                .unwrap_or(defaults.timezone),
            portal_name: std::env::var("PORTAL_NAME").unwrap_or(defaults.portal_name),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: non_empty("LOG_DIR"),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn default_birthday_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// `true/false`, `1/0`, `yes/no`, `on/off`
fn flag(name: &str) -> Option<bool> {
    parse_flag(&std::env::var(name).ok()?)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
