pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: i64 = 3000;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://homebase.db?mode=rwc";
pub const DEFAULT_DB_MAX_CONNECTIONS: i64 = 10;
pub const DEFAULT_DB_MIN_IDLE: i64 = 2;
pub const DEV_SECRET_KEY: &str = "dev-secret-change-me-please";
pub const MIN_SECRET_KEY_LEN: usize = 16;
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24 * 7;
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;
pub const DEFAULT_WEATHER_CITY: &str = "London";
pub const DEFAULT_WEATHER_BASE_URL: &str = "http://api.openweathermap.org";
pub const DEFAULT_WEATHER_TIMEOUT_SECS: i64 = 5;
