use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub oracle_api_key: String,
    pub oracle_base_url: String,
    pub oracle_model: String,
    pub oracle_request_timeout_secs: u64,
    pub oracle_max_retries: u32,
    pub oracle_retry_backoff_base_ms: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub reprioritize_cron: String,
    pub business_context_cron: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("oracle_api_key", &"[redacted]")
            .field("oracle_base_url", &self.oracle_base_url)
            .field("oracle_model", &self.oracle_model)
            .field(
                "oracle_request_timeout_secs",
                &self.oracle_request_timeout_secs,
            )
            .field("oracle_max_retries", &self.oracle_max_retries)
            .field(
                "oracle_retry_backoff_base_ms",
                &self.oracle_retry_backoff_base_ms,
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("reprioritize_cron", &self.reprioritize_cron)
            .field("business_context_cron", &self.business_context_cron)
            .finish()
    }
}
