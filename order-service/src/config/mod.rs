use serde::Deserialize;
use service_core::config::{self as core_config, get_env, get_optional_env, is_production};
use service_core::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct OrderConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service_name: String,
    pub mongodb: MongoConfig,
    pub auth: AuthConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the login flow that mints session tokens
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl OrderConfig {
    pub fn load() -> Result<Self, AppError> {
        // Common config handles .env and the APP__ prefix
        let common_config = core_config::Config::load()?;
        let is_prod = is_production();

        Ok(OrderConfig {
            common: common_config,
            service_name: get_env("SERVICE_NAME", Some("order-service"), is_prod)?,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("order_db"), is_prod)?,
            },
            auth: AuthConfig {
                jwt_secret: get_env("JWT_SECRET", Some("dev-secret"), is_prod)?,
            },
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
                otlp_endpoint: get_optional_env("OTLP_ENDPOINT"),
            },
        })
    }
}
