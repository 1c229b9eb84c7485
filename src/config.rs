use crate::*;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct EnvConfig {
    pub database_url: String,
    pub http_host: String,
    #[serde(default = "models::defaults::default_http_port")]
    pub http_port: u16,
    pub logger_format: LoggerFormat,
}
