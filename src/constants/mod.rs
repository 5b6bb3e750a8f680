use std::str::FromStr;
use std::time::Duration;

use crate::api::error::SystemError;

pub const DEFAULT_PRESIGNED_URL_EXPIRATION: u64 = 3600;
pub const DEFAULT_EXTERNAL_CALL_TIMEOUT: u64 = 10;
pub const DEFAULT_PROCESS_TABLE_NAME: &str = "Process";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";
pub const DEFAULT_NUM_SLIDES: i32 = 15;

pub const MESSAGE_TYPE_ATTRIBUTE: &str = "MessageType";
pub const FILE_PROCESSING_MESSAGE_TYPE: &str = "file_processing";

pub struct Env {
    pub aws_access_key: Option<String>,
    pub aws_secret_key: Option<String>,
    pub aws_region: String,
    pub aws_bucket_name: String,
    pub aws_endpoint_url: Option<String>,
    pub sqs_queue_url: String,
    pub database_url: String,
    pub process_table_name: String,
    pub presigned_url_expiration: Duration,
    pub external_call_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
    pub run_migrations: bool,
    pub ip: String,
    pub port: u16,
    pub workers: usize,
}

impl Env {
    /// Reads configuration from the process environment.
    pub fn load() -> Result<Self, SystemError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SystemError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| {
            var(key).ok_or_else(|| {
                SystemError::config(format!("{key} must be set in .env file or environment variable"))
            })
        };

        let process_table_name =
            var("PROCESS_TABLE_NAME").unwrap_or_else(|| DEFAULT_PROCESS_TABLE_NAME.to_string());
        if !is_plain_identifier(&process_table_name) {
            return Err(SystemError::config(format!(
                "PROCESS_TABLE_NAME '{process_table_name}' is not a valid table identifier"
            )));
        }

        let presigned_url_expiration =
            parse_or(var("PRESIGNED_URL_EXPIRATION"), "PRESIGNED_URL_EXPIRATION", DEFAULT_PRESIGNED_URL_EXPIRATION)?;
        let external_call_timeout =
            parse_or(var("EXTERNAL_CALL_TIMEOUT"), "EXTERNAL_CALL_TIMEOUT", DEFAULT_EXTERNAL_CALL_TIMEOUT)?;
        if presigned_url_expiration == 0 || external_call_timeout == 0 {
            return Err(SystemError::config(
                "PRESIGNED_URL_EXPIRATION and EXTERNAL_CALL_TIMEOUT must be greater than zero",
            ));
        }

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Env {
            aws_access_key: var("AWS_ACCESS_KEY"),
            aws_secret_key: var("AWS_SECRET_KEY"),
            aws_region: required("AWS_REGION")?,
            aws_bucket_name: required("AWS_BUCKET_NAME")?,
            aws_endpoint_url: var("AWS_ENDPOINT_URL"),
            sqs_queue_url: required("SQS_QUEUE_URL")?,
            database_url: required("DATABASE_URL")?,
            process_table_name,
            presigned_url_expiration: Duration::from_secs(presigned_url_expiration),
            external_call_timeout: Duration::from_secs(external_call_timeout),
            cors_allowed_origins,
            run_migrations: parse_or(var("RUN_MIGRATIONS"), "RUN_MIGRATIONS", false)?,
            ip: var("IP").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(var("PORT"), "PORT", 8000)?,
            workers: parse_or(var("WORKERS"), "WORKERS", 2)?,
        })
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> Result<T, SystemError> {
    match value {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| SystemError::config(format!("{key} has an invalid value '{raw}'"))),
        None => Ok(default),
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
