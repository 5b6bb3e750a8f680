use aws_config::{timeout::TimeoutConfig, BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::Credentials;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{api::error, constants::Env};

pub async fn connect_database(env: &Env) -> Result<PgPool, error::SystemError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(env.external_call_timeout)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(&env.database_url)
        .await?;

    if env.run_migrations {
        sqlx::migrate!().run(&pool).await?;
        log::info!("Database migrations applied");
    }

    Ok(pool)
}

/// Shared AWS configuration for the S3 and SQS clients.
///
/// Static keys from the environment take precedence over the default
/// credential chain. Every SDK operation is bounded by the external call timeout.
pub async fn load_aws_config(env: &Env) -> SdkConfig {
    let timeouts = TimeoutConfig::builder().operation_timeout(env.external_call_timeout).build();

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(env.aws_region.clone()))
        .timeout_config(timeouts);

    if let (Some(access_key), Some(secret_key)) = (&env.aws_access_key, &env.aws_secret_key) {
        loader = loader.credentials_provider(Credentials::new(
            access_key,
            secret_key,
            None,
            None,
            "environment",
        ));
    }

    if let Some(endpoint) = &env.aws_endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}

pub fn s3_client(sdk_config: &SdkConfig, env: &Env) -> aws_sdk_s3::Client {
    // S3-compatible endpoints (MinIO, LocalStack) need path-style addressing.
    let config = aws_sdk_s3::config::Builder::from(sdk_config)
        .force_path_style(env.aws_endpoint_url.is_some())
        .build();
    aws_sdk_s3::Client::from_conf(config)
}

pub fn sqs_client(sdk_config: &SdkConfig) -> aws_sdk_sqs::Client {
    aws_sdk_sqs::Client::new(sdk_config)
}
