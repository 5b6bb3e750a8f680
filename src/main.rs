use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::Arc;

use crate::{
    configs::{connect_database, load_aws_config, s3_client, sqs_client},
    constants::Env,
    modules::{
        job::{JobRepositoryPg, JobService, SqsJobQueue},
        presign::{PresignService, S3UrlSigner},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");

    let env = Env::load().map_err(|e| std::io::Error::other(e.to_string()))?;

    let db_pool = connect_database(&env)
        .await
        .map_err(|e| std::io::Error::other(format!("Database connection error: {e}")))?;
    let sdk_config = load_aws_config(&env).await;

    let signer = S3UrlSigner::new(s3_client(&sdk_config, &env), env.aws_bucket_name.clone());
    let queue = SqsJobQueue::new(sqs_client(&sdk_config), env.sqs_queue_url.clone());
    let job_repo = JobRepositoryPg::new(db_pool, &env.process_table_name);

    let presign_service = PresignService::with_dependencies(
        Arc::new(signer),
        env.presigned_url_expiration,
        env.external_call_timeout,
    );
    let job_service =
        JobService::with_dependencies(Arc::new(queue), Arc::new(job_repo), env.external_call_timeout);

    let allowed_origins = env.cors_allowed_origins.clone();

    log::info!("Starting server at http://{}:{}", env.ip, env.port);
    HttpServer::new(move || {
        App::new()
            .wrap(middlewares::cors(&allowed_origins))
            .wrap(Logger::default())
            .app_data(web::Data::new(presign_service.clone()))
            .app_data(web::Data::new(job_service.clone()))
            .service(health_check)
            .configure(modules::presign::route::configure)
            .configure(modules::job::route::configure)
    })
    .bind((env.ip.as_str(), env.port))?
    .workers(env.workers)
    .run()
    .await
}
