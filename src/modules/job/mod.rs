pub mod handle;
pub mod model;
pub mod queue;
pub mod queue_sqs;
pub mod repository;
pub mod repository_pg;
pub mod route;
pub mod schema;
pub mod service;

pub use queue_sqs::SqsJobQueue;
pub use repository_pg::JobRepositoryPg;
pub use service::JobService;
