pub mod handle;
pub mod model;
pub mod route;
pub mod service;
pub mod signer;
pub mod signer_s3;

pub use service::PresignService;
pub use signer_s3::S3UrlSigner;
