use crate::modules::presign::handle::*;
use actix_web::web::ServiceConfig;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(generate_presigned_urls).service(generate_download_url);
}
