use actix_cors::Cors;

/// CORS policy for the configured trusted origins.
///
/// Credentials are allowed, so every origin must be listed explicitly; any
/// method and header is accepted from those origins.
pub fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}
