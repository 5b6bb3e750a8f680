use actix_web::{http::StatusCode, HttpResponse};

/// JSON responder for successful handler results.
///
/// The payload is written as the response body without an envelope, so the
/// wire shape of each endpoint is exactly the serialized `T`.
pub struct Success<T: serde::Serialize> {
    pub status: StatusCode,
    pub body: T,
}

impl<T: serde::Serialize> Success<T> {
    pub fn ok(body: T) -> Self {
        Self { status: StatusCode::OK, body }
    }
}

impl<T: serde::Serialize> actix_web::Responder for Success<T> {
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, _req: &actix_web::HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::build(self.status).json(self.body)
    }
}
