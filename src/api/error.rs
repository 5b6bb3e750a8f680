use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::borrow::Cow;
use std::time::Duration;

/// Errors surfaced to HTTP callers.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Internal Server Error: {0}")]
    InternalServer(Cow<'static, str>),
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ErrorBody {
    pub message: Cow<'static, str>,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::InternalServer(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Error::BadRequest(msg) | Error::InternalServer(msg) => msg.clone(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { message })
    }
}

/// Failures raised inside the service layer and the collaborator adapters.
#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    // client input
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    // object storage
    #[error("Storage Error: {0}")]
    StorageError(Cow<'static, str>),
    // message queue
    #[error("Queue Error: {0}")]
    QueueError(Cow<'static, str>),
    // sqlx errors
    #[error("Database Error: {0}")]
    DatabaseError(Cow<'static, str>),
    // serde errors
    #[error("JSON Serialization/Deserialization Error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("{operation} timed out after {}s", .after.as_secs())]
    Timeout { operation: &'static str, after: Duration },
    #[error("Configuration Error: {0}")]
    ConfigError(Cow<'static, str>),
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::BadRequest(msg) => Error::BadRequest(msg),
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer(value.to_string().into())
            }
        }
    }
}

impl From<sqlx::Error> for SystemError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            log::error!("Unhandled DB error: {:?}", db_err);
            return SystemError::DatabaseError(db_err.message().to_string().into());
        }
        log::error!("{:?}", err);
        SystemError::DatabaseError(err.to_string().into())
    }
}

impl From<sqlx::migrate::MigrateError> for SystemError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        SystemError::DatabaseError(format!("Migration failed: {err}").into())
    }
}

impl SystemError {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn storage(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::StorageError(msg.into())
    }

    pub fn queue(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::QueueError(msg.into())
    }

    pub fn database(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::DatabaseError(msg.into())
    }

    pub fn config(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::ConfigError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_message(err: Error) -> String {
        let res = err.error_response();
        let bytes = to_bytes(res.into_body()).await.unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        body.message.into_owned()
    }

    #[test]
    fn test_bad_request_stays_client_error() {
        let err: Error = SystemError::bad_request("file_url resolves to an empty key").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_collaborator_failures_become_server_errors() {
        let cases = [
            SystemError::storage("signing failed"),
            SystemError::queue("queue unavailable"),
            SystemError::database("relation does not exist"),
            SystemError::Timeout { operation: "enqueue", after: Duration::from_secs(10) },
        ];
        for case in cases {
            let err: Error = case.into();
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[actix_web::test]
    async fn test_server_error_body_carries_description() {
        let err: Error = SystemError::queue("AccessDenied").into();
        assert_eq!(body_message(err).await, "Queue Error: AccessDenied");
    }

    #[actix_web::test]
    async fn test_bad_request_body_carries_reason() {
        let message = body_message(Error::BadRequest("missing field `files`".into())).await;
        assert_eq!(message, "missing field `files`");
    }

    #[test]
    fn test_timeout_display() {
        let err = SystemError::Timeout { operation: "insert job record", after: Duration::from_secs(5) };
        assert_eq!(err.to_string(), "insert job record timed out after 5s");
    }
}
