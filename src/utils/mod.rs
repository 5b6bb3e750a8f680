use actix_web::{web, FromRequest};
use futures_util::future::LocalBoxFuture;
use std::future::Future;
use std::time::Duration;
use validator::Validate;

use crate::api::error;

/// Runs a collaborator call with an upper bound on how long it may block the request.
pub async fn with_timeout<T, F>(
    operation: &'static str,
    after: Duration,
    fut: F,
) -> Result<T, error::SystemError>
where
    F: Future<Output = Result<T, error::SystemError>>,
{
    match tokio::time::timeout(after, fut).await {
        Ok(result) => result,
        Err(_) => Err(error::SystemError::Timeout { operation, after }),
    }
}

pub struct ValidatedJson<T>(pub T);

impl<T> FromRequest for ValidatedJson<T>
where
    T: Validate + serde::de::DeserializeOwned + 'static,
{
    type Error = error::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let fut = web::Json::<T>::from_request(req, payload);

        Box::pin(async move {
            let json = fut.await.map_err(|e| error::Error::BadRequest(e.to_string().into()))?;
            let model = json.into_inner();
            model.validate().map_err(|e| error::Error::BadRequest(e.to_string().into()))?;
            Ok(ValidatedJson(model))
        })
    }
}
