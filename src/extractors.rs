use axum::extract::{
    FromRequest, Json, Request,
    rejection::JsonRejection
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

// Json, but with rejections reported as AppErrors
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned
{
    type Rejection = AppError;

    async fn from_request(
        req: Request,
        state: &S
    ) -> Result<Self, Self::Rejection>
    {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(payload)) => Ok(JsonBody(payload)),
            Err(JsonRejection::MissingJsonContentType(_)) => {
                Err(AppError::BadMimeType)
            },
            Err(e) => Err(AppError::BadRequest(e.body_text()))
        }
    }
}
