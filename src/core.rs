use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    errors::AppError,
    model::{Token, Validation}
};

#[async_trait]
pub trait Core {
    async fn login(
        &self,
        _username: &str,
        _password: &str
    ) -> Result<Token, AppError>
    {
        unimplemented!();
    }

    fn validate(
        &self,
        _token: &str
    ) -> Validation
    {
        unimplemented!();
    }
}

pub type CoreArc = Arc<dyn Core + Send + Sync>;
