use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    auth_provider::AuthProvider,
    core::Core,
    errors::AppError,
    jwt::{strip_bearer, JWTIssuer, JWTVerifier},
    model::{Token, Validation}
};

pub struct ProdCore<A: AuthProvider> {
    pub auth: A,
    pub issuer: JWTIssuer,
    pub verifier: JWTVerifier,
    pub token_duration: i64,
    pub now: fn() -> DateTime<Utc>
}

fn check_required(username: &str, password: &str) -> Result<(), AppError> {
    let missing = [("username", username), ("password", password)]
        .into_iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(k, _)| k)
        .collect::<Vec<_>>();

    if missing.is_empty() {
        Ok(())
    }
    else {
        Err(AppError::BadRequest(format!("missing {}", missing.join(", "))))
    }
}

#[async_trait]
impl<A: AuthProvider + Send + Sync> Core for ProdCore<A> {
    async fn login(
        &self,
        username: &str,
        password: &str
    ) -> Result<Token, AppError>
    {
        check_required(username, password)?;

        let user = self.auth.login(username, password)
            .await
            .inspect_err(|_| tracing::warn!("login failed for {username}"))?;

        let now = (self.now)().timestamp();
        let token = self.issuer.issue(&user, now, self.token_duration)?;

        tracing::info!("issued token for {user}");

        Ok(Token { token, user })
    }

    fn validate(
        &self,
        token: &str
    ) -> Validation
    {
        let now = (self.now)().timestamp();
        match self.verifier.verify(strip_bearer(token), now) {
            Ok(claims) => Validation::valid(claims.username),
            Err(e) => {
                tracing::debug!("token rejected: {e}");
                Validation::invalid()
            }
        }
    }
}
