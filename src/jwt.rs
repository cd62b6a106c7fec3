use jsonwebtoken::{encode, decode, Algorithm, Header, Validation, EncodingKey, DecodingKey};
use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JWTError {
    #[error(transparent)]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("token expired at {0}")]
    Expired(i64),
    #[error("expiry overflows: {0} + {1}")]
    ExpiryOverflow(i64, i64)
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct Claims {
    pub username: String,
    pub iat: i64,
    pub exp: i64
}

const BEARER_PREFIX: &str = "Bearer ";

pub fn strip_bearer(token: &str) -> &str {
    token.strip_prefix(BEARER_PREFIX).unwrap_or(token)
}

fn issue(
    key: &EncodingKey,
    username: &str,
    now: i64,
    expiry: i64
) -> Result<String, JWTError>
{
    let claims = Claims {
        username: username.into(),
        iat: now,
        exp: expiry
    };

    Ok(encode(&Header::default(), &claims, key)?)
}

fn verify(
    key: &DecodingKey,
    validation: &Validation,
    token_str: &str,
    now: i64
) -> Result<Claims, JWTError>
{
    let token = decode::<Claims>(token_str, key, validation)?;

    // valid strictly before exp, no leeway
    if now >= token.claims.exp {
        return Err(JWTError::Expired(token.claims.exp));
    }

    Ok(token.claims)
}

pub struct JWTIssuer {
    key: EncodingKey
}

impl JWTIssuer {
    pub fn new(key: &[u8]) -> Self {
        JWTIssuer {
            key: EncodingKey::from_secret(key)
        }
    }

    pub fn issue(
        &self,
        username: &str,
        now: i64,
        duration: i64
    ) -> Result<String, JWTError>
    {
        let expiry = now.checked_add(duration)
            .ok_or(JWTError::ExpiryOverflow(now, duration))?;
        issue(&self.key, username, now, expiry)
    }
}

pub struct JWTVerifier {
    key: DecodingKey,
    validation: Validation
}

impl JWTVerifier {
    pub fn new(key: &[u8]) -> Self {
        // HS256 only; expiry is checked against the caller's clock
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        JWTVerifier {
            key: DecodingKey::from_secret(key),
            validation
        }
    }

    pub fn verify(&self, token: &str, now: i64) -> Result<Claims, JWTError> {
        verify(&self.key, &self.validation, token, now)
    }
}
