use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims of a platform session token. Issuance lives elsewhere; this
/// service only verifies.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: usize,
}

pub enum Error {
    MissingSecret,
    InvalidToken,
}

pub fn verify_session_token(secret: Option<&str>, token: &str) -> Result<SessionClaims, Error> {
    let secret = secret.ok_or(Error::MissingSecret)?;

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|err| {
        tracing::warn!("Session token rejected: {}", err);
        Error::InvalidToken
    })
}
