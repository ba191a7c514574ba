use crate::api::config::Config;
use crate::security::errors::AuthError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Signs and checks admin session tokens.
#[derive(Clone)]
pub struct JwtService {
    secret: String,
    expiration_minutes: u64,
}

impl JwtService {
    pub fn new(secret: &str, expiration_minutes: u64) -> Self {
        JwtService {
            secret: secret.to_string(),
            expiration_minutes,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expiration_minutes)
    }

    pub fn generate_token(&self, email: &str) -> Result<String, AuthError> {
        let curr_time = chrono::Utc::now().timestamp() as usize;

        let claims = AdminClaims {
            sub: email.to_string(),
            iat: curr_time,
            exp: curr_time + (self.expiration_minutes * 60) as usize,
        };

        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|_| AuthError::TokenCreationError)
    }

    pub fn decode_token<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, AuthError> {
        let token_data = jsonwebtoken::decode::<T>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Email the session was opened with
    pub sub: String,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_its_subject() {
        let jwt = JwtService::new("secret", 5);

        let token = jwt.generate_token("admin@demporium.test").unwrap();
        let claims: AdminClaims = jwt.decode_token(&token).unwrap();

        assert_eq!(claims.sub, "admin@demporium.test");
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = JwtService::new("one", 5).generate_token("a@b.c").unwrap();

        let result = JwtService::new("two", 5).decode_token::<AdminClaims>(&token);

        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }
}
