use crate::api::request::LoginRequest;
use crate::api::response::{ActionResponse, LoginResponse};
use crate::security::jwt::JwtService;
use crate::services::errors::ServiceError;

/// Back-office login. Any credentials open a session.
pub struct AuthService {
    jwt: JwtService,
}

impl AuthService {
    pub fn new(jwt: JwtService) -> Self {
        AuthService { jwt }
    }

    pub async fn login(
        &self,
        request: LoginRequest,
    ) -> Result<ActionResponse<LoginResponse>, ServiceError> {
        tracing::info!("Login attempt with: {}", request.email);

        let token = self.jwt.generate_token(request.email.trim())?;

        Ok(ActionResponse::with_data(
            Some("Login successful!"),
            LoginResponse { token },
        ))
    }
}
