#[derive(Debug, PartialEq)]
pub enum AuthError {
    MissingToken,
    TokenExpired,
    TokenCreationError,
    InvalidToken,
}

impl std::error::Error for AuthError {}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "Missing admin session token."),
            AuthError::TokenExpired => write!(f, "Admin session has expired."),
            AuthError::TokenCreationError => write!(f, "Token creation failed"),
            AuthError::InvalidToken => write!(f, "Invalid admin session token."),
        }
    }
}
