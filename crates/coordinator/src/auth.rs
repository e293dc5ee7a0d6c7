use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

use domain::{LoginRequest, RegisterRequest, User};
use store::{StoreError, UserStore};

use crate::CoordinatorError;

const TOKEN_EXPIRY_MINUTES: i64 = 30;

/// JWT claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id
    sub: String,
    /// Expiration (Unix timestamp seconds)
    exp: usize,
    /// Issued at (Unix timestamp seconds)
    iat: usize,
}

/// Bearer token handed back on login.
#[derive(Debug, Clone, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

/// Registration and login against the user store. Issues and verifies HS256
/// access tokens; order operations never see credentials, only the resolved
/// user id.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt_secret: String) -> Self {
        Self { users, jwt_secret }
    }

    /// Register a new user. The email must be unused; the password is stored
    /// only as an Argon2 hash.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, CoordinatorError> {
        request.validate()?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(CoordinatorError::EmailTaken);
        }

        let password_hash = hash_password(&request.password)
            .map_err(|e| CoordinatorError::Internal(format!("password hashing: {}", e)))?;

        // The pre-check above races with concurrent registrations; the
        // store's unique key is the authority.
        match self.users.create(&request.email, &password_hash).await {
            Ok(user) => {
                info!("User registered: {}", user.email);
                Ok(user)
            }
            Err(StoreError::DuplicateEmail) => Err(CoordinatorError::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify credentials and issue an access token. Unknown email and wrong
    /// password are indistinguishable to the caller.
    pub async fn login(&self, request: LoginRequest) -> Result<AccessToken, CoordinatorError> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or(CoordinatorError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash) {
            return Err(CoordinatorError::InvalidCredentials);
        }

        let token = self.issue_token(user.id)?;
        Ok(AccessToken {
            access_token: token,
            token_type: "bearer".to_string(),
        })
    }

    fn issue_token(&self, user_id: i64) -> Result<String, CoordinatorError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + chrono::Duration::minutes(TOKEN_EXPIRY_MINUTES)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| CoordinatorError::Internal(format!("token encoding: {}", e)))
    }

    /// Decode and validate an access token, returning the user id it names.
    pub fn verify_token(&self, token: &str) -> Result<i64, CoordinatorError> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            debug!("Token validation failed: {}", e);
            CoordinatorError::InvalidCredentials
        })?;

        data.claims
            .sub
            .parse()
            .map_err(|_| CoordinatorError::InvalidCredentials)
    }
}

fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::rand_core::OsRng;
    use argon2::password_hash::SaltString;
    use argon2::{Argon2, PasswordHasher};

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
