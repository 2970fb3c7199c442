use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::UserRepository,
    error::{AppError, AppResult},
    models::{normalize_email, User, UserPreferences},
};

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// JWT claims carried by access tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signing and verification keys
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Issues an access token for `user`
    pub fn issue(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Checks signature, algorithm and expiry
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        Ok(decode::<Claims>(token, &self.decoding, &validation)?.claims)
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned on successful registration or login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
}

/// Registration, login and token-based authentication
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    keys: TokenKeys,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, keys: TokenKeys, bcrypt_cost: u32) -> Self {
        Self {
            users,
            keys,
            bcrypt_cost,
        }
    }

    /// Creates an account and signs the new user in
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        if request.password.is_empty() {
            return Err(AppError::InvalidInput("password is required".to_string()));
        }

        let email = normalize_email(&request.email);
        if self.users.get_by_email(&email).await.is_ok() {
            return Err(AppError::Conflict(
                "this email address is already registered".to_string(),
            ));
        }

        let password_hash = self.hash_password(request.password).await?;
        let user = User::new(request.name.trim().to_string(), email, password_hash);
        user.validate()?;

        let user = self.users.create(user).await?;
        let token = self.keys.issue(&user)?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthResponse { user, token })
    }

    /// Verifies credentials and issues a fresh token
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = match self.users.get_by_email(&request.email).await {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))
            }
            Err(e) => return Err(e),
        };

        if !self
            .verify_password(request.password, user.password_hash.clone())
            .await?
        {
            tracing::warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.keys.issue(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse { user, token })
    }

    /// Resolves a bearer token to the user it was issued for
    pub async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = self.keys.verify(token)?;
        match self.users.get_by_id(claims.sub).await {
            Ok(user) => Ok(user),
            Err(AppError::NotFound(_)) => Err(AppError::Unauthorized(
                "user no longer exists".to_string(),
            )),
            Err(e) => Err(e),
        }
    }

    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<User> {
        self.users.get_by_id(user_id).await
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> AppResult<User> {
        let mut user = self.users.get_by_id(user_id).await?;

        if let Some(name) = request.name {
            user.name = name.trim().to_string();
        }
        if let Some(gender) = request.gender {
            user.gender = Some(gender).filter(|g| !g.trim().is_empty());
        }
        if let Some(age) = request.age {
            user.age = Some(age);
        }
        if let Some(preferences) = request.preferences {
            user.preferences = preferences;
        }
        user.updated_at = Utc::now();
        user.validate()?;

        let user = self.users.update(user).await?;
        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    async fn hash_password(&self, password: String) -> AppResult<String> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .map_err(AppError::from)
    }

    async fn verify_password(&self, password: String, hash: String) -> AppResult<bool> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryUserRepository;

    const SECRET: &str = "test-secret";

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            TokenKeys::new(SECRET, 24),
            4,
        )
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Aoi".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_issues_valid_token() {
        let service = service();
        let response = service
            .register(register_request(" Aoi@Example.com "))
            .await
            .unwrap();

        assert_eq!(response.user.email, "aoi@example.com");
        assert_ne!(response.user.password_hash, "hunter22");

        let user = service.authenticate(&response.token).await.unwrap();
        assert_eq!(user.id, response.user.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = service();
        service
            .register(register_request("aoi@example.com"))
            .await
            .unwrap();
        let result = service.register(register_request("AOI@example.com")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let service = service();

        let mut request = register_request("aoi@example.com");
        request.password.clear();
        assert!(matches!(
            service.register(request).await,
            Err(AppError::InvalidInput(_))
        ));

        let mut request = register_request("aoi@example.com");
        request.name = " ".to_string();
        assert!(matches!(
            service.register(request).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_login() {
        let service = service();
        let registered = service
            .register(register_request("aoi@example.com"))
            .await
            .unwrap();

        let response = service
            .login(LoginRequest {
                email: "AOI@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn test_login_failures_share_message() {
        let service = service();
        service
            .register(register_request("aoi@example.com"))
            .await
            .unwrap();

        let wrong_password = service
            .login(LoginRequest {
                email: "aoi@example.com".to_string(),
                password: "nope".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_email = service
            .login(LoginRequest {
                email: "ghost@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_foreign_and_expired_tokens() {
        let service = service();
        let registered = service
            .register(register_request("aoi@example.com"))
            .await
            .unwrap();

        let foreign = TokenKeys::new("other-secret", 24)
            .issue(&registered.user)
            .unwrap();
        assert!(matches!(
            service.authenticate(&foreign).await,
            Err(AppError::Token(_))
        ));

        let expired_claims = Claims {
            sub: registered.user.id,
            email: registered.user.email.clone(),
            iat: Utc::now().timestamp() - 7200,
            exp: Utc::now().timestamp() - 3600,
        };
        let expired = encode(
            &Header::new(Algorithm::HS256),
            &expired_claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(matches!(
            service.authenticate(&expired).await,
            Err(AppError::Token(_))
        ));

        assert!(service.authenticate("garbage").await.is_err());
    }

    #[tokio::test]
    async fn test_authenticate_deleted_user() {
        let users = Arc::new(InMemoryUserRepository::new());
        let service = AuthService::new(users.clone(), TokenKeys::new(SECRET, 24), 4);
        let registered = service
            .register(register_request("aoi@example.com"))
            .await
            .unwrap();

        users.delete(registered.user.id).await.unwrap();

        assert!(matches!(
            service.authenticate(&registered.token).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_update_profile() {
        let service = service();
        let registered = service
            .register(register_request("aoi@example.com"))
            .await
            .unwrap();

        let updated = service
            .update_profile(
                registered.user.id,
                UpdateProfileRequest {
                    name: Some("Aoi Tanaka".to_string()),
                    age: Some(29),
                    preferences: Some(UserPreferences {
                        styles: vec!["casual".to_string()],
                        preferred_colors: vec!["navy".to_string()],
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Aoi Tanaka");
        assert_eq!(updated.age, Some(29));
        assert_eq!(updated.preferences.styles, vec!["casual".to_string()]);
        assert!(updated.updated_at >= registered.user.updated_at);

        let invalid = service
            .update_profile(
                registered.user.id,
                UpdateProfileRequest {
                    age: Some(200),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(invalid, Err(AppError::InvalidInput(_))));
    }
}
