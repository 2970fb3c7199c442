use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

const MAX_AGE: u8 = 150;

/// Fashion-related settings a user keeps on their profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    /// Preferred fashion styles (casual, formal, sporty, ...)
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    /// Colour combinations the user particularly likes
    #[serde(default)]
    pub preferred_colors: Vec<String>,
    #[serde(default)]
    pub preferred_brands: Vec<String>,
    /// Main style orientation
    #[serde(default)]
    pub style: Option<String>,
}

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// bcrypt hash; never leaves the server
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub gender: Option<String>,
    pub age: Option<u8>,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user from an already hashed password
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            gender: None,
            age: None,
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks the invariants every stored user must satisfy
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::InvalidInput("name is required".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(AppError::InvalidInput("email is required".to_string()));
        }
        if !self.email.contains('@') {
            return Err(AppError::InvalidInput("email is not valid".to_string()));
        }
        if self.password_hash.is_empty() {
            return Err(AppError::InvalidInput("password is required".to_string()));
        }
        if let Some(age) = self.age {
            if age > MAX_AGE {
                return Err(AppError::InvalidInput(format!(
                    "age must be between 0 and {}",
                    MAX_AGE
                )));
            }
        }
        Ok(())
    }
}

/// Lower-cases and trims an email so lookups are case-insensitive
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
