use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A shared outfit that other users can browse and like
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutfitPost {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Author's display name at posting time
    pub user_name: String,
    pub items: Vec<String>,
    pub description: String,
    pub tags: Vec<String>,
    /// Temperature the outfit was worn in, °C
    pub temperature: Option<f64>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub likes: u32,
    #[serde(skip_serializing, default)]
    pub liked_by: HashSet<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl OutfitPost {
    pub fn validate(&self) -> AppResult<()> {
        if self.items.is_empty() {
            return Err(AppError::InvalidInput(
                "at least one clothing item is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Records a like from `user_id`. Returns `false` if that user already liked the post.
    pub fn like(&mut self, user_id: Uuid) -> bool {
        if self.liked_by.insert(user_id) {
            self.likes = self.liked_by.len() as u32;
            true
        } else {
            false
        }
    }
}
