//! User document mapping.

use chosung_core::error::Result;
use chosung_core::user::{Medal, MedalType, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DocumentDto, collections};

pub mod fields {
    pub const SOCIAL_ID: &str = "socialId";
    pub const NICKNAME: &str = "nickname";
    pub const POINTS: &str = "points";
    pub const MEDALS: &str = "medals";
    pub const UPDATED_AT: &str = "updatedAt";
}

/// Medal as embedded in the user document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedalDocument {
    pub id: String,
    #[serde(rename = "type")]
    pub medal_type: MedalType,
    pub quiz_group_id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub acquired_at: DateTime<Utc>,
}

impl From<&Medal> for MedalDocument {
    fn from(medal: &Medal) -> Self {
        Self {
            id: medal.id.clone(),
            medal_type: medal.medal_type,
            quiz_group_id: medal.quiz_group_id.clone(),
            acquired_at: medal.acquired_at,
        }
    }
}

impl From<MedalDocument> for Medal {
    fn from(doc: MedalDocument) -> Self {
        Self {
            id: doc.id,
            medal_type: doc.medal_type,
            quiz_group_id: doc.quiz_group_id,
            acquired_at: doc.acquired_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub social_id: String,
    pub nickname: String,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub medals: Vec<MedalDocument>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl DocumentDto for UserDocument {
    type Domain = User;

    const COLLECTION: &'static str = collections::USERS;

    fn from_domain(user: &User) -> Self {
        Self {
            social_id: user.social_id.clone(),
            nickname: user.nickname.clone(),
            points: user.points,
            medals: user.medals.iter().map(MedalDocument::from).collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    fn into_domain(self, id: String) -> Result<User> {
        Ok(User {
            id,
            social_id: self.social_id,
            nickname: self.nickname,
            points: self.points,
            medals: self.medals.into_iter().map(Medal::from).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
