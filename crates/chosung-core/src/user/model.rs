//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Medal grade awarded for a ranking position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MedalType {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl MedalType {
    /// Medal for a 1-based rank, or `None` outside the podium.
    ///
    /// First place with a perfect score is upgraded to platinum.
    pub fn for_rank(rank: usize, score: u8) -> Option<Self> {
        match rank {
            1 if score == 100 => Some(Self::Platinum),
            1 => Some(Self::Gold),
            2 => Some(Self::Silver),
            3 => Some(Self::Bronze),
            _ => None,
        }
    }
}

/// An achievement badge embedded in the owner's user document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medal {
    pub id: String,
    pub medal_type: MedalType,
    pub quiz_group_id: String,
    pub acquired_at: DateTime<Utc>,
}

impl Medal {
    pub fn new(medal_type: MedalType, quiz_group_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            medal_type,
            quiz_group_id: quiz_group_id.into(),
            acquired_at: crate::time::now(),
        }
    }
}

/// A registered player.
///
/// `social_id` is the opaque id handed out by the social-login provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub social_id: String,
    pub nickname: String,
    pub points: u64,
    pub medals: Vec<Medal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a fresh user for a first social login.
    pub fn new(social_id: impl Into<String>, nickname: impl Into<String>) -> Self {
        let now = crate::time::now();
        Self {
            id: Uuid::new_v4().to_string(),
            social_id: social_id.into(),
            nickname: nickname.into(),
            points: 0,
            medals: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_medal_for(&self, quiz_group_id: &str) -> bool {
        self.medals.iter().any(|m| m.quiz_group_id == quiz_group_id)
    }
}
