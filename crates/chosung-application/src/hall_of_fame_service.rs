//! Rankings and medal awards.

use std::collections::HashMap;
use std::sync::Arc;

use chosung_core::error::Result;
use chosung_core::quiz_group::{QuizGroup, QuizGroupRepository};
use chosung_core::quiz_result::{QuizResult, QuizResultRepository, ResultStatus};
use chosung_core::user::{Medal, MedalType, User, UserRepository};

/// A medal handed out by [`HallOfFameService::award_medals`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardedMedal {
    pub user_id: String,
    pub rank: usize,
    pub medal: Medal,
}

pub struct HallOfFameService {
    group_repository: Arc<dyn QuizGroupRepository>,
    user_repository: Arc<dyn UserRepository>,
    result_repository: Arc<dyn QuizResultRepository>,
    limit: usize,
}

impl HallOfFameService {
    pub fn new(
        group_repository: Arc<dyn QuizGroupRepository>,
        user_repository: Arc<dyn UserRepository>,
        result_repository: Arc<dyn QuizResultRepository>,
        limit: usize,
    ) -> Self {
        Self {
            group_repository,
            user_repository,
            result_repository,
            limit,
        }
    }

    /// Active groups with the most likes.
    pub async fn top_quiz_groups(&self) -> Result<Vec<QuizGroup>> {
        self.group_repository.list_top_liked(self.limit).await
    }

    /// Users with the most points.
    pub async fn top_users(&self) -> Result<Vec<User>> {
        self.user_repository.list_top_by_points(self.limit).await
    }

    /// Awards podium medals for one quiz group.
    ///
    /// Each player is ranked by their best verified score; equal scores go
    /// to whoever finished first. Players already holding a medal for the
    /// group are skipped and keep their place.
    pub async fn award_medals(&self, quiz_group_id: &str) -> Result<Vec<AwardedMedal>> {
        let results = self
            .result_repository
            .list_by_quiz_group(quiz_group_id)
            .await?;
        let podium = rank_best_results(results);

        let mut awarded = Vec::new();
        for (index, best) in podium.iter().take(3).enumerate() {
            let rank = index + 1;
            let Some(medal_type) = MedalType::for_rank(rank, best.score) else {
                continue;
            };
            let Some(user) = self.user_repository.find_by_id(&best.user_id).await? else {
                tracing::debug!(user_id = %best.user_id, "Skipping medal for deleted user");
                continue;
            };
            if user.has_medal_for(quiz_group_id) {
                continue;
            }

            let medal = Medal::new(medal_type, quiz_group_id);
            self.user_repository.add_medal(&user.id, &medal).await?;
            awarded.push(AwardedMedal {
                user_id: user.id,
                rank,
                medal,
            });
        }

        tracing::info!(quiz_group_id, awarded = awarded.len(), "Medals awarded");
        Ok(awarded)
    }
}

/// Best verified result per user, best first.
fn rank_best_results(results: Vec<QuizResult>) -> Vec<QuizResult> {
    let mut best: HashMap<String, QuizResult> = HashMap::new();
    for result in results
        .into_iter()
        .filter(|r| r.status == ResultStatus::Verified)
    {
        let replace = best
            .get(&result.user_id)
            .is_none_or(|current| beats(&result, current));
        if replace {
            best.insert(result.user_id.clone(), result);
        }
    }

    let mut ranked: Vec<QuizResult> = best.into_values().collect();
    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.completed_at.cmp(&b.completed_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked
}

fn beats(candidate: &QuizResult, current: &QuizResult) -> bool {
    candidate.score > current.score
        || (candidate.score == current.score && candidate.completed_at < current.completed_at)
}
