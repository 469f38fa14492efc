//! Scoring, result lookup and per-question breakdown.

use std::sync::Arc;

use chosung_core::error::{ChosungError, Result};
use chosung_core::paging::{Page, PageRequest};
use chosung_core::quiz::QuizRepository;
use chosung_core::quiz_group::QuizGroupRepository;
use chosung_core::quiz_result::{QuestionOutcome, QuizResult, QuizResultRepository, scoring};
use chosung_core::session::Session;
use chosung_core::user::UserRepository;

/// Use case for finished attempts.
///
/// Scores are always computed here from the canonical questions; a client
/// never supplies its own score.
pub struct QuizResultUseCase {
    group_repository: Arc<dyn QuizGroupRepository>,
    quiz_repository: Arc<dyn QuizRepository>,
    result_repository: Arc<dyn QuizResultRepository>,
    user_repository: Arc<dyn UserRepository>,
    session: Arc<Session>,
}

impl QuizResultUseCase {
    pub fn new(
        group_repository: Arc<dyn QuizGroupRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
        result_repository: Arc<dyn QuizResultRepository>,
        user_repository: Arc<dyn UserRepository>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            group_repository,
            quiz_repository,
            result_repository,
            user_repository,
            session,
        }
    }

    /// Scores `answers` for the group and stores a verified result.
    ///
    /// Returns the new result id. Bookkeeping after the result is stored
    /// (group result count, user points) is best effort.
    pub async fn submit(&self, quiz_group_id: &str, answers: Vec<String>) -> Result<String> {
        let user_id = self.session.require_user_id().await?;

        let group = self
            .group_repository
            .find_by_id(quiz_group_id)
            .await?
            .ok_or_else(|| ChosungError::not_found("QuizGroup", quiz_group_id))?;
        let quizzes = self.quiz_repository.find_by_ids(&group.quiz_ids).await?;
        let score = scoring::score(&quizzes, &answers)?;

        let result = QuizResult::verified(&user_id, quiz_group_id, score, answers);
        self.result_repository.create(&result).await?;

        if let Err(e) = self
            .group_repository
            .increment_result_count(quiz_group_id)
            .await
        {
            tracing::warn!(quiz_group_id, "Failed to bump result count: {}", e);
        }
        if let Err(e) = self
            .user_repository
            .add_points(&user_id, u64::from(score))
            .await
        {
            tracing::warn!(user_id = %user_id, "Failed to add points: {}", e);
        }

        Ok(result.id)
    }

    pub async fn get(&self, result_id: &str) -> Result<QuizResult> {
        self.result_repository
            .find_by_id(result_id)
            .await?
            .ok_or_else(|| ChosungError::not_found("QuizResult", result_id))
    }

    /// Pairs the result's answers with the group's current questions.
    ///
    /// Returns an empty list when the questions cannot be loaded.
    pub async fn details(&self, result: &QuizResult) -> Vec<QuestionOutcome> {
        match self.load_questions(&result.quiz_group_id).await {
            Ok(quizzes) => scoring::assemble_outcomes(&quizzes, &result.answers),
            Err(e) => {
                tracing::warn!(
                    result_id = %result.id,
                    quiz_group_id = %result.quiz_group_id,
                    "Could not load questions for result details: {}",
                    e
                );
                Vec::new()
            }
        }
    }

    /// The signed-in user's results, most recent first.
    pub async fn list_mine(&self, page: &PageRequest) -> Result<Page<QuizResult>> {
        let user_id = self.session.require_user_id().await?;
        self.result_repository.list_by_user(&user_id, page).await
    }

    /// Deletes one of the signed-in user's results.
    pub async fn delete(&self, result_id: &str) -> Result<()> {
        let user_id = self.session.require_user_id().await?;
        let result = self.get(result_id).await?;
        if result.user_id != user_id {
            return Err(ChosungError::security(
                "only the player can delete their result",
            ));
        }
        self.result_repository.delete(result_id).await
    }

    async fn load_questions(&self, quiz_group_id: &str) -> Result<Vec<chosung_core::quiz::Quiz>> {
        let group = self
            .group_repository
            .find_by_id(quiz_group_id)
            .await?
            .ok_or_else(|| ChosungError::not_found("QuizGroup", quiz_group_id))?;
        self.quiz_repository.find_by_ids(&group.quiz_ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryRepositories;
    use chosung_infrastructure::DocumentStore;

    fn usecase(repos: &MemoryRepositories) -> QuizResultUseCase {
        QuizResultUseCase::new(
            repos.groups.clone(),
            repos.quizzes.clone(),
            repos.results.clone(),
            repos.users.clone(),
            repos.session.clone(),
        )
    }

    fn answers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_four_of_five_scores_eighty() {
        let repos = MemoryRepositories::new();
        let player = repos.signed_in_user("플레이어").await;
        let group = repos
            .group_with_answers(&player.id, &["Apple", "배", "감", "귤", "Lime"])
            .await;
        let uc = usecase(&repos);

        let result_id = uc
            .submit(&group.id, answers(&["apple", "배", "감", "귤", "lemon"]))
            .await
            .unwrap();
        let result = uc.get(&result_id).await.unwrap();
        assert_eq!(result.score, 80);
        assert_eq!(result.user_id, player.id);

        let user = repos.users.find_by_id(&player.id).await.unwrap().unwrap();
        assert_eq!(user.points, 80);
        let group = repos.groups.find_by_id(&group.id).await.unwrap().unwrap();
        assert_eq!(group.result_count, 1);
    }

    #[tokio::test]
    async fn test_short_and_long_answer_lists() {
        let repos = MemoryRepositories::new();
        let player = repos.signed_in_user("플레이어").await;
        let group = repos
            .group_with_answers(&player.id, &["사과", "배", "감"])
            .await;
        let uc = usecase(&repos);

        let short = uc.submit(&group.id, answers(&["사과"])).await.unwrap();
        assert_eq!(uc.get(&short).await.unwrap().score, 33);

        let long = uc
            .submit(&group.id, answers(&["사과", "배", "감", "덤"]))
            .await
            .unwrap();
        assert_eq!(uc.get(&long).await.unwrap().score, 100);
    }

    #[tokio::test]
    async fn test_submit_requires_login() {
        let repos = MemoryRepositories::new();
        let err = usecase(&repos)
            .submit("g-1", answers(&["사과"]))
            .await
            .unwrap_err();
        assert!(err.is_not_logged_in());
    }

    #[tokio::test]
    async fn test_empty_group_is_rejected() {
        let repos = MemoryRepositories::new();
        let player = repos.signed_in_user("플레이어").await;
        let mut group = repos.group_with_answers(&player.id, &["사과"]).await;
        group.quiz_ids.clear();
        repos.groups.delete_with_quizzes(&group).await.unwrap();
        repos.groups.create_with_quizzes(&group, &[]).await.unwrap();

        let err = usecase(&repos)
            .submit(&group.id, answers(&["사과"]))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repos.store.count("quizResults").await, 0);
    }

    #[tokio::test]
    async fn test_missing_question_fails_without_result() {
        let repos = MemoryRepositories::new();
        let player = repos.signed_in_user("플레이어").await;
        let group = repos.group_with_answers(&player.id, &["사과", "배"]).await;
        repos.store.delete("quizzes", &group.quiz_ids[1]).await.unwrap();

        let err = usecase(&repos)
            .submit(&group.id, answers(&["사과", "배"]))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repos.store.count("quizResults").await, 0);
    }

    #[tokio::test]
    async fn test_details_keep_question_order() {
        let repos = MemoryRepositories::new();
        let player = repos.signed_in_user("플레이어").await;
        let group = repos
            .group_with_answers(&player.id, &["사과", "배", "감"])
            .await;
        let uc = usecase(&repos);
        let result_id = uc
            .submit(&group.id, answers(&["사과", "틀림"]))
            .await
            .unwrap();
        let result = uc.get(&result_id).await.unwrap();

        let details = uc.details(&result).await;
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].quiz_id, group.quiz_ids[0]);
        assert!(details[0].is_correct);
        assert_eq!(details[1].correct_answer, "배");
        assert!(!details[1].is_correct);
    }

    #[tokio::test]
    async fn test_details_empty_when_group_is_gone() {
        let repos = MemoryRepositories::new();
        let player = repos.signed_in_user("플레이어").await;
        let group = repos.group_with_answers(&player.id, &["사과"]).await;
        let uc = usecase(&repos);
        let result = uc
            .get(&uc.submit(&group.id, answers(&["사과"])).await.unwrap())
            .await
            .unwrap();

        repos.groups.delete_with_quizzes(&group).await.unwrap();
        assert!(uc.details(&result).await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let repos = MemoryRepositories::new();
        let player = repos.signed_in_user("플레이어").await;
        let group = repos.group_with_answers(&player.id, &["사과"]).await;
        let uc = usecase(&repos);
        let result_id = uc.submit(&group.id, answers(&["사과"])).await.unwrap();

        repos.signed_in_user("남").await;
        assert!(matches!(
            uc.delete(&result_id).await.unwrap_err(),
            ChosungError::Security(_)
        ));

        repos.session.sign_in(&player.id).await;
        uc.delete(&result_id).await.unwrap();
        assert!(uc.get(&result_id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_bookkeeping_failure_does_not_fail_submit() {
        let repos = MemoryRepositories::new();
        let player = repos.signed_in_user("플레이어").await;
        let group = repos.group_with_answers(&player.id, &["사과"]).await;
        // points cannot be added to a user document that is gone
        repos.users.delete(&player.id).await.unwrap();

        let uc = usecase(&repos);
        let result_id = uc.submit(&group.id, answers(&["사과"])).await.unwrap();
        assert_eq!(uc.get(&result_id).await.unwrap().score, 100);
    }

    #[tokio::test]
    async fn test_list_mine() {
        let repos = MemoryRepositories::new();
        let player = repos.signed_in_user("플레이어").await;
        let group = repos.group_with_answers(&player.id, &["사과"]).await;
        let uc = usecase(&repos);
        uc.submit(&group.id, answers(&["사과"])).await.unwrap();
        uc.submit(&group.id, answers(&["배"])).await.unwrap();

        let page = uc.list_mine(&PageRequest::first(10)).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.items.iter().all(|r| r.user_id == player.id));
    }
}
