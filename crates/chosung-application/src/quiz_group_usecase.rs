//! Quiz group authoring, browsing and likes.

use std::sync::Arc;

use chosung_core::error::{ChosungError, Result};
use chosung_core::paging::{Page, PageRequest};
use chosung_core::quiz::{QuizPrompt, QuizRepository};
use chosung_core::quiz_group::{QuizGroup, QuizGroupDraft, QuizGroupRepository, QuizGroupStatus};
use chosung_core::session::Session;

/// Use case for everything done to a quiz group before it is solved.
pub struct QuizGroupUseCase {
    group_repository: Arc<dyn QuizGroupRepository>,
    quiz_repository: Arc<dyn QuizRepository>,
    session: Arc<Session>,
}

impl QuizGroupUseCase {
    pub fn new(
        group_repository: Arc<dyn QuizGroupRepository>,
        quiz_repository: Arc<dyn QuizRepository>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            group_repository,
            quiz_repository,
            session,
        }
    }

    /// Validates the draft and stores the group with its questions.
    pub async fn create(&self, draft: QuizGroupDraft) -> Result<QuizGroup> {
        let user_id = self.session.require_user_id().await?;
        let (group, quizzes) = draft.build(&user_id)?;
        self.group_repository
            .create_with_quizzes(&group, &quizzes)
            .await?;
        Ok(group)
    }

    pub async fn get(&self, group_id: &str) -> Result<QuizGroup> {
        self.group_repository
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| ChosungError::not_found("QuizGroup", group_id))
    }

    pub async fn list_active(&self, page: &PageRequest) -> Result<Page<QuizGroup>> {
        self.group_repository.list_active(page).await
    }

    pub async fn list_by_user(&self, user_id: &str, page: &PageRequest) -> Result<Page<QuizGroup>> {
        self.group_repository.list_by_user(user_id, page).await
    }

    /// Groups authored by the signed-in user.
    pub async fn list_mine(&self, page: &PageRequest) -> Result<Page<QuizGroup>> {
        let user_id = self.session.require_user_id().await?;
        self.group_repository.list_by_user(&user_id, page).await
    }

    /// Groups the signed-in user has liked.
    pub async fn list_liked(&self, page: &PageRequest) -> Result<Page<QuizGroup>> {
        let user_id = self.session.require_user_id().await?;
        self.group_repository.list_liked_by(&user_id, page).await
    }

    /// Likes or unlikes the group for the signed-in user and returns the
    /// updated group.
    pub async fn toggle_like(&self, group_id: &str) -> Result<QuizGroup> {
        let user_id = self.session.require_user_id().await?;
        let (_, group) = self.group_repository.toggle_like(group_id, &user_id).await?;
        Ok(group)
    }

    /// The group's questions in play order, without answers.
    pub async fn prompts(&self, group_id: &str) -> Result<Vec<QuizPrompt>> {
        let group = self.get(group_id).await?;
        let quizzes = self.quiz_repository.find_by_ids(&group.quiz_ids).await?;
        tracing::debug!(group_id, questions = quizzes.len(), "Loaded prompts");
        Ok(quizzes.iter().map(|quiz| quiz.prompt()).collect())
    }

    /// Deletes the group and its questions. Only the author may do this.
    pub async fn delete(&self, group_id: &str) -> Result<()> {
        let user_id = self.session.require_user_id().await?;
        let group = self.get(group_id).await?;
        if !group.is_owned_by(&user_id) {
            tracing::warn!(group_id, user_id = %user_id, "Rejected delete by non-owner");
            return Err(ChosungError::security("only the author can delete a quiz group"));
        }
        self.group_repository.delete_with_quizzes(&group).await
    }

    /// Flags the group; it disappears from active listings.
    pub async fn report(&self, group_id: &str) -> Result<()> {
        let user_id = self.session.require_user_id().await?;
        self.group_repository
            .update_status(group_id, QuizGroupStatus::Reported)
            .await?;
        tracing::info!(group_id, reporter = %user_id, "Quiz group reported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryRepositories;
    use chosung_core::quiz::QuizDraft;

    fn usecase(repos: &MemoryRepositories) -> QuizGroupUseCase {
        QuizGroupUseCase::new(
            repos.groups.clone(),
            repos.quizzes.clone(),
            repos.session.clone(),
        )
    }

    fn fruit_draft() -> QuizGroupDraft {
        QuizGroupDraft {
            title: "과일".to_string(),
            description: "과일 이름 맞히기".to_string(),
            tags: vec!["과일".to_string()],
            questions: vec![QuizDraft::new("사과", "빨강"), QuizDraft::new("포도", "보라")],
        }
    }

    #[tokio::test]
    async fn test_create_requires_login() {
        let repos = MemoryRepositories::new();
        let err = usecase(&repos).create(fruit_draft()).await.unwrap_err();
        assert!(err.is_not_logged_in());
        assert_eq!(repos.store.count("quizGroups").await, 0);
    }

    #[tokio::test]
    async fn test_create_and_prompts() {
        let repos = MemoryRepositories::new();
        let user = repos.signed_in_user("작가").await;
        let uc = usecase(&repos);

        let group = uc.create(fruit_draft()).await.unwrap();
        assert_eq!(group.user_id, user.id);

        let prompts = uc.prompts(&group.id).await.unwrap();
        let chosung: Vec<&str> = prompts.iter().map(|p| p.chosung.as_str()).collect();
        assert_eq!(chosung, vec!["ㅅㄱ", "ㅍㄷ"]);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_draft() {
        let repos = MemoryRepositories::new();
        repos.signed_in_user("작가").await;
        let draft = QuizGroupDraft {
            questions: vec![],
            ..fruit_draft()
        };
        assert!(usecase(&repos).create(draft).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_get_missing_group() {
        let repos = MemoryRepositories::new();
        assert!(usecase(&repos).get("nope").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_toggle_like_twice() {
        let repos = MemoryRepositories::new();
        let author = repos.signed_in_user("작가").await;
        let group = repos.group_with_answers(&author.id, &["사과"]).await;
        let fan = repos.signed_in_user("팬").await;
        let uc = usecase(&repos);

        let liked = uc.toggle_like(&group.id).await.unwrap();
        assert_eq!(liked.like_count, 1);
        assert!(liked.is_liked_by(&fan.id));

        let unliked = uc.toggle_like(&group.id).await.unwrap();
        assert_eq!(unliked.like_count, 0);
        assert!(!unliked.is_liked_by(&fan.id));
    }

    #[tokio::test]
    async fn test_only_author_can_delete() {
        let repos = MemoryRepositories::new();
        let author = repos.signed_in_user("작가").await;
        let group = repos.group_with_answers(&author.id, &["사과", "배"]).await;
        let uc = usecase(&repos);

        repos.signed_in_user("남").await;
        let err = uc.delete(&group.id).await.unwrap_err();
        assert!(matches!(err, ChosungError::Security(_)));

        repos.session.sign_in(&author.id).await;
        uc.delete(&group.id).await.unwrap();
        assert_eq!(repos.store.count("quizzes").await, 0);
        assert!(uc.get(&group.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_report_hides_from_active_list() {
        let repos = MemoryRepositories::new();
        let author = repos.signed_in_user("작가").await;
        let group = repos.group_with_answers(&author.id, &["사과"]).await;
        let uc = usecase(&repos);

        uc.report(&group.id).await.unwrap();
        let page = uc.list_active(&PageRequest::first(10)).await.unwrap();
        assert!(page.items.is_empty());

        // the author still sees it in their own list
        let mine = uc.list_mine(&PageRequest::first(10)).await.unwrap();
        assert_eq!(mine.items[0].status, QuizGroupStatus::Reported);
    }
}
