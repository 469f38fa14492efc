//! Test doubles shared by the unit tests of this crate.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chosung_core::auth::{SocialAccount, SocialLoginProvider};
use chosung_core::error::{ChosungError, Result};
use chosung_core::preference::PreferenceStore;
use chosung_core::quiz::{QuizDraft, QuizRepository};
use chosung_core::quiz_group::{QuizGroup, QuizGroupDraft, QuizGroupRepository};
use chosung_core::quiz_result::QuizResultRepository;
use chosung_core::session::Session;
use chosung_core::user::{User, UserRepository};
use chosung_infrastructure::{
    DocumentQuizGroupRepository, DocumentQuizRepository, DocumentQuizResultRepository,
    DocumentStore, DocumentUserRepository, MemoryDocumentStore, MemoryPreferenceStore,
};
use futures::stream::BoxStream;

use crate::quiz_group_usecase::QuizGroupUseCase;
use crate::quiz_result_usecase::QuizResultUseCase;

/// Social login that always returns the same account.
pub struct StubSocialLogin {
    account: SocialAccount,
    fail_next: AtomicBool,
    unlinks: AtomicUsize,
}

impl StubSocialLogin {
    pub fn new(provider_user_id: &str, display_name: &str) -> Self {
        Self {
            account: SocialAccount {
                provider_user_id: provider_user_id.to_string(),
                display_name: display_name.to_string(),
            },
            fail_next: AtomicBool::new(false),
            unlinks: AtomicUsize::new(0),
        }
    }

    pub fn fail_next_login(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn unlink_count(&self) -> usize {
        self.unlinks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SocialLoginProvider for StubSocialLogin {
    async fn login(&self) -> Result<SocialAccount> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ChosungError::internal("login cancelled"));
        }
        Ok(self.account.clone())
    }

    async fn logout(&self) -> Result<()> {
        Ok(())
    }

    async fn unlink(&self) -> Result<()> {
        self.unlinks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Preference store whose reads work and whose writes always fail.
pub struct ReadOnlyPreferences {
    inner: MemoryPreferenceStore,
}

impl ReadOnlyPreferences {
    pub fn new() -> Self {
        Self {
            inner: MemoryPreferenceStore::new(),
        }
    }
}

#[async_trait]
impl PreferenceStore for ReadOnlyPreferences {
    async fn remembered_login_id(&self) -> Option<String> {
        self.inner.remembered_login_id().await
    }

    async fn set_remembered_login_id(&self, _login_id: Option<String>) -> Result<()> {
        Err(ChosungError::io("preferences are read-only"))
    }

    async fn auto_login(&self) -> bool {
        self.inner.auto_login().await
    }

    async fn set_auto_login(&self, _enabled: bool) -> Result<()> {
        Err(ChosungError::io("preferences are read-only"))
    }

    fn remembered_login_id_stream(&self) -> BoxStream<'static, Option<String>> {
        self.inner.remembered_login_id_stream()
    }

    fn auto_login_stream(&self) -> BoxStream<'static, bool> {
        self.inner.auto_login_stream()
    }
}

pub fn memory_user_repository() -> Arc<dyn UserRepository> {
    Arc::new(DocumentUserRepository::new(Arc::new(MemoryDocumentStore::new())))
}

/// Every repository over one shared in-memory store.
pub struct MemoryRepositories {
    pub store: Arc<MemoryDocumentStore>,
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn QuizGroupRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub results: Arc<dyn QuizResultRepository>,
    pub session: Arc<Session>,
}

impl MemoryRepositories {
    pub fn new() -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        let shared: Arc<dyn DocumentStore> = store.clone();
        Self {
            store,
            users: Arc::new(DocumentUserRepository::new(shared.clone())),
            groups: Arc::new(DocumentQuizGroupRepository::new(shared.clone())),
            quizzes: Arc::new(DocumentQuizRepository::new(shared.clone())),
            results: Arc::new(DocumentQuizResultRepository::new(shared)),
            session: Arc::new(Session::new()),
        }
    }

    pub fn group_usecase(&self) -> Arc<QuizGroupUseCase> {
        Arc::new(QuizGroupUseCase::new(
            self.groups.clone(),
            self.quizzes.clone(),
            self.session.clone(),
        ))
    }

    pub fn result_usecase(&self) -> Arc<QuizResultUseCase> {
        Arc::new(QuizResultUseCase::new(
            self.groups.clone(),
            self.quizzes.clone(),
            self.results.clone(),
            self.users.clone(),
            self.session.clone(),
        ))
    }

    /// Creates a user and signs them in.
    pub async fn signed_in_user(&self, nickname: &str) -> User {
        let user = User::new(format!("social-{}", nickname), nickname);
        self.users.create(&user).await.unwrap();
        self.session.sign_in(&user.id).await;
        user
    }

    /// Stores a group owned by `owner_id` with the given answers.
    pub async fn group_with_answers(&self, owner_id: &str, answers: &[&str]) -> QuizGroup {
        let draft = QuizGroupDraft {
            title: "테스트 묶음".to_string(),
            description: String::new(),
            tags: vec![],
            questions: answers.iter().map(|a| QuizDraft::new(*a, "힌트")).collect(),
        };
        let (group, quizzes) = draft.build(owner_id).unwrap();
        self.groups
            .create_with_quizzes(&group, &quizzes)
            .await
            .unwrap();
        group
    }
}
