//! Application wiring.
//!
//! [`AppContext`] loads configuration, opens the preference file and
//! builds every repository and use case over one `DocumentStore`. Screens
//! are created from it on demand.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chosung_core::auth::SocialLoginProvider;
use chosung_core::config::AppConfig;
use chosung_core::preference::PreferenceStore;
use chosung_core::session::Session;
use chosung_infrastructure::{
    ConfigService, DocumentQuizGroupRepository, DocumentQuizRepository,
    DocumentQuizResultRepository, DocumentStore, DocumentUserRepository, MemoryDocumentStore,
    MemoryPreferenceStore, TomlPreferenceStore, paths::ChosungPaths,
};

use crate::auth_usecase::AuthUseCase;
use crate::hall_of_fame_service::HallOfFameService;
use crate::logging;
use crate::presentation::{
    CreateQuizScreen, HallOfFameScreen, LoginScreen, MyPageScreen, QuizGroupDetailScreen,
    QuizGroupFilter, QuizGroupListScreen, QuizResultScreen, QuizSolveScreen,
};
use crate::quiz_group_usecase::QuizGroupUseCase;
use crate::quiz_result_usecase::QuizResultUseCase;

/// Everything the screens need, wired once at startup.
pub struct AppContext {
    pub config: AppConfig,
    pub session: Arc<Session>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub auth: Arc<AuthUseCase>,
    pub quiz_groups: Arc<QuizGroupUseCase>,
    pub quiz_results: Arc<QuizResultUseCase>,
    pub hall_of_fame: Arc<HallOfFameService>,
}

impl AppContext {
    /// Wires the application over `store`, reading configuration and
    /// preferences from `base_dir` (or the user config directory).
    pub fn new(
        social_login: Arc<dyn SocialLoginProvider>,
        store: Arc<dyn DocumentStore>,
        base_dir: Option<&Path>,
    ) -> Result<Self> {
        let paths = ChosungPaths::new(base_dir);
        let config = ConfigService::new(paths.clone()).get_config();

        let preferences_path = match &config.storage.preferences_path {
            Some(path) => PathBuf::from(path),
            None => paths
                .preferences_file()
                .context("Failed to resolve preferences path")?,
        };
        tracing::info!(
            "[Bootstrap] Preferences at {}",
            preferences_path.display()
        );
        let preferences: Arc<dyn PreferenceStore> =
            Arc::new(TomlPreferenceStore::open(preferences_path));

        Ok(Self::wire(config, social_login, store, preferences))
    }

    /// Fully in-memory context with default configuration.
    pub fn in_memory(social_login: Arc<dyn SocialLoginProvider>) -> Self {
        Self::wire(
            AppConfig::default(),
            social_login,
            Arc::new(MemoryDocumentStore::new()),
            Arc::new(MemoryPreferenceStore::new()),
        )
    }

    fn wire(
        config: AppConfig,
        social_login: Arc<dyn SocialLoginProvider>,
        store: Arc<dyn DocumentStore>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        let session = Arc::new(Session::new());
        let users = Arc::new(DocumentUserRepository::new(store.clone()));
        let groups = Arc::new(DocumentQuizGroupRepository::new(store.clone()));
        let quizzes = Arc::new(DocumentQuizRepository::new(store.clone()));
        let results = Arc::new(DocumentQuizResultRepository::new(store));

        let auth = Arc::new(AuthUseCase::new(
            social_login,
            users.clone(),
            preferences.clone(),
            session.clone(),
        ));
        let quiz_groups = Arc::new(QuizGroupUseCase::new(
            groups.clone(),
            quizzes.clone(),
            session.clone(),
        ));
        let quiz_results = Arc::new(QuizResultUseCase::new(
            groups.clone(),
            quizzes,
            results.clone(),
            users.clone(),
            session.clone(),
        ));
        let hall_of_fame = Arc::new(HallOfFameService::new(
            groups,
            users,
            results,
            config.hall_of_fame.limit,
        ));

        tracing::info!("[Bootstrap] Application context ready");
        Self {
            config,
            session,
            preferences,
            auth,
            quiz_groups,
            quiz_results,
            hall_of_fame,
        }
    }

    /// Installs the global subscriber from the loaded logging settings.
    pub fn init_logging(&self) -> Result<()> {
        logging::init(&self.config.logging)
    }

    pub fn login_screen(&self) -> LoginScreen {
        LoginScreen::new(self.auth.clone())
    }

    pub fn quiz_group_list_screen(&self, filter: QuizGroupFilter) -> QuizGroupListScreen {
        QuizGroupListScreen::new(
            self.quiz_groups.clone(),
            filter,
            self.config.paging.page_size,
        )
    }

    pub fn quiz_group_detail_screen(&self) -> QuizGroupDetailScreen {
        QuizGroupDetailScreen::new(self.quiz_groups.clone(), self.session.clone())
    }

    pub fn quiz_solve_screen(&self) -> QuizSolveScreen {
        QuizSolveScreen::new(self.quiz_groups.clone(), self.quiz_results.clone())
    }

    pub fn quiz_result_screen(&self) -> QuizResultScreen {
        QuizResultScreen::new(self.quiz_results.clone())
    }

    pub fn create_quiz_screen(&self) -> CreateQuizScreen {
        CreateQuizScreen::new(self.quiz_groups.clone())
    }

    pub fn hall_of_fame_screen(&self) -> HallOfFameScreen {
        HallOfFameScreen::new(self.hall_of_fame.clone())
    }

    pub fn my_page_screen(&self) -> MyPageScreen {
        MyPageScreen::new(
            self.auth.clone(),
            self.quiz_results.clone(),
            self.config.paging.page_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubSocialLogin;

    #[tokio::test]
    async fn test_new_creates_config_and_persists_login() {
        let dir = tempfile::tempdir().unwrap();
        let social = Arc::new(StubSocialLogin::new("kakao-5", "지민"));
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());

        let context = AppContext::new(social.clone(), store.clone(), Some(dir.path())).unwrap();
        assert!(dir.path().join("config.toml").exists());
        assert_eq!(context.config, AppConfig::default());
        let user = context.auth.sign_in(true).await.unwrap();

        // a restart over the same store and directory restores the login
        let restarted = AppContext::new(social, store, Some(dir.path())).unwrap();
        let restored = restarted.auth.try_auto_sign_in().await.unwrap().unwrap();
        assert_eq!(restored.id, user.id);
    }

    #[tokio::test]
    async fn test_config_overrides_page_size() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[paging]\npage_size = 3\n").unwrap();
        let context = AppContext::new(
            Arc::new(StubSocialLogin::new("kakao-5", "지민")),
            Arc::new(MemoryDocumentStore::new()),
            Some(dir.path()),
        )
        .unwrap();
        assert_eq!(context.config.paging.page_size, 3);
    }
}
