//! Screen state holders.
//!
//! Each screen owns one or more [`StateHolder`]s and publishes a
//! [`ViewState`] through a `watch` channel. Any failure from a use case ends
//! up as `ViewState::Error` carrying the error's display string.

mod create_quiz;
mod hall_of_fame;
mod login;
mod my_page;
mod quiz_group_detail;
mod quiz_group_list;
mod quiz_result;
mod quiz_solve;

pub use create_quiz::CreateQuizScreen;
pub use hall_of_fame::{HallOfFame, HallOfFameScreen};
pub use login::LoginScreen;
pub use my_page::{MyPage, MyPageScreen};
pub use quiz_group_detail::{QuizGroupDetail, QuizGroupDetailScreen};
pub use quiz_group_list::{QuizGroupFilter, QuizGroupList, QuizGroupListScreen};
pub use quiz_result::{QuizResultScreen, QuizResultView};
pub use quiz_solve::{QuizSolve, QuizSolveScreen};

use std::future::Future;

use chosung_core::error::Result;
use chosung_core::preference::watch_stream;
use futures::stream::BoxStream;
use tokio::sync::watch;

/// Tri-state UI model.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Publishes the state of one screen section.
#[derive(Debug)]
pub struct StateHolder<T> {
    name: &'static str,
    tx: watch::Sender<ViewState<T>>,
}

impl<T> StateHolder<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Starts in `Loading`.
    pub fn new(name: &'static str) -> Self {
        Self::with_state(name, ViewState::Loading)
    }

    pub fn with_state(name: &'static str, initial: ViewState<T>) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { name, tx }
    }

    pub fn current(&self) -> ViewState<T> {
        self.tx.borrow().clone()
    }

    /// Current state followed by every change.
    pub fn stream(&self) -> BoxStream<'static, ViewState<T>> {
        watch_stream(self.tx.subscribe())
    }

    pub fn set(&self, state: ViewState<T>) {
        self.tx.send_replace(state);
    }

    /// Publishes `Loading`, awaits `task` and publishes its outcome.
    ///
    /// Returns the value on success. Errors are logged and published, not
    /// returned.
    pub async fn run<F>(&self, task: F) -> Option<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.set(ViewState::Loading);
        self.publish(task.await)
    }

    /// Publishes an already computed outcome.
    pub fn publish(&self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.set(ViewState::Success(value.clone()));
                Some(value)
            }
            Err(e) => {
                tracing::warn!("[{}] {}", self.name, e);
                self.set(ViewState::Error(e.to_string()));
                None
            }
        }
    }

    /// Edits the value in place when the state is `Success`.
    ///
    /// Returns `false` (and notifies nobody) for any other state.
    pub fn modify(&self, f: impl FnOnce(&mut T)) -> bool {
        self.tx.send_if_modified(|state| match state {
            ViewState::Success(value) => {
                f(value);
                true
            }
            _ => false,
        })
    }
}
