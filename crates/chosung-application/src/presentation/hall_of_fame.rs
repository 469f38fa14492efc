//! Hall of fame: most liked groups and top scorers.

use std::sync::Arc;

use chosung_core::quiz_group::QuizGroup;
use chosung_core::user::User;

use super::StateHolder;
use crate::hall_of_fame_service::HallOfFameService;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HallOfFame {
    pub top_groups: Vec<QuizGroup>,
    pub top_users: Vec<User>,
}

pub struct HallOfFameScreen {
    service: Arc<HallOfFameService>,
    state: StateHolder<HallOfFame>,
}

impl HallOfFameScreen {
    pub fn new(service: Arc<HallOfFameService>) -> Self {
        Self {
            service,
            state: StateHolder::new("HallOfFame"),
        }
    }

    pub fn state(&self) -> &StateHolder<HallOfFame> {
        &self.state
    }

    pub async fn load(&self) {
        self.state
            .run(async {
                let (top_groups, top_users) =
                    futures::try_join!(self.service.top_quiz_groups(), self.service.top_users())?;
                Ok(HallOfFame {
                    top_groups,
                    top_users,
                })
            })
            .await;
    }
}
