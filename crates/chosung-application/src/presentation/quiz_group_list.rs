//! Paged quiz group lists: active, by author, mine and liked.

use std::sync::Arc;

use chosung_core::error::Result;
use chosung_core::paging::{Page, PageRequest};
use chosung_core::quiz_group::QuizGroup;

use super::{StateHolder, ViewState};
use crate::quiz_group_usecase::QuizGroupUseCase;

/// Which groups the list shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizGroupFilter {
    Active,
    Mine,
    Liked,
    ByUser(String),
}

/// Loaded rows plus the cursor for "load more".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuizGroupList {
    pub groups: Vec<QuizGroup>,
    pub next_cursor: Option<String>,
}

impl QuizGroupList {
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

pub struct QuizGroupListScreen {
    usecase: Arc<QuizGroupUseCase>,
    filter: QuizGroupFilter,
    page_size: usize,
    state: StateHolder<QuizGroupList>,
}

impl QuizGroupListScreen {
    pub fn new(usecase: Arc<QuizGroupUseCase>, filter: QuizGroupFilter, page_size: usize) -> Self {
        Self {
            usecase,
            filter,
            page_size,
            state: StateHolder::new("QuizGroupList"),
        }
    }

    pub fn state(&self) -> &StateHolder<QuizGroupList> {
        &self.state
    }

    /// (Re)loads the first page.
    pub async fn refresh(&self) {
        let request = PageRequest::first(self.page_size);
        self.state
            .run(async {
                let page = self.fetch(&request).await?;
                Ok(QuizGroupList {
                    groups: page.items,
                    next_cursor: page.next_cursor,
                })
            })
            .await;
    }

    /// Appends the next page. Does nothing without a cursor.
    pub async fn load_more(&self) {
        let current = match self.state.current() {
            ViewState::Success(list) => list,
            _ => return,
        };
        let Some(cursor) = current.next_cursor.clone() else {
            return;
        };

        let result = self
            .fetch(&PageRequest::after(self.page_size, cursor))
            .await
            .map(|page| {
                let mut groups = current.groups;
                groups.extend(page.items);
                QuizGroupList {
                    groups,
                    next_cursor: page.next_cursor,
                }
            });
        self.state.publish(result);
    }

    async fn fetch(&self, page: &PageRequest) -> Result<Page<QuizGroup>> {
        match &self.filter {
            QuizGroupFilter::Active => self.usecase.list_active(page).await,
            QuizGroupFilter::Mine => self.usecase.list_mine(page).await,
            QuizGroupFilter::Liked => self.usecase.list_liked(page).await,
            QuizGroupFilter::ByUser(user_id) => self.usecase.list_by_user(user_id, page).await,
        }
    }
}
