use std::{fmt, sync::Arc};

use axum::extract::FromRef;

use crate::evaluator::CourseCompletionEvaluator;
use crate::store::SqliteStore;

#[derive(Clone)]
pub struct GradebookState {
    pub store: SqliteStore,
    pub evaluator: Arc<CourseCompletionEvaluator>,
}

impl GradebookState {
    #[must_use]
    pub fn new(store: SqliteStore) -> Self {
        let evaluator = CourseCompletionEvaluator::from_store(Arc::new(store.clone()));

        Self {
            store,
            evaluator: Arc::new(evaluator),
        }
    }
}

impl fmt::Debug for GradebookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradebookState")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl FromRef<GradebookState> for SqliteStore {
    fn from_ref(state: &GradebookState) -> Self {
        state.store.clone()
    }
}
