//! Details dialog state for a source or model
//!
//! The dialog refers to its record by identity rather than holding a copy,
//! so a refetch after adding or removing a test is reflected immediately.

use dbtc_core::{SourceKey, TestTarget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsTarget {
    Source(SourceKey),
    /// Model id
    Model(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsState {
    pub target: DetailsTarget,
    pub selected_test: usize,
}

impl DetailsState {
    pub fn source(key: SourceKey) -> Self {
        Self {
            target: DetailsTarget::Source(key),
            selected_test: 0,
        }
    }

    pub fn model(id: impl Into<String>) -> Self {
        Self {
            target: DetailsTarget::Model(id.into()),
            selected_test: 0,
        }
    }

    pub fn test_target(&self) -> TestTarget {
        match self.target {
            DetailsTarget::Source(_) => TestTarget::Source,
            DetailsTarget::Model(_) => TestTarget::Model,
        }
    }

    pub fn select_next(&mut self, test_count: usize) {
        if self.selected_test + 1 < test_count {
            self.selected_test += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected_test = self.selected_test.saturating_sub(1);
    }

    /// Keep the selection inside the (possibly shorter) refreshed list
    pub fn clamp(&mut self, test_count: usize) {
        self.selected_test = self.selected_test.min(test_count.saturating_sub(1));
    }
}
