use serde::{Deserialize, Serialize};

use crate::model::{Priority, RequestStatus, TranslationRequest};

/// Narrowing criteria for [`RequestStore::filter`](super::RequestStore::filter).
///
/// Every set field must match; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub priority: Option<Priority>,
    /// Case-insensitive substring over id, title, description, languages,
    /// and creator.
    pub search: Option<String>,
}

impl RequestFilter {
    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn matches(&self, request: &TranslationRequest) -> bool {
        self.status.is_none_or(|s| request.status == s)
            && self.priority.is_none_or(|p| request.priority == p)
            && self
                .search
                .as_deref()
                .map(str::trim)
                .is_none_or(|needle| needle.is_empty() || request.matches_text(needle))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{NewRequest, RequestId};

    fn sample() -> TranslationRequest {
        NewRequest {
            title: "Immigration Legal Aid Guide".into(),
            source_language: "English".into(),
            target_language: "Arabic".into(),
            priority: Priority::High,
            description: "asylum application processes".into(),
            created_by: "David Kim".into(),
        }
        .into_record(RequestId::from_sequence(4), NaiveDate::default())
    }

    #[test]
    fn empty_filter_matches_all() {
        assert!(RequestFilter::default().matches(&sample()));
        assert!(RequestFilter::default().with_search("  ").matches(&sample()));
    }

    #[test]
    fn all_criteria_must_match() {
        let req = sample();
        assert!(
            RequestFilter::default()
                .with_status(RequestStatus::Pending)
                .with_priority(Priority::High)
                .with_search("ASYLUM")
                .matches(&req)
        );
        assert!(
            !RequestFilter::default()
                .with_status(RequestStatus::Completed)
                .matches(&req)
        );
        assert!(!RequestFilter::default().with_search("mandarin").matches(&req));
    }
}
