// ── API-to-domain type conversions ──
//
// Bridges raw `civictranslate-api` wire types into canonical domain types
// and back. Wire enums and dates are plain strings; anything unparseable
// becomes `CoreError::Internal` naming the offending field.

use chrono::{DateTime, NaiveDate};

use civictranslate_api::{CreateRequestBody, RequestRecord, StatusPatch};

use crate::error::CoreError;
use crate::model::{NewRequest, Priority, RequestId, RequestStatus, TranslationRequest};

/// Parse a `YYYY-MM-DD` date, tolerating full RFC 3339 timestamps.
pub(crate) fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CoreError> {
    raw.parse::<NaiveDate>()
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|e| CoreError::Internal(format!("invalid {field} '{raw}': {e}")))
}

/// Format a date the way the REST surface expects it.
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl TryFrom<RequestRecord> for TranslationRequest {
    type Error = CoreError;

    fn try_from(r: RequestRecord) -> Result<Self, Self::Error> {
        let status = r
            .status
            .parse::<RequestStatus>()
            .map_err(|_| CoreError::Internal(format!("invalid status '{}' on {}", r.status, r.id)))?;
        let priority = r.priority.parse::<Priority>().map_err(|_| {
            CoreError::Internal(format!("invalid priority '{}' on {}", r.priority, r.id))
        })?;

        Ok(Self {
            created_at: parse_date("createdAt", &r.created_at)?,
            updated_at: parse_date("updatedAt", &r.updated_at)?,
            id: RequestId::from(r.id),
            title: r.title,
            source_language: r.source_language,
            target_language: r.target_language,
            status,
            priority,
            description: r.description,
            created_by: r.created_by,
        })
    }
}

/// Build the `POST /requests` body: fields plus `pending` and today's date.
pub(crate) fn create_body(fields: &NewRequest, today: NaiveDate) -> CreateRequestBody {
    CreateRequestBody {
        title: fields.title.clone(),
        source_language: fields.source_language.clone(),
        target_language: fields.target_language.clone(),
        priority: fields.priority.to_string(),
        description: fields.description.clone(),
        created_by: fields.created_by.clone(),
        status: RequestStatus::Pending.to_string(),
        created_at: format_date(today),
        updated_at: format_date(today),
    }
}

/// Build the `PATCH /requests/:id` body.
pub(crate) fn status_patch(status: RequestStatus, today: NaiveDate) -> StatusPatch {
    StatusPatch {
        status: status.to_string(),
        updated_at: format_date(today),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn wire(status: &str, priority: &str, created_at: &str) -> RequestRecord {
        RequestRecord {
            id: "TRQ-002".into(),
            title: "Public Health Advisory".into(),
            source_language: "English".into(),
            target_language: "Mandarin".into(),
            status: status.into(),
            priority: priority.into(),
            description: String::new(),
            created_by: "John Webber".into(),
            created_at: created_at.into(),
            updated_at: "2025-01-13".into(),
        }
    }

    #[test]
    fn converts_wire_record() {
        let req = TranslationRequest::try_from(wire("in-progress", "high", "2025-01-13")).unwrap();
        assert_eq!(req.id, "TRQ-002");
        assert_eq!(req.status, RequestStatus::InProgress);
        assert_eq!(req.priority, Priority::High);
        assert_eq!(req.created_at, NaiveDate::from_ymd_opt(2025, 1, 13).unwrap());
    }

    #[test]
    fn accepts_rfc3339_timestamps() {
        let req =
            TranslationRequest::try_from(wire("pending", "low", "2025-01-13T09:30:00Z")).unwrap();
        assert_eq!(req.created_at, NaiveDate::from_ymd_opt(2025, 1, 13).unwrap());
    }

    #[test]
    fn rejects_unknown_status() {
        let err = TranslationRequest::try_from(wire("archived", "low", "2025-01-13")).unwrap_err();
        assert!(matches!(err, CoreError::Internal(msg) if msg.contains("archived")));
    }

    #[test]
    fn create_body_stamps_pending_and_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let fields = NewRequest {
            title: "Court Notice".into(),
            source_language: "Spanish".into(),
            target_language: "English".into(),
            priority: Priority::High,
            description: String::new(),
            created_by: "Linda Torres".into(),
        };

        let body = create_body(&fields, today);
        assert_eq!(body.status, "pending");
        assert_eq!(body.priority, "high");
        assert_eq!(body.created_at, "2025-03-02");
        assert_eq!(body.updated_at, "2025-03-02");
    }
}
