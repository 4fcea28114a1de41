// Wire types for the `/requests` resource.
//
// Kept deliberately loose (plain strings for enums and dates) so that a
// server sending an unexpected value fails in `civictranslate-core`'s
// conversion layer with a useful message, not deep inside serde.

use serde::{Deserialize, Serialize};

/// A translation request exactly as the server returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    pub id: String,
    pub title: String,
    pub source_language: String,
    pub target_language: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_by: String,
    /// `YYYY-MM-DD`
    pub created_at: String,
    /// `YYYY-MM-DD`
    pub updated_at: String,
}

/// `POST /requests` body: the user-supplied fields plus the server-side
/// defaults the client stamps itself (`status`, timestamps).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    pub title: String,
    pub source_language: String,
    pub target_language: String,
    pub priority: String,
    pub description: String,
    pub created_by: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// `PATCH /requests/:id` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPatch {
    pub status: String,
    pub updated_at: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_uses_camel_case_keys() {
        let raw = json!({
            "id": "TRQ-003",
            "title": "Municipal Zoning Ordinance Update",
            "sourceLanguage": "English",
            "targetLanguage": "Vietnamese",
            "status": "pending",
            "priority": "medium",
            "createdAt": "2025-01-15",
            "updatedAt": "2025-01-15"
        });

        let record: RequestRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.target_language, "Vietnamese");
        assert!(record.description.is_empty());
        assert!(record.created_by.is_empty());
    }

    #[test]
    fn patch_serializes_updated_at() {
        let patch = StatusPatch {
            status: "completed".into(),
            updated_at: "2025-02-01".into(),
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({ "status": "completed", "updatedAt": "2025-02-01" }));
    }
}
