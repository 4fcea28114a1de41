// ── Mock backend ──
//
// In-memory dataset served with artificial latency. The dataset is an owned
// value handed in at construction, so every test gets its own fixture.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::MockLatency;
use crate::error::CoreError;
use crate::model::{NewRequest, Priority, RequestId, RequestStatus, TranslationRequest};

// ── MockDataset ─────────────────────────────────────────────────────

/// Source of truth for mock mode: records newest-first plus the id counter.
#[derive(Debug, Clone)]
pub struct MockDataset {
    records: Vec<TranslationRequest>,
    next_id: u32,
}

impl MockDataset {
    /// Wrap an arbitrary record set. The id counter starts past both the
    /// record count and the highest `TRQ-NNN` suffix present.
    pub fn new(records: Vec<TranslationRequest>) -> Self {
        let by_len = u32::try_from(records.len()).unwrap_or(u32::MAX);
        let by_max = records
            .iter()
            .filter_map(|r| r.id.sequence())
            .max()
            .unwrap_or(0);
        Self {
            next_id: by_len.max(by_max).saturating_add(1),
            records,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The eight demo records `TRQ-001`..`TRQ-008`.
    pub fn seeded() -> Self {
        Self::new(seed_records())
    }

    pub fn records(&self) -> &[TranslationRequest] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The id the next `create` will assign.
    pub fn peek_next_id(&self) -> RequestId {
        RequestId::from_sequence(self.next_id)
    }

    pub(crate) fn list(&self) -> Vec<TranslationRequest> {
        self.records.clone()
    }

    pub(crate) fn create(&mut self, fields: NewRequest, today: NaiveDate) -> TranslationRequest {
        let id = RequestId::from_sequence(self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        let record = fields.into_record(id, today);
        self.records.insert(0, record.clone());
        record
    }

    pub(crate) fn update_status(
        &mut self,
        id: &RequestId,
        status: RequestStatus,
        today: NaiveDate,
    ) -> Result<TranslationRequest, CoreError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| CoreError::NotFound { id: id.to_string() })?;
        record.set_status(status, today);
        Ok(record.clone())
    }

    /// Returns `true` if a record was removed.
    pub(crate) fn delete(&mut self, id: &RequestId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| &r.id != id);
        self.records.len() != before
    }
}

impl Default for MockDataset {
    fn default() -> Self {
        Self::empty()
    }
}

// ── MockBackend ─────────────────────────────────────────────────────

/// Data access backed by a [`MockDataset`].
#[derive(Debug, Clone)]
pub struct MockBackend {
    dataset: Arc<Mutex<MockDataset>>,
    latency: MockLatency,
}

impl MockBackend {
    pub fn new(dataset: MockDataset, latency: MockLatency) -> Self {
        Self {
            dataset: Arc::new(Mutex::new(dataset)),
            latency,
        }
    }

    /// Shared handle to the backing dataset.
    pub fn dataset(&self) -> Arc<Mutex<MockDataset>> {
        Arc::clone(&self.dataset)
    }

    pub(crate) async fn list_requests(&self) -> Vec<TranslationRequest> {
        delay(self.latency.list).await;
        self.dataset.lock().await.list()
    }

    pub(crate) async fn create_request(
        &self,
        fields: NewRequest,
        today: NaiveDate,
    ) -> TranslationRequest {
        delay(self.latency.create).await;
        let record = self.dataset.lock().await.create(fields, today);
        debug!(id = %record.id, "mock: created request");
        record
    }

    pub(crate) async fn update_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
        today: NaiveDate,
    ) -> Result<TranslationRequest, CoreError> {
        delay(self.latency.update).await;
        self.dataset.lock().await.update_status(id, status, today)
    }

    pub(crate) async fn delete_request(&self, id: &RequestId) -> bool {
        delay(self.latency.delete).await;
        let removed = self.dataset.lock().await.delete(id);
        debug!(%id, removed, "mock: delete request");
        removed
    }
}

async fn delay(d: Duration) {
    if !d.is_zero() {
        tokio::time::sleep(d).await;
    }
}

// ── Seed data ───────────────────────────────────────────────────────

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn seed(
    n: u32,
    title: &str,
    (source_language, target_language): (&str, &str),
    status: RequestStatus,
    priority: Priority,
    description: &str,
    created_by: &str,
    (created_at, updated_at): (NaiveDate, NaiveDate),
) -> TranslationRequest {
    TranslationRequest {
        id: RequestId::from_sequence(n),
        title: title.into(),
        source_language: source_language.into(),
        target_language: target_language.into(),
        status,
        priority,
        description: description.into(),
        created_by: created_by.into(),
        created_at,
        updated_at,
    }
}

fn seed_records() -> Vec<TranslationRequest> {
    use Priority::{High, Low, Medium};
    use RequestStatus::{Completed, InProgress, Pending};

    vec![
        seed(
            1,
            "Patient Consent Form — Cardiology",
            ("English", "Spanish"),
            Completed,
            High,
            "Translate patient consent form for cardiac catheterization procedure into Spanish for Houston General Hospital.",
            "Maria Santos",
            (date(2025, 1, 12), date(2025, 1, 14)),
        ),
        seed(
            2,
            "Public Health Advisory — COVID-19 Booster",
            ("English", "Mandarin"),
            InProgress,
            High,
            "Urgent translation of public health advisory bulletin from the CDC regarding updated booster guidelines.",
            "John Webber",
            (date(2025, 1, 13), date(2025, 1, 13)),
        ),
        seed(
            3,
            "Municipal Zoning Ordinance Update",
            ("English", "Vietnamese"),
            Pending,
            Medium,
            "Translation of Section 12 amendments to the City of San Jose municipal zoning code for community distribution.",
            "Alice Park",
            (date(2025, 1, 15), date(2025, 1, 15)),
        ),
        seed(
            4,
            "Immigration Legal Aid Guide",
            ("English", "Arabic"),
            Pending,
            High,
            "Comprehensive guide for legal aid services covering asylum application processes, required documentation, and timeline expectations.",
            "David Kim",
            (date(2025, 1, 15), date(2025, 1, 15)),
        ),
        seed(
            5,
            "School Enrollment Package 2025",
            ("English", "Haitian Creole"),
            InProgress,
            Medium,
            "K-12 enrollment forms, parent handbook, and emergency contact documents for Miami-Dade County School District.",
            "Rosa Fernandez",
            (date(2025, 1, 16), date(2025, 1, 16)),
        ),
        seed(
            6,
            "Pharmacy Instructions — Insulin Protocol",
            ("English", "Portuguese"),
            Completed,
            High,
            "Medication instruction sheet for insulin management protocol to be distributed to diabetic patients at community clinics.",
            "Thomas Liu",
            (date(2025, 1, 10), date(2025, 1, 11)),
        ),
        seed(
            7,
            "Benefits Enrollment Notice — Medicare",
            ("English", "Korean"),
            Pending,
            Low,
            "Annual Medicare benefits enrollment notice including plan comparison tables and deadline information for 2025.",
            "James Bell",
            (date(2025, 1, 17), date(2025, 1, 17)),
        ),
        seed(
            8,
            "Court Notice — Child Custody Hearing",
            ("Spanish", "English"),
            Completed,
            High,
            "Official court notice requiring certified translation for child custody proceedings in Family Court, Case #FCT-2025-0047.",
            "Linda Torres",
            (date(2025, 1, 9), date(2025, 1, 10)),
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        date(2025, 2, 1)
    }

    fn fields(title: &str) -> NewRequest {
        NewRequest {
            title: title.into(),
            source_language: "English".into(),
            target_language: "Tagalog".into(),
            priority: Priority::Low,
            description: String::new(),
            created_by: "Sarah Mitchell".into(),
        }
    }

    #[test]
    fn seeded_dataset_has_eight_records() {
        let ds = MockDataset::seeded();
        assert_eq!(ds.len(), 8);
        assert_eq!(ds.records()[0].id, "TRQ-001");
        assert_eq!(ds.records()[7].id, "TRQ-008");
        assert_eq!(ds.peek_next_id(), RequestId::from_sequence(9));
    }

    #[test]
    fn create_assigns_increasing_ids_and_prepends() {
        let mut ds = MockDataset::seeded();
        let a = ds.create(fields("A"), today());
        let b = ds.create(fields("B"), today());

        assert_eq!(a.id, "TRQ-009");
        assert_eq!(b.id, "TRQ-010");
        assert!(b.id.sequence() > a.id.sequence());
        assert_eq!(ds.records()[0].id, b.id);
        assert_eq!(a.status, RequestStatus::Pending);
        assert_eq!(a.created_at, today());
    }

    #[test]
    fn counter_skips_past_existing_suffixes() {
        let mut ds = MockDataset::new(vec![seed_records().remove(7)]);
        let created = ds.create(fields("After TRQ-008"), today());
        assert_eq!(created.id, "TRQ-009");
    }

    #[test]
    fn update_missing_is_not_found_and_leaves_data() {
        let mut ds = MockDataset::seeded();
        let before = ds.list();
        let err = ds
            .update_status(&RequestId::from("TRQ-999"), RequestStatus::Completed, today())
            .unwrap_err();
        assert_eq!(err, CoreError::NotFound { id: "TRQ-999".into() });
        assert_eq!(ds.list(), before);
    }

    #[test]
    fn update_returns_copy() {
        let mut ds = MockDataset::seeded();
        let mut copy = ds
            .update_status(&RequestId::from("TRQ-003"), RequestStatus::InProgress, today())
            .unwrap();
        copy.title = "mutated locally".into();

        let stored = ds.records().iter().find(|r| r.id == "TRQ-003").unwrap();
        assert_eq!(stored.title, "Municipal Zoning Ordinance Update");
        assert_eq!(stored.status, RequestStatus::InProgress);
        assert_eq!(stored.updated_at, today());
    }

    #[test]
    fn delete_is_noop_for_absent_id() {
        let mut ds = MockDataset::seeded();
        assert!(ds.delete(&RequestId::from("TRQ-001")));
        assert!(!ds.delete(&RequestId::from("TRQ-001")));
        assert_eq!(ds.len(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn backend_applies_latency() {
        let backend = MockBackend::new(MockDataset::seeded(), MockLatency::default());
        let start = tokio::time::Instant::now();
        let records = backend.list_requests().await;
        assert_eq!(records.len(), 8);
        assert!(start.elapsed() >= Duration::from_millis(600));
    }
}
