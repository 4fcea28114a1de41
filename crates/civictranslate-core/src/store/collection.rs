// ── Ordered reactive request collection ──
//
// Order matters (newest first), so the snapshot `Vec` is the primary storage
// and a `DashMap` index gives O(1) lookups by id. Every mutation bumps a
// version counter and republishes the snapshot.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::{RequestId, TranslationRequest};

pub type Snapshot = Arc<Vec<Arc<TranslationRequest>>>;

pub(crate) struct RequestCollection {
    /// Secondary index: id -> record.
    by_id: DashMap<RequestId, Arc<TranslationRequest>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Ordered records, newest first.
    snapshot: watch::Sender<Snapshot>,
}

impl RequestCollection {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            version,
            snapshot,
        }
    }

    /// Replace every record, keeping the given order.
    ///
    /// The index gains the new records before the snapshot is published and
    /// loses stale ones only afterwards, so `get` finds every id that either
    /// the old or the new snapshot lists.
    pub(crate) fn replace_all(&self, records: Vec<TranslationRequest>) {
        let values: Vec<Arc<TranslationRequest>> = records.into_iter().map(Arc::new).collect();
        let keep: HashSet<RequestId> = values.iter().map(|r| r.id.clone()).collect();

        for r in &values {
            self.by_id.insert(r.id.clone(), Arc::clone(r));
        }

        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
        self.by_id.retain(|id, _| keep.contains(id));
        self.bump_version();
    }

    /// Insert a record at the front.
    pub(crate) fn prepend(&self, record: TranslationRequest) -> Arc<TranslationRequest> {
        let record = Arc::new(record);
        self.by_id.insert(record.id.clone(), Arc::clone(&record));

        self.snapshot.send_modify(|snap| {
            let items = Arc::make_mut(snap);
            items.retain(|r| r.id != record.id);
            items.insert(0, Arc::clone(&record));
        });
        self.bump_version();
        record
    }

    /// Swap the record with the same id in place. Records not present
    /// locally are left out; returns the stored `Arc` either way.
    pub(crate) fn replace(&self, record: TranslationRequest) -> Arc<TranslationRequest> {
        let record = Arc::new(record);
        let mut found = false;

        self.snapshot.send_if_modified(|snap| {
            if let Some(idx) = snap.iter().position(|r| r.id == record.id) {
                Arc::make_mut(snap)[idx] = Arc::clone(&record);
                found = true;
            }
            found
        });

        if found {
            self.by_id.insert(record.id.clone(), Arc::clone(&record));
            self.bump_version();
        }
        record
    }

    /// Remove a record by id. Returns the removed record if it existed.
    pub(crate) fn remove(&self, id: &RequestId) -> Option<Arc<TranslationRequest>> {
        let (_, removed) = self.by_id.remove(id)?;
        self.snapshot.send_modify(|snap| {
            Arc::make_mut(snap).retain(|r| &r.id != id);
        });
        self.bump_version();
        Some(removed)
    }

    pub(crate) fn get(&self, id: &RequestId) -> Option<Arc<TranslationRequest>> {
        self.by_id.get(id).map(|r| Arc::clone(r.value()))
    }

    /// Current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}
