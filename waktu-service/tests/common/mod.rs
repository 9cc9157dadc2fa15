#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use waktu_core::errors::{Result, WaktuError};
use waktu_protocol::record::TimedRecord;
use waktu_service::RecordGateway;

/// In-memory gateway with the same duplicate-id behaviour as the Postgres one.
#[derive(Default, Clone)]
pub struct MemoryGateway {
    rows: Arc<RwLock<BTreeMap<i32, TimedRecord>>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored_ids(&self) -> Vec<i32> {
        self.rows.read().keys().copied().collect()
    }

    pub fn stored(&self, id: i32) -> Option<TimedRecord> {
        self.rows.read().get(&id).cloned()
    }
}

#[async_trait]
impl RecordGateway for MemoryGateway {
    async fn insert(&self, record: &TimedRecord) -> Result<()> {
        let mut rows = self.rows.write();
        if rows.contains_key(&record.id) {
            return Err(WaktuError::DuplicateRecord(record.id));
        }
        rows.insert(record.id, record.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<TimedRecord>> {
        Ok(self.rows.read().get(&id).cloned())
    }
}
