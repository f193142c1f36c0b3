use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use rbs_engine::oversight::{OperatorId, OperatorRecord, OperatorRepository, RepositoryError};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryOperatorRepository {
    records: Arc<Mutex<HashMap<OperatorId, OperatorRecord>>>,
}

impl OperatorRepository for InMemoryOperatorRepository {
    fn insert(&self, record: OperatorRecord) -> Result<OperatorRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.snapshot.operator_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.snapshot.operator_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: OperatorRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.snapshot.operator_id) {
            guard.insert(record.snapshot.operator_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &OperatorId) -> Result<Option<OperatorRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<OperatorRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| a.snapshot.operator_id.0.cmp(&b.snapshot.operator_id.0));
        Ok(records)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
