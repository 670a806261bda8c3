use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::jobs::JobRecord;

/// Process-wide mapping from job id to the latest [`JobRecord`].
///
/// Writes are whole-record replacements, so the last writer for a given id
/// wins; different ids never conflict. Records are kept until process exit -
/// there is no eviction.
pub struct JobStore {
    jobs: Mutex<HashMap<String, JobRecord>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the record for `record.id`.
    ///
    /// A job already in a terminal state is never overwritten: late progress
    /// writes racing a completed job are dropped.
    pub fn put(&self, record: JobRecord) {
        let mut jobs = self.jobs.lock().unwrap();
        if let Some(existing) = jobs.get(&record.id) {
            if existing.status.is_terminal() {
                return;
            }
        }
        jobs.insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<JobRecord> {
        self.jobs.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}
