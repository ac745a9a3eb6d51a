//! Bounded, newest-first log of send attempts
//!
//! In memory only; history is lost on restart.

use std::collections::VecDeque;

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use shared::models::{AuditLogEntry, SendStatus};
use shared::util::last4;

/// Everything about an attempt except the fields the log assigns
#[derive(Debug, Clone)]
pub struct AuditDraft {
    pub membership_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: SendStatus,
    pub provider_result: Option<Value>,
    pub error: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
struct Inner {
    entries: VecDeque<AuditLogEntry>,
    next_seq: u64,
}

#[derive(Debug)]
pub struct AuditLog {
    inner: Mutex<Inner>,
    capacity: usize,
}

impl AuditLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(Inner {
                entries: VecDeque::with_capacity(capacity.min(1024)),
                next_seq: 1,
            }),
            capacity,
        }
    }

    /// Prepend an entry, dropping the oldest ones beyond capacity
    pub fn record(&self, draft: AuditDraft) -> AuditLogEntry {
        let mut inner = self.inner.lock();
        let seq = inner.next_seq;
        inner.next_seq += 1;

        let entry = AuditLogEntry {
            seq,
            last4: last4(&draft.phone),
            membership_id: draft.membership_id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            status: draft.status,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            provider_result: draft.provider_result,
            error: draft.error,
            password: draft.password,
        };

        inner.entries.push_front(entry.clone());
        inner.entries.truncate(self.capacity);
        entry
    }

    /// Most recent `limit` entries, newest first
    pub fn recent(&self, limit: usize) -> Vec<AuditLogEntry> {
        self.inner
            .lock()
            .entries
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all entries. Sequence numbers keep counting.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }
}
