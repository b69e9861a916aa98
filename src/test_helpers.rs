//! Test helpers shared by unit tests across modules

use crate::error::{Error, Result};
use crate::fetcher::PageSource;
use crate::types::{FilterKeys, Formasi, Page};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Build a deterministic record; `i` shows up in every field
pub(crate) fn sample_record(i: usize) -> Formasi {
    Formasi {
        formasi_id: format!("id-{i:04}"),
        ins_nm: format!("Instansi {i}"),
        jp_nama: "S1".to_string(),
        formasi_nm: "UMUM".to_string(),
        jabatan_nm: format!("Jabatan {i}"),
        lokasi_nm: format!("Lokasi {i}"),
        jumlah_formasi: (i % 5 + 1) as i64,
        jumlah_ms: (i % 7) as i64,
        gaji_min: format!("{}", 3_000_000 + i * 1000),
        gaji_max: format!("{}", 6_000_000 + i * 1000),
    }
}

/// `n` sample records in upstream order
pub(crate) fn sample_records(n: usize) -> Vec<Formasi> {
    (0..n).map(sample_record).collect()
}

/// Failure a [`FakeSource`] returns for a configured offset
#[derive(Clone, Debug)]
pub(crate) enum FakeFailure {
    Transport(String),
    Upstream(String),
    Decode,
}

impl FakeFailure {
    fn to_error(&self) -> Error {
        match self {
            FakeFailure::Transport(message) => Error::Transport {
                message: message.clone(),
            },
            FakeFailure::Upstream(message) => Error::UpstreamRejected {
                message: message.clone(),
            },
            FakeFailure::Decode => Error::Decode {
                message: "expected value at line 1 column 1".to_string(),
                body: "<html></html>".to_string(),
            },
        }
    }
}

type DelayFn = Box<dyn Fn(usize) -> Duration + Send + Sync>;

/// In-memory [`PageSource`] serving slices of a fixed record set
pub(crate) struct FakeSource {
    records: Vec<Formasi>,
    page_size: usize,
    reported_total: Option<usize>,
    failures: HashMap<usize, FakeFailure>,
    delay: Option<DelayFn>,
    calls: Mutex<Vec<usize>>,
    completions: Mutex<Vec<usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub(crate) fn new(records: Vec<Formasi>, page_size: usize) -> Self {
        Self {
            records,
            page_size,
            reported_total: None,
            failures: HashMap::new(),
            delay: None,
            calls: Mutex::new(Vec::new()),
            completions: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Fail every request at `offset`
    pub(crate) fn with_failure(mut self, offset: usize, failure: FakeFailure) -> Self {
        self.failures.insert(offset, failure);
        self
    }

    /// Delay each response by `delay(offset)`
    pub(crate) fn with_delay<F>(mut self, delay: F) -> Self
    where
        F: Fn(usize) -> Duration + Send + Sync + 'static,
    {
        self.delay = Some(Box::new(delay));
        self
    }

    /// Report a total that differs from the number of records served
    pub(crate) fn with_reported_total(mut self, total: usize) -> Self {
        self.reported_total = Some(total);
        self
    }

    /// Offsets requested, in request order
    pub(crate) fn calls(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }

    /// Offsets answered, in completion order
    pub(crate) fn completions(&self) -> Vec<usize> {
        self.completions.lock().unwrap().clone()
    }

    /// Highest number of requests that were in flight at once
    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for FakeSource {
    async fn fetch_page(&self, offset: usize, _filter: &FilterKeys) -> Result<Page> {
        self.calls.lock().unwrap().push(offset);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(offset)).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completions.lock().unwrap().push(offset);

        if let Some(failure) = self.failures.get(&offset) {
            return Err(failure.to_error());
        }

        let start = offset.min(self.records.len());
        let end = (offset + self.page_size).min(self.records.len());
        Ok(Page {
            offset,
            records: self.records[start..end].to_vec(),
            total: self.reported_total.unwrap_or(self.records.len()),
        })
    }
}
