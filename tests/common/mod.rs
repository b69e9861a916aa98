//! Common test utilities for formasi-export integration tests
//!
//! Stands up a wiremock server that behaves like the upstream vacancy API:
//! one mock per offset window, each answering with the matching slice of a
//! synthetic dataset.

use formasi_export::Config;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Upstream path the mocks are mounted on
pub const UPSTREAM_PATH: &str = "/2024/portal/spf";

/// Education code used by every test request
pub const EDUCATION_CODE: &str = "5101087";

pub fn record(i: usize) -> serde_json::Value {
    json!({
        "formasi_id": format!("F{i:04}"),
        "ins_nm": format!("Instansi {i}"),
        "jp_nama": "S1",
        "formasi_nm": "UMUM",
        "jabatan_nm": "ANALIS KEBIJAKAN",
        "lokasi_nm": format!("Kantor {i}"),
        "jumlah_formasi": 1,
        "jumlah_ms": null,
        "gaji_min": "3500000",
        "gaji_max": "6000000"
    })
}

pub fn envelope(total: usize, offset: usize, page_size: usize) -> serde_json::Value {
    let end = (offset + page_size).min(total);
    let records: Vec<_> = (offset..end).map(record).collect();

    json!({
        "status": 200,
        "error": false,
        "message": "success",
        "data": {
            "meta": {"total": total},
            "page": {"total": records.len()},
            "data": records
        }
    })
}

/// Mount one window of the dataset at `offset`, answered after `delay`
pub async fn mount_window(
    server: &MockServer,
    total: usize,
    offset: usize,
    page_size: usize,
    delay: Duration,
) {
    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .and(query_param("kode_ref_pend", EDUCATION_CODE))
        .and(query_param("offset", offset.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(total, offset, page_size))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Mount every window of a `total`-record dataset
///
/// Earlier offsets answer slower so completions arrive out of order.
pub async fn mount_dataset(server: &MockServer, total: usize, page_size: usize) {
    let windows = total.div_ceil(page_size).max(1);
    for index in 0..windows {
        let delay = Duration::from_millis(((windows - index) * 15) as u64);
        mount_window(server, total, index * page_size, page_size, delay).await;
    }
}

/// Default configuration pointed at the mock upstream
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.upstream.base_url = format!("{}{}", server.uri(), UPSTREAM_PATH);
    config.upstream.timeout = Duration::from_secs(5);
    config
}
