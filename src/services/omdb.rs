use std::fmt;
use std::{thread, time::Duration};

use rand::{thread_rng, Rng};
use reqwest::blocking::Client;
use serde_json::Value;

const OMDB_URL: &str = "https://www.omdbapi.com/";
const BASE_DELAY_MS: u64 = 800;
const TIMEOUT_SECS: u64 = 30;

/// One lookup request. `year` is already validated (empty or four digits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    pub title: String,
    pub year: String,
    pub full_plot: bool,
}

/// All retry attempts for one lookup are spent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub attempts: usize,
    pub last_error: String,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OMDb request failed after {} attempts: {}",
            self.attempts, self.last_error
        )
    }
}

/// Seam between the pipeline and the network. Production uses `OmdbClient`;
/// tests drive the pipeline with a fake.
pub trait Lookup {
    fn lookup(&self, query: &LookupQuery) -> Result<Value, FetchError>;
}

pub struct OmdbClient {
    client: Client,
    api_key: String,
    retries: usize,
    base_delay: Duration,
}

impl OmdbClient {
    pub fn new(api_key: &str, retries: usize) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| e.to_string())?;

        Ok(OmdbClient {
            client,
            api_key: api_key.to_string(),
            retries: retries.max(1),
            base_delay: Duration::from_millis(BASE_DELAY_MS),
        })
    }

    // One wire attempt. Transport error, non-2xx status and unparsable
    // bodies all count as failures; the logical Response flag does not.
    fn attempt(&self, query: &LookupQuery) -> Result<Value, String> {
        let mut params: Vec<(&str, &str)> = vec![
            ("t", query.title.as_str()),
            ("plot", if query.full_plot { "full" } else { "short" }),
            ("r", "json"),
        ];
        if !query.year.is_empty() {
            params.push(("y", query.year.as_str()));
        }
        params.push(("apikey", self.api_key.as_str()));

        let resp = self
            .client
            .get(OMDB_URL)
            .query(&params)
            .send()
            .map_err(|e| e.to_string())?;

        let status = resp.status();

        // Read as text first so an HTTP error still yields a message even
        // when the body is not JSON.
        let text = resp.text().map_err(|e| e.to_string())?;

        if !status.is_success() {
            return Err(extract_error_message(status.as_u16(), &text));
        }

        serde_json::from_str(&text).map_err(|e| format!("invalid JSON from OMDb: {e}"))
    }
}

impl Lookup for OmdbClient {
    fn lookup(&self, query: &LookupQuery) -> Result<Value, FetchError> {
        fetch_with_retry(self.retries, self.base_delay, || self.attempt(query))
    }
}

/// Runs `attempt` up to `retries` times with exponential backoff between
/// failures (none after the last). Only exhaustion surfaces as an error.
pub fn fetch_with_retry<F>(
    retries: usize,
    base_delay: Duration,
    mut attempt: F,
) -> Result<Value, FetchError>
where
    F: FnMut() -> Result<Value, String>,
{
    let retries = retries.max(1);
    let mut last_error = String::new();

    for n in 1..=retries {
        match attempt() {
            Ok(body) => return Ok(body),
            Err(e) => {
                last_error = e;
                if n < retries {
                    thread::sleep(backoff(base_delay, n));
                }
            }
        }
    }

    Err(FetchError {
        attempts: retries,
        last_error,
    })
}

// base * 2^(attempt-1), plus up to a quarter of the base as jitter.
fn backoff(base: Duration, attempt: usize) -> Duration {
    let ms = backoff_ms(base.as_millis() as u64, attempt);
    let jitter_cap = base.as_millis() as u64 / 4;
    let jitter: u64 = if jitter_cap > 0 {
        thread_rng().gen_range(0..jitter_cap)
    } else {
        0
    };
    Duration::from_millis(ms + jitter)
}

fn backoff_ms(base_ms: u64, attempt: usize) -> u64 {
    base_ms.saturating_mul(1_u64 << (attempt.saturating_sub(1)).min(16))
}

fn extract_error_message(status: u16, body_text: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body_text) {
        if let Some(msg) = v.get("Error").and_then(|m| m.as_str()) {
            return format!("HTTP {status}: {msg}");
        }
    }

    // Truncate in characters, not bytes: gateway error pages are not
    // guaranteed to break cleanly at a byte offset.
    let trimmed = body_text.trim();
    let snippet = if trimmed.chars().count() > 200 {
        let cut: String = trimmed.chars().take(200).collect();
        format!("{cut}...")
    } else {
        trimmed.to_string()
    };

    format!("HTTP {status}: {snippet}")
}
