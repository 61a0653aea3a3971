use std::path::PathBuf;
use std::{thread, time::Duration};

use crate::model::outcome::FetchOutcome;
use crate::model::table::Table;
use crate::services::omdb::{Lookup, LookupQuery};
use crate::services::{cache, normalize, reconcile};

pub struct PipelineConfig {
    pub cache_path: PathBuf,
    pub sleep: Duration,
    pub full_plot: bool,
    /// Progress line cadence in rows; 0 disables progress output.
    pub progress_every: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RunReport {
    pub processed: usize,
    pub skipped: usize,
    pub cache_hits: usize,
    pub api_calls: usize,
    pub failed: usize,
}

/// Enriches every row of the table in order. One row's failure never stops
/// the batch; the cache is persisted after every fresh fetch so an
/// interrupted run resumes with hits instead of repeat calls.
pub fn run(table: &mut Table, source: &impl Lookup, cfg: &PipelineConfig) -> RunReport {
    let mut report = RunReport::default();
    let mut cache = cache::load(&cfg.cache_path);

    let total = table.rows.len();

    for i in 0..total {
        let title = normalize::clean(table.get(i, "Title"));
        if title.is_empty() {
            report.skipped += 1;
            continue;
        }

        let year = normalize::normalize_year(table.get(i, "Year"));
        let key = cache::key(&title, &year);

        let body = match cache.get(&key).cloned() {
            Some(cached) => {
                report.cache_hits += 1;
                cached
            }
            None => {
                let query = LookupQuery {
                    title: title.clone(),
                    year: year.clone(),
                    full_plot: cfg.full_plot,
                };

                match source.lookup(&query) {
                    Ok(body) => {
                        // Logical misses are cached too: "not found" is a
                        // stable answer and re-querying it buys nothing.
                        cache.insert(key, body.clone());
                        if let Err(e) = cache::save(&cfg.cache_path, &cache) {
                            eprintln!(
                                "[cache] failed to persist {}: {e}",
                                cfg.cache_path.display()
                            );
                        }
                        report.api_calls += 1;

                        if !cfg.sleep.is_zero() {
                            thread::sleep(cfg.sleep);
                        }
                        body
                    }
                    Err(e) => {
                        reconcile::record_error(table, i, &e.to_string());
                        report.failed += 1;
                        report.processed += 1;
                        emit_progress(cfg, i + 1, total, &report);
                        continue;
                    }
                }
            }
        };

        let outcome = FetchOutcome::from_value(&body);
        reconcile::merge(table, i, &outcome, !year.is_empty());
        report.processed += 1;

        emit_progress(cfg, i + 1, total, &report);
    }

    report
}

fn emit_progress(cfg: &PipelineConfig, position: usize, total: usize, report: &RunReport) {
    if cfg.progress_every > 0 && position % cfg.progress_every == 0 {
        println!(
            "Processed {position}/{total} (cache hits: {}, API calls: {})",
            report.cache_hits, report.api_calls
        );
    }
}
