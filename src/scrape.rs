// src/scrape.rs
use std::{
    thread, time::Duration,
    sync::{ mpsc, atomic::{ AtomicUsize, Ordering }},
};

use tracing::{info, warn};

use crate::{
    config::options::ScrapeOptions,
    error::{ExtractError, SourceError},
    product::ProductRecord,
    progress::Progress,
    specs::ProductExtractor,
};

/// A source that produced no product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skipped {
    pub index: usize,
    pub url: String,
    pub reason: String,
}

/// Everything gathered from one pass over the source list, in source order.
#[derive(Debug, Default)]
pub struct Collected {
    pub products: Vec<ProductRecord>,
    pub skipped: Vec<Skipped>,
}

/// Extract every source and buffer the results.
///
/// Up to `opts.workers` threads pull indices from a shared counter; results
/// are slotted back by index, so the returned products follow the source list
/// regardless of completion order. A failing source is recorded in `skipped`
/// and never stops the run. Nothing is returned until every source is done.
pub fn collect_products(
    sources: &[String],
    extractor: &dyn ProductExtractor,
    opts: &ScrapeOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Collected {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(sources.len());
    }
    if sources.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        return Collected::default();
    }

    type Outcome = (usize, Result<ProductRecord, SourceError>);

    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<Outcome>();
    let workers = opts.workers.min(sources.len()).max(1);
    let mut slots: Vec<Option<Result<ProductRecord, SourceError>>> =
        (0..sources.len()).map(|_| None).collect();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let counter = &counter;

            scope.spawn(move || {
                loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    if i >= sources.len() {
                        break;
                    }
                    let result = extractor.extract(&sources[i]).and_then(require_name);
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                    if i + 1 < sources.len() {
                        pause(opts, i);
                    }
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for (i, result) in res_rx {
            if let Some(p) = progress.as_deref_mut() {
                match &result {
                    Ok(record) => p.item_done(i, &record.name),
                    Err(e) => p.item_failed(i, &sources[i], &e.to_string()),
                }
            }
            slots[i] = Some(result);
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let mut out = Collected::default();
    for (index, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(Ok(record)) => out.products.push(record),
            Some(Err(e)) => {
                warn!(url = %sources[index], "source skipped: {e}");
                out.skipped.push(Skipped { index, url: sources[index].clone(), reason: e.to_string() });
            }
            None => {
                warn!(url = %sources[index], "source never reported");
                out.skipped.push(Skipped {
                    index,
                    url: sources[index].clone(),
                    reason: s!("worker stopped before reporting"),
                });
            }
        }
    }

    info!(retained = out.products.len(), skipped = out.skipped.len(), "collection finished");
    out
}

fn require_name(record: ProductRecord) -> Result<ProductRecord, SourceError> {
    if record.is_complete() {
        Ok(record)
    } else {
        Err(ExtractError::Incomplete.into())
    }
}

fn pause(opts: &ScrapeOptions, i: usize) {
    let jitter = if opts.jitter_ms > 0 { (i as u64) % opts.jitter_ms } else { 0 };
    let ms = opts.request_pause_ms + jitter;
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms)); // be polite
    }
}
