//! Concurrent asset aggregation.
//!
//! All requested assets load at once on scoped threads through a
//! caller-supplied fetch function, and every request produces exactly one
//! result. The report is ready when the last result is in, success or
//! failure; one bad asset never blocks the rest.

use std::sync::mpsc;
use std::thread;

use log::warn;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("asset {name:?} failed to load: {reason}")]
pub struct LoadError {
    pub name: String,
    pub reason: String,
}

/// One asset to fetch: a stable name and an opaque source locator (URL or
/// path, interpreted by the fetch function).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRequest {
    pub name: String,
    pub source: String,
}

impl AssetRequest {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Outcome of a batch load: one entry per request, partitioned by result.
/// Complete by construction; [`load_all`] only returns once every request
/// has resolved.
#[derive(Debug)]
pub struct LoadReport<T> {
    pub loaded: Vec<(String, T)>,
    pub failed: Vec<LoadError>,
}

impl<T> LoadReport<T> {
    #[inline]
    pub fn total(&self) -> usize {
        self.loaded.len() + self.failed.len()
    }

    #[inline]
    pub fn all_loaded(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn take(&mut self, name: &str) -> Option<T> {
        let index = self.loaded.iter().position(|(n, _)| n == name)?;
        Some(self.loaded.swap_remove(index).1)
    }
}

/// Fetch every request concurrently and collect one result per asset.
///
/// Results arrive in completion order. Failures are logged and reported but
/// never abort the batch.
pub fn load_all<T, F>(requests: &[AssetRequest], fetch: F) -> LoadReport<T>
where
    T: Send,
    F: Fn(&AssetRequest) -> Result<T, String> + Sync,
{
    let (sender, receiver) = mpsc::channel();

    thread::scope(|scope| {
        for request in requests {
            let sender = sender.clone();
            let fetch = &fetch;
            scope.spawn(move || {
                let result = fetch(request).map_err(|reason| LoadError {
                    name: request.name.clone(),
                    reason,
                });
                // The receiver outlives every worker; send cannot fail.
                let _ = sender.send((request.name.clone(), result));
            });
        }
        drop(sender);

        let mut report = LoadReport {
            loaded: Vec::with_capacity(requests.len()),
            failed: Vec::new(),
        };
        for (name, result) in receiver {
            match result {
                Ok(asset) => report.loaded.push((name, asset)),
                Err(error) => {
                    warn!("{error}");
                    report.failed.push(error);
                }
            }
        }
        report
    })
}
