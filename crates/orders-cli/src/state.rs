//! The shared, swappable handle to the loaded dataset.
//!
//! Readers take a cheap `Arc` clone under a short read lock and then work on
//! an immutable [`PreparedDataset`]. A reload builds a whole new dataset and
//! swaps it in; readers holding the old `Arc` keep a consistent view.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use orders_common::OrderFrame;
use orders_model::{AnalyticsOptions, SchemaFeatures};
use orders_transform::PreprocessReport;

/// A preprocessed table plus the settings it is analysed with.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    frame: OrderFrame,
    report: PreprocessReport,
    options: AnalyticsOptions,
}

impl PreparedDataset {
    pub fn new(frame: OrderFrame, report: PreprocessReport, options: AnalyticsOptions) -> Self {
        Self {
            frame,
            report,
            options,
        }
    }

    pub fn frame(&self) -> &OrderFrame {
        &self.frame
    }

    pub fn report(&self) -> &PreprocessReport {
        &self.report
    }

    pub fn options(&self) -> AnalyticsOptions {
        self.options
    }

    /// Columns of the preprocessed table that analysis can rely on.
    pub fn features(&self) -> SchemaFeatures {
        self.frame.features()
    }

    pub fn source(&self) -> Option<&Path> {
        self.frame.source()
    }
}

/// Holder of the current dataset, if any.
#[derive(Debug, Default)]
pub struct DatasetHandle {
    current: RwLock<Option<Arc<PreparedDataset>>>,
}

impl DatasetHandle {
    /// A handle with no dataset loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_dataset(dataset: PreparedDataset) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(dataset))),
        }
    }

    /// The dataset visible right now.
    pub fn current(&self) -> Option<Arc<PreparedDataset>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.current().is_some()
    }

    /// Replace the dataset and return the previous one.
    pub fn publish(&self, dataset: PreparedDataset) -> Option<Arc<PreparedDataset>> {
        let source: Option<PathBuf> = dataset.source().map(Path::to_path_buf);
        let rows = dataset.frame().row_count();
        let next = Some(Arc::new(dataset));
        let previous = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, next)
        };
        info!(
            source = ?source,
            row_count = rows,
            replaced = previous.is_some(),
            "dataset published"
        );
        previous
    }

    /// Drop the current dataset.
    pub fn clear(&self) -> Option<Arc<PreparedDataset>> {
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    use polars::prelude::{Column, DataFrame};

    fn dataset(rows: usize) -> PreparedDataset {
        let ids: Vec<String> = (0..rows).map(|idx| format!("A{idx}")).collect();
        let df = DataFrame::new(vec![Column::new("order_id".into(), ids)]).unwrap();
        PreparedDataset::new(
            OrderFrame::new(df),
            PreprocessReport::default(),
            AnalyticsOptions::default(),
        )
    }

    #[test]
    fn publish_swaps_and_returns_previous() {
        let handle = DatasetHandle::empty();
        assert!(!handle.is_loaded());
        assert!(handle.publish(dataset(1)).is_none());

        let held = handle.current().unwrap();
        let previous = handle.publish(dataset(3)).unwrap();
        assert_eq!(previous.frame().row_count(), 1);
        assert_eq!(held.frame().row_count(), 1);
        assert_eq!(handle.current().unwrap().frame().row_count(), 3);

        assert!(handle.clear().is_some());
        assert!(!handle.is_loaded());
    }

    #[test]
    fn readers_see_whole_datasets() {
        let handle = Arc::new(DatasetHandle::with_dataset(dataset(2)));
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let handle = Arc::clone(&handle);
                thread::spawn(move || {
                    for _ in 0..100 {
                        let rows = handle.current().unwrap().frame().row_count();
                        assert!(rows == 2 || rows == 5);
                    }
                })
            })
            .collect();
        handle.publish(dataset(5));
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
