//! Label records and the durable label store.
//!
//! The label store is a mapping from item position to the classification
//! decision made for that item. It lives alongside the catalog file and is
//! flushed incrementally as the reviewer works, so a session can stop and
//! resume at any point.
//!
//! # Persisted layout
//!
//! ```text
//! galaxies.csv              # catalog (never modified)
//! galaxies.labels.json      # label store, keyed by decimal string position
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use lightbox::label::LabelStore;
//! use lightbox::sink::FileSink;
//!
//! let sink = FileSink::new("galaxies.labels.json");
//! let store = LabelStore::load(&sink).unwrap();
//! println!("{} labels so far", store.len());
//! ```

mod export;
mod record;
mod store;

pub use export::ExportFormat;
pub use record::{Classification, LabelRecord};
pub use store::LabelStore;
