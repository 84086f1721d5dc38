//! Lightbox: human-in-the-loop image annotation sessions.
//!
//! A reviewer pages through an ordered catalog of items (image references
//! plus metadata), classifies each one, and lightbox persists the labels
//! incrementally so a pass can stop and resume at any point.
//!
//! # Core Principles
//!
//! - **Resumable**: labels are flushed as the reviewer works; a session
//!   restarts at the first unlabeled item.
//! - **Locked by default**: existing labels cannot be overwritten unless
//!   editing is explicitly enabled, and edits are flushed immediately.
//! - **UI-independent**: one `(state, event) -> outcome` reducer, driven by
//!   whatever delivers events; nothing in the core renders or fetches.
//!
//! # Example
//!
//! ```no_run
//! use lightbox::catalog::Parser;
//! use lightbox::session::{Event, Session, SessionConfig};
//! use lightbox::sink::FileSink;
//! use lightbox::Classification;
//!
//! let catalog = Parser::new().parse_file("galaxies.csv").unwrap();
//! let sink = FileSink::new("galaxies.labels.json");
//! let mut session = Session::start(catalog, sink, SessionConfig::default());
//!
//! session.apply(Event::Classify(Classification::HasFeature));
//! session.apply(Event::Next);
//!
//! let stats = session.stats();
//! println!("{}/{} reviewed", stats.classified, stats.total);
//! ```

pub mod catalog;
pub mod error;
pub mod label;
pub mod session;
pub mod sink;
pub mod stats;

pub use catalog::{Catalog, CatalogSource, Item, Parser, ParserConfig};
pub use error::{LightboxError, Result};
pub use label::{Classification, ExportFormat, LabelRecord, LabelStore};
pub use session::{Event, Outcome, Phase, RefusalReason, Session, SessionConfig, SessionState};
pub use sink::{DurableSink, FileSink, MemorySink};
pub use stats::{summarize, SummaryStats};
