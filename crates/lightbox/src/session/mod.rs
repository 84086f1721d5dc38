//! The annotation session state machine.
//!
//! A session owns the catalog, the label store, and the durable sink for
//! the lifetime of a review pass. Reviewer intents arrive as [`Event`]s;
//! each is handled by one `apply(event) -> Outcome` call that runs to
//! completion before the next is accepted. Rendering and input dispatch
//! live entirely outside this module, so the machine is testable without
//! any UI harness.
//!
//! # Usage
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
//! ```

mod cursor;
mod event;
mod machine;
mod state;

pub use cursor::resume_position;
pub use event::{Event, Outcome, RefusalReason};
pub use machine::{Phase, Session};
pub use state::{SessionConfig, SessionState};
