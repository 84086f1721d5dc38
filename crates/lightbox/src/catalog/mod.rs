//! Item catalog: the ordered, read-only list of items under review.
//!
//! A catalog is loaded once from a CSV file (or pre-parsed rows) and never
//! mutated afterwards. Each row becomes an [`Item`] holding the image
//! reference plus the remaining columns as ordered metadata.
//!
//! # Usage
//!
//! ```no_run
//! use lightbox::catalog::Parser;
//!
//! let catalog = Parser::new().parse_file("galaxies.csv").unwrap();
//! println!("{} items to review", catalog.len());
//! ```

mod item;
mod parser;

pub use item::{Catalog, CatalogSource, Item};
pub use parser::{Parser, ParserConfig, DEFAULT_REFERENCE_COLUMN};
