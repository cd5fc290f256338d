//! # Teto HTML
//!
//! A small, tolerant HTML document model sized for scraping published tables.
//!
//! - [`Document::parse`] never fails: unknown markup is kept, stray end tags
//!   are ignored, and table structure is repaired the way browsers do
//!   (implied `tbody`, implicitly closed `tr`/`td`/`th`).
//! - [`ElementPath`] addresses an element with an absolute path such as
//!   `/html/body/table/tbody/tr/td/div/table[2]`.
//! - [`table::parse_tables`] turns every `<table>` under an element into a
//!   rectangular [`Grid`] of cell texts, expanding `colspan`/`rowspan`.
//!
//! ## Example
//!
//! ```rust
//! use teto_html::{Document, ElementPath, table};
//!
//! let html = "<html><body><table><tr><td>a</td><td>b</td></tr></table></body></html>";
//! let doc = Document::parse(html);
//! let path = ElementPath::parse("/html/body/table").unwrap();
//! let element = doc.locate(&path).unwrap();
//! let grids = table::parse_tables(element);
//! assert_eq!(grids[0].rows()[0], vec!["a", "b"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod dom;
mod entities;
pub mod error;
mod path;
pub mod table;
mod tokenizer;

pub use dom::{Document, Element, Node};
pub use error::{GridError, PathError};
pub use path::{ElementPath, PathStep};
pub use table::Grid;
