//! # Teto Extract
//!
//! Extraction of the daily NTN-B indicative rate table and the session that
//! holds the current snapshot.
//!
//! - [`source`]: the page URL for a business date and where the table sits
//! - [`layout`]: which rows and columns of the table carry data
//! - [`locale`]: pt-BR numbers (`6,1234`) and dates (`15/05/2035`)
//! - [`TableExtractor`]: render, locate, combine table fragments, shape rows
//! - [`RateSession`]: initial load, refresh and maturity selection
//!
//! Rendering is delegated to a [`teto_traits::PageRenderer`], so the same
//! pipeline runs against a headless browser or saved pages.
//!
//! ## Example
//!
//! ```rust
//! use teto_extract::{parse_rate_table, TableLayout};
//!
//! let layout = TableLayout {
//!     columns: 2,
//!     header_rows: 1,
//!     maturity_column: 0,
//!     rate_column: 1,
//! };
//! let html = "<table><tr><th>Vencimento</th><th>Taxa</th></tr>\
//!             <tr><td>15/05/2035</td><td>6,1234</td></tr></table>";
//! let series = parse_rate_table(html, &layout).unwrap();
//! assert_eq!(series.maturity_keys(), vec!["15/05/2035"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod extractor;
pub mod layout;
pub mod locale;
pub mod session;
pub mod source;

pub use extractor::{parse_rate_table, TableExtractor};
pub use layout::TableLayout;
pub use session::{Clock, FixedClock, RateSession, SystemClock};
pub use source::{
    date_token, source_url, SourceSettings, DEFAULT_ELEMENT_PATH, DEFAULT_URL_TEMPLATE,
};
