//! Output formatting: present data as tables.
//!
//! This module handles the final stage of the pipeline - formatting a
//! `Summary` for display. It provides:
//!
//! - **StatsTable**: Table-ready data structure with headers, rows, and footer
//! - **TableRow**: Individual row with label and formatted values
//!
//! StatsTable only formats data into strings. Rendering it as plain text or
//! a decorated terminal table is left to the caller.
//!
//! ## Example
//!
//! ```rust,ignore
//! use langstatlib::output::{NumberStyle, StatsTable};
//!
//! let table = StatsTable::from_summary(&result.summary, NumberStyle::Plain);
//! // table.headers: ["Language", "Files", "Lines", "Percentage"]
//! // table.rows: [TableRow { label: "Python", values: ["2", "15", "83.33%"] }]
//! // table.footer: TableRow { label: "Total", ... }
//! ```

pub mod table;

pub use table::{format_count, format_percentage, NumberStyle, StatsTable, TableRow};
