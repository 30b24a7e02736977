//! logsift
//!
//! Terminal triage for tabular log exports: filter, search, mark, comment,
//! narrow by time, then save or export what matters.
//!
//! The layout follows a Pure Core / Impure Shell split:
//! - [`model`] and [`state`] hold data and transitions with no terminal access
//! - [`view_state`] computes column widths and the visible row window
//! - [`view`] owns the terminal and the event loop
//! - [`source`] reads and writes files and the clipboard

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
