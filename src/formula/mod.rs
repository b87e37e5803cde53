//! Closed-form export of single-input, single-output networks.

pub mod closed_form;
pub mod export;

pub use closed_form::{ClosedForm, Style};
pub use export::{export_all, rust_function, write_exports};
