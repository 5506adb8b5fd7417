//! Tab management
//!
//! - `page` wraps the content of one tab
//! - `registry` maps tab keys to views
//! - `tab_labels` holds tab titles

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_tab_label, tab_label_for_key, title_for_key};
