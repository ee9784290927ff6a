//! Ratatui widgets for the stockroom TUI.

pub mod command_bar;
pub mod gallery;
pub mod help;
pub mod record_detail;
pub mod result_list;
pub mod search_box;
pub mod status_line;
pub mod tab_bar;
