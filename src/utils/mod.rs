pub mod formatting;

pub use formatting::{balance, format_won, report_file_name};
