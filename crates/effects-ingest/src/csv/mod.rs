//! CSV reading utilities.

mod reader;

pub use reader::{list_csv_files, read_csv_file, read_csv_sheet, read_sheets};
