mod file_finder;

pub use file_finder::{FileFinder, MANIFEST_FILE_NAME};
