mod entry;
mod scanner;

pub use entry::FileRecord;
pub use scanner::scan_files;
