/// One downloadable file found under the scan root, already formatted for
/// display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    /// Path below the scan root, ending in `name`.
    pub relative_path: String,
    pub size: String,
    pub mtime: String,
}

impl FileRecord {
    /// Whether the name's extension is `txt`, ignoring case.
    pub fn is_txt(&self) -> bool {
        std::path::Path::new(&self.name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
    }
}
