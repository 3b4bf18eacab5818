use std::path::PathBuf;

pub const DEFAULT_STORAGE_DIR: &str = "storage";
pub const DEFAULT_MAX_CONTENT_LENGTH: u64 = 1000 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub storage_dir: PathBuf,
    pub max_content_length: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
        }
    }
}

impl Config {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_max_content_length(mut self, max_content_length: u64) -> Self {
        self.max_content_length = max_content_length;
        self
    }
}
