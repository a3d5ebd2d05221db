use std::path::{Path, PathBuf};

/// Input root: one `{Name}_{pinyin}` directory per poet.
pub const DATA_DIR: &str = "data";
/// Output root served by the web front end.
pub const OUTPUT_DIR: &str = "web/public";
/// Extension of poem files, without the dot.
pub const POEM_EXTENSION: &str = "pt";
/// Log a progress line after this many retained poets.
pub const PROGRESS_EVERY: usize = 1000;

/// Settings for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub poem_extension: String,
    pub progress_every: usize,
}

impl ConvertConfig {
    pub fn new(data_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// `.pt`-style suffix matched against file names.
    pub fn poem_suffix(&self) -> String {
        format!(".{}", self.poem_extension)
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR),
            output_dir: PathBuf::from(OUTPUT_DIR),
            poem_extension: POEM_EXTENSION.to_string(),
            progress_every: PROGRESS_EVERY,
        }
    }
}
