use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// File layout under the output root:
///
///   {root}/poets.json             sorted poet index
///   {root}/poems.json             flattened search index
///   {root}/data/poets/{id}.json   one detail file per poet
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub root: PathBuf,
}

impl OutputPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn poets_index(&self) -> PathBuf {
        self.root.join("poets.json")
    }

    pub fn poems_index(&self) -> PathBuf {
        self.root.join("poems.json")
    }

    pub fn poet_dir(&self) -> PathBuf {
        self.root.join("data").join("poets")
    }

    pub fn poet_detail(&self, id: &str) -> PathBuf {
        self.poet_dir().join(format!("{id}.json"))
    }

    /// Create the root and the detail directory if absent.
    pub fn ensure_dirs(&self) -> Result<()> {
        let dir = self.poet_dir();
        fs::create_dir_all(&dir).with_context(|| format!("cannot create {}", dir.display()))
    }
}

/// Write compact JSON. serde_json leaves non-ASCII text unescaped.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<usize> {
    let json = serde_json::to_string(data)
        .with_context(|| format!("cannot serialize {}", path.display()))?;
    fs::write(path, &json).with_context(|| format!("cannot write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "wrote json");
    Ok(json.len())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("cannot parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use poem_types::{Poem, Poet};

    #[test]
    fn test_layout() {
        let paths = OutputPaths::new("web/public");
        assert_eq!(paths.poets_index(), PathBuf::from("web/public/poets.json"));
        assert_eq!(paths.poems_index(), PathBuf::from("web/public/poems.json"));
        assert_eq!(
            paths.poet_detail("libai"),
            PathBuf::from("web/public/data/poets/libai.json")
        );
    }

    #[test]
    fn test_write_json_compact_and_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(dir.path().join("out"));
        paths.ensure_dirs().unwrap();
        assert!(paths.poet_dir().is_dir());

        let mut poet = Poet::new("libai", "李白", "libai");
        poet.poems.push(Poem {
            title: "靜夜思".into(),
            date: String::new(),
            content: "床前明月光\n疑是地上霜".into(),
        });
        let path = paths.poet_detail(&poet.id);
        write_json(&path, &poet).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"name\":\"李白\""));
        assert!(!raw.contains("\\u"));
        assert!(!raw.contains('\n'));

        let back: Poet = read_json(&path).unwrap();
        assert_eq!(back, poet);
    }

    #[test]
    fn test_read_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let err = read_json::<Poet>(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
