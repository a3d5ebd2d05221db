use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ScanError;

/// A poet directory discovered under the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoetDir {
    pub path: PathBuf,
    pub name: String,
    pub pinyin: String,
}

/// Scan the input root and discover all poet directories.
///
/// Expected directory layout:
///   {root}/{Name}_{pinyin}/**/*.pt
///
/// Plain files at the root are ignored. Directories are visited in file-name
/// order so that id suffixes and output order are reproducible. A directory
/// whose name cannot be split comes back as `Err` for the caller to log.
pub fn scan_poets(root: &Path) -> Result<Vec<Result<PoetDir, ScanError>>, walkdir::Error> {
    let mut results = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        // Follows symlinks, like a plain `is_dir` check on the path
        if !path.is_dir() {
            continue;
        }

        let dir_name = entry.file_name().to_string_lossy();
        let poet = split_dir_name(&dir_name).map(|(name, pinyin)| PoetDir {
            path: path.to_path_buf(),
            name: name.to_string(),
            pinyin: pinyin.to_string(),
        });
        results.push(poet);
    }

    Ok(results)
}

/// Split "李白_libai" into ("李白", "libai").
///
/// The first underscore always wins, even when it leaves a half empty:
/// "_李白_libai" gives ("", "李白_libai") and "_libai" gives ("", "libai").
/// The last underscore is only consulted when the first split fails, so in
/// practice only a name without any underscore is rejected.
pub fn split_dir_name(dir_name: &str) -> Result<(&str, &str), ScanError> {
    dir_name
        .split_once('_')
        .or_else(|| dir_name.rsplit_once('_'))
        .ok_or_else(|| ScanError::MalformedDirName {
            name: dir_name.to_string(),
        })
}

/// All poem files below a poet directory, at any depth, in path order.
///
/// The walk is depth-first with siblings in name order, so `a/x.pt` comes
/// before `b.pt`; a walk that lists a directory's own files before its
/// subdirectories would order them the other way round.
///
/// Unreadable subdirectories are skipped. Anything that is not a directory
/// counts as a file, so a dangling link surfaces later as a read error.
pub fn collect_poem_files(poet_dir: &Path, suffix: &str) -> Vec<PathBuf> {
    WalkDir::new(poet_dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.path().is_dir())
        .filter(|e| e.file_name().to_string_lossy().ends_with(suffix))
        .map(|e| e.into_path())
        .collect()
}
