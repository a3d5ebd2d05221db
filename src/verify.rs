use std::collections::{HashMap, HashSet};

use anyhow::Result;
use poem_types::{PoemSearchEntry, Poet, PoetIndexEntry};

use crate::output::{OutputPaths, read_json};

/// Problems found in a written output tree.
#[derive(Debug, Default)]
pub struct VerifyReport {
    pub poets_checked: usize,
    pub entries_checked: usize,
    pub problems: Vec<String>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Check a generated output tree against the guarantees the front end
/// relies on: counts match the detail files, the index is sorted by pinyin,
/// ids are unique, and every search entry points at a poem with its title.
///
/// Unreadable index files are errors; everything else is collected.
pub fn verify_output(paths: &OutputPaths) -> Result<VerifyReport> {
    let index: Vec<PoetIndexEntry> = read_json(&paths.poets_index())?;
    let search: Vec<PoemSearchEntry> = read_json(&paths.poems_index())?;

    let mut report = VerifyReport::default();

    for pair in index.windows(2) {
        if pair[0].pinyin > pair[1].pinyin {
            report.problems.push(format!(
                "index out of order: {} before {}",
                pair[0].pinyin, pair[1].pinyin
            ));
        }
    }

    let mut seen = HashSet::new();
    let mut poets: HashMap<&str, Poet> = HashMap::new();
    for entry in &index {
        report.poets_checked += 1;
        if !seen.insert(entry.id.as_str()) {
            report.problems.push(format!("duplicate poet id {}", entry.id));
            continue;
        }

        let path = paths.poet_detail(&entry.id);
        let poet: Poet = match read_json(&path) {
            Ok(p) => p,
            Err(e) => {
                report.problems.push(format!("{e:#}"));
                continue;
            }
        };
        if poet.id != entry.id {
            report
                .problems
                .push(format!("{} holds poet id {}", path.display(), poet.id));
        }
        if poet.poems.len() != entry.poem_count {
            report.problems.push(format!(
                "{}: poemCount {} but {} poems",
                entry.id,
                entry.poem_count,
                poet.poems.len()
            ));
        }
        if poet.poems.is_empty() {
            report
                .problems
                .push(format!("{}: indexed with no poems", entry.id));
        }
        poets.insert(entry.id.as_str(), poet);
    }

    for entry in &search {
        report.entries_checked += 1;
        let Some(poet) = poets.get(entry.poet_id.as_str()) else {
            report
                .problems
                .push(format!("search entry for unknown poet {}", entry.poet_id));
            continue;
        };
        match poet.poems.get(entry.index) {
            Some(poem) if poem.title == entry.title => {}
            Some(poem) => report.problems.push(format!(
                "{}[{}]: title {:?} but search has {:?}",
                entry.poet_id, entry.index, poem.title, entry.title
            )),
            None => report.problems.push(format!(
                "{}[{}]: no such poem",
                entry.poet_id, entry.index
            )),
        }
    }

    let indexed_poems: usize = index.iter().map(|e| e.poem_count).sum();
    if indexed_poems != search.len() {
        report.problems.push(format!(
            "index counts {} poems, search index has {}",
            indexed_poems,
            search.len()
        ));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConvertConfig;
    use crate::convert::Converter;
    use crate::output::write_json;
    use std::fs;

    fn build_sample(tmp: &std::path::Path) -> OutputPaths {
        let data = tmp.join("data");
        for (rel, text) in [
            ("李白_libai/1.pt", "title: 靜夜思\n\n床前明月光"),
            ("李白_libai/2.pt", "title: 將進酒\n\n君不見"),
            ("張_zhang/1.pt", "title: a\n\nx"),
            ("章_zhang/1.pt", "title: b\n\ny"),
        ] {
            let path = data.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, text).unwrap();
        }
        let out = tmp.join("out");
        Converter::new(ConvertConfig::new(&data, &out)).run().unwrap();
        OutputPaths::new(out)
    }

    #[test]
    fn test_fresh_output_verifies() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = build_sample(tmp.path());
        let report = verify_output(&paths).unwrap();
        assert!(report.is_ok(), "{:?}", report.problems);
        assert_eq!(report.poets_checked, 3);
        assert_eq!(report.entries_checked, 4);
    }

    #[test]
    fn test_detects_count_mismatch_and_bad_title() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = build_sample(tmp.path());

        let detail = paths.poet_detail("libai");
        let mut poet: Poet = read_json(&detail).unwrap();
        poet.poems[0].title = "changed".into();
        poet.poems.pop();
        write_json(&detail, &poet).unwrap();

        let report = verify_output(&paths).unwrap();
        assert!(!report.is_ok());
        assert!(report.problems.iter().any(|p| p.contains("poemCount 2 but 1")));
        assert!(report.problems.iter().any(|p| p.contains("no such poem")));
        assert!(report.problems.iter().any(|p| p.contains("\"changed\"")));
    }

    #[test]
    fn test_detects_unsorted_and_duplicate_ids() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = build_sample(tmp.path());

        let mut index: Vec<PoetIndexEntry> = read_json(&paths.poets_index()).unwrap();
        index.reverse();
        index.push(index[0].clone());
        write_json(&paths.poets_index(), &index).unwrap();

        let report = verify_output(&paths).unwrap();
        assert!(report.problems.iter().any(|p| p.contains("out of order")));
        assert!(report.problems.iter().any(|p| p.contains("duplicate poet id")));
    }

    #[test]
    fn test_missing_index_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(verify_output(&OutputPaths::new(tmp.path())).is_err());
    }
}
