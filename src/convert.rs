use anyhow::{Context, Result};
use poem_types::{PoemSearchEntry, Poet, PoetIndexEntry};
use tracing::{debug, info, warn};

use crate::config::ConvertConfig;
use crate::ids::IdAllocator;
use crate::output::{OutputPaths, read_json, write_json};
use crate::parser::parse_poem;
use crate::scanner::{PoetDir, collect_poem_files, scan_poets};

/// Totals of one finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertReport {
    /// Poets written to the index
    pub poets: usize,
    /// Entries in the search index
    pub poems: usize,
    /// Poet directories skipped for a malformed name
    pub skipped_dirs: usize,
    /// Poem files that could not be read or decoded
    pub failed_files: usize,
}

/// One conversion pass over the input tree.
///
/// Holds everything that accumulates while poets are visited: the ids handed
/// out so far, the index entries of retained poets, and the error counters.
pub struct Converter {
    config: ConvertConfig,
    paths: OutputPaths,
    ids: IdAllocator,
    index: Vec<PoetIndexEntry>,
    skipped_dirs: usize,
    failed_files: usize,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        let paths = OutputPaths::new(&config.output_dir);
        Self {
            config,
            paths,
            ids: IdAllocator::new(),
            index: Vec::new(),
            skipped_dirs: 0,
            failed_files: 0,
        }
    }

    /// Convert every poet under the data directory and write all outputs.
    pub fn run(mut self) -> Result<ConvertReport> {
        self.paths.ensure_dirs()?;

        let data_dir = self.config.data_dir.clone();
        info!(data_dir = %data_dir.display(), "scanning poets");
        let dirs = scan_poets(&data_dir)
            .with_context(|| format!("cannot list {}", data_dir.display()))?;

        for dir in dirs {
            match dir {
                Ok(poet_dir) => {
                    self.process_poet(&poet_dir)?;
                }
                Err(e) => {
                    warn!("skipping directory: {e}");
                    self.skipped_dirs += 1;
                }
            }
        }

        self.finish()
    }

    /// Parse one poet directory. A poet with at least one poem gets its detail
    /// file written and an index entry; one with none leaves no output but
    /// keeps its reserved id.
    pub fn process_poet(&mut self, dir: &PoetDir) -> Result<Option<PoetIndexEntry>> {
        let id = self.ids.allocate(&dir.pinyin);
        let mut poet = Poet::new(id, dir.name.as_str(), dir.pinyin.as_str());

        for path in collect_poem_files(&dir.path, &self.config.poem_suffix()) {
            match parse_poem(&path) {
                Ok(poem) => poet.poems.push(poem),
                Err(e) => {
                    warn!(path = %e.path().display(), "error parsing poem: {e}");
                    self.failed_files += 1;
                }
            }
        }

        if poet.poems.is_empty() {
            debug!(dir = %dir.path.display(), "no poems, poet dropped");
            return Ok(None);
        }

        write_json(&self.paths.poet_detail(&poet.id), &poet)?;

        let entry = poet.index_entry();
        self.index.push(entry.clone());

        if self.config.progress_every > 0 && self.index.len() % self.config.progress_every == 0 {
            info!(poets = self.index.len(), "processed poets");
        }

        Ok(Some(entry))
    }

    /// Sort and write poets.json, then derive poems.json from the detail files.
    pub fn finish(mut self) -> Result<ConvertReport> {
        // Stable sort: equal pinyin keeps traversal order
        self.index.sort_by(|a, b| a.pinyin.cmp(&b.pinyin));
        write_json(&self.paths.poets_index(), &self.index)?;

        info!("generating poems index");
        let search = build_search_index(&self.paths, &self.index)?;
        write_json(&self.paths.poems_index(), &search)?;

        let report = ConvertReport {
            poets: self.index.len(),
            poems: search.len(),
            skipped_dirs: self.skipped_dirs,
            failed_files: self.failed_files,
        };
        info!(
            poets = report.poets,
            poems = report.poems,
            skipped_dirs = report.skipped_dirs,
            failed_files = report.failed_files,
            ids_reserved = self.ids.len(),
            "done"
        );
        Ok(report)
    }
}

/// Re-read each poet's detail file, in index order, and flatten its poems
/// into search entries. A detail file that is gone contributes nothing.
pub fn build_search_index(
    paths: &OutputPaths,
    index: &[PoetIndexEntry],
) -> Result<Vec<PoemSearchEntry>> {
    let mut all = Vec::new();
    for entry in index {
        let path = paths.poet_detail(&entry.id);
        if !path.exists() {
            continue;
        }
        let poet: Poet = read_json(&path)?;
        all.extend(PoemSearchEntry::for_poet(entry, &poet));
    }
    Ok(all)
}
