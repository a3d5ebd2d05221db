use std::collections::HashSet;

/// Hands out poet ids derived from pinyin, unique across one run.
///
/// A taken candidate gets `_1`, `_2`, … appended until a free one is found.
/// Ids are never released.
#[derive(Debug, Default)]
pub struct IdAllocator {
    used: HashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve and return the first free id for `base`.
    pub fn allocate(&mut self, base: &str) -> String {
        let mut id = base.to_string();
        let mut counter = 1usize;
        while self.used.contains(&id) {
            id = format!("{base}_{counter}");
            counter += 1;
        }
        self.used.insert(id.clone());
        id
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }
}
