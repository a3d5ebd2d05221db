use serde::{Deserialize, Serialize};

// ── Poem ─────────────────────────────────────────────────────────────────

/// One poem as parsed from a `.pt` file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Poem {
    pub title: String,
    pub date: String,
    /// Body text, lines joined with `\n`
    pub content: String,
}

// ── Poet detail file: data/poets/{id}.json ───────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poet {
    pub id: String,
    pub name: String,
    pub pinyin: String,
    pub poems: Vec<Poem>,
}

impl Poet {
    pub fn new(id: impl Into<String>, name: impl Into<String>, pinyin: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pinyin: pinyin.into(),
            poems: Vec::new(),
        }
    }

    /// The poets.json entry describing this poet.
    pub fn index_entry(&self) -> PoetIndexEntry {
        PoetIndexEntry {
            id: self.id.clone(),
            name: self.name.clone(),
            pinyin: self.pinyin.clone(),
            poem_count: self.poems.len(),
        }
    }
}

// ── poets.json ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoetIndexEntry {
    pub id: String,
    pub name: String,
    pub pinyin: String,
    #[serde(rename = "poemCount")]
    pub poem_count: usize,
}

// ── poems.json ───────────────────────────────────────────────────────────

/// Compact search record. Keys are kept to one letter since the front end
/// downloads the whole array up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemSearchEntry {
    /// Poem title
    #[serde(rename = "t")]
    pub title: String,
    /// Poet display name
    #[serde(rename = "p")]
    pub poet_name: String,
    /// Poet id, i.e. the detail file stem
    #[serde(rename = "i")]
    pub poet_id: String,
    /// Position in the poet's `poems` list
    #[serde(rename = "x")]
    pub index: usize,
}

impl PoemSearchEntry {
    /// Flatten one poet's poems into search records. Name and id come from the
    /// index entry, titles and positions from the detail file.
    pub fn for_poet(entry: &PoetIndexEntry, poet: &Poet) -> Vec<Self> {
        poet.poems
            .iter()
            .enumerate()
            .map(|(index, poem)| Self {
                title: poem.title.clone(),
                poet_name: entry.name.clone(),
                poet_id: entry.id.clone(),
                index,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_poet() -> Poet {
        let mut poet = Poet::new("libai", "李白", "libai");
        poet.poems.push(Poem {
            title: "靜夜思".into(),
            date: "726".into(),
            content: "床前明月光".into(),
        });
        poet.poems.push(Poem {
            title: "將進酒".into(),
            ..Poem::default()
        });
        poet
    }

    #[test]
    fn test_index_entry_uses_camel_case_count() {
        let entry = sample_poet().index_entry();
        assert_eq!(entry.poem_count, 2);
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"id": "libai", "name": "李白", "pinyin": "libai", "poemCount": 2})
        );
    }

    #[test]
    fn test_search_entry_short_keys() {
        let poet = sample_poet();
        let entries = PoemSearchEntry::for_poet(&poet.index_entry(), &poet);
        assert_eq!(entries.len(), 2);
        assert_eq!(
            serde_json::to_value(&entries[1]).unwrap(),
            json!({"t": "將進酒", "p": "李白", "i": "libai", "x": 1})
        );
    }

    #[test]
    fn test_poet_detail_shape() {
        let value = serde_json::to_value(sample_poet()).unwrap();
        assert_eq!(value["poems"][0]["title"], "靜夜思");
        assert_eq!(value["poems"][0]["date"], "726");
        assert_eq!(value["poems"][0]["content"], "床前明月光");
        assert_eq!(value["poems"][1]["date"], "");
    }
}
