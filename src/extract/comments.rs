//! Inline column comment scan over raw SQL text.
//!
//! Works on the text rather than the syntax tree so `COMMENT '...'` clauses
//! are found even where the parser drops them. The scan is line-based and
//! loose: any `<word> <word> ... COMMENT '<text>'` on one line
//! counts, keyed by the first word.

use ahash::AHashMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Column name wrapped in backticks
static DELIMITED_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)`(\w+)`\s+\w+.*COMMENT\s+'([^']+)'").unwrap());

/// Bare column name
static UNDELIMITED_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\w+)\s+\w+.*COMMENT\s+'([^']+)'").unwrap());

/// Column name to comment map built from one text scan
#[derive(Debug, Clone, Default)]
pub struct CommentIndex {
    comments: AHashMap<String, String>,
}

impl CommentIndex {
    /// Scan `sql` with the delimited pattern, then the undelimited one.
    ///
    /// Later matches overwrite earlier ones for the same name, so the
    /// undelimited pass wins on conflicts.
    pub fn scan(sql: &str) -> Self {
        let mut comments = AHashMap::new();

        for re in [&*DELIMITED_COMMENT_RE, &*UNDELIMITED_COMMENT_RE] {
            for caps in re.captures_iter(sql) {
                if let (Some(name), Some(text)) = (caps.get(1), caps.get(2)) {
                    comments.insert(name.as_str().to_string(), text.as_str().to_string());
                }
            }
        }

        Self { comments }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.comments.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}
