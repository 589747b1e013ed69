//! `Files:` glob patterns
//!
//! DEP-5 globs are deliberately small: `*` matches any run of characters
//! (slashes included), `?` matches exactly one, and a backslash escapes `*`,
//! `?` or itself. Patterns are relative to the repository root.

use regex::Regex;

#[derive(Debug, Clone)]
pub struct FilePattern {
    raw: String,
    regex: Regex,
}

impl FilePattern {
    pub fn new(raw: &str) -> Result<Self, regex::Error> {
        let glob = raw.strip_prefix("./").unwrap_or(raw);
        let mut pattern = String::with_capacity(glob.len() + 8);
        pattern.push('^');

        let mut chars = glob.chars();
        while let Some(c) = chars.next() {
            match c {
                '*' => pattern.push_str(".*"),
                '?' => pattern.push('.'),
                '\\' => match chars.next() {
                    Some(escaped) => pattern.push_str(&regex::escape(&escaped.to_string())),
                    None => pattern.push_str(r"\\"),
                },
                other => pattern.push_str(&regex::escape(&other.to_string())),
            }
        }

        pattern.push('$');
        Ok(Self {
            raw: raw.to_string(),
            regex: Regex::new(&pattern)?,
        })
    }

    /// Match a repository-relative path, with or without a leading `./`
    pub fn matches(&self, path: &str) -> bool {
        let path = path.strip_prefix("./").unwrap_or(path);
        self.regex.is_match(path)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for FilePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
