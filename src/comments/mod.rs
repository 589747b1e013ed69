//! Comment extraction — the blocks of comment text a file's header carries
//!
//! The resolver only needs two capabilities from a comment extractor: "does
//! this file's syntax have comments I understand" and "give me the comment
//! blocks in the first N lines". [`CommentExtractor`] is that seam;
//! [`LanguageCommentExtractor`] is the table-driven default.

pub mod languages;

use crate::ReuseResult;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;

pub use languages::{syntax_for, CommentSyntax};

// ─── Data Structures ────────────────────────────────────────────────

/// How a block was written in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentFormat {
    /// Consecutive end-of-line comments (`//`, `#`, `--`, ...)
    SingleLine,
    /// A delimited block comment (`/* */`, `<!-- -->`, ...)
    MultiLine,
}

/// One line of comment text, delimiters stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentLine {
    /// 0-based line number within the file
    pub number: usize,
    /// Byte span of `value` within the original line
    pub columns: Range<usize>,
    pub value: String,
}

impl CommentLine {
    fn new(number: usize, start: usize, value: &str) -> Self {
        Self {
            number,
            columns: start..start + value.len(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentBlock {
    pub format: CommentFormat,
    pub lines: Vec<CommentLine>,
}

impl CommentBlock {
    fn new(format: CommentFormat) -> Self {
        Self {
            format,
            lines: Vec::new(),
        }
    }

    /// Treat an entire text as one comment block, every line a candidate.
    /// Used for `.license` sidecars and files with no known comment syntax.
    pub fn synthetic(text: &str) -> Self {
        Self {
            format: CommentFormat::MultiLine,
            lines: text
                .lines()
                .enumerate()
                .map(|(number, line)| CommentLine::new(number, 0, line))
                .collect(),
        }
    }
}

// ─── Extractor Trait ────────────────────────────────────────────────

/// Source of comment blocks for a file
pub trait CommentExtractor {
    /// Whether this file's comment syntax is recognized
    fn is_supported(&self, path: &Path) -> bool;

    /// Comment blocks found in the first `max_lines` lines, in file order.
    /// A block still open at the scan limit is returned truncated.
    fn extract(&self, path: &Path, max_lines: usize) -> ReuseResult<Vec<CommentBlock>>;

    /// Like [`extract`](Self::extract), over contents the caller already read.
    /// Implementors that only know how to read `path` themselves can keep
    /// the default.
    fn extract_from(
        &self,
        path: &Path,
        _contents: &[u8],
        max_lines: usize,
    ) -> ReuseResult<Vec<CommentBlock>> {
        self.extract(path, max_lines)
    }
}

/// Default extractor backed by the [`languages`] syntax table
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageCommentExtractor;

impl LanguageCommentExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl CommentExtractor for LanguageCommentExtractor {
    fn is_supported(&self, path: &Path) -> bool {
        syntax_for(path).is_some()
    }

    fn extract(&self, path: &Path, max_lines: usize) -> ReuseResult<Vec<CommentBlock>> {
        if !self.is_supported(path) {
            return Ok(Vec::new());
        }
        let bytes = std::fs::read(path)?;
        self.extract_from(path, &bytes, max_lines)
    }

    fn extract_from(
        &self,
        path: &Path,
        contents: &[u8],
        max_lines: usize,
    ) -> ReuseResult<Vec<CommentBlock>> {
        let Some(syntax) = syntax_for(path) else {
            return Ok(Vec::new());
        };
        let text = String::from_utf8_lossy(contents);
        Ok(parse_comments(&text, syntax, max_lines))
    }
}

// ─── Parser ─────────────────────────────────────────────────────────

/// Split `text` into comment blocks according to `syntax`.
///
/// Only comments that start a line (after indentation) are recognized; a
/// trailing `// ...` after code is ignored. Runs of single-line comments form
/// one block, broken by any non-comment line.
pub fn parse_comments(text: &str, syntax: &CommentSyntax, max_lines: usize) -> Vec<CommentBlock> {
    let mut blocks = Vec::new();
    let mut group: Option<CommentBlock> = None;
    let mut open: Option<(CommentBlock, &'static str)> = None;

    for (number, line) in text.lines().take(max_lines).enumerate() {
        if let Some((mut block, end)) = open.take() {
            match line.find(end) {
                Some(pos) => {
                    block.lines.push(CommentLine::new(number, 0, &line[..pos]));
                    blocks.push(block);
                }
                None => {
                    block.lines.push(CommentLine::new(number, 0, line));
                    open = Some((block, end));
                }
            }
            continue;
        }

        let indent = line.len() - line.trim_start().len();
        let rest = &line[indent..];

        if let Some((start, end)) = syntax.multi.iter().find(|(start, _)| rest.starts_with(start)) {
            blocks.extend(group.take());
            let body_start = indent + start.len();
            let body = &line[body_start..];
            let mut block = CommentBlock::new(CommentFormat::MultiLine);
            match body.find(end) {
                Some(pos) => {
                    block.lines.push(CommentLine::new(number, body_start, &body[..pos]));
                    blocks.push(block);
                }
                None => {
                    block.lines.push(CommentLine::new(number, body_start, body));
                    open = Some((block, *end));
                }
            }
            continue;
        }

        if let Some(prefix) = syntax.single.iter().find(|prefix| rest.starts_with(*prefix)) {
            let start = indent + prefix.len();
            group
                .get_or_insert_with(|| CommentBlock::new(CommentFormat::SingleLine))
                .lines
                .push(CommentLine::new(number, start, &line[start..]));
            continue;
        }

        blocks.extend(group.take());
    }

    blocks.extend(group);
    blocks.extend(open.map(|(block, _)| block));
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn rust_syntax() -> &'static CommentSyntax {
        syntax_for(Path::new("x.rs")).unwrap()
    }

    #[test]
    fn test_single_line_run_is_one_block() {
        let text = "// SPDX-FileCopyrightText: 2023 Jane\n// SPDX-License-Identifier: MIT\n\nfn main() {}\n";
        let blocks = parse_comments(text, rust_syntax(), 50);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].format, CommentFormat::SingleLine);
        assert_eq!(blocks[0].lines.len(), 2);
        assert_eq!(blocks[0].lines[1].number, 1);
        assert_eq!(blocks[0].lines[1].value, " SPDX-License-Identifier: MIT");
        assert_eq!(blocks[0].lines[1].columns, 2..31);
    }

    #[test]
    fn test_multi_line_block() {
        let text = "/*\n * SPDX-FileCopyrightText: 2023 Jane\n */\nconst X: u8 = 1;\n";
        let blocks = parse_comments(text, rust_syntax(), 50);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].format, CommentFormat::MultiLine);
        assert_eq!(blocks[0].lines.len(), 3);
        assert_eq!(blocks[0].lines[1].value, " * SPDX-FileCopyrightText: 2023 Jane");
        assert_eq!(blocks[0].lines[2].value, " ");
    }

    #[test]
    fn test_block_on_one_line() {
        let blocks = parse_comments("/* SPDX-License-Identifier: MIT */ int x;", rust_syntax(), 50);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines[0].value, " SPDX-License-Identifier: MIT ");
        assert_eq!(blocks[0].lines[0].columns.start, 2);
    }

    #[test]
    fn test_code_line_splits_groups() {
        let text = "// first\nlet a = 1;\n// second\n";
        let blocks = parse_comments(text, rust_syntax(), 50);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lines[0].value, " first");
        assert_eq!(blocks[1].lines[0].number, 2);
    }

    #[test]
    fn test_trailing_comment_ignored() {
        let blocks = parse_comments("let a = 1; // SPDX-License-Identifier: MIT\n", rust_syntax(), 50);
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_scan_depth_limit() {
        let text = "fn a() {}\nfn b() {}\n// late comment\n";
        assert!(parse_comments(text, rust_syntax(), 2).is_empty());
        assert_eq!(parse_comments(text, rust_syntax(), 3).len(), 1);
    }

    #[test]
    fn test_unterminated_block_is_kept() {
        let blocks = parse_comments("/*\n SPDX-License-Identifier: MIT\n", rust_syntax(), 50);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines.len(), 2);
    }

    #[test]
    fn test_synthetic_block() {
        let block = CommentBlock::synthetic("one\ntwo\n");
        assert_eq!(block.lines.len(), 2);
        assert_eq!(block.lines[1].number, 1);
        assert_eq!(block.lines[1].value, "two");
    }

    #[test]
    fn test_extractor_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("build.py");
        fs::write(&path, "#!/usr/bin/env python3\n# SPDX-License-Identifier: MIT\nprint(1)\n").unwrap();

        let extractor = LanguageCommentExtractor::new();
        assert!(extractor.is_supported(&path));
        let blocks = extractor.extract(&path, 50).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines.len(), 2);
    }

    #[test]
    fn test_extract_from_contents_without_reading() {
        let extractor = LanguageCommentExtractor::new();
        let blocks = extractor
            .extract_from(Path::new("never/written.rs"), b"// SPDX-License-Identifier: MIT
", 50)
            .unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines[0].value.trim(), "SPDX-License-Identifier: MIT");
    }

    #[test]
    fn test_extractor_unsupported() {
        let extractor = LanguageCommentExtractor::new();
        assert!(!extractor.is_supported(Path::new("notes.txt")));
    }
}
