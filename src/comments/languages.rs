//! Comment syntax table, keyed by file extension or well-known file name

use std::path::Path;

/// Comment delimiters for one family of languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    /// Prefixes that open a comment running to the end of the line
    pub single: &'static [&'static str],
    /// (start, end) delimiter pairs for block comments
    pub multi: &'static [(&'static str, &'static str)],
}

const C_STYLE: CommentSyntax = CommentSyntax {
    single: &["//"],
    multi: &[("/*", "*/")],
};

const CSS: CommentSyntax = CommentSyntax {
    single: &[],
    multi: &[("/*", "*/")],
};

const HASH: CommentSyntax = CommentSyntax {
    single: &["#"],
    multi: &[],
};

const PYTHON: CommentSyntax = CommentSyntax {
    single: &["#"],
    multi: &[("\"\"\"", "\"\"\""), ("'''", "'''")],
};

const RUBY: CommentSyntax = CommentSyntax {
    single: &["#"],
    multi: &[("=begin", "=end")],
};

const POWERSHELL: CommentSyntax = CommentSyntax {
    single: &["#"],
    multi: &[("<#", "#>")],
};

const DOUBLE_DASH: CommentSyntax = CommentSyntax {
    single: &["--"],
    multi: &[],
};

const LUA: CommentSyntax = CommentSyntax {
    single: &["--"],
    multi: &[("--[[", "]]")],
};

const HASKELL: CommentSyntax = CommentSyntax {
    single: &["--"],
    multi: &[("{-", "-}")],
};

const MARKUP: CommentSyntax = CommentSyntax {
    single: &[],
    multi: &[("<!--", "-->")],
};

const PERCENT: CommentSyntax = CommentSyntax {
    single: &["%"],
    multi: &[],
};

const SEMICOLON: CommentSyntax = CommentSyntax {
    single: &[";"],
    multi: &[],
};

/// Look up the comment syntax for a path, by file name first, then extension
pub fn syntax_for(path: &Path) -> Option<&'static CommentSyntax> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();

    match name.as_str() {
        "dockerfile" | "containerfile" | "makefile" | "gnumakefile" | "cmakelists.txt"
        | "gemfile" | "rakefile" | "vagrantfile" | "procfile" | ".gitignore"
        | ".gitattributes" | ".gitmodules" | ".editorconfig" | ".dockerignore"
        | "requirements.txt" => return Some(&HASH),
        _ => {}
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let syntax = match ext.as_str() {
        "rs" | "c" | "h" | "cc" | "cpp" | "cxx" | "hpp" | "hxx" | "js" | "mjs" | "cjs"
        | "jsx" | "ts" | "mts" | "cts" | "tsx" | "java" | "kt" | "kts" | "go" | "swift"
        | "scala" | "cs" | "php" | "dart" | "sol" | "groovy" | "gradle" | "proto" | "zig"
        | "scss" | "less" | "jsonc" | "json5" => &C_STYLE,
        "css" => &CSS,
        "py" | "pyi" => &PYTHON,
        "rb" => &RUBY,
        "ps1" | "psm1" => &POWERSHELL,
        "sh" | "bash" | "zsh" | "fish" | "pl" | "pm" | "r" | "yml" | "yaml" | "toml"
        | "cmake" | "mk" | "nix" | "tf" | "conf" | "cfg" | "dockerfile" | "jl" | "ex"
        | "exs" | "nim" | "awk" | "sed" | "coffee" => &HASH,
        "sql" | "ada" | "adb" | "ads" | "elm" | "vhd" | "vhdl" => &DOUBLE_DASH,
        "lua" => &LUA,
        "hs" | "lhs" => &HASKELL,
        "html" | "htm" | "xml" | "xhtml" | "svg" | "vue" | "md" | "markdown" | "xsd"
        | "xsl" | "plist" => &MARKUP,
        "tex" | "sty" | "cls" | "erl" | "hrl" | "m" => &PERCENT,
        "lisp" | "el" | "clj" | "cljs" | "scm" | "ini" | "asm" | "s" => &SEMICOLON,
        _ => return None,
    };

    Some(syntax)
}
