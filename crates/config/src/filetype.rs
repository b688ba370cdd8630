//! File-type tagging
//!
//! Derives coarse type tags (`python`, `yaml`, ...) from a path so hooks
//! can scope themselves with `types = [...]` instead of spelling out
//! extension regexes. Every path carries the `text` tag; the rest come
//! from the extension or a well-known file name.

use std::path::Path;

/// Hook identifiers with a built-in type constraint
///
/// When a hook declares none of `files`/`exclude`/`types`, the filter
/// falls back to the tags implied by the hook's identity. Unknown
/// identifiers imply no constraint (all files apply).
#[must_use]
pub fn default_types_for(hook_id: &str) -> &'static [&'static str] {
    match hook_id {
        "check-yaml" => &["yaml"],
        "check-toml" => &["toml"],
        "check-json" => &["json"],
        "black" | "flake8" | "isort" | "mypy" | "ruff" | "ruff-format" => &["python"],
        "end-of-file-fixer" | "trailing-whitespace" | "mixed-line-ending" => &["text"],
        _ => &[],
    }
}

/// Compute the type tags carried by a path
#[must_use]
pub fn tags_for(path: &Path) -> Vec<&'static str> {
    let mut tags = vec!["text"];

    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        match name {
            "Dockerfile" => {
                tags.push("dockerfile");
                return tags;
            }
            "Makefile" => {
                tags.push("makefile");
                return tags;
            }
            _ => {}
        }
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let tag = match ext {
        "py" | "pyi" => Some("python"),
        "yaml" | "yml" => Some("yaml"),
        "toml" => Some("toml"),
        "json" => Some("json"),
        "md" | "markdown" => Some("markdown"),
        "rs" => Some("rust"),
        "sh" | "bash" | "zsh" => Some("shell"),
        "js" | "mjs" | "cjs" => Some("javascript"),
        "ts" => Some("typescript"),
        "go" => Some("go"),
        "rb" => Some("ruby"),
        "c" | "h" => Some("c"),
        "html" | "htm" => Some("html"),
        "css" => Some("css"),
        _ => None,
    };
    if let Some(tag) = tag {
        tags.push(tag);
    }

    tags
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::path::Path;

    #[test]
    fn test_tags_include_text_for_everything() {
        assert!(tags_for(Path::new("README")).contains(&"text"));
        assert!(tags_for(Path::new("a.py")).contains(&"text"));
    }

    #[test]
    fn test_extension_tags() {
        assert!(tags_for(Path::new("src/main.py")).contains(&"python"));
        assert!(tags_for(Path::new("conf/app.yaml")).contains(&"yaml"));
        assert!(tags_for(Path::new("conf/app.yml")).contains(&"yaml"));
        assert!(tags_for(Path::new("Cargo.toml")).contains(&"toml"));
        assert!(tags_for(Path::new("lib.rs")).contains(&"rust"));
    }

    #[test]
    fn test_well_known_filenames() {
        assert!(tags_for(Path::new("docker/Dockerfile")).contains(&"dockerfile"));
        assert!(tags_for(Path::new("Makefile")).contains(&"makefile"));
    }

    #[test]
    fn test_default_types_for_known_hooks() {
        assert_eq!(default_types_for("check-yaml"), &["yaml"]);
        assert_eq!(default_types_for("black"), &["python"]);
        assert_eq!(default_types_for("mypy"), &["python"]);
        assert_eq!(default_types_for("end-of-file-fixer"), &["text"]);
    }

    #[test]
    fn test_default_types_for_unknown_hook_is_unconstrained() {
        assert!(default_types_for("my-custom-check").is_empty());
    }
}
