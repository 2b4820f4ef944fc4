//! Language-specific import extraction.
//!
//! This is a line-oriented regex scan, not a parser. Comment lines and
//! triple-quoted blocks are filtered best-effort, so imports hidden inside
//! unusual string literals can still slip through. Known limitation.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::model::{ImportKind, ImportSpecifier, Language};

static PYTHON_FROM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^from\s+(\.*[A-Za-z_][\w.]*|\.+)\s+import\b").unwrap());

static PYTHON_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^import\s+([A-Za-z_][\w.]*(?:\s+as\s+\w+)?(?:\s*,\s*[A-Za-z_][\w.]*(?:\s+as\s+\w+)?)*)")
        .unwrap()
});

static JS_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"\bexport\b[^'"`;]*?\bfrom\s*['"`](?P<reexport>[^'"`]+)['"`]"#,
        r#"|\bimport\b[^'"`;]*?\bfrom\s*['"`](?P<esfrom>[^'"`]+)['"`]"#,
        r#"|\bimport\s*['"`](?P<bare>[^'"`]+)['"`]"#,
        r#"|\brequire\s*\(\s*['"`](?P<require>[^'"`]+)['"`]\s*\)"#,
    ))
    .unwrap()
});

/// Extract raw import specifiers in first-occurrence order.
///
/// No dedup happens here; the walker deduplicates against its visited set.
pub fn extract(contents: &str, language: Language) -> Vec<ImportSpecifier> {
    match language {
        Language::Python => extract_python(contents),
        Language::JavaScript => extract_js(contents),
        Language::Unknown => Vec::new(),
    }
}

fn extract_python(contents: &str) -> Vec<ImportSpecifier> {
    let mut specs = Vec::new();

    for line in strip_python_comments(contents).lines() {
        let line = line.trim();

        if let Some(caps) = PYTHON_FROM_RE.captures(line) {
            specs.push(ImportSpecifier::new(&caps[1], ImportKind::FromImport));
            continue;
        }

        if let Some(caps) = PYTHON_IMPORT_RE.captures(line) {
            for module in caps[1].split(',') {
                // Drop a trailing `as name`; only the module path resolves.
                let module = module.trim().split_whitespace().next().unwrap_or("");
                if !module.is_empty() {
                    specs.push(ImportSpecifier::new(module, ImportKind::Import));
                }
            }
        }
    }

    specs
}

fn extract_js(contents: &str) -> Vec<ImportSpecifier> {
    let stripped = strip_js_comments(contents);
    let mut specs = Vec::new();

    for caps in JS_IMPORT_RE.captures_iter(&stripped) {
        let (raw, kind) = if let Some(m) = caps.name("reexport") {
            (m.as_str(), ImportKind::EsReExport)
        } else if let Some(m) = caps.name("esfrom") {
            (m.as_str(), ImportKind::EsModule)
        } else if let Some(m) = caps.name("bare") {
            (m.as_str(), ImportKind::EsModule)
        } else if let Some(m) = caps.name("require") {
            (m.as_str(), ImportKind::Require)
        } else {
            continue;
        };

        // Template literals with interpolation are dynamic imports.
        if raw.contains("${") {
            continue;
        }

        specs.push(ImportSpecifier::new(raw, kind));
    }

    specs
}

/// Blank out `#` comment lines and triple-quoted blocks so they are not
/// misparsed as imports. Line positions are preserved.
fn strip_python_comments(contents: &str) -> String {
    let mut out = String::with_capacity(contents.len());
    let mut in_block: Option<&str> = None;

    for line in contents.lines() {
        if let Some(delim) = in_block {
            if line.contains(delim) {
                in_block = None;
            }
            out.push('\n');
            continue;
        }

        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            out.push('\n');
            continue;
        }

        for delim in ["\"\"\"", "'''"] {
            if line.matches(delim).count() % 2 == 1 {
                in_block = Some(delim);
                break;
            }
        }

        out.push_str(line);
        out.push('\n');
    }

    out
}

/// Blank out `//` lines and `/* */` blocks, best-effort.
fn strip_js_comments(contents: &str) -> String {
    let mut out = String::with_capacity(contents.len());
    let mut in_block = false;

    for line in contents.lines() {
        let trimmed = line.trim_start();

        if in_block {
            if trimmed.contains("*/") {
                in_block = false;
            }
            out.push('\n');
            continue;
        }

        if trimmed.starts_with("//") {
            out.push('\n');
            continue;
        }

        if trimmed.starts_with("/*") {
            if !trimmed.contains("*/") {
                in_block = true;
            }
            out.push('\n');
            continue;
        }

        out.push_str(line);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raws(contents: &str, language: Language) -> Vec<String> {
        extract(contents, language)
            .into_iter()
            .map(|spec| spec.raw)
            .collect()
    }

    #[test]
    fn python_import_forms() {
        let src = "\
import os
import a.b as c
import x, y
from .sub import thing
from .. import helper
from pkg.mod import A, B as C
";
        assert_eq!(
            raws(src, Language::Python),
            vec!["os", "a.b", "x", "y", ".sub", "..", "pkg.mod"]
        );
    }

    #[test]
    fn python_kinds_are_tracked() {
        let specs = extract("import os\nfrom . import x\n", Language::Python);
        assert_eq!(specs[0].kind, ImportKind::Import);
        assert_eq!(specs[1].kind, ImportKind::FromImport);
    }

    #[test]
    fn python_comments_and_docstrings_are_skipped() {
        let src = "\
# import commented
x = 1
\"\"\"
import hidden
\"\"\"
import real
";
        assert_eq!(raws(src, Language::Python), vec!["real"]);
    }

    #[test]
    fn python_indented_imports_are_found() {
        let src = "def f():\n    import json\n    return json\n";
        assert_eq!(raws(src, Language::Python), vec!["json"]);
    }

    #[test]
    fn js_import_forms_in_order() {
        let src = "\
import React from 'react'
import './side.css'
import { a } from \"./a\"
export { b } from './b'
const c = require('../c')
import tpl from `./tpl`
";
        assert_eq!(
            raws(src, Language::JavaScript),
            vec!["react", "./side.css", "./a", "./b", "../c", "./tpl"]
        );
    }

    #[test]
    fn js_multiline_import_is_found() {
        let src = "import {\n  one,\n  two,\n} from './multi';\n";
        assert_eq!(raws(src, Language::JavaScript), vec!["./multi"]);
    }

    #[test]
    fn js_comments_are_skipped() {
        let src = "\
// import 'nope'
/*
import 'also-nope'
*/
import real from './real'
";
        assert_eq!(raws(src, Language::JavaScript), vec!["./real"]);
    }

    #[test]
    fn js_interpolated_template_specifier_is_dropped() {
        let src = "const m = require(`./plugins/${name}`)\n";
        assert!(raws(src, Language::JavaScript).is_empty());
    }

    #[test]
    fn unknown_language_yields_nothing() {
        assert!(extract("import os\n", Language::Unknown).is_empty());
    }
}
