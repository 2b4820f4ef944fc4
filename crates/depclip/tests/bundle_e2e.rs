use std::fs;
use std::path::Path;

use depclip::app::bundle::{BundleFormat, BundleRenderer};
use depclip::app::walk::Walker;
use depclip::cli::{Cli, execute};
use depclip::infra::clipboard::MemorySink;
use depclip::infra::config::Config;
use depclip::infra::ignore::IgnoreMatcher;

fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, contents).expect("write file");
    }
}

#[test]
fn python_entry_bundles_its_closure_in_discovery_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().canonicalize().expect("canonical root");
    write_tree(
        &root,
        &[
            ("app/main.py", "from .utils import helper\nimport os\n"),
            ("app/utils.py", "helper = 1\n"),
        ],
    );

    let config = Config::default();
    let ignore = IgnoreMatcher::load(&root, &config).expect("ignore matcher");
    let walker = Walker::new(&root, "@", &ignore);
    let files = walker.walk(&root.join("app/main.py")).expect("walk");

    let rendered = BundleRenderer::new()
        .expect("renderer")
        .render(&files, &root, BundleFormat::Tagged)
        .expect("render");

    let main_pos = rendered.find("<file>app/main.py</file>").expect("main header");
    let utils_pos = rendered.find("<file>app/utils.py</file>").expect("utils header");
    assert!(main_pos < utils_pos);
    assert!(!rendered.contains("<file>os"));
}

#[test]
fn execute_delivers_bundle_to_the_injected_sink() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().canonicalize().expect("canonical root");
    fs::create_dir_all(root.join(".git")).expect("git marker");
    write_tree(
        &root,
        &[
            ("src/main.ts", "import { a } from './a'\nimport 'react'\n"),
            ("src/a.ts", "export const a = 1;\n"),
        ],
    );

    let cli = Cli {
        entry: root.join("src/main.ts"),
        format: None,
        output: None,
        stdout: false,
        no_copy: false,
        alias: None,
    };

    let mut sink = MemorySink::default();
    execute(&cli, &mut sink).expect("execute");

    assert!(sink.contents.contains("<file>src/main.ts</file>"));
    assert!(sink.contents.contains("<file>src/a.ts</file>"));
    assert!(!sink.contents.contains("<file>react"));
}

#[test]
fn execute_writes_bundle_file_when_requested() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().canonicalize().expect("canonical root");
    fs::create_dir_all(root.join(".git")).expect("git marker");
    write_tree(&root, &[("main.py", "import os\n")]);

    let output = root.join("out/bundle.txt");
    let cli = Cli {
        entry: root.join("main.py"),
        format: Some(BundleFormat::Markdown),
        output: Some(output.clone()),
        stdout: false,
        no_copy: true,
        alias: None,
    };

    let mut sink = MemorySink::default();
    execute(&cli, &mut sink).expect("execute");

    let written = fs::read_to_string(output).expect("bundle file");
    assert!(written.contains("## main.py"));
    assert!(sink.contents.is_empty());
}
