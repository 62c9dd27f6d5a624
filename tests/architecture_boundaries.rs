use std::fs;
use std::path::{Path, PathBuf};

fn rs_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|s| s.to_str()) == Some("rs") {
                out.push(path);
            }
        }
    }
    out.sort();
    out
}

fn rel(path: &Path) -> String {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let rel = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();
    rel.replace('\\', "/")
}

#[test]
fn metrics_module_does_no_io() {
    let file = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/system/metrics.rs");
    let content = fs::read_to_string(&file).unwrap_or_default();
    let violations: Vec<String> = ["std::fs", "std::io", "crate::system::source", "libc"]
        .iter()
        .filter(|forbidden| content.contains(*forbidden))
        .map(|forbidden| format!("{} uses forbidden `{}`", rel(&file), forbidden))
        .collect();

    assert!(
        violations.is_empty(),
        "Metrics purity violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn presentation_modules_do_not_read_procfs() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut violations = Vec::new();

    for file in [root.join("format.rs"), root.join("main.rs")] {
        let content = fs::read_to_string(&file).unwrap_or_default();
        for forbidden in ["\"/proc", "std::fs::read", "fs::read_dir"] {
            if content.contains(forbidden) {
                violations.push(format!(
                    "{} reads records directly via `{}`",
                    rel(&file),
                    forbidden
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Presentation/source boundary violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn target_os_cfg_is_scoped_to_system_platform() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut violations = Vec::new();

    for file in rs_files(&root) {
        let content = fs::read_to_string(&file).unwrap_or_default();
        if !content.contains("target_os") {
            continue;
        }

        let rel_path = rel(&file);
        if !rel_path.starts_with("src/system/platform/") {
            violations.push(format!(
                "{} contains `target_os` cfg but is outside allowed boundary",
                rel_path
            ));
        }
    }

    assert!(
        violations.is_empty(),
        "Unexpected target_os cfg usage:\n{}",
        violations.join("\n")
    );
}
