//! Structural checks: every source module has a mirrored unit test file

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    // Entry points and module declaration files carry no logic of their own
    fn is_exempt(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn collect(dir: &Path, base: &Path, paths: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_prefix| io::Error::other("path outside base directory"))?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                paths.insert(relative);
                collect(&path, base, paths)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(())
    }

    fn relative_paths(dir: &str) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        let root = Path::new(dir);
        if let Err(error) = collect(root, root, &mut paths) {
            assert!(!root.exists(), "Failed to read {dir}: {error}");
        }
        paths
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let tests = relative_paths(UNIT_DIR);
        let missing: Vec<String> = relative_paths(SRC_DIR)
            .into_iter()
            .filter(|path| !is_exempt(path) && !tests.contains(path))
            .map(|path| format!("  - src/{path} -> {UNIT_DIR}/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let sources = relative_paths(SRC_DIR);
        let orphaned: Vec<String> = relative_paths(UNIT_DIR)
            .into_iter()
            .filter(|path| !path.ends_with("mod.rs") && !sources.contains(path))
            .map(|path| format!("  - {UNIT_DIR}/{path} (no src/{path})"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a source counterpart:\n{}",
            orphaned.join("\n")
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_root = Path::new("tests");
        let mut files = BTreeSet::new();
        if let Err(error) = collect(tests_root, tests_root, &mut files) {
            assert!(!tests_root.exists(), "Failed to scan tests: {error}");
        }

        let empty: Vec<String> = files
            .into_iter()
            .filter(|path| path.ends_with(".rs") && !path.ends_with("mod.rs"))
            .filter(|path| {
                fs::read_to_string(tests_root.join(path))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|path| format!("  - tests/{path}"))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            empty.join("\n")
        );
    }
}
