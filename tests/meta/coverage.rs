//! Keeps `tests/unit` in lockstep with `src`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Paths of `.rs` files (and directories) below `base`, relative to it
    fn relative_rust_paths(dir: &Path, base: &Path, out: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(io::Error::other)?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                out.insert(relative);
                relative_rust_paths(&path, base, out)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                out.insert(relative);
            }
        }
        Ok(())
    }

    fn collect(dir: &str) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        let root = Path::new(dir);
        if let Err(error) = relative_rust_paths(root, root, &mut paths) {
            assert!(!root.exists(), "Failed to scan {dir}: {error}");
        }
        paths
    }

    fn is_structural(path: &str) -> bool {
        path == "main.rs" || path == "lib.rs" || path.ends_with("mod.rs")
    }

    // Tests every source file has a unit test file at the same path
    // Verified by adding an untested source file
    #[test]
    fn test_every_source_file_is_mirrored() {
        let tests = collect("tests/unit");
        let missing: Vec<_> = collect("src")
            .into_iter()
            .filter(|p| !is_structural(p) && !tests.contains(p))
            .map(|p| format!("  - src/{p} -> tests/unit/{p}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives its source file
    // Verified by renaming a source file
    #[test]
    fn test_every_unit_test_has_a_source() {
        let sources = collect("src");
        let orphaned: Vec<_> = collect("tests/unit")
            .into_iter()
            .filter(|p| !p.ends_with("mod.rs") && !sources.contains(p))
            .map(|p| format!("  - tests/unit/{p}"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a source counterpart:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests each non-structural test file declares at least one test
    // Verified by emptying a test file
    #[test]
    fn test_test_files_contain_tests() {
        let empty: Vec<_> = collect("tests")
            .into_iter()
            .filter(|p| p.ends_with(".rs") && !is_structural(p))
            .filter(|p| {
                fs::read_to_string(Path::new("tests").join(p))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without #[test] functions:\n{}",
            empty.join("\n")
        );
    }
}
