use std::{
    io,
    path::{Path, PathBuf},
};

pub const INPUT_FILE_SUFFIX: &str = ".in";
pub const OUTPUT_FILE_SUFFIX: &str = ".out";

/// A pair of `<name>.in` and `<name>.out` on the file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsTestcase {
    name: String,
    input_file_path: PathBuf,
    expected_file_path: PathBuf,
}

impl FsTestcase {
    pub fn new(
        name: impl Into<String>,
        input: impl Into<PathBuf>,
        expected: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            input_file_path: input.into(),
            expected_file_path: expected.into(),
        }
    }

    /// Build a testcase from its input file path.
    /// The name is the path relative to `dir` without the `.in` suffix,
    /// so a flat testcase dir gives names like `in1`, `02_random`.
    pub fn from_input_file_path(dir: impl AsRef<Path>, input: impl AsRef<Path>) -> Option<Self> {
        let input = input.as_ref();
        let base = fsutil::strip_path_suffix(input, INPUT_FILE_SUFFIX)?;
        let expected = fsutil::append_path_suffix(&base, OUTPUT_FILE_SUFFIX);
        let name = base.strip_prefix(dir.as_ref()).unwrap_or(&base);
        Some(Self::new(name.to_string_lossy(), input, expected))
    }

    /// Find every testcase under `dir` (recursively), sorted by input file path.
    /// Every `*.in` file found becomes exactly one testcase.
    pub fn enumerate(dir: impl AsRef<Path>) -> fsutil::Result<Vec<Self>> {
        let dir = dir.as_ref();
        fsutil::find_files_with_suffix(dir, INPUT_FILE_SUFFIX)?
            .into_iter()
            .map(|path| {
                Self::from_input_file_path(dir, &path).ok_or_else(|| {
                    let e = io::Error::from(io::ErrorKind::InvalidInput);
                    fsutil::Error::SingleIO("Not a testcase input file", path, e)
                })
            })
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_file_path(&self) -> &Path {
        &self.input_file_path
    }

    pub fn expected_file_path(&self) -> &Path {
        &self.expected_file_path
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_input_file_path_ok() {
        let t = FsTestcase::from_input_file_path("cache/test", "cache/test/in3.in").unwrap();
        assert_eq!(t.name(), "in3");
        assert_eq!(t.input_file_path(), Path::new("cache/test/in3.in"));
        assert_eq!(t.expected_file_path(), Path::new("cache/test/in3.out"));

        assert_eq!(FsTestcase::from_input_file_path("cache/test", "cache/test/in3.out"), None);
    }

    #[test]
    fn enumerate_is_sorted_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for name in ["in10", "in2", "in1", "nested/in0"] {
            fsutil::write_with_mkdir(root.join(format!("{name}.in")), "").unwrap();
            fsutil::write_with_mkdir(root.join(format!("{name}.out")), "").unwrap();
        }

        let names: Vec<_> = FsTestcase::enumerate(root)
            .unwrap()
            .iter()
            .map(|t| t.name().to_owned())
            .collect();
        assert_eq!(names, ["in1", "in10", "in2", "nested/in0"]);
    }

    #[test]
    fn enumerate_keeps_non_utf8_names() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt as _};

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for name in [&b"a"[..], &b"b\xff"[..]] {
            let base = root.join(OsStr::from_bytes(name));
            fsutil::write(fsutil::append_path_suffix(&base, ".in"), "").unwrap();
            fsutil::write(fsutil::append_path_suffix(&base, ".out"), "").unwrap();
        }

        let testcases = FsTestcase::enumerate(root).unwrap();
        assert_eq!(testcases.len(), 2);
        assert_eq!(testcases[0].name(), "a");
        assert_eq!(testcases[1].name(), "b\u{FFFD}");
        assert_eq!(
            testcases[1].expected_file_path(),
            root.join(OsStr::from_bytes(b"b\xff.out"))
        );
    }

    #[test]
    fn enumerate_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FsTestcase::enumerate(dir.path()).unwrap().is_empty());
    }
}
