use std::{
    ffi::OsStr,
    fs::{self, File},
    os::unix::ffi::OsStrExt as _,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

pub mod error {
    use std::{io, path::PathBuf};

    pub type Result<T> = std::result::Result<T, self::Error>;

    type Msg = &'static str;

    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("{0} ({1}): {2}")]
        SingleIO(Msg, PathBuf, #[source] io::Error),

        #[error("Cannot walk dir ({0}): {1}")]
        WalkDir(PathBuf, #[source] walkdir::Error),
    }
}
pub use error::{Error, Result};

#[must_use]
pub fn mkdir_all(path: impl AsRef<Path>) -> Result<()> {
    let dir = path.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::SingleIO("Cannot create dir", dir.to_owned(), e))
}

#[must_use]
pub fn write<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    fs::write(&filepath, contents)
        .map_err(|e| Error::SingleIO("Cannot write file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn write_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    if let Some(dir) = filepath.as_ref().parent() {
        self::mkdir_all(dir)?;
    }
    self::write(filepath, contents)
}

#[must_use]
pub fn read(filepath: impl AsRef<Path>) -> Result<Vec<u8>> {
    fs::read(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn open_file(filepath: impl AsRef<Path>) -> Result<File> {
    File::open(&filepath)
        .map_err(|e| Error::SingleIO("Cannot open file", filepath.as_ref().to_owned(), e))
}

/// Compare two files byte by byte.
/// Both files are read into memory entirely, so this is meant for small files such as testcases.
/// ```
/// let dir = tempfile::tempdir().unwrap();
/// let (a, b) = (dir.path().join("a"), dir.path().join("b"));
/// fsutil::write(&a, "42\n").unwrap();
/// fsutil::write(&b, "42").unwrap();
/// assert!(fsutil::files_are_equal(&a, &a).unwrap());
/// assert!(!fsutil::files_are_equal(&a, &b).unwrap());
/// ```
#[must_use]
pub fn files_are_equal(path1: impl AsRef<Path>, path2: impl AsRef<Path>) -> Result<bool> {
    let b1 = self::read(path1)?;
    let b2 = self::read(path2)?;
    Ok(b1 == b2)
}

/// Recursively collects regular files under `dir` whose name ends with `suffix`.
/// The result is sorted in byte-wise ascending order of the whole path,
/// so it never depends on the order the file system yields entries.
pub fn find_files_with_suffix(dir: impl AsRef<Path>, suffix: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut res = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| Error::WalkDir(dir.to_owned(), e))?;
        if entry.file_type().is_dir() {
            continue;
        }
        if entry.file_name().as_bytes().ends_with(suffix.as_bytes()) {
            res.push(entry.into_path());
        }
    }
    res.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    log::debug!(
        "Found {} files ending with '{}' in {}",
        res.len(),
        suffix,
        dir.to_string_lossy()
    );
    Ok(res)
}

/// Strip `suffix` from the tail of the path. Works on raw bytes, so non-UTF-8 paths are fine.
/// ```
/// use fsutil::strip_path_suffix;
/// use std::path::Path;
///
/// let stripped = strip_path_suffix("cache/test/01.in", ".in");
/// assert_eq!(stripped, Some(Path::new("cache/test/01").to_owned()));
/// assert_eq!(strip_path_suffix("cache/test/01.out", ".in"), None);
/// ```
pub fn strip_path_suffix(path: impl AsRef<Path>, suffix: &str) -> Option<PathBuf> {
    let bytes = path.as_ref().as_os_str().as_bytes();
    bytes
        .strip_suffix(suffix.as_bytes())
        .map(|b| PathBuf::from(OsStr::from_bytes(b)))
}

/// Append `suffix` to the tail of the path string (not as a new component).
pub fn append_path_suffix(path: impl AsRef<Path>, suffix: impl AsRef<OsStr>) -> PathBuf {
    let mut s = path.as_ref().as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}
