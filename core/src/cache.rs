//! On-disk testcase cache: `<cache_root>/<md5 of problem URL>/test/<name>.{in,out}`.

use std::path::{Path, PathBuf};

use aojv_webclient::Testcase;

use crate::testing::{INPUT_FILE_SUFFIX, OUTPUT_FILE_SUFFIX};

pub fn testcase_dir(cache_root: impl AsRef<Path>, problem_url: &str) -> PathBuf {
    let key = format!("{:x}", md5::compute(problem_url));
    cache_root.as_ref().join(key).join("test")
}

pub fn testcase_file_paths(dir: impl AsRef<Path>, name: &str) -> (PathBuf, PathBuf) {
    let dir = dir.as_ref();
    (
        dir.join(format!("{}{}", name, INPUT_FILE_SUFFIX)),
        dir.join(format!("{}{}", name, OUTPUT_FILE_SUFFIX)),
    )
}

pub fn is_testcase_cached(dir: impl AsRef<Path>, name: &str) -> bool {
    let (infile, _) = testcase_file_paths(dir, name);
    infile.exists()
}

/// Returns the paths of the saved (input, expected output).
pub fn save_testcase(
    dir: impl AsRef<Path>,
    name: &str,
    t: &Testcase,
) -> fsutil::Result<(PathBuf, PathBuf)> {
    let (infile, outfile) = testcase_file_paths(dir, name);
    // `.out` first: a case counts as cached once its `.in` exists
    fsutil::write_with_mkdir(&outfile, &t.expected)?;
    fsutil::write_with_mkdir(&infile, &t.input)?;
    Ok((infile, outfile))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn testcase_dir_is_keyed_by_md5_of_url() {
        assert_eq!(
            testcase_dir(".aoj-verify/cache", "abc"),
            Path::new(".aoj-verify/cache/900150983cd24fb0d6963f7d28e17f72/test")
        );
        assert_ne!(testcase_dir("c", "abc"), testcase_dir("c", "abd"));
    }

    #[test]
    fn save_then_cached() {
        let dir = tempfile::tempdir().unwrap();
        let dir = dir.path().join("x/test");
        assert!(!is_testcase_cached(&dir, "in1"));

        let t = Testcase {
            problem_id: "ITP1_1_A".to_owned(),
            serial: 1,
            input: "".to_owned(),
            expected: "Hello World\n".to_owned(),
        };
        let (infile, outfile) = save_testcase(&dir, "in1", &t).unwrap();
        assert!(is_testcase_cached(&dir, "in1"));
        assert_eq!(infile, dir.join("in1.in"));
        assert_eq!(fsutil::read_to_string(outfile).unwrap(), "Hello World\n");
    }
}
