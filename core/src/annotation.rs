use std::path::{Path, PathBuf};

use ::lazy_regex::{lazy_regex, Lazy, Regex};

pub const ANNOTATION_PREFIX: &str = "// verification-helper: ";

static RE_PROBLEM_ANNOTATION: Lazy<Regex> = lazy_regex!(r"^// verification-helper: PROBLEM (.*)$");

#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    #[error(transparent)]
    Io(#[from] fsutil::Error),

    #[error("Annotation comment is not found in '{}'", .0.to_string_lossy())]
    NotFound(PathBuf),

    #[error("Annotation comment does not match \"// verification-helper: PROBLEM <url>\": '{0}'")]
    Malformed(String),
}

/// `// verification-helper: PROBLEM <url>` written in a solution file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub problem_url: String,
}

impl Annotation {
    pub fn read_from_file(filepath: impl AsRef<Path>) -> Result<Self, AnnotationError> {
        let filepath = filepath.as_ref();
        let src = fsutil::read_to_string(filepath)?;
        Self::find_in_source(&src)
            .unwrap_or_else(|| Err(AnnotationError::NotFound(filepath.to_owned())))
    }

    /// The first annotation line decides: it is either a valid `PROBLEM` annotation or an error.
    /// Returns `None` if there is no annotation line at all.
    pub fn find_in_source(src: &str) -> Option<Result<Self, AnnotationError>> {
        src.lines()
            .find(|line| line.starts_with(ANNOTATION_PREFIX))
            .map(Self::parse_line)
    }

    pub fn parse_line(line: &str) -> Result<Self, AnnotationError> {
        let Some(caps) = RE_PROBLEM_ANNOTATION.captures(line) else {
            return Err(AnnotationError::Malformed(line.to_owned()));
        };
        let problem_url = caps[1].trim();
        if problem_url.is_empty() {
            return Err(AnnotationError::Malformed(line.to_owned()));
        }
        Ok(Self {
            problem_url: problem_url.to_owned(),
        })
    }
}
