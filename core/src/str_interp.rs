//! `#{name}` style interpolation used for build command templates.
//! `##` is an escaped `#`. A `#` followed by anything else is kept as is.

use std::{borrow::Borrow, collections::HashMap, ffi::OsStr, hash::Hash};

pub type Result = std::result::Result<String, InterpError>;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InterpError {
    #[error("Undefined variable '{0}' at {}", .1+1)]
    UndefinedVar(String, usize),

    #[error("Unclosed brace (found '#{{' at {})", .0+1)]
    UnclosedBrace(usize),
}

pub fn interp<K, V>(template: &str, variables: &HashMap<K, V>) -> Result
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<OsStr>,
{
    let mut res = String::with_capacity(template.len() * 2);
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c != '#' {
            res.push(c);
            continue;
        }
        match chars.peek() {
            Some((_, '#')) => {
                chars.next();
                res.push('#');
            }
            Some((_, '{')) => {
                chars.next();
                let mut var_name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => var_name.push(c),
                        None => return Err(InterpError::UnclosedBrace(pos)),
                    }
                }
                let Some(value) = variables.get(var_name.as_str()) else {
                    return Err(InterpError::UndefinedVar(var_name, pos));
                };
                res += value.as_ref().to_string_lossy().as_ref();
            }
            _ => res.push('#'),
        }
    }

    Ok(res)
}

#[cfg(test)]
mod test {
    use super::*;

    fn vars() -> HashMap<&'static str, &'static str> {
        let mut m = HashMap::new();
        m.insert("sourcePath", "src/main.go");
        m.insert("outputPath", ".aoj-verify/tmp1/main");
        m
    }

    #[test]
    fn interp_ok() {
        let vars = vars();
        assert_eq!(interp("go version", &vars).unwrap(), "go version");
        assert_eq!(
            interp("go build -o #{outputPath} #{sourcePath}", &vars).unwrap(),
            "go build -o .aoj-verify/tmp1/main src/main.go"
        );
        assert_eq!(
            interp("#{sourcePath}#{outputPath}", &vars).unwrap(),
            "src/main.go.aoj-verify/tmp1/main"
        );
        assert_eq!(interp("{sourcePath}", &vars).unwrap(), "{sourcePath}");
        assert_eq!(interp("# {sourcePath}", &vars).unwrap(), "# {sourcePath}");
        assert_eq!(interp("echo ##{sourcePath}", &vars).unwrap(), "echo #{sourcePath}");
        assert_eq!(interp("#", &vars).unwrap(), "#");
        assert_eq!(interp("##", &vars).unwrap(), "#");
        assert_eq!(interp("###", &vars).unwrap(), "##");
    }

    #[test]
    fn interp_ng() {
        let vars = vars();
        assert_eq!(
            interp("cc #{compiler}", &vars).unwrap_err(),
            InterpError::UndefinedVar("compiler".to_owned(), 3)
        );
        assert_eq!(
            interp("go build #{sourcePath", &vars).unwrap_err(),
            InterpError::UnclosedBrace(9),
        );
    }
}
