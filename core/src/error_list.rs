use std::fmt;

/// Errors collected across a loop, reported together at the end.
#[derive(Debug)]
pub struct ErrorList<E>(pub Vec<E>);

impl<E> ErrorList<E> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, e: E) {
        self.0.push(e)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` if nothing was collected, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl<E> Default for ErrorList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Display> fmt::Display for ErrorList<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} error(s) occurred", self.0.len())?;
        for e in &self.0 {
            write!(f, "\n  - {:#}", e)?;
        }
        Ok(())
    }
}

impl<E: fmt::Display + fmt::Debug> std::error::Error for ErrorList<E> {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_list_is_ok() {
        let errs: ErrorList<String> = ErrorList::new();
        assert!(errs.into_result().is_ok());
    }

    #[test]
    fn display_lists_every_error() {
        let mut errs = ErrorList::new();
        errs.push(anyhow::anyhow!("cannot open 01.in"));
        errs.push(anyhow::anyhow!("permission denied").context("cannot compare 02.out"));

        let errs = errs.into_result().unwrap_err();
        assert_eq!(errs.len(), 2);
        assert_eq!(
            errs.to_string(),
            "2 error(s) occurred\n  - cannot open 01.in\n  - cannot compare 02.out: permission denied"
        );
    }
}
