//! Paging window for the paged query endpoints.

use crate::consts::MAX_RESULT_WINDOW;
use crate::errors::{AnnoqError, Result};

/// One page of results: a start offset and a page size.
///
/// The backend refuses to address results past [`MAX_RESULT_WINDOW`], so
/// `from + size` must stay within it. Dispatchers validate the window before
/// anything goes on the wire; use the download endpoints to read past the
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Offset of the first record of the page.
    pub from: u64,
    /// Number of records requested.
    pub size: u64,
}

impl PageWindow {
    pub fn new(from: u64, size: u64) -> PageWindow {
        PageWindow { from, size }
    }

    /// Check the window against the backend's paging limits.
    ///
    /// Fails with [`AnnoqError::InvalidArgument`] when the page is empty or
    /// reaches past [`MAX_RESULT_WINDOW`].
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(AnnoqError::InvalidArgument(
                "page size must be at least 1".to_string(),
            ));
        }
        match self.from.checked_add(self.size) {
            Some(end) if end <= MAX_RESULT_WINDOW => Ok(()),
            _ => Err(AnnoqError::InvalidArgument(format!(
                "page [{}, {} + {}) reaches past the last addressable offset {}",
                self.from, self.from, self.size, MAX_RESULT_WINDOW
            ))),
        }
    }
}

impl Default for PageWindow {
    /// The backend's own default page: the first ten records.
    fn default() -> PageWindow {
        PageWindow { from: 0, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 10)]
    #[case(0, 10_000)]
    #[case(9_999, 1)]
    #[case(5_000, 5_000)]
    fn window_within_limits_is_accepted(#[case] from: u64, #[case] size: u64) {
        assert!(PageWindow::new(from, size).validate().is_ok());
    }

    #[rstest]
    #[case(0, 0)]
    #[case(500, 0)]
    fn empty_page_is_rejected(#[case] from: u64, #[case] size: u64) {
        let err = PageWindow::new(from, size).validate().unwrap_err();
        assert!(matches!(err, AnnoqError::InvalidArgument(_)));
    }

    #[rstest]
    #[case(0, 10_001)]
    #[case(9_999, 2)]
    #[case(10_000, 1)]
    #[case(u64::MAX, 1)]
    fn window_past_backend_limit_is_rejected(#[case] from: u64, #[case] size: u64) {
        let err = PageWindow::new(from, size).validate().unwrap_err();
        assert!(matches!(err, AnnoqError::InvalidArgument(_)));
    }

    #[test]
    fn boundary_window_is_inclusive() {
        assert!(PageWindow::new(9_000, 1_000).validate().is_ok());
        assert!(PageWindow::new(9_000, 1_001).validate().is_err());
    }

    #[test]
    fn default_window_is_first_ten() {
        let window = PageWindow::default();
        assert_eq!(window.from, 0);
        assert_eq!(window.size, 10);
        assert!(window.validate().is_ok());
    }
}
