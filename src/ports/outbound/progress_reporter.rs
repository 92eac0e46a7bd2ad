/// ProgressReporter port for reporting progress during operations
///
/// This port abstracts progress reporting (e.g., to stderr)
/// to provide user feedback during long-running operations.
/// Implementations must be shareable across concurrent polling tasks.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Shows or updates a live status line (spinner) for a long wait
    ///
    /// # Arguments
    /// * `message` - The status to display
    fn report_status(&self, message: &str);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation, clearing any live status line
    fn report_completion(&self, message: &str);
}

/// Lets several use cases share one reporter (and its spinner)
impl<T: ProgressReporter + ?Sized> ProgressReporter for &T {
    fn report(&self, message: &str) {
        (**self).report(message)
    }

    fn report_status(&self, message: &str) {
        (**self).report_status(message)
    }

    fn report_error(&self, message: &str) {
        (**self).report_error(message)
    }

    fn report_completion(&self, message: &str) {
        (**self).report_completion(message)
    }
}
