/// Data Transfer Objects for application layer
///
/// DTOs carry command input from the CLI into the use cases and their
/// reports back out, keeping the domain layer isolated.
mod output_format;
mod scan_request;
mod upload_request;

pub use output_format::OutputFormat;
pub use scan_request::ScanRequest;
pub use upload_request::{DocumentType, UploadRequest};
