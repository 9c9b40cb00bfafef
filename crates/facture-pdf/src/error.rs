//! Export error types.
//!
//! Only hard failures surface here. An image that cannot be resolved or
//! decoded is NOT an error — its slot renders empty and the export
//! continues (the document must never be lost to a broken logo). A
//! capture phase that does not settle within its single bounded wait IS
//! an error: the alternative would be hanging the export forever.

use thiserror::Error;

/// Errors that abort an export.
///
/// Every message carries the `document generation failed` prefix the host
/// surfaces verbatim to the user.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Image capture did not complete within the configured bound.
    #[error("document generation failed: image capture timed out after {timeout_ms} ms")]
    CaptureTimeout { timeout_ms: u64 },

    /// The PDF library rejected the document during assembly or save.
    #[error("document generation failed: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Filesystem failure while writing the finished bytes.
    #[error("document generation failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_user_facing_prefix() {
        let err = ExportError::CaptureTimeout { timeout_ms: 15000 };
        let msg = err.to_string();
        assert!(msg.starts_with("document generation failed"));
        assert!(msg.contains("15000 ms"));
    }
}
