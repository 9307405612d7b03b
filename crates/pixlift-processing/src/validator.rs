//! Content-type validation for incoming files.

use pixlift_core::error::AppError;
use std::collections::HashSet;

/// Metadata accompanying a file handed to the pipeline. Transports disagree
/// on where the content type lives, so both candidates are carried and the
/// first present one wins.
#[derive(Debug, Clone, Default)]
pub struct FileMetadata {
    /// Content type as reported by the client library (`mimetype`).
    pub mime_type: Option<String>,
    /// Content type from the transport headers (`content-type`).
    pub content_type_header: Option<String>,
}

impl FileMetadata {
    /// First present wins: `mime_type`, then the header.
    pub fn effective_content_type(&self) -> Option<&str> {
        self.mime_type
            .as_deref()
            .or(self.content_type_header.as_deref())
    }
}

/// Check the file's content type against an allow-list, case-insensitively.
/// A file with no content type at all is rejected.
pub fn validate_content_type(
    metadata: &FileMetadata,
    allowed: &HashSet<String>,
) -> Result<(), AppError> {
    let Some(content_type) = metadata.effective_content_type() else {
        return Err(AppError::Validation(
            "file has no content type".to_string(),
        ));
    };
    let normalized = content_type.to_lowercase();
    if allowed.iter().any(|ct| ct.to_lowercase() == normalized) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "content type {content_type} is not allowed"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> HashSet<String> {
        ["image/jpeg", "image/png"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_accepts_allowed_mime_type() {
        let metadata = FileMetadata {
            mime_type: Some("image/jpeg".to_string()),
            content_type_header: None,
        };
        assert!(validate_content_type(&metadata, &allowed()).is_ok());
    }

    #[test]
    fn test_case_insensitive_match() {
        let metadata = FileMetadata {
            mime_type: Some("IMAGE/PNG".to_string()),
            content_type_header: None,
        };
        assert!(validate_content_type(&metadata, &allowed()).is_ok());
    }

    #[test]
    fn test_mime_type_wins_over_header() {
        let metadata = FileMetadata {
            mime_type: Some("application/pdf".to_string()),
            content_type_header: Some("image/jpeg".to_string()),
        };
        // The header would pass, but mimetype is present and checked first.
        assert!(validate_content_type(&metadata, &allowed()).is_err());
    }

    #[test]
    fn test_header_used_when_mime_type_absent() {
        let metadata = FileMetadata {
            mime_type: None,
            content_type_header: Some("image/png".to_string()),
        };
        assert!(validate_content_type(&metadata, &allowed()).is_ok());
    }

    #[test]
    fn test_missing_both_rejects() {
        let metadata = FileMetadata::default();
        let err = validate_content_type(&metadata, &allowed()).unwrap_err();
        assert_eq!(err.error_type(), "Validation");
    }

    #[test]
    fn test_disallowed_type_names_the_offender() {
        let metadata = FileMetadata {
            mime_type: Some("video/mp4".to_string()),
            content_type_header: None,
        };
        let err = validate_content_type(&metadata, &allowed()).unwrap_err();
        assert!(err.user_message().contains("video/mp4"));
    }
}
