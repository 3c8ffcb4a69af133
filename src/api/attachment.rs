//! File attachments sent as multipart form parts.

use std::path::Path;

use crate::api::client::ApiError;

/// Fallback content type for unrecognised extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A file to be uploaded (certificate, avatar, consultation attachment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type of the part.
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Build an attachment, inferring the content type from the file name.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ApiError::Attachment {
                path: path.display().to_string(),
                source,
            })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::from_bytes(file_name, bytes))
    }
}

/// Guess a MIME type from a file extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_content_type_for_known_extensions() {
        assert_eq!(content_type_for("scan.PNG"), "image/png");
        assert_eq!(content_type_for("cert.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("cert.jpg"), "image/jpeg");
        assert_eq!(content_type_for("report.pdf"), "application/pdf");
        assert_eq!(content_type_for("notes"), OCTET_STREAM);
        assert_eq!(content_type_for("archive.tar.gz"), OCTET_STREAM);
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("xray.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let attachment = Attachment::from_path(&path).await.unwrap();
        assert_eq!(attachment.file_name, "xray.png");
        assert_eq!(attachment.content_type, "image/png");
        assert_eq!(attachment.bytes.len(), 4);
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = Attachment::from_path(tmp.path().join("missing.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Attachment { .. }));
    }
}
