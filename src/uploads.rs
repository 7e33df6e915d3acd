use std::path::Path;

use actix_multipart::form::tempfile::TempFile;
use thiserror::Error;
use uuid::Uuid;

/// Image types accepted for product pictures and avatars.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Errors raised while persisting an uploaded file.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("uploaded file has no usable file name")]
    MissingFileName,
    #[error("unsupported file type `{extension}`")]
    UnsupportedType { extension: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Persist an uploaded file under `dir` with a generated name, keeping only
/// the (validated) extension from the client-supplied file name. Returns the
/// stored file name.
pub fn store_upload(file: &TempFile, dir: &Path, allowed: &[&str]) -> Result<String, UploadError> {
    let extension = file
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).extension())
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase())
        .ok_or(UploadError::MissingFileName)?;

    if !allowed.contains(&extension.as_str()) {
        return Err(UploadError::UnsupportedType { extension });
    }

    std::fs::create_dir_all(dir)?;

    let stored_name = format!("{}.{extension}", Uuid::new_v4());
    std::fs::copy(file.file.path(), dir.join(&stored_name))?;

    Ok(stored_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    fn upload(file_name: Option<&str>, contents: &[u8]) -> TempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents).expect("write temp file");
        TempFile {
            file,
            content_type: None,
            file_name: file_name.map(|name| name.to_string()),
            size: contents.len(),
        }
    }

    #[test]
    fn stores_file_with_generated_name() {
        let dir = tempdir().expect("create temp dir");
        let file = upload(Some("photo.JPG"), b"image-bytes");

        let stored = store_upload(&file, dir.path(), IMAGE_EXTENSIONS).expect("stored");
        assert!(stored.ends_with(".jpg"));

        let contents = std::fs::read(dir.path().join(&stored)).expect("read stored file");
        assert_eq!(contents, b"image-bytes");
    }

    #[test]
    fn rejects_unsupported_extension() {
        let dir = tempdir().expect("create temp dir");
        let file = upload(Some("script.sh"), b"#!/bin/sh");

        let err = store_upload(&file, dir.path(), IMAGE_EXTENSIONS).expect_err("rejected");
        assert!(matches!(err, UploadError::UnsupportedType { extension } if extension == "sh"));
    }

    #[test]
    fn rejects_missing_file_name() {
        let dir = tempdir().expect("create temp dir");
        let file = upload(None, b"data");

        let err = store_upload(&file, dir.path(), IMAGE_EXTENSIONS).expect_err("rejected");
        assert!(matches!(err, UploadError::MissingFileName));
    }
}
