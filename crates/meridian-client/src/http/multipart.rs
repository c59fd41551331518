//! Multipart form-data body construction for file uploads.

use bytes::Bytes;
use uuid::Uuid;

/// A file to include in a multipart upload.
///
/// # Example
///
/// ```ignore
/// use meridian_client::http::MediaFile;
///
/// let avatar = MediaFile::new("avatar", "avatar.png", "image/png", png_bytes);
/// let response = client.upload("/profile").file(avatar).send().await?;
/// ```
#[derive(Clone, Debug)]
pub struct MediaFile {
    /// Form field name for this part.
    pub field_name: String,
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type of the file contents.
    pub mime_type: String,
    /// Raw file bytes.
    pub data: Bytes,
}

impl MediaFile {
    /// Create a new media file part.
    pub fn new(
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// An in-progress `multipart/form-data` body.
///
/// Parts are written in the order the caller adds them; `finish()` appends
/// the closing boundary line. Every line terminator is CRLF.
pub(crate) struct MultipartBody {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartBody {
    /// Create an empty body with a fresh random boundary token.
    pub(crate) fn new() -> Self {
        Self {
            boundary: Uuid::new_v4().to_string(),
            buf: Vec::new(),
        }
    }

    /// The `Content-Type` header value carrying the boundary token.
    pub(crate) fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Append a scalar form field part.
    pub(crate) fn field(&mut self, name: &str, value: &str) {
        self.open_part();
        self.buf.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
    }

    /// Append a file part.
    pub(crate) fn file(&mut self, file: &MediaFile) {
        self.open_part();
        self.buf.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                file.field_name, file.file_name
            )
            .as_bytes(),
        );
        self.buf
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.mime_type).as_bytes());
        self.buf.extend_from_slice(&file.data);
        self.buf.extend_from_slice(b"\r\n");
    }

    /// Append the closing boundary line and return the assembled body.
    pub(crate) fn finish(mut self) -> Bytes {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        Bytes::from(self.buf)
    }

    fn open_part(&mut self) {
        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
    }
}
