//! `multipart/form-data` body encoding
//!
//! Wire layout produced by [`Multipart::encode`]:
//!
//! ```text
//! --{boundary}\r\n
//! {header}: {value}\r\n      (once per header, insertion order)
//! \r\n
//! {body}\r\n
//! ...                        (repeated per part)
//! --{boundary}--\r\n
//! ```
//!
//! Bodies are written verbatim. Nothing checks that the boundary is absent
//! from them, so boundaries must be high-entropy; see [`random_boundary`].

/// Body of a single part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    Bytes(Vec<u8>),
}

impl Body {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Text(text) => text.as_bytes(),
            Body::Bytes(bytes) => bytes,
        }
    }
}

/// One part: ordered headers plus a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl Part {
    pub fn new(headers: Vec<(String, String)>, body: Body) -> Self {
        Self { headers, body }
    }

    /// A plain form field
    pub fn field(name: &str, value: impl Into<String>) -> Self {
        Self::new(
            vec![(
                "Content-Disposition".to_string(),
                format!("form-data; name=\"{}\"", escape_quoted(name)),
            )],
            Body::Text(value.into()),
        )
    }

    /// A file field carrying raw bytes
    pub fn file(name: &str, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        Self::new(
            vec![
                (
                    "Content-Disposition".to_string(),
                    format!(
                        "form-data; name=\"{}\"; filename=\"{}\"",
                        escape_quoted(name),
                        escape_quoted(file_name)
                    ),
                ),
                ("Content-Type".to_string(), content_type.to_string()),
            ],
            Body::Bytes(bytes),
        )
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        for (name, value) in &self.headers {
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(value.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(self.body.as_bytes());
        out.extend_from_slice(b"\r\n");
    }

    fn encoded_len(&self) -> usize {
        let headers: usize = self
            .headers
            .iter()
            .map(|(name, value)| name.len() + value.len() + 4)
            .sum();
        headers + 2 + self.body.as_bytes().len() + 2
    }
}

/// Percent-encode the characters that would break a quoted header parameter
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Generate a boundary token unlikely to appear in any file content
pub fn random_boundary() -> String {
    format!("modrinth-publish-{}", uuid::Uuid::new_v4().simple())
}

/// An ordered list of parts framed by a boundary token
#[derive(Debug, Clone)]
pub struct Multipart {
    boundary: String,
    parts: Vec<Part>,
}

impl Multipart {
    pub fn new(boundary: impl Into<String>) -> Self {
        let boundary = boundary.into();
        debug_assert!(!boundary.is_empty(), "multipart boundary must not be empty");
        Self {
            boundary,
            parts: Vec::new(),
        }
    }

    /// Create a body with a freshly generated boundary
    pub fn with_random_boundary() -> Self {
        Self::new(random_boundary())
    }

    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Value for the request's `Content-Type` header
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary())
    }

    /// Serialize all parts into a single buffer
    pub fn encode(&self) -> Vec<u8> {
        let delimiter_len = self.boundary.len() + 4;
        let capacity = self
            .parts
            .iter()
            .map(|p| delimiter_len + p.encoded_len())
            .sum::<usize>()
            + delimiter_len
            + 2;

        let mut out = Vec::with_capacity(capacity);
        for part in &self.parts {
            out.extend_from_slice(b"--");
            out.extend_from_slice(self.boundary.as_bytes());
            out.extend_from_slice(b"\r\n");
            part.encode_into(&mut out);
        }
        out.extend_from_slice(b"--");
        out.extend_from_slice(self.boundary.as_bytes());
        out.extend_from_slice(b"--\r\n");
        out
    }
}
