//! Multipart request assembly for version creation
//!
//! The registry matches uploaded parts to `file_parts` by part name, and
//! `primary_file` must name one of them. The primary upload's part name
//! gets a `-primary` suffix so it stays distinct even when another upload
//! shares its file name.

use std::collections::HashSet;

use anyhow::Result;

use super::version::{PublishPayload, VersionDraft};
use crate::error::{hints, PublishError};
use crate::files::{self, FileHandle};
use crate::multipart::{Multipart, Part};

/// Appended to the primary upload's part name
pub const PRIMARY_SUFFIX: &str = "-primary";

/// Name of the JSON metadata part
pub const DATA_PART: &str = "data";

/// Validated upload list with the primary file first
#[derive(Debug, Clone)]
pub struct Uploads {
    files: Vec<FileHandle>,
}

impl Uploads {
    /// Order uploads, moving the named primary file (if any) to the front
    ///
    /// Fails when there are no files, when `primary` is not among them, or
    /// when two uploads would share a part name (including the suffixed
    /// primary name). Nothing is read from disk here.
    pub fn new(mut files: Vec<FileHandle>, primary: Option<&str>) -> Result<Self, PublishError> {
        if files.is_empty() {
            return Err(PublishError::invalid_input_with_hint(
                "No files provided",
                hints::files(),
            ));
        }

        if let Some(primary) = primary {
            let index = files
                .iter()
                .position(|f| f.name() == primary)
                .ok_or_else(|| {
                    PublishError::invalid_input_with_hint(
                        format!(
                            "Primary file \"{}\" is not present in the list of files",
                            primary
                        ),
                        hints::primary_file(),
                    )
                })?;
            let file = files.remove(index);
            files.insert(0, file);
        }

        let uploads = Self { files };
        let mut seen = HashSet::new();
        for part_name in uploads.part_names() {
            if seen.contains(&part_name) {
                return Err(PublishError::invalid_input(format!(
                    "Part name \"{}\" appears more than once",
                    part_name
                )));
            }
            seen.insert(part_name);
        }

        Ok(uploads)
    }

    pub fn primary(&self) -> &FileHandle {
        &self.files[0]
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    /// Part names in upload order; the first is the primary part
    pub fn part_names(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, f)| {
                if i == 0 {
                    format!("{}{}", f.name(), PRIMARY_SUFFIX)
                } else {
                    f.name().to_string()
                }
            })
            .collect()
    }
}

/// A fully assembled version-creation request
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub payload: PublishPayload,
    pub body: Multipart,
}

/// Read every upload and assemble the multipart body
///
/// Part order: `data` first, then the files in upload order.
pub fn build_request(draft: VersionDraft, uploads: &Uploads) -> Result<PublishRequest> {
    let contents = files::read_all(uploads.files())?;
    let part_names = uploads.part_names();
    let primary_file = part_names[0].clone();
    let payload = draft.into_payload(part_names.clone(), primary_file);

    let mut body = Multipart::with_random_boundary();
    body.push(Part::field(DATA_PART, serde_json::to_string(&payload)?));
    for ((file, part_name), bytes) in uploads.files().iter().zip(&part_names).zip(contents) {
        body.push(Part::file(part_name, file.name(), file.content_type(), bytes));
    }

    Ok(PublishRequest { payload, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modrinth::version::tests::draft;
    use crate::multipart::tests::decode;
    use std::path::Path;

    fn write(dir: &Path, rel: &str, content: &[u8]) -> FileHandle {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        FileHandle::new(path)
    }

    fn disposition(headers: &[(String, String)]) -> &str {
        &headers
            .iter()
            .find(|(k, _)| k == "Content-Disposition")
            .unwrap()
            .1
    }

    #[test]
    fn test_empty_file_list_fails() {
        let err = Uploads::new(Vec::new(), None).unwrap_err();
        assert!(matches!(err, PublishError::InvalidInput { .. }));
        assert!(err.to_string().contains("No files provided"));
    }

    #[test]
    fn test_unknown_primary_fails() {
        let files = vec![FileHandle::new("a.jar"), FileHandle::new("b.jar")];
        let err = Uploads::new(files, Some("c.jar")).unwrap_err();
        assert!(err.to_string().contains("\"c.jar\""));
    }

    #[test]
    fn test_primary_moves_to_front() {
        let files = vec![
            FileHandle::new("out/a-sources.jar"),
            FileHandle::new("out/a.jar"),
            FileHandle::new("out/a-dev.jar"),
        ];
        let uploads = Uploads::new(files, Some("a.jar")).unwrap();
        assert_eq!(uploads.primary().name(), "a.jar");
        assert_eq!(
            uploads.part_names(),
            vec!["a.jar-primary", "a-sources.jar", "a-dev.jar"]
        );
    }

    #[test]
    fn test_first_file_primary_by_default() {
        let files = vec![FileHandle::new("x.mrpack"), FileHandle::new("y.zip")];
        let uploads = Uploads::new(files, None).unwrap();
        assert_eq!(uploads.part_names(), vec!["x.mrpack-primary", "y.zip"]);
    }

    #[test]
    fn test_same_name_as_primary_allowed() {
        let files = vec![FileHandle::new("fabric/mod.jar"), FileHandle::new("forge/mod.jar")];
        let uploads = Uploads::new(files, None).unwrap();
        assert_eq!(uploads.part_names(), vec!["mod.jar-primary", "mod.jar"]);
    }

    #[test]
    fn test_duplicate_secondary_names_rejected() {
        let files = vec![
            FileHandle::new("main.jar"),
            FileHandle::new("a/extra.jar"),
            FileHandle::new("b/extra.jar"),
        ];
        assert!(Uploads::new(files, None).is_err());
    }

    #[test]
    fn test_secondary_named_like_primary_part_rejected() {
        let files = vec![FileHandle::new("a/x.jar"), FileHandle::new("b/x.jar-primary")];
        let err = Uploads::new(files, None).unwrap_err();
        assert!(matches!(err, PublishError::InvalidInput { .. }));
        assert!(err.to_string().contains("\"x.jar-primary\""));

        let files = vec![FileHandle::new("b/x.jar-primary"), FileHandle::new("a/x.jar")];
        let uploads = Uploads::new(files, None).unwrap();
        assert_eq!(
            uploads.part_names(),
            vec!["x.jar-primary-primary", "x.jar"]
        );
    }

    #[test]
    fn test_build_request_body() {
        let dir = tempfile::tempdir().unwrap();
        let primary = write(dir.path(), "libs/mod.jar", &[0x50, 0x4B, 0x03, 0x04, 0xFF]);
        let sources = write(dir.path(), "libs/mod-sources.zip", b"sources");
        let uploads = Uploads::new(vec![sources, primary], Some("mod.jar")).unwrap();

        let request = build_request(draft("1.0.0"), &uploads).unwrap();
        assert_eq!(request.payload.file_parts, vec!["mod.jar-primary", "mod-sources.zip"]);
        assert_eq!(request.payload.primary_file, request.payload.file_parts[0]);

        let parts = decode(&request.body.encode(), request.body.boundary());
        assert_eq!(parts.len(), 3);

        assert_eq!(disposition(&parts[0].0), "form-data; name=\"data\"");
        let data: serde_json::Value = serde_json::from_slice(&parts[0].1).unwrap();
        assert_eq!(data["primary_file"], "mod.jar-primary");
        assert_eq!(data["version_type"], "release");
        assert_eq!(data["featured"], true);

        assert_eq!(
            disposition(&parts[1].0),
            "form-data; name=\"mod.jar-primary\"; filename=\"mod.jar\""
        );
        assert_eq!(parts[1].0[1].1, "application/java-archive");
        assert_eq!(parts[1].1, vec![0x50, 0x4B, 0x03, 0x04, 0xFF]);

        assert_eq!(
            disposition(&parts[2].0),
            "form-data; name=\"mod-sources.zip\"; filename=\"mod-sources.zip\""
        );
        assert_eq!(parts[2].0[1].1, "application/zip");
        assert_eq!(parts[2].1, b"sources");
    }

    #[test]
    fn test_exactly_one_primary_part() {
        let dir = tempfile::tempdir().unwrap();
        let files: Vec<FileHandle> = (0..4)
            .map(|i| write(dir.path(), &format!("f{}.jar", i), &[i]))
            .collect();
        let uploads = Uploads::new(files, Some("f2.jar")).unwrap();
        let request = build_request(draft("1.0.0"), &uploads).unwrap();

        let primaries: Vec<_> = request
            .payload
            .file_parts
            .iter()
            .filter(|p| p.ends_with(PRIMARY_SUFFIX))
            .collect();
        assert_eq!(primaries, vec!["f2.jar-primary"]);
        assert_eq!(request.payload.primary_file, "f2.jar-primary");
    }

    #[test]
    fn test_build_request_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = Uploads::new(vec![FileHandle::new(dir.path().join("gone.jar"))], None).unwrap();
        assert!(build_request(draft("1.0.0"), &uploads).is_err());
    }
}
