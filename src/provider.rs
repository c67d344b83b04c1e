//! Provider trait: the seam to the remote course/content service.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;

/// Remote course/content provider. Implementations talk to the actual LMS
/// API; tests use in-memory fakes.
///
/// All listing calls fail with `Error::Network` on transport problems and
/// `Error::Unauthorized` when the current user lacks permission.
#[async_trait]
pub trait CourseProvider: Send + Sync {
    /// Courses with an active enrollment for the current user.
    async fn list_active_courses(&self) -> Result<Vec<RemoteCourse>>;

    /// All navigation tabs of a course, supported or not. The consumer
    /// filters to the offline-supported subset.
    async fn list_tabs(&self, course_id: &str) -> Result<Vec<RemoteTab>>;

    /// Root folder(s) of a course's file area. A course may have more
    /// than one root.
    async fn list_root_folders(&self, course_id: &str) -> Result<Vec<RemoteFolder>>;

    /// Immediate children of a folder: files and subfolders, one level deep.
    async fn list_folder_items(&self, folder_id: &str) -> Result<Vec<RemoteFolderItem>>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCourse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteTab {
    pub id: String,
    pub label: String,
    /// Type name as reported by the service ("files", "assignments", ...).
    pub tab_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFolder {
    pub id: String,
}

/// A remote file record. Id and display name are optional on the wire;
/// the aggregation layer substitutes defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFile {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub url: Option<String>,
}

/// One entry of a folder listing. Exactly one of file-or-folder.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteFolderItem {
    File(RemoteFile),
    Folder(RemoteFolder),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_item_decodes_file_variant() {
        let json = r#"{"file": {"id": "f1", "display_name": "notes.pdf", "url": null}}"#;
        let item: RemoteFolderItem = serde_json::from_str(json).unwrap();
        match item {
            RemoteFolderItem::File(file) => {
                assert_eq!(file.id.as_deref(), Some("f1"));
                assert_eq!(file.display_name.as_deref(), Some("notes.pdf"));
                assert!(file.url.is_none());
            }
            RemoteFolderItem::Folder(_) => panic!("expected file variant"),
        }
    }

    #[test]
    fn folder_item_decodes_folder_variant() {
        let json = r#"{"folder": {"id": "d9"}}"#;
        let item: RemoteFolderItem = serde_json::from_str(json).unwrap();
        assert!(matches!(item, RemoteFolderItem::Folder(f) if f.id == "d9"));
    }

    #[test]
    fn file_with_missing_fields_decodes_as_none() {
        let json = r#"{"id": null, "display_name": null, "url": null}"#;
        let file: RemoteFile = serde_json::from_str(json).unwrap();
        assert!(file.id.is_none());
        assert!(file.display_name.is_none());
    }
}
