mod entry;
mod error;
mod provider;
pub mod retry;
mod selector;
mod store;
mod walker;

// Flat re-exports — the public API surface
pub use entry::{CourseEntry, File, Selection, Tab, TabKind};
pub use error::{Error, Result};
pub use provider::{
    CourseProvider, RemoteCourse, RemoteFile, RemoteFolder, RemoteFolderItem, RemoteTab,
};
pub use selector::{SyncSelector, SyncSelectorBuilder};
pub use store::SelectionStore;
pub use walker::{WalkOptions, collect_files};
