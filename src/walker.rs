//! Folder tree walker: flatten a course's folder hierarchy into its files.

use futures::FutureExt;
use futures::future::{BoxFuture, try_join_all};
use tracing::warn;

use crate::error::{Error, Result};
use crate::provider::{CourseProvider, RemoteFile, RemoteFolderItem};
use crate::retry::{self, RetryOptions};

/// Options for walking a folder tree.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    retry: RetryOptions,
}

impl WalkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the per-folder retry budget.
    pub fn max_retries(mut self, n: u32) -> Self {
        self.retry.max_retries = n;
        self
    }
}

/// Collect every file anywhere under `root_folder_id`, however deep the
/// nesting. A folder's own files precede files from its subfolders;
/// sibling subfolders are fetched concurrently and their results
/// concatenated in listing order. An unauthorized folder contributes
/// nothing and does not abort the walk.
pub async fn collect_files<P: CourseProvider + ?Sized>(
    provider: &P,
    root_folder_id: &str,
    options: &WalkOptions,
) -> Result<Vec<RemoteFile>> {
    walk(provider, root_folder_id.to_owned(), options).await
}

// Each recursive call returns its own result; the caller folds child
// results into its own. No accumulator is shared across sibling tasks.
fn walk<'a, P: CourseProvider + ?Sized>(
    provider: &'a P,
    folder_id: String,
    options: &'a WalkOptions,
) -> BoxFuture<'a, Result<Vec<RemoteFile>>> {
    async move {
        let (mut files, folder_ids) = fetch_level(provider, &folder_id, options).await?;
        let children =
            try_join_all(folder_ids.into_iter().map(|id| walk(provider, id, options))).await?;
        for child in children {
            files.extend(child);
        }
        Ok(files)
    }
    .boxed()
}

/// One folder level: its files and the ids of its subfolders. Transient
/// failures are retried; an unauthorized folder is treated as empty.
async fn fetch_level<P: CourseProvider + ?Sized>(
    provider: &P,
    folder_id: &str,
    options: &WalkOptions,
) -> Result<(Vec<RemoteFile>, Vec<String>)> {
    let items = match retry::run(|| provider.list_folder_items(folder_id), &options.retry).await {
        Ok(items) => items,
        Err(Error::Unauthorized(_)) => {
            warn!("skipping unauthorized folder {folder_id}");
            return Ok((Vec::new(), Vec::new()));
        }
        Err(err) => return Err(err),
    };

    let mut files = Vec::new();
    let mut folder_ids = Vec::new();
    for item in items {
        match item {
            RemoteFolderItem::File(file) => files.push(file),
            RemoteFolderItem::Folder(folder) => folder_ids.push(folder.id),
        }
    }
    Ok((files, folder_ids))
}
