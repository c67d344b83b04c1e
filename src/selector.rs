//! Sync selector: aggregates courses into selectable entries and owns the
//! selection store.

use std::sync::Arc;

use futures::future::try_join_all;
use futures::try_join;
use tokio_stream::Stream;
use tracing::debug;
use uuid::Uuid;

use crate::entry::{CourseEntry, File, Selection, Tab, TabKind};
use crate::error::Result;
use crate::provider::{CourseProvider, RemoteCourse, RemoteFile};
use crate::store::SelectionStore;
use crate::walker::{self, WalkOptions};

const UNKNOWN_FILE_NAME: &str = "Unknown file";

// ---------------------------------------------------------------------------
// SyncSelectorBuilder
// ---------------------------------------------------------------------------

pub struct SyncSelectorBuilder<P> {
    provider: Arc<P>,
    walk_options: WalkOptions,
}

impl<P: CourseProvider> SyncSelectorBuilder<P> {
    /// Override folder-walk behavior (retry budget).
    pub fn walk_options(mut self, options: WalkOptions) -> Self {
        self.walk_options = options;
        self
    }

    pub fn build(self) -> SyncSelector<P> {
        SyncSelector {
            provider: self.provider,
            store: Arc::new(SelectionStore::new()),
            walk_options: self.walk_options,
        }
    }
}

// ---------------------------------------------------------------------------
// SyncSelector
// ---------------------------------------------------------------------------

/// One sync-selection session: fetches the complete entry set for all
/// active-enrollment courses and serves selection mutations against it.
pub struct SyncSelector<P> {
    provider: Arc<P>,
    store: Arc<SelectionStore>,
    walk_options: WalkOptions,
}

impl<P: CourseProvider> SyncSelector<P> {
    /// Start building a selector over the given provider.
    pub fn builder(provider: P) -> SyncSelectorBuilder<P> {
        SyncSelectorBuilder {
            provider: Arc::new(provider),
            walk_options: WalkOptions::default(),
        }
    }

    pub fn new(provider: P) -> Self {
        Self::builder(provider).build()
    }

    /// Fetch the full entry set: active courses, each joined with its
    /// offline-supported tabs and flattened file list. Courses fan out
    /// concurrently; within a course the tab fetch and the file walk run
    /// concurrently too. On success the store content is replaced
    /// wholesale; on any error (beyond absorbed unauthorized folders)
    /// nothing is published.
    pub async fn fetch_all(&self) -> Result<Vec<CourseEntry>> {
        let courses = self.provider.list_active_courses().await?;
        debug!("aggregating {} active courses", courses.len());

        let entries =
            try_join_all(courses.into_iter().map(|course| self.build_entry(course))).await?;

        self.store.replace(entries.clone());
        Ok(entries)
    }

    /// Apply a selection mutation. Observers receive the updated count.
    pub fn select(&self, selection: Selection, is_selected: bool) -> Result<()> {
        self.store.set_selected(selection, is_selected)
    }

    /// Subscribe to the aggregate selected count. See
    /// [`SelectionStore::observe_selected_count`].
    pub fn observe_selected_count(&self) -> impl Stream<Item = usize> + Send + Unpin + use<P> {
        self.store.observe_selected_count()
    }

    /// The underlying store, shared with any other holder of this session.
    pub fn store(&self) -> Arc<SelectionStore> {
        self.store.clone()
    }

    async fn build_entry(&self, course: RemoteCourse) -> Result<CourseEntry> {
        let (tabs, files) = try_join!(self.fetch_tabs(&course.id), self.fetch_files(&course.id))?;
        debug!(
            "course {}: {} tabs, {} files",
            course.id,
            tabs.len(),
            files.len()
        );
        Ok(CourseEntry::new(course.id, course.name, tabs, files))
    }

    async fn fetch_tabs(&self, course_id: &str) -> Result<Vec<Tab>> {
        let tabs = self.provider.list_tabs(course_id).await?;
        Ok(tabs
            .into_iter()
            .filter_map(|tab| {
                let kind = TabKind::from_type_name(&tab.tab_type)?;
                Some(Tab::new(tab.id, tab.label, kind))
            })
            .collect())
    }

    /// Walk every root folder of the course and concatenate the results in
    /// root order.
    async fn fetch_files(&self, course_id: &str) -> Result<Vec<File>> {
        let roots = self.provider.list_root_folders(course_id).await?;
        let per_root = try_join_all(roots.iter().map(|root| {
            walker::collect_files(self.provider.as_ref(), &root.id, &self.walk_options)
        }))
        .await?;

        Ok(per_root
            .into_iter()
            .flatten()
            .map(into_file)
            .collect())
    }
}

/// Wire record to domain record, defaulting the fields the service may
/// omit: a synthesized id and a placeholder display name.
fn into_file(remote: RemoteFile) -> File {
    File::new(
        remote
            .id
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        remote
            .display_name
            .unwrap_or_else(|| UNKNOWN_FILE_NAME.to_owned()),
        remote.url,
    )
}
