//! Session-scoped selection state and reactive count observation.

use std::sync::Mutex;

use tokio::sync::mpsc;
use tokio_stream::Stream;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::entry::{CourseEntry, Selection};
use crate::error::{Error, Result};

/// Holder of the latest course entry set. Mutations cascade per the
/// selection rules and republish the aggregate selected count to every
/// observer, in mutation order.
///
/// Observers are plain unbounded channels, so a slow reader sees every
/// intermediate count rather than only the latest one.
pub struct SelectionStore {
    inner: Mutex<Inner>,
}

struct Inner {
    entries: Vec<CourseEntry>,
    observers: Vec<mpsc::UnboundedSender<usize>>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: Vec::new(),
                observers: Vec::new(),
            }),
        }
    }

    /// Swap the entire entry set. Used by the aggregator after a
    /// successful fetch; prior content is discarded wholesale.
    pub fn replace(&self, entries: Vec<CourseEntry>) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries = entries;
        inner.publish();
    }

    /// Apply one selection mutation, cascading per the entry rules, and
    /// republish the new count. Out-of-range paths leave the state (and
    /// the observed count sequence) untouched.
    pub fn set_selected(&self, selection: Selection, is_selected: bool) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let applied = match selection {
            Selection::Course(course) => match inner.entries.get_mut(course) {
                Some(entry) => {
                    entry.set_selected(is_selected);
                    true
                }
                None => false,
            },
            Selection::Tab(course, tab) => inner
                .entries
                .get_mut(course)
                .is_some_and(|entry| entry.select_tab(tab, is_selected)),
            Selection::File(course, file) => inner
                .entries
                .get_mut(course)
                .is_some_and(|entry| entry.select_file(file, is_selected)),
        };
        if !applied {
            return Err(Error::state(format!(
                "selection path out of range: {selection:?}"
            )));
        }
        inner.publish();
        Ok(())
    }

    /// Snapshot of the current entry set.
    pub fn entries(&self) -> Vec<CourseEntry> {
        self.inner.lock().unwrap().entries.clone()
    }

    /// Aggregate selected count, computed fresh from the current state.
    pub fn selected_count(&self) -> usize {
        self.inner.lock().unwrap().selected_count()
    }

    /// Subscribe to the selected count. Yields the count at subscription
    /// time first, then one value per subsequent mutation. Each call is an
    /// independent subscription.
    pub fn observe_selected_count(&self) -> impl Stream<Item = usize> + Send + Unpin + use<> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock().unwrap();
        // Registered under the lock, so no mutation can slip between the
        // initial value and the subscription.
        let _ = tx.send(inner.selected_count());
        inner.observers.push(tx);
        UnboundedReceiverStream::new(rx)
    }
}

impl Inner {
    fn selected_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.selected_tabs_count() + e.selected_files_count())
            .sum()
    }

    fn publish(&mut self) {
        let count = self.selected_count();
        self.observers.retain(|tx| tx.send(count).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{File, Tab, TabKind};
    use tokio_stream::StreamExt;

    fn entries() -> Vec<CourseEntry> {
        vec![CourseEntry::new(
            "1",
            "Bio",
            vec![Tab::new("t1", "Files", TabKind::Files)],
            vec![
                File::new("f1", "a.pdf", None),
                File::new("f2", "b.pdf", None),
            ],
        )]
    }

    #[test]
    fn replace_swaps_content() {
        let store = SelectionStore::new();
        assert_eq!(store.selected_count(), 0);
        store.replace(entries());
        assert_eq!(store.selected_count(), 3);
        store.replace(Vec::new());
        assert_eq!(store.selected_count(), 0);
    }

    #[test]
    fn course_mutation_cascades_through_store() {
        let store = SelectionStore::new();
        store.replace(entries());
        store.set_selected(Selection::Course(0), false).unwrap();
        assert_eq!(store.selected_count(), 0);
        let snapshot = store.entries();
        assert!(!snapshot[0].selected);
        assert!(!snapshot[0].tabs[0].selected);
        assert!(!snapshot[0].files.iter().any(|f| f.selected));
    }

    #[test]
    fn file_mutation_rederives_files_tab() {
        let store = SelectionStore::new();
        store.replace(entries());
        store.set_selected(Selection::File(0, 0), false).unwrap();
        // Tab deselected along with the file: 1 file remains.
        assert_eq!(store.selected_count(), 1);
        store.set_selected(Selection::File(0, 0), true).unwrap();
        assert_eq!(store.selected_count(), 3);
    }

    #[test]
    fn out_of_range_path_errors_and_leaves_state() {
        let store = SelectionStore::new();
        store.replace(entries());
        let err = store.set_selected(Selection::Course(7), false);
        assert!(matches!(err, Err(Error::State(_))));
        assert!(matches!(
            store.set_selected(Selection::Tab(0, 9), false),
            Err(Error::State(_))
        ));
        assert!(matches!(
            store.set_selected(Selection::File(3, 0), false),
            Err(Error::State(_))
        ));
        assert_eq!(store.selected_count(), 3);
    }

    #[tokio::test]
    async fn observer_sees_initial_count_then_each_mutation() {
        let store = SelectionStore::new();
        store.replace(entries());

        let mut counts = store.observe_selected_count();
        assert_eq!(counts.next().await, Some(3));

        store.set_selected(Selection::Tab(0, 0), false).unwrap();
        store.set_selected(Selection::File(0, 1), true).unwrap();
        store.set_selected(Selection::Course(0), false).unwrap();

        // Files-tab deselect cascades to both files; reselecting f2 alone
        // leaves the tab off; course deselect clears everything.
        assert_eq!(counts.next().await, Some(0));
        assert_eq!(counts.next().await, Some(1));
        assert_eq!(counts.next().await, Some(0));
    }

    #[tokio::test]
    async fn failed_mutation_emits_nothing() {
        let store = SelectionStore::new();
        store.replace(entries());
        let mut counts = store.observe_selected_count();
        assert_eq!(counts.next().await, Some(3));

        let _ = store.set_selected(Selection::Course(9), false);
        store.set_selected(Selection::File(0, 0), false).unwrap();
        // Next value comes from the valid mutation only.
        assert_eq!(counts.next().await, Some(1));
    }

    #[tokio::test]
    async fn subscription_is_restartable() {
        let store = SelectionStore::new();
        store.replace(entries());
        store.set_selected(Selection::File(0, 0), false).unwrap();

        let mut first = store.observe_selected_count();
        assert_eq!(first.next().await, Some(1));
        drop(first);

        store.set_selected(Selection::File(0, 0), true).unwrap();
        let mut second = store.observe_selected_count();
        // Fresh subscription starts from the current state.
        assert_eq!(second.next().await, Some(3));
    }

    #[tokio::test]
    async fn replace_notifies_observers() {
        let store = SelectionStore::new();
        let mut counts = store.observe_selected_count();
        assert_eq!(counts.next().await, Some(0));
        store.replace(entries());
        assert_eq!(counts.next().await, Some(3));
    }
}
