//! Domain model: course entries, tabs, files, and selection cascades.

// ---------------------------------------------------------------------------
// TabKind
// ---------------------------------------------------------------------------

/// Tab types eligible for offline sync. Everything else reported by the
/// service is discarded during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    Files,
    Assignments,
    Grades,
    Pages,
    Syllabus,
}

impl TabKind {
    /// Map a service type name to a supported kind. Returns `None` for
    /// unsupported tab types.
    pub fn from_type_name(name: &str) -> Option<TabKind> {
        match name {
            "files" => Some(TabKind::Files),
            "assignments" => Some(TabKind::Assignments),
            "grades" => Some(TabKind::Grades),
            "pages" => Some(TabKind::Pages),
            "syllabus" => Some(TabKind::Syllabus),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tab / File
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub id: String,
    pub name: String,
    pub kind: TabKind,
    pub selected: bool,
    pub collapsed: bool,
}

impl Tab {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: TabKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            selected: true,
            collapsed: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    pub selected: bool,
}

impl File {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url,
            selected: true,
        }
    }
}

// ---------------------------------------------------------------------------
// CourseEntry
// ---------------------------------------------------------------------------

/// One course's aggregated sync-selection record: its offline-supported
/// tabs, its flattened file list, and the selection flags over them.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseEntry {
    pub id: String,
    pub name: String,
    pub tabs: Vec<Tab>,
    pub files: Vec<File>,
    pub selected: bool,
    pub collapsed: bool,
}

impl CourseEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        tabs: Vec<Tab>,
        files: Vec<File>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tabs,
            files,
            selected: true,
            collapsed: true,
        }
    }

    pub fn selected_tabs_count(&self) -> usize {
        self.tabs.iter().filter(|t| t.selected).count()
    }

    pub fn selected_files_count(&self) -> usize {
        self.files.iter().filter(|f| f.selected).count()
    }

    /// Select or deselect the whole course. Cascades to every owned tab
    /// and file.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        for tab in &mut self.tabs {
            tab.selected = selected;
        }
        for file in &mut self.files {
            file.selected = selected;
        }
    }

    /// Select or deselect one tab. The files tab cascades to every file;
    /// other tabs affect only themselves. Returns `false` if the index is
    /// out of range.
    pub fn select_tab(&mut self, index: usize, selected: bool) -> bool {
        let Some(tab) = self.tabs.get_mut(index) else {
            return false;
        };
        tab.selected = selected;

        if tab.kind == TabKind::Files {
            for file in &mut self.files {
                file.selected = selected;
            }
        }
        true
    }

    /// Select or deselect one file, then re-derive the files tab: it is
    /// selected iff every file is. Returns `false` if the index is out of
    /// range.
    pub fn select_file(&mut self, index: usize, selected: bool) -> bool {
        let Some(file) = self.files.get_mut(index) else {
            return false;
        };
        file.selected = selected;

        let all_selected = self.selected_files_count() == self.files.len();
        if let Some(files_tab) = self.tabs.iter_mut().find(|t| t.kind == TabKind::Files) {
            files_tab.selected = all_selected;
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Path identifying the target of a selection mutation: a course, one of
/// its tabs, or one of its files, all by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Course(usize),
    Tab(usize, usize),
    File(usize, usize),
}
