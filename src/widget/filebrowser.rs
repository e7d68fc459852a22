//! FileBrowser: a MultiColumnListBox populated from the filesystem
//! (spec §4.8).

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use regex::Regex;

use crate::canvas::Canvas;
use crate::error::UpdateOutcome;
use crate::widget::choice::{ColumnSpec, MultiColumnListBox};
use crate::widget::{FieldValue, Geometry, Widget};

struct Entry {
    name: String,
    is_dir: bool,
    size: u64,
}

pub struct FileBrowser {
    root: PathBuf,
    filter: Option<Regex>,
    list: MultiColumnListBox,
    entries: Vec<Entry>,
}

impl FileBrowser {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>, filter: Option<Regex>) -> Self {
        let list = MultiColumnListBox::new(
            name,
            vec![ColumnSpec::Remaining, ColumnSpec::Absolute(10)],
            vec!["Name".to_string(), "Size".to_string()],
            Vec::new(),
        );
        let mut browser = FileBrowser { root: root.into(), filter, list, entries: Vec::new() };
        browser.populate();
        browser
    }

    /// Resolve symlinks and Unicode-normalise filenames; a failed `stat`
    /// falls back to zero metadata rather than propagating the error.
    fn populate(&mut self) {
        self.entries.clear();
        let read_dir = match fs::read_dir(&self.root) {
            Ok(d) => d,
            Err(e) => {
                warn!("failed to list {}: {e}", self.root.display());
                return;
            }
        };
        for entry in read_dir.flatten() {
            let resolved = fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.path());
            let name: String = resolved.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
            if let Some(filter) = &self.filter {
                if !name.starts_with('.') && resolved.is_file() && !filter.is_match(&name) {
                    continue;
                }
            }
            let (is_dir, size) = match fs::metadata(&resolved) {
                Ok(meta) => (meta.is_dir(), meta.len()),
                Err(e) => {
                    warn!("stat failed for {}: {e}", resolved.display());
                    (false, 0)
                }
            };
            self.entries.push(Entry { name, is_dir, size });
        }
        self.entries.sort_by(|a, b| (!a.is_dir, &a.name).cmp(&(!b.is_dir, &b.name)));
        let rows = self
            .entries
            .iter()
            .map(|e| {
                let label = if e.is_dir { format!("{}/", e.name) } else { e.name.clone() };
                let size = if e.is_dir { String::new() } else { e.size.to_string() };
                (vec![label.clone(), size], label)
            })
            .collect();
        self.list.set_rows(rows);
    }

    /// Descend into the selected directory, or stay in place if the
    /// current selection is a file.
    pub fn enter_selected(&mut self) {
        if let FieldValue::Text(name) = self.list.value() {
            let trimmed = name.trim_end_matches('/');
            let candidate = self.root.join(trimmed);
            if candidate.is_dir() {
                self.root = candidate;
                self.populate();
            }
        }
    }

    pub fn current_path(&self) -> &Path {
        &self.root
    }
}

impl Widget for FileBrowser {
    fn name(&self) -> Option<&str> {
        self.list.name()
    }

    fn value(&self) -> FieldValue {
        self.list.value()
    }

    fn set_value(&mut self, value: FieldValue) {
        self.list.set_value(value);
    }

    fn geometry(&self) -> Geometry {
        self.list.geometry()
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        self.list.set_geometry(geometry);
    }

    fn update(&mut self, frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        self.list.update(frame_no, canvas)
    }

    fn process_event(&mut self, event: crate::driver::Event) -> Option<crate::driver::Event> {
        if let crate::driver::Event::Keyboard(crate::driver::Key::Enter) = event {
            self.enter_selected();
            return None;
        }
        self.list.process_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populates_entries_from_an_actual_directory() {
        let browser = FileBrowser::new("fb", std::env::temp_dir(), None);
        assert!(browser.current_path().exists());
    }
}
