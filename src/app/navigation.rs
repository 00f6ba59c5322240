//! Selection and focus handling.

use crate::ui::{flatten, Column, FlatRow};

use super::App;

impl App {
    /// Visible rows of a column. The column root is the block title and is
    /// not a row.
    pub fn rows(&self, column: Column) -> Vec<FlatRow<'_>> {
        flatten(self.tree.column(column), &self.collapse)
            .into_iter()
            .skip(1)
            .collect()
    }

    /// Index of the selected row in `column`.
    ///
    /// When the selected node is gone (collapsed away or evicted) the nearest
    /// visible ancestor is used, then the first row.
    pub fn selected_index(&self, column: Column) -> usize {
        let Some(mut path) = self.selected[column.index()].as_deref() else {
            return 0;
        };
        let rows = self.rows(column);
        loop {
            if let Some(idx) = rows.iter().position(|r| r.node.path == path) {
                return idx;
            }
            match path.rfind('/') {
                Some(cut) => path = &path[..cut],
                None => return 0,
            }
        }
    }

    /// Selected row of the focused column.
    pub fn selected_row(&self) -> Option<FlatRow<'_>> {
        let idx = self.selected_index(self.focus);
        self.rows(self.focus).into_iter().nth(idx)
    }

    /// Select a node by path in the focused column.
    pub fn select_path(&mut self, path: &str) {
        self.selected[self.focus.index()] = Some(path.to_string());
        self.mark_dirty();
    }

    /// Move the selection by `delta` rows, clamped to the column.
    pub fn move_selection(&mut self, delta: isize) {
        let rows = self.rows(self.focus);
        if rows.is_empty() {
            return;
        }
        let current = self.selected_index(self.focus) as isize;
        let last = rows.len() as isize - 1;
        let next = (current + delta).clamp(0, last) as usize;
        let path = rows[next].node.path.clone();
        self.selected[self.focus.index()] = Some(path);
        self.mark_dirty();
    }

    /// Jump to the first row.
    pub fn select_first(&mut self) {
        self.move_selection(isize::MIN / 2);
    }

    /// Jump to the last row.
    pub fn select_last(&mut self) {
        self.move_selection(isize::MAX / 2);
    }

    /// Focus the column to the right.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.mark_dirty();
    }

    /// Focus the column to the left.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
        self.mark_dirty();
    }
}
