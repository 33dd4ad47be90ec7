//! Undo/redo history for the reference text buffer.
//!
//! Each call to [`crate::editor::host::Editor::edit`] records one checkpoint:
//! the buffer as it was before the edit. Undo swaps the current buffer for the
//! newest checkpoint and keeps the current one for redo. A fresh edit after an
//! undo drops the redo stack.
//!
//! Between [`UndoHistory::begin_group`] and [`UndoHistory::end_group`] only the
//! first checkpoint is kept, so a whole INSERT session undoes in one step.
//!
//! # Example
//!
//! ```
//! use keyquill::editor::undo::{BufferSnapshot, UndoHistory};
//! use keyquill::editor::position::Selection;
//!
//! let before = BufferSnapshot { lines: vec!["a".into()], selection: Selection::default() };
//! let after = BufferSnapshot { lines: vec!["ab".into()], selection: Selection::default() };
//!
//! let mut history = UndoHistory::new(50);
//! history.checkpoint(before.clone());
//! assert_eq!(history.undo(after.clone()), Some(before.clone()));
//! assert_eq!(history.redo(before), Some(after));
//! ```

use super::position::Selection;
use std::collections::VecDeque;

/// Buffer contents and selection at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSnapshot {
    pub lines: Vec<String>,
    pub selection: Selection,
}

/// Linear undo and redo stacks bounded by `limit`.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    undo: VecDeque<BufferSnapshot>,
    redo: Vec<BufferSnapshot>,
    limit: usize,
    group: GroupState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupState {
    Closed,
    Open,
    /// Open and already holding its checkpoint.
    Recorded,
}

impl UndoHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit,
            group: GroupState::Closed,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Opens an undo group; a group that is already open stays as it is.
    pub fn begin_group(&mut self) {
        if self.group == GroupState::Closed {
            self.group = GroupState::Open;
        }
    }

    pub fn end_group(&mut self) {
        self.group = GroupState::Closed;
    }

    /// Records the state before an edit.
    pub fn checkpoint(&mut self, before: BufferSnapshot) {
        if self.limit == 0 {
            return;
        }
        self.redo.clear();
        match self.group {
            GroupState::Recorded => return,
            GroupState::Open => self.group = GroupState::Recorded,
            GroupState::Closed => {}
        }
        self.undo.push_back(before);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
    }

    /// Returns the state to restore, remembering `current` for redo.
    pub fn undo(&mut self, current: BufferSnapshot) -> Option<BufferSnapshot> {
        self.end_group();
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Returns the state to restore, remembering `current` for undo.
    pub fn redo(&mut self, current: BufferSnapshot) -> Option<BufferSnapshot> {
        self.end_group();
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        Some(next)
    }
}
