use contracts::domain::page_section::PageSection;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    /// `from` is where the item was picked up, `over` the current drop target.
    Dragging { from: usize, over: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReorderError {
    #[error("index {index} is out of range for {len} sections")]
    OutOfRange { index: usize, len: usize },
    #[error("a drag is already in progress")]
    AlreadyDragging,
    #[error("no drag in progress")]
    NotDragging,
    #[error("a save is already in progress")]
    SaveInFlight,
    #[error("nothing to save")]
    NothingToSave,
}

/// Moves the element at `from` to `to`, shifting the ones in between.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Ordered sections being edited, with the last saved order as snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOrder {
    sections: Vec<PageSection>,
    saved: Vec<(String, u32)>,
    drag: DragState,
    saving: bool,
}

impl SectionOrder {
    /// Starts from a loaded layout. Sections are ordered by their stored
    /// position; the loaded state counts as saved.
    pub fn new(mut sections: Vec<PageSection>) -> Self {
        sections.sort_by_key(|s| s.position);
        let saved = snapshot(&sections);
        Self {
            sections,
            saved,
            drag: DragState::Idle,
            saving: false,
        }
    }

    pub fn sections(&self) -> &[PageSection] {
        &self.sections
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    fn check_index(&self, index: usize) -> Result<(), ReorderError> {
        if index >= self.sections.len() {
            return Err(ReorderError::OutOfRange {
                index,
                len: self.sections.len(),
            });
        }
        Ok(())
    }

    /// Pointer-down or keyboard activation on a drag handle.
    pub fn begin_drag(&mut self, index: usize) -> Result<(), ReorderError> {
        if self.is_dragging() {
            return Err(ReorderError::AlreadyDragging);
        }
        self.check_index(index)?;
        self.drag = DragState::Dragging {
            from: index,
            over: index,
        };
        Ok(())
    }

    /// Pointer moved over another item.
    pub fn hover(&mut self, index: usize) -> Result<(), ReorderError> {
        self.check_index(index)?;
        match &mut self.drag {
            DragState::Dragging { over, .. } => {
                *over = index;
                Ok(())
            }
            DragState::Idle => Err(ReorderError::NotDragging),
        }
    }

    /// Keyboard arrows: moves the drop target by `delta`, clamped to the list.
    pub fn move_target(&mut self, delta: isize) -> Result<(), ReorderError> {
        let last = self.sections.len().saturating_sub(1) as isize;
        match &mut self.drag {
            DragState::Dragging { over, .. } => {
                *over = (*over as isize + delta).clamp(0, last) as usize;
                Ok(())
            }
            DragState::Idle => Err(ReorderError::NotDragging),
        }
    }

    /// Drops at `index`. Returns whether the order changed.
    ///
    /// A changed drop moves the item (not a swap) and renumbers every
    /// section as `index + 1`.
    pub fn drop_at(&mut self, index: usize) -> Result<bool, ReorderError> {
        let DragState::Dragging { from, .. } = self.drag else {
            return Err(ReorderError::NotDragging);
        };
        self.drag = DragState::Idle;
        self.check_index(index)?;
        if from == index {
            return Ok(false);
        }
        array_move(&mut self.sections, from, index);
        renumber(&mut self.sections);
        Ok(true)
    }

    /// Drops at the current keyboard/pointer target.
    pub fn drop_at_target(&mut self) -> Result<bool, ReorderError> {
        match self.drag {
            DragState::Dragging { over, .. } => self.drop_at(over),
            DragState::Idle => Err(ReorderError::NotDragging),
        }
    }

    pub fn cancel(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Compares `(key, position)` pairs against the last saved snapshot.
    pub fn has_unsaved_changes(&self) -> bool {
        snapshot(&self.sections) != self.saved
    }

    pub fn can_save(&self) -> bool {
        self.has_unsaved_changes() && !self.saving
    }

    /// Marks a save as in flight and returns the sections to send.
    pub fn begin_save(&mut self) -> Result<Vec<PageSection>, ReorderError> {
        if self.saving {
            return Err(ReorderError::SaveInFlight);
        }
        if !self.has_unsaved_changes() {
            return Err(ReorderError::NothingToSave);
        }
        self.saving = true;
        Ok(self.sections.clone())
    }

    /// Ends a save. On success the current order becomes the snapshot; on
    /// failure the edited order stays as it is and remains unsaved.
    pub fn finish_save(&mut self, succeeded: bool) {
        self.saving = false;
        if succeeded {
            self.saved = snapshot(&self.sections);
        }
    }

    /// Replaces the list after a reload from the server.
    pub fn reset(&mut self, sections: Vec<PageSection>) {
        *self = Self::new(sections);
    }
}

fn renumber(sections: &mut [PageSection]) {
    for (index, section) in sections.iter_mut().enumerate() {
        section.position = index as u32 + 1;
    }
}

fn snapshot(sections: &[PageSection]) -> Vec<(String, u32)> {
    sections
        .iter()
        .map(|s| (s.key.clone(), s.position))
        .collect()
}
