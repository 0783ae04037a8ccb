//! Structured text change deltas.
//!
//! Annotations are positioned over a buffer this crate does not own. When
//! the host edits that buffer, annotation ranges must move with the text
//! they cover. This module defines a small delta format expressed in
//! character offsets (Unicode scalar values) that the host reports after
//! each edit; [`AnnotationModel::apply_delta`](crate::AnnotationModel::apply_delta)
//! consumes it.
//!
//! Only edit shapes matter for range tracking, so edits carry lengths
//! rather than the replaced text.

use crate::annotations::AnnotationRange;

/// A single text edit expressed in character offsets.
///
/// `start` is a character offset in the document **at the time this edit
/// is applied**; edits inside a [`TextDelta`] must be applied in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Number of characters deleted at `start` (may be zero).
    pub deleted: usize,
    /// Number of characters inserted at `start` (may be zero).
    pub inserted: usize,
}

impl TextEdit {
    /// A pure insertion of `inserted` characters at `start`.
    pub fn insert(start: usize, inserted: usize) -> Self {
        Self {
            start,
            deleted: 0,
            inserted,
        }
    }

    /// A pure deletion of `deleted` characters at `start`.
    pub fn delete(start: usize, deleted: usize) -> Self {
        Self {
            start,
            deleted,
            inserted: 0,
        }
    }

    /// Exclusive end offset of the deleted span in the pre-edit document.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted)
    }

    /// Map a range through this edit.
    ///
    /// Returns `None` when the range is consumed entirely by the deleted
    /// span; such annotations do not survive the edit.
    pub fn transform(&self, range: AnnotationRange) -> Option<AnnotationRange> {
        let del_start = self.start;
        let del_end = self.end();

        // Entirely before the edit: untouched.
        if range.end <= del_start {
            return Some(range);
        }

        // Swallowed by the deletion.
        if del_start <= range.start && range.end <= del_end && self.deleted > 0 {
            return None;
        }

        let shift = |offset: usize| -> usize {
            if offset <= del_start {
                offset
            } else if offset >= del_end {
                offset - self.deleted + self.inserted
            } else {
                // Inside the deleted span: clamp to the edit point.
                del_start
            }
        };

        let start = if range.start < del_start {
            range.start
        } else if range.start >= del_end {
            range.start - self.deleted + self.inserted
        } else {
            del_start
        };
        let end = shift(range.end).max(start);

        if start == end && range.start != range.end {
            // A non-empty range collapsed to nothing.
            return None;
        }
        Some(AnnotationRange::new(start, end))
    }
}

/// A structured description of a document text change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextDelta {
    /// Ordered list of edits transforming the "before" document into the
    /// "after" document.
    pub edits: Vec<TextEdit>,
}

impl TextDelta {
    /// A delta containing a single edit.
    pub fn single(edit: TextEdit) -> Self {
        Self { edits: vec![edit] }
    }

    /// Returns `true` if this delta contains no edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Map a range through every edit in order.
    pub fn transform(&self, range: AnnotationRange) -> Option<AnnotationRange> {
        let mut current = range;
        for edit in &self.edits {
            current = edit.transform(current)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_before_shifts() {
        let edit = TextEdit::insert(0, 3);
        assert_eq!(
            edit.transform(AnnotationRange::new(5, 8)),
            Some(AnnotationRange::new(8, 11))
        );
    }

    #[test]
    fn test_insert_after_no_shift() {
        let edit = TextEdit::insert(10, 3);
        assert_eq!(
            edit.transform(AnnotationRange::new(5, 8)),
            Some(AnnotationRange::new(5, 8))
        );
    }

    #[test]
    fn test_delete_spanning_removes() {
        let edit = TextEdit::delete(4, 6);
        assert_eq!(edit.transform(AnnotationRange::new(5, 8)), None);
    }

    #[test]
    fn test_delete_before_shifts_left() {
        let edit = TextEdit::delete(0, 2);
        assert_eq!(
            edit.transform(AnnotationRange::new(5, 8)),
            Some(AnnotationRange::new(3, 6))
        );
    }

    #[test]
    fn test_delete_overlapping_start_clamps() {
        let edit = TextEdit::delete(3, 3);
        // [5,8) loses its first char; survivors start at the edit point.
        assert_eq!(
            edit.transform(AnnotationRange::new(5, 8)),
            Some(AnnotationRange::new(3, 5))
        );
    }

    #[test]
    fn test_replace_inside_keeps_range() {
        // Replace 2 chars with 4 inside [5,20).
        let edit = TextEdit {
            start: 10,
            deleted: 2,
            inserted: 4,
        };
        assert_eq!(
            edit.transform(AnnotationRange::new(5, 20)),
            Some(AnnotationRange::new(5, 22))
        );
    }

    #[test]
    fn test_delta_applies_in_order() {
        let delta = TextDelta {
            edits: vec![TextEdit::insert(0, 2), TextEdit::delete(0, 1)],
        };
        assert_eq!(
            delta.transform(AnnotationRange::new(3, 5)),
            Some(AnnotationRange::new(4, 6))
        );
    }
}
