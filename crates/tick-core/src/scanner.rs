//! Error-tick severity scanning.
//!
//! Given a semantic element with a source range, find the worst-severity
//! problem marker whose annotation overlaps that range. This is the query
//! behind gutter/outline/title error ticks.
//!
//! The scan is a best-effort read of volatile state: elements may have
//! gone stale and markers may be deleted mid-scan. Every failure degrades
//! to "no information" ([`Severity::None`]) for the element in question
//! and is at most logged; nothing propagates to the caller.

use thiserror::Error;

use crate::annotations::{AnnotationModel, AnnotationPayload, AnnotationRange};
use crate::markers::{MarkerSource, Severity};

/// Failure to obtain a source range from a semantic element.
#[derive(Debug, Error)]
pub enum ElementError {
    /// The element no longer exists in the host's semantic model.
    #[error("element is stale")]
    Stale,
    /// The host's semantic model is in an inconsistent state.
    #[error("semantic model inconsistency: {0}")]
    Inconsistent(String),
    /// Any other host-side failure.
    #[error("host error: {0}")]
    Host(String),
}

/// A semantic source element (type, method, field, ...) that can report
/// the character range it covers.
///
/// `Ok(None)` means the element exists but has no resolvable range;
/// `Err(_)` means the query itself failed. Both are tolerated by scans.
pub trait SourceElement {
    /// The range this element covers, if resolvable.
    fn source_range(&self) -> Result<Option<AnnotationRange>, ElementError>;

    /// A short name for diagnostics.
    fn name(&self) -> &str {
        "<element>"
    }
}

/// Worst severity of all problem markers overlapping `range`.
///
/// Walks the full current annotation set linearly; this is an intentional
/// O(annotations) bound per query (annotation sets are small, and the set
/// is replaced wholesale on every reconcile, so an index would cost more
/// to maintain than it saves). Skips non-marker payloads, non-problem
/// marker kinds, and deleted markers. An error-severity hit short-circuits
/// the scan; warnings do not, since a later error must still win.
pub fn severity_for_range(
    range: AnnotationRange,
    model: &AnnotationModel,
    markers: &impl MarkerSource,
) -> Severity {
    let mut worst = Severity::None;

    for (_, annotation) in model.iter() {
        let AnnotationPayload::Marker(marker_id) = annotation.payload else {
            continue;
        };
        if !annotation.range.overlaps(&range) {
            continue;
        }
        // Marker may have been deleted since the annotation was created.
        let Some(marker) = markers.marker(marker_id) else {
            continue;
        };
        if !marker.kind.is_problem() {
            continue;
        }

        worst = worst.max(marker.severity);
        if worst.is_error() {
            break;
        }
    }

    worst
}

/// Worst severity of all problem markers overlapping `element`'s range.
///
/// If the element cannot provide a range the query degrades to
/// [`Severity::None`]; range-lookup failures are logged at debug level and
/// never propagated.
pub fn severity_for_element(
    element: &dyn SourceElement,
    model: &AnnotationModel,
    markers: &impl MarkerSource,
) -> Severity {
    let range = match element.source_range() {
        Ok(Some(range)) => range,
        Ok(None) => return Severity::None,
        Err(err) => {
            log::debug!("no source range for {}: {err}", element.name());
            return Severity::None;
        }
    };
    severity_for_range(range, model, markers)
}
