//! Problem markers and severities.
//!
//! A marker is a persistent diagnostic record owned by the host's
//! problem-reporting subsystem. Annotations reference markers by id rather
//! than owning them, so a marker may be deleted while an annotation still
//! points at it; consumers must tolerate dangling references (see
//! [`MarkerSource`]).

use std::collections::HashMap;

/// Severity of a problem marker, ordered from least to most severe.
///
/// The derived [`Ord`] makes `None < Warning < Error`, so the worst of a
/// set of severities is simply the `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    /// No problem.
    #[default]
    None,
    /// A warning-level problem.
    Warning,
    /// An error-level problem.
    Error,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }
}

/// An opaque marker identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub u64);

/// Coarse marker subtype classification.
///
/// Only [`MarkerKind::Problem`] markers contribute to error ticks; tasks,
/// bookmarks, and host-defined kinds are skipped by severity scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// A compile/analysis problem (the only kind that produces ticks).
    Problem,
    /// A task marker (e.g. a TODO entry).
    Task,
    /// A bookmark marker.
    Bookmark,
    /// A host-defined marker kind.
    Custom(u32),
}

impl MarkerKind {
    /// Whether markers of this kind contribute to error ticks.
    pub fn is_problem(self) -> bool {
        matches!(self, MarkerKind::Problem)
    }
}

/// A persistent diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Subtype classification.
    pub kind: MarkerKind,
    /// Problem severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
}

impl Marker {
    /// Create a problem marker with the given severity and message.
    pub fn problem(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind: MarkerKind::Problem,
            severity,
            message: message.into(),
        }
    }
}

/// Read access to the host's marker table.
///
/// A marker may be deleted concurrently with a severity scan, so every
/// query is by-id and may come back empty; a missing record contributes
/// nothing to a scan.
pub trait MarkerSource {
    /// Look up a marker by id. Returns `None` if the marker was deleted.
    fn marker(&self, id: MarkerId) -> Option<&Marker>;

    /// Whether the marker still exists.
    fn exists(&self, id: MarkerId) -> bool {
        self.marker(id).is_some()
    }

    /// Severity of the marker, or [`Severity::None`] if it was deleted.
    fn severity_of(&self, id: MarkerId) -> Severity {
        self.marker(id).map(|m| m.severity).unwrap_or(Severity::None)
    }
}

/// An in-process marker table.
///
/// Hosts with their own persistent marker subsystem implement
/// [`MarkerSource`] directly; `MarkerStore` is the concrete table used by
/// self-contained setups and tests.
#[derive(Debug, Default)]
pub struct MarkerStore {
    markers: HashMap<MarkerId, Marker>,
    next_id: u64,
}

impl MarkerStore {
    /// Create an empty marker store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker and return its id.
    pub fn add(&mut self, marker: Marker) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.insert(id, marker);
        id
    }

    /// Delete a marker. Returns `true` if it existed.
    pub fn remove(&mut self, id: MarkerId) -> bool {
        self.markers.remove(&id).is_some()
    }

    /// Update the severity of an existing marker. Returns `true` on success.
    pub fn set_severity(&mut self, id: MarkerId, severity: Severity) -> bool {
        match self.markers.get_mut(&id) {
            Some(marker) => {
                marker.severity = severity;
                true
            }
            None => false,
        }
    }

    /// Number of markers in the store.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl MarkerSource for MarkerStore {
    fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }
}
