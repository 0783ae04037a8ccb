#![warn(missing_docs)]
//! Tick Core - Headless Error-Tick Engine
//!
//! # Overview
//!
//! `tick-core` derives "error tick" state (the worst-severity problem icon
//! for an editor or outline item) from range-tagged annotations over a
//! text buffer it does not own. It is headless: the buffer, the widget
//! toolkit, and the semantic model are opaque host collaborators, and the
//! crate only defines the model layer and the queries over it.
//!
//! # Core Features
//!
//! - **Annotation Model**: a mutable, versioned set of annotations with
//!   change notifications and scoped subscriptions
//! - **Problem Markers**: persistent severity records referenced (not
//!   owned) by annotations, tolerant of concurrent deletion
//! - **Severity Scanning**: worst-overlapping-problem queries with
//!   half-open range semantics and error short-circuiting
//! - **Range Tracking**: structured text deltas shift or drop annotation
//!   ranges across host buffer edits
//!
//! # Data Flow
//!
//! ```text
//! buffer edit ──> AnnotationModel mutates ──> event (mutating thread)
//!                                              │
//!                           UI layer defers ───┘
//!                           re-scan + repaint (see `tick-core-ui`)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use tick_core::{
//!     Annotation, AnnotationModel, AnnotationRange, Marker, MarkerStore,
//!     Severity, severity_for_range,
//! };
//!
//! let mut markers = MarkerStore::new();
//! let id = markers.add(Marker::problem(Severity::Error, "missing semicolon"));
//!
//! let mut model = AnnotationModel::new();
//! model.add(Annotation::marker(AnnotationRange::new(5, 8), id));
//!
//! let worst = severity_for_range(AnnotationRange::new(0, 10), &model, &markers);
//! assert_eq!(worst, Severity::Error);
//! ```
//!
//! # Module Description
//!
//! - [`markers`] - problem markers, severities, and the marker-source boundary
//! - [`annotations`] - the annotation model, events, and subscriptions
//! - [`delta`] - structured text deltas for range tracking
//! - [`scanner`] - worst-severity scans over elements and ranges
//!
//! # Concurrency
//!
//! The model may be mutated from a background reconciler thread; change
//! callbacks fire synchronously on the mutating thread and are expected to
//! defer any re-read of annotation state (the UI layer marshals refreshes
//! onto its single-threaded task queue). [`SharedAnnotationModel`] is the
//! cross-thread handle.

pub mod annotations;
pub mod delta;
pub mod markers;
pub mod scanner;

pub use annotations::{
    Annotation, AnnotationCallback, AnnotationEvent, AnnotationEventKind, AnnotationId,
    AnnotationModel, AnnotationPayload, AnnotationRange, SharedAnnotationModel, Subscription,
};
pub use delta::{TextDelta, TextEdit};
pub use markers::{Marker, MarkerId, MarkerKind, MarkerSource, MarkerStore, Severity};
pub use scanner::{ElementError, SourceElement, severity_for_element, severity_for_range};
