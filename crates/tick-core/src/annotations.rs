//! Annotation model and change notifications.
//!
//! An [`AnnotationModel`] holds a mutable set of range-tagged annotations
//! over a text buffer owned by the host. It supports:
//!
//! - **Mutation**: add/remove/replace annotations, tracked by a version
//!   number that increments on every effective change
//! - **Change notifications**: subscribe to mutation events via scoped
//!   [`Subscription`] handles
//! - **Range tracking**: shift or drop annotation ranges when the host
//!   reports a buffer edit ([`AnnotationModel::apply_delta`])
//!
//! Mutations may happen on any thread (a background reconciler typically
//! replaces the whole set after each pass), so callbacks are `Send` and
//! fire synchronously on the mutating thread. Callbacks must not call back
//! into the model; consumers that need to re-read annotation state defer
//! that work (e.g. onto a UI task queue) instead.
//!
//! # Example
//!
//! ```rust
//! use tick_core::{Annotation, AnnotationModel, AnnotationRange, MarkerId};
//!
//! let mut model = AnnotationModel::new();
//! let _sub = model.subscribe(|event| {
//!     println!("annotations changed: {:?}", event.kind);
//! });
//!
//! model.add(Annotation::marker(AnnotationRange::new(5, 8), MarkerId(0)));
//! assert_eq!(model.version(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use crate::delta::TextDelta;
use crate::markers::MarkerId;

/// A half-open character-offset range (`start..end`) over the host buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationRange {
    /// Range start offset (inclusive), in Unicode scalar values (`char`)
    /// from the start of the document.
    pub start: usize,
    /// Range end offset (exclusive).
    pub end: usize,
}

impl AnnotationRange {
    /// Create a new annotation range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the range in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range is empty (a point).
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if two half-open ranges overlap.
    ///
    /// Touching ranges (`[10,15)` vs `[15,20)`) do not overlap.
    pub fn overlaps(&self, other: &AnnotationRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// What an annotation carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationPayload {
    /// Backed by a persistent marker record; the only payload that
    /// contributes to error ticks.
    Marker(MarkerId),
    /// A host-defined payload with no marker backing (search match,
    /// bracket highlight, spelling range, ...). Ignored by severity scans.
    Custom(u32),
}

/// A range-tagged annotation over the host buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    /// Covered range in character offsets.
    pub range: AnnotationRange,
    /// Annotation payload.
    pub payload: AnnotationPayload,
}

impl Annotation {
    /// Create a marker-backed annotation.
    pub fn marker(range: AnnotationRange, marker: MarkerId) -> Self {
        Self {
            range,
            payload: AnnotationPayload::Marker(marker),
        }
    }

    /// Create a non-marker annotation with a host-defined payload tag.
    pub fn custom(range: AnnotationRange, tag: u32) -> Self {
        Self {
            range,
            payload: AnnotationPayload::Custom(tag),
        }
    }

    /// The backing marker id, if this annotation is marker-backed.
    pub fn marker_id(&self) -> Option<MarkerId> {
        match self.payload {
            AnnotationPayload::Marker(id) => Some(id),
            AnnotationPayload::Custom(_) => None,
        }
    }
}

/// An opaque annotation identifier, stable across range adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnnotationId(pub u64);

/// Kind of annotation model change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationEventKind {
    /// A single annotation was added.
    Added(AnnotationId),
    /// A single annotation was removed.
    Removed(AnnotationId),
    /// The whole set was replaced (e.g. after a reconcile pass).
    Replaced,
    /// All annotations were removed.
    Cleared,
    /// Ranges were shifted or dropped by a buffer edit.
    RangesAdjusted,
}

/// A change record delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationEvent {
    /// What changed.
    pub kind: AnnotationEventKind,
    /// Model version before the change.
    pub old_version: u64,
    /// Model version after the change.
    pub new_version: u64,
}

/// Change callback type. Fired synchronously on the mutating thread.
pub type AnnotationCallback = Box<dyn FnMut(&AnnotationEvent) + Send>;

type CallbackRegistry = Mutex<HashMap<u64, AnnotationCallback>>;

/// A scoped handle to a model subscription.
///
/// Dropping the handle deregisters the callback, so deregistration is
/// guaranteed on every exit path of the owning scope. The handle outlives
/// the model safely: if the model is gone, drop is a no-op.
#[must_use = "dropping a Subscription immediately deregisters the callback"]
#[derive(Debug)]
pub struct Subscription {
    registry: Weak<CallbackRegistry>,
    id: u64,
}

impl Subscription {
    /// Explicitly deregister the callback (equivalent to dropping).
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade()
            && let Ok(mut callbacks) = registry.lock()
        {
            callbacks.remove(&self.id);
        }
    }
}

/// A shared, thread-safe handle to an [`AnnotationModel`].
///
/// The model is mutated by background reconcilers and read by UI-thread
/// refresh tasks; both sides go through this handle.
pub type SharedAnnotationModel = Arc<Mutex<AnnotationModel>>;

/// The mutable set of annotations over one host document.
pub struct AnnotationModel {
    /// Annotations in insertion order.
    annotations: Vec<(AnnotationId, Annotation)>,
    next_annotation_id: u64,
    /// Model version, incremented on every effective change.
    version: u64,
    callbacks: Arc<CallbackRegistry>,
    next_subscription_id: u64,
}

impl Default for AnnotationModel {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationModel {
    /// Create an empty annotation model.
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            next_annotation_id: 0,
            version: 0,
            callbacks: Arc::new(Mutex::new(HashMap::new())),
            next_subscription_id: 0,
        }
    }

    /// Create an empty model behind a [`SharedAnnotationModel`] handle.
    pub fn shared() -> SharedAnnotationModel {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Current model version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of annotations in the model.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Whether the model holds no annotations.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Iterate over the current annotation set in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (AnnotationId, &Annotation)> {
        self.annotations.iter().map(|(id, a)| (*id, a))
    }

    /// Look up an annotation by id.
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|(aid, _)| *aid == id)
            .map(|(_, a)| a)
    }

    /// Add an annotation and notify subscribers.
    pub fn add(&mut self, annotation: Annotation) -> AnnotationId {
        let id = AnnotationId(self.next_annotation_id);
        self.next_annotation_id += 1;
        self.annotations.push((id, annotation));
        self.bump(AnnotationEventKind::Added(id));
        id
    }

    /// Remove an annotation by id. Returns `true` if it existed.
    pub fn remove(&mut self, id: AnnotationId) -> bool {
        let Some(pos) = self.annotations.iter().position(|(aid, _)| *aid == id) else {
            return false;
        };
        self.annotations.remove(pos);
        self.bump(AnnotationEventKind::Removed(id));
        true
    }

    /// Replace the whole annotation set (one event, one version bump).
    ///
    /// This is the reconcile path: a background pass re-derives every
    /// annotation and swaps the set wholesale.
    pub fn replace_all(&mut self, annotations: Vec<Annotation>) -> Vec<AnnotationId> {
        let mut ids = Vec::with_capacity(annotations.len());
        self.annotations.clear();
        for annotation in annotations {
            let id = AnnotationId(self.next_annotation_id);
            self.next_annotation_id += 1;
            self.annotations.push((id, annotation));
            ids.push(id);
        }
        self.bump(AnnotationEventKind::Replaced);
        ids
    }

    /// Remove all annotations. No-op (no event) on an empty model.
    pub fn clear(&mut self) {
        if self.annotations.is_empty() {
            return;
        }
        self.annotations.clear();
        self.bump(AnnotationEventKind::Cleared);
    }

    /// Shift annotation ranges across a buffer edit, dropping annotations
    /// whose range the edit consumed. No event fires when nothing moved.
    pub fn apply_delta(&mut self, delta: &TextDelta) {
        if delta.is_empty() {
            return;
        }

        let mut changed = false;
        self.annotations.retain_mut(|(_, annotation)| {
            match delta.transform(annotation.range) {
                Some(range) => {
                    if range != annotation.range {
                        annotation.range = range;
                        changed = true;
                    }
                    true
                }
                None => {
                    changed = true;
                    false
                }
            }
        });

        if changed {
            self.bump(AnnotationEventKind::RangesAdjusted);
        }
    }

    /// Subscribe to change notifications.
    ///
    /// The callback fires synchronously on whichever thread mutates the
    /// model. The returned [`Subscription`] deregisters it on drop.
    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&AnnotationEvent) + Send + 'static,
    {
        let id = self.next_subscription_id;
        self.next_subscription_id += 1;

        if let Ok(mut callbacks) = self.callbacks.lock() {
            callbacks.insert(id, Box::new(callback));
        }

        Subscription {
            registry: Arc::downgrade(&self.callbacks),
            id,
        }
    }

    /// Number of live subscriptions (diagnostics only).
    pub fn subscription_count(&self) -> usize {
        self.callbacks.lock().map(|c| c.len()).unwrap_or(0)
    }

    fn bump(&mut self, kind: AnnotationEventKind) {
        let old_version = self.version;
        self.version += 1;
        let event = AnnotationEvent {
            kind,
            old_version,
            new_version: self.version,
        };
        if let Ok(mut callbacks) = self.callbacks.lock() {
            for callback in callbacks.values_mut() {
                callback(&event);
            }
        }
    }
}
