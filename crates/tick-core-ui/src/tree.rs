//! Tree widget refresh with icon-identity diffing.
//!
//! [`TreeWidget::refresh`] resyncs the icon of every materialized tree
//! item against a [`LabelProvider`] query. Only materialized (visible or
//! expanded) items exist in the widget, so the walk covers exactly what
//! the user can see. The walk replaces an icon only when the provider's
//! answer differs from the one displayed, making repeated refreshes with
//! unchanged severities free of repaints; it never touches selection,
//! expansion state, or item order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tick_core::{MarkerSource, SharedAnnotationModel, SourceElement, severity_for_element};

use crate::icons::{IconId, with_severity_overlay};
use crate::listener::RefreshTarget;
use crate::queue::{Disposable, DisposeFlag};

/// Computes the current icon for a tree item's backing element.
pub trait LabelProvider<E> {
    /// Whether the element still exists. Stale or removed elements are
    /// skipped by refreshes rather than updated.
    fn exists(&self, element: &E) -> bool;

    /// The icon the element should currently display.
    fn icon_for(&self, element: &E) -> IconId;
}

/// An element that knows its severity-free base icon.
pub trait ElementIcon {
    /// The base icon, before any severity overlay.
    fn base_icon(&self) -> IconId;
}

/// A label provider that overlays error ticks onto element base icons.
///
/// Reads annotation and marker state on every query; severities are never
/// cached across refreshes, so a completed refresh always reflects the
/// model at the time it ran.
pub struct TickLabelProvider<M> {
    model: SharedAnnotationModel,
    markers: Arc<Mutex<M>>,
}

impl<M: MarkerSource> TickLabelProvider<M> {
    /// Create a provider over the given model and marker table.
    pub fn new(model: SharedAnnotationModel, markers: Arc<Mutex<M>>) -> Self {
        Self { model, markers }
    }
}

impl<E, M> LabelProvider<E> for TickLabelProvider<M>
where
    E: SourceElement + ElementIcon,
    M: MarkerSource,
{
    fn exists(&self, element: &E) -> bool {
        // A failing range query means the element went stale.
        element.source_range().is_ok()
    }

    fn icon_for(&self, element: &E) -> IconId {
        let severity = match (self.model.lock(), self.markers.lock()) {
            (Ok(model), Ok(markers)) => severity_for_element(element, &model, &*markers),
            _ => tick_core::Severity::None,
        };
        with_severity_overlay(element.base_icon(), severity)
    }
}

/// A materialized tree item: a backing element, its displayed icon, and
/// its materialized children.
#[derive(Debug)]
pub struct TreeItem<E> {
    /// The backing element.
    pub element: E,
    /// Materialized children.
    pub children: Vec<TreeItem<E>>,
    icon: IconId,
}

impl<E> TreeItem<E> {
    /// Create a leaf item displaying `icon`.
    pub fn new(element: E, icon: IconId) -> Self {
        Self {
            element,
            children: Vec::new(),
            icon,
        }
    }

    /// Create an item with materialized children.
    pub fn with_children(element: E, icon: IconId, children: Vec<TreeItem<E>>) -> Self {
        Self {
            element,
            children,
            icon,
        }
    }

    /// The currently displayed icon.
    pub fn icon(&self) -> IconId {
        self.icon
    }
}

/// A minimal tree widget: top-level items plus a disposal token.
///
/// The real widget belongs to the host toolkit; this structure carries
/// exactly the state the refresh algorithm reads and writes.
#[derive(Debug)]
pub struct TreeWidget<E> {
    roots: Vec<TreeItem<E>>,
    dispose: DisposeFlag,
}

impl<E> TreeWidget<E> {
    /// Create a widget with the given top-level items.
    pub fn new(roots: Vec<TreeItem<E>>) -> Self {
        Self {
            roots,
            dispose: DisposeFlag::new(),
        }
    }

    /// Top-level items.
    pub fn roots(&self) -> &[TreeItem<E>] {
        &self.roots
    }

    /// Mutable access to top-level items (host-side tree population).
    pub fn roots_mut(&mut self) -> &mut Vec<TreeItem<E>> {
        &mut self.roots
    }

    /// A clone of the widget's disposal token.
    pub fn dispose_flag(&self) -> DisposeFlag {
        self.dispose.clone()
    }

    /// Resync every materialized item's icon with the provider.
    ///
    /// Depth-first over the item tree; recurses into children regardless
    /// of whether the parent's icon changed, because a child's severity is
    /// independent of its parent's. Returns the number of icons replaced;
    /// a disposed widget refreshes nothing.
    pub fn refresh(&mut self, provider: &impl LabelProvider<E>) -> usize {
        if self.dispose.is_disposed() {
            return 0;
        }
        refresh_items(&mut self.roots, provider)
    }
}

impl<E> Disposable for TreeWidget<E> {
    fn is_disposed(&self) -> bool {
        self.dispose.is_disposed()
    }
}

fn refresh_items<E>(items: &mut [TreeItem<E>], provider: &impl LabelProvider<E>) -> usize {
    let mut replaced = 0;
    for item in items {
        if provider.exists(&item.element) {
            let icon = provider.icon_for(&item.element);
            if icon != item.icon {
                item.icon = icon;
                replaced += 1;
            }
        }
        replaced += refresh_items(&mut item.children, provider);
    }
    replaced
}

/// An outline-style view: a tree widget paired with its label provider,
/// refreshable from the listener pipeline.
pub struct OutlineView<E, P> {
    tree: Mutex<TreeWidget<E>>,
    provider: P,
    dispose: DisposeFlag,
    replacements: AtomicUsize,
}

impl<E, P: LabelProvider<E>> OutlineView<E, P> {
    /// Create a view over the given widget and provider.
    pub fn new(tree: TreeWidget<E>, provider: P) -> Self {
        let dispose = tree.dispose_flag();
        Self {
            tree: Mutex::new(tree),
            provider,
            dispose,
            replacements: AtomicUsize::new(0),
        }
    }

    /// Run `f` against the underlying widget.
    pub fn with_tree<R>(&self, f: impl FnOnce(&mut TreeWidget<E>) -> R) -> Option<R> {
        self.tree.lock().ok().map(|mut tree| f(&mut tree))
    }

    /// Total icon replacements performed by refreshes so far.
    pub fn total_replacements(&self) -> usize {
        self.replacements.load(Ordering::SeqCst)
    }

    /// Dispose the underlying widget.
    pub fn dispose(&self) {
        self.dispose.dispose();
    }
}

impl<E, P> RefreshTarget for OutlineView<E, P>
where
    E: Send,
    P: LabelProvider<E> + Send + Sync,
{
    fn is_disposed(&self) -> bool {
        self.dispose.is_disposed()
    }

    fn refresh(&self) {
        if let Ok(mut tree) = self.tree.lock() {
            let replaced = tree.refresh(&self.provider);
            self.replacements.fetch_add(replaced, Ordering::SeqCst);
        }
    }
}
