//! Error-tick listener lifecycle.
//!
//! An [`ErrorTickListener`] bridges an annotation model to a refreshable
//! UI target. Model mutation events may arrive on a background reconciler
//! thread; the listener never touches the target from there. Instead every
//! event enqueues exactly one refresh task on the UI queue, so all
//! scan-and-repaint work runs serialized on the UI thread.
//!
//! Lifecycle: `install` binds a model and performs one synchronous first
//! refresh so the target reflects current state before any mutation;
//! `set_annotation_model` rebinds (editor input switch), dropping the
//! previous registration before adding the new one; `uninstall` is an
//! idempotent teardown.

use std::sync::{Arc, Mutex};

use tick_core::{MarkerSource, SharedAnnotationModel, SourceElement, Subscription, severity_for_element};

use crate::icons::{IconId, with_severity_overlay};
use crate::queue::{Disposable, DisposeFlag, UiQueue};

/// A UI target the listener keeps in sync with annotation state.
///
/// `refresh` is only ever invoked on the UI thread (either synchronously
/// from `install`, or from a queued task).
pub trait RefreshTarget: Send + Sync {
    /// Whether the target has been torn down.
    fn is_disposed(&self) -> bool;

    /// Re-derive severities and repaint whatever changed.
    fn refresh(&self);
}

/// Binds an annotation model to a [`RefreshTarget`].
///
/// At most one model is bound at a time; the subscription on the previous
/// model is released before a new one is registered, on every path.
pub struct ErrorTickListener<T: RefreshTarget + 'static> {
    target: Arc<T>,
    queue: UiQueue,
    model: Option<SharedAnnotationModel>,
    subscription: Option<Subscription>,
}

impl<T: RefreshTarget + 'static> ErrorTickListener<T> {
    /// Create an uninstalled listener for `target`.
    pub fn new(target: Arc<T>, queue: UiQueue) -> Self {
        Self {
            target,
            queue,
            model: None,
            subscription: None,
        }
    }

    /// Whether a model is currently bound.
    pub fn is_installed(&self) -> bool {
        self.subscription.is_some()
    }

    /// The target this listener refreshes.
    pub fn target(&self) -> &Arc<T> {
        &self.target
    }

    /// Bind to `model` and synchronously refresh the target once, so it
    /// reflects current annotation state even before any mutation fires.
    ///
    /// Must be called on the UI thread (the first refresh is synchronous).
    pub fn install(&mut self, model: SharedAnnotationModel) {
        self.set_annotation_model(Some(model));
        if !self.target.is_disposed() {
            self.target.refresh();
        }
    }

    /// Release the model binding. Calling twice is a no-op.
    pub fn uninstall(&mut self) {
        self.set_annotation_model(None);
    }

    /// Rebind to a different model (or to none).
    ///
    /// The previous registration is removed before the new one is added,
    /// so exactly one registration is live at any time and the old model
    /// can no longer reach this listener.
    pub fn set_annotation_model(&mut self, model: Option<SharedAnnotationModel>) {
        // Dropping the subscription deregisters the old callback.
        self.subscription = None;
        self.model = model;

        let Some(model) = &self.model else {
            return;
        };
        let Ok(mut guard) = model.lock() else {
            log::warn!("annotation model lock poisoned; listener left unbound");
            self.model = None;
            return;
        };

        let queue = self.queue.clone();
        let target = Arc::clone(&self.target);
        self.subscription = Some(guard.subscribe(move |_event| {
            // One event, one task; the queue preserves enqueue order and
            // re-checks disposal when the task runs.
            let target_for_task = Arc::clone(&target);
            queue.submit_for(TargetProbe(Arc::clone(&target)), move || {
                target_for_task.refresh();
            });
        }));
    }
}

impl<T: RefreshTarget + 'static> Drop for ErrorTickListener<T> {
    fn drop(&mut self) {
        self.uninstall();
    }
}

/// Adapter so any [`RefreshTarget`] can be probed for disposal by the
/// queue without handing the queue the whole target.
struct TargetProbe<T: RefreshTarget>(Arc<T>);

impl<T: RefreshTarget> Disposable for TargetProbe<T> {
    fn is_disposed(&self) -> bool {
        self.0.is_disposed()
    }
}

/// An editor-title error tick: tracks the worst severity of a single
/// element and keeps a composed title icon current.
pub struct TitleTick<E, M> {
    element: E,
    model: SharedAnnotationModel,
    markers: Arc<Mutex<M>>,
    base_icon: IconId,
    current: Mutex<IconId>,
    dispose: DisposeFlag,
}

impl<E, M> TitleTick<E, M>
where
    E: SourceElement,
    M: MarkerSource,
{
    /// Create a title tick for `element`, displayed with `base_icon`.
    pub fn new(
        element: E,
        base_icon: IconId,
        model: SharedAnnotationModel,
        markers: Arc<Mutex<M>>,
    ) -> Self {
        Self {
            element,
            model,
            markers,
            base_icon,
            current: Mutex::new(base_icon),
            dispose: DisposeFlag::new(),
        }
    }

    /// The currently displayed title icon.
    pub fn icon(&self) -> IconId {
        self.current.lock().map(|icon| *icon).unwrap_or(self.base_icon)
    }

    /// Tear the title widget down.
    pub fn dispose(&self) {
        self.dispose.dispose();
    }
}

impl<E, M> RefreshTarget for TitleTick<E, M>
where
    E: SourceElement + Send + Sync,
    M: MarkerSource + Send,
{
    fn is_disposed(&self) -> bool {
        self.dispose.is_disposed()
    }

    fn refresh(&self) {
        let severity = match (self.model.lock(), self.markers.lock()) {
            (Ok(model), Ok(markers)) => severity_for_element(&self.element, &model, &*markers),
            _ => tick_core::Severity::None,
        };
        let icon = with_severity_overlay(self.base_icon, severity);
        if let Ok(mut current) = self.current.lock()
            && *current != icon
        {
            *current = icon;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tick_core::{Annotation, AnnotationModel, AnnotationRange};

    #[derive(Default)]
    struct CountingTarget {
        dispose: DisposeFlag,
        refreshes: AtomicUsize,
    }

    impl RefreshTarget for CountingTarget {
        fn is_disposed(&self) -> bool {
            self.dispose.is_disposed()
        }

        fn refresh(&self) {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn mutate(model: &SharedAnnotationModel) {
        model
            .lock()
            .unwrap()
            .add(Annotation::custom(AnnotationRange::new(0, 1), 0));
    }

    #[test]
    fn test_install_refreshes_synchronously() {
        let queue = UiQueue::new();
        let target = Arc::new(CountingTarget::default());
        let mut listener = ErrorTickListener::new(Arc::clone(&target), queue.clone());

        listener.install(AnnotationModel::shared());
        assert!(listener.is_installed());
        assert_eq!(target.refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_each_mutation_enqueues_one_task() {
        let queue = UiQueue::new();
        let target = Arc::new(CountingTarget::default());
        let mut listener = ErrorTickListener::new(Arc::clone(&target), queue.clone());

        let model = AnnotationModel::shared();
        listener.install(Arc::clone(&model));

        mutate(&model);
        mutate(&model);
        assert_eq!(queue.pending(), 2);

        queue.run_pending();
        // 1 install refresh + 2 deferred refreshes.
        assert_eq!(target.refreshes.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_uninstall_stops_scheduling() {
        let queue = UiQueue::new();
        let target = Arc::new(CountingTarget::default());
        let mut listener = ErrorTickListener::new(Arc::clone(&target), queue.clone());

        let model = AnnotationModel::shared();
        listener.install(Arc::clone(&model));
        listener.uninstall();
        listener.uninstall(); // twice is a no-op

        mutate(&model);
        assert_eq!(queue.pending(), 0);
        assert!(!listener.is_installed());
    }

    #[test]
    fn test_rebind_leaves_single_registration() {
        let queue = UiQueue::new();
        let target = Arc::new(CountingTarget::default());
        let mut listener = ErrorTickListener::new(Arc::clone(&target), queue.clone());

        let model_a = AnnotationModel::shared();
        let model_b = AnnotationModel::shared();

        listener.install(Arc::clone(&model_a));
        listener.set_annotation_model(Some(Arc::clone(&model_b)));

        assert_eq!(model_a.lock().unwrap().subscription_count(), 0);
        assert_eq!(model_b.lock().unwrap().subscription_count(), 1);

        // The old model no longer reaches the listener.
        mutate(&model_a);
        assert_eq!(queue.pending(), 0);

        mutate(&model_b);
        assert_eq!(queue.pending(), 1);
    }

    #[test]
    fn test_disposed_target_suppresses_enqueue() {
        let queue = UiQueue::new();
        let target = Arc::new(CountingTarget::default());
        let mut listener = ErrorTickListener::new(Arc::clone(&target), queue.clone());

        let model = AnnotationModel::shared();
        listener.install(Arc::clone(&model));
        target.dispose.dispose();

        mutate(&model);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_drop_releases_registration() {
        let queue = UiQueue::new();
        let model = AnnotationModel::shared();
        {
            let target = Arc::new(CountingTarget::default());
            let mut listener = ErrorTickListener::new(target, queue.clone());
            listener.install(Arc::clone(&model));
            assert_eq!(model.lock().unwrap().subscription_count(), 1);
        }
        assert_eq!(model.lock().unwrap().subscription_count(), 0);
    }
}
