use std::sync::{Arc, Mutex};

use tick_core::{
    Annotation, AnnotationEventKind, AnnotationModel, AnnotationRange, Marker, MarkerStore,
    Severity, TextDelta, TextEdit, severity_for_range,
};

#[test]
fn test_reconcile_replace_then_scan() {
    let mut markers = MarkerStore::new();
    let warn = markers.add(Marker::problem(Severity::Warning, "unused import"));
    let err = markers.add(Marker::problem(Severity::Error, "cannot resolve symbol"));

    let mut model = AnnotationModel::new();

    let seen = Arc::new(Mutex::new(Vec::<AnnotationEventKind>::new()));
    let seen_clone = Arc::clone(&seen);
    let _sub = model.subscribe(move |event| {
        seen_clone.lock().unwrap().push(event.kind);
    });

    // First reconcile pass produces one warning.
    model.replace_all(vec![Annotation::marker(AnnotationRange::new(0, 6), warn)]);
    assert_eq!(
        severity_for_range(AnnotationRange::new(0, 100), &model, &markers),
        Severity::Warning
    );

    // Next pass also finds an error further down.
    model.replace_all(vec![
        Annotation::marker(AnnotationRange::new(0, 6), warn),
        Annotation::marker(AnnotationRange::new(40, 55), err),
    ]);
    assert_eq!(
        severity_for_range(AnnotationRange::new(0, 100), &model, &markers),
        Severity::Error
    );

    // A method-sized range that only covers the warning.
    assert_eq!(
        severity_for_range(AnnotationRange::new(0, 10), &model, &markers),
        Severity::Warning
    );

    let seen = seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![AnnotationEventKind::Replaced, AnnotationEventKind::Replaced]
    );
}

#[test]
fn test_scan_is_order_independent() {
    let mut markers = MarkerStore::new();
    let warn = markers.add(Marker::problem(Severity::Warning, "w"));
    let err = markers.add(Marker::problem(Severity::Error, "e"));

    let orderings = [
        vec![
            Annotation::marker(AnnotationRange::new(0, 3), warn),
            Annotation::marker(AnnotationRange::new(4, 6), err),
        ],
        vec![
            Annotation::marker(AnnotationRange::new(4, 6), err),
            Annotation::marker(AnnotationRange::new(0, 3), warn),
        ],
    ];

    for annotations in orderings {
        let mut model = AnnotationModel::new();
        model.replace_all(annotations);
        assert_eq!(
            severity_for_range(AnnotationRange::new(0, 10), &model, &markers),
            Severity::Error
        );
    }
}

#[test]
fn test_edit_tracking_keeps_ticks_aligned() {
    let mut markers = MarkerStore::new();
    let err = markers.add(Marker::problem(Severity::Error, "e"));

    let mut model = AnnotationModel::new();
    model.add(Annotation::marker(AnnotationRange::new(20, 25), err));

    // Typing 5 chars at the top of the file shifts the problem down.
    model.apply_delta(&TextDelta::single(TextEdit::insert(0, 5)));
    assert_eq!(
        severity_for_range(AnnotationRange::new(25, 30), &model, &markers),
        Severity::Error
    );
    assert_eq!(
        severity_for_range(AnnotationRange::new(20, 25), &model, &markers),
        Severity::None
    );

    // Deleting the problem's whole span drops the annotation.
    model.apply_delta(&TextDelta::single(TextEdit::delete(25, 5)));
    assert!(model.is_empty());
    assert_eq!(
        severity_for_range(AnnotationRange::new(0, 100), &model, &markers),
        Severity::None
    );
}

#[test]
fn test_marker_deleted_between_reconcile_and_scan() {
    let mut markers = MarkerStore::new();
    let err = markers.add(Marker::problem(Severity::Error, "e"));

    let mut model = AnnotationModel::new();
    model.add(Annotation::marker(AnnotationRange::new(5, 8), err));

    // Host deletes the marker while the annotation still references it.
    markers.remove(err);
    assert_eq!(
        severity_for_range(AnnotationRange::new(0, 10), &model, &markers),
        Severity::None
    );
}

#[test]
fn test_subscription_scope_guarantees_release() {
    let mut model = AnnotationModel::new();

    {
        let _sub = model.subscribe(|_| {});
        assert_eq!(model.subscription_count(), 1);
        // `_sub` dropped here, on scope exit.
    }
    assert_eq!(model.subscription_count(), 0);

    // Early-return paths release too.
    fn bind_and_bail(model: &mut AnnotationModel) {
        let _sub = model.subscribe(|_| {});
        if model.is_empty() {
            return;
        }
        unreachable!();
    }
    bind_and_bail(&mut model);
    assert_eq!(model.subscription_count(), 0);
}
