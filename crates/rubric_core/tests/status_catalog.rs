use rubric_core::{RubricError, Status, StatusCatalog};

#[test]
fn next_follows_fixed_catalog_order() {
    assert_eq!(StatusCatalog::next("Undetermined").unwrap(), Status::Success);
    assert_eq!(StatusCatalog::next("Success").unwrap(), Status::Failure);
    assert_eq!(StatusCatalog::next("Failure").unwrap(), Status::NotApplicable);
    assert_eq!(
        StatusCatalog::next("Not applicable").unwrap(),
        Status::Undetermined
    );
}

#[test]
fn four_steps_return_to_start_without_fixed_points() {
    for status in StatusCatalog::ALL {
        assert_ne!(status.next(), status);

        let mut current = status;
        for _ in 0..4 {
            current = StatusCatalog::next(current.label()).unwrap();
        }
        assert_eq!(current, status);
    }
}

#[test]
fn next_rejects_uncataloged_label() {
    let err = StatusCatalog::next("Pending").unwrap_err();
    assert_eq!(err, RubricError::InvalidStatus("Pending".to_string()));

    // Labels are exact; the enum name is not an alias.
    let err = StatusCatalog::next("NotApplicable").unwrap_err();
    assert!(matches!(err, RubricError::InvalidStatus(_)));
}

#[test]
fn labels_and_icons_are_unique() {
    for (i, a) in StatusCatalog::ALL.iter().enumerate() {
        for b in &StatusCatalog::ALL[i + 1..] {
            assert_ne!(a.label(), b.label());
            assert_ne!(a.icon(), b.icon());
        }
        assert_eq!(Status::from_label(a.label()).unwrap(), *a);
    }
}

#[test]
fn status_serializes_as_label() {
    let json = serde_json::to_value(Status::NotApplicable).unwrap();
    assert_eq!(json, "Not applicable");

    let decoded: Status = serde_json::from_value(serde_json::json!("Failure")).unwrap();
    assert_eq!(decoded, Status::Failure);

    assert!(serde_json::from_value::<Status>(serde_json::json!("Pending")).is_err());
}

#[test]
fn default_status_is_undetermined() {
    assert_eq!(Status::default(), Status::Undetermined);
    assert_eq!(Status::Undetermined.to_string(), "Undetermined");
}
