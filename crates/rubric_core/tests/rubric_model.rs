use rubric_core::{ItemSpec, RubricError, RubricItem, RubricList, Status};

fn specs(n: usize) -> Vec<ItemSpec> {
    (0..n)
        .map(|i| ItemSpec::new(format!("T{i}"), format!("criteria {i}")))
        .collect()
}

#[test]
fn initialize_assigns_positions_in_order_and_undetermined_status() {
    let list = RubricList::initialize(&specs(5)).unwrap();

    assert_eq!(list.len(), 5);
    for (index, item) in list.items().iter().enumerate() {
        assert_eq!(item.position(), index);
        assert_eq!(item.title(), format!("T{index}"));
        assert_eq!(item.criteria(), format!("criteria {index}"));
        assert_eq!(item.status(), Status::Undetermined);
    }
}

#[test]
fn initialize_with_no_specs_yields_empty_list() {
    let list = RubricList::initialize(&[]).unwrap();
    assert!(list.is_empty());
}

#[test]
fn initialize_rejects_blank_title() {
    let mut input = specs(3);
    input[1].title = "   ".to_string();

    let err = RubricList::initialize(&input).unwrap_err();
    assert_eq!(err, RubricError::EmptyTitle { position: 1 });
}

#[test]
fn with_status_changes_only_target_position() {
    let list = RubricList::initialize(&specs(5)).unwrap();

    let updated = list.with_status(2, Status::Failure).unwrap();

    assert_eq!(updated.get(2).unwrap().status(), Status::Failure);
    assert_eq!(updated.get(2).unwrap().title(), "T2");
    for i in [0, 1, 3, 4] {
        assert_eq!(updated.get(i).unwrap(), list.get(i).unwrap());
    }
    // Source list is untouched.
    assert_eq!(list.get(2).unwrap().status(), Status::Undetermined);
}

#[test]
fn with_status_rejects_out_of_range_position() {
    let list = RubricList::initialize(&specs(5)).unwrap();

    let err = list.with_status(5, Status::Success).unwrap_err();
    assert_eq!(err, RubricError::PositionOutOfRange { position: 5, len: 5 });
}

#[test]
fn from_items_rejects_gapped_positions() {
    let items = vec![
        RubricItem::from_parts(0, "a", "", Status::Success),
        RubricItem::from_parts(2, "b", "", Status::Undetermined),
    ];

    let err = RubricList::from_items(items).unwrap_err();
    assert_eq!(err, RubricError::PositionMismatch { index: 1, position: 2 });
}

#[test]
fn list_serializes_as_array_and_validates_on_decode() {
    let list = RubricList::initialize(&specs(2)).unwrap();
    let json = serde_json::to_value(&list).unwrap();

    assert_eq!(json[0]["position"], 0);
    assert_eq!(json[1]["title"], "T1");
    assert_eq!(json[1]["status"], "Undetermined");

    let decoded: RubricList = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, list);

    let gapped = serde_json::json!([
        {"position": 1, "title": "x", "criteria": "", "status": "Success"}
    ]);
    assert!(serde_json::from_value::<RubricList>(gapped).is_err());
}
