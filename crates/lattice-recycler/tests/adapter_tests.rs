//! Tests for the adapter bridge: view types, holders, binding, clicks,
//! swipes, stable IDs and host notifications.

mod common;

use common::{
    header_definition, person_definition, recorder, Fixture, Header, HeaderHolder, Person,
    PersonHolder, HEADER_LAYOUT, PERSON_LAYOUT,
};
use lattice_recycler::prelude::*;

fn people(fixture: &Fixture, names: &[&str]) {
    for (id, name) in names.iter().enumerate() {
        fixture.data_source.add(Person::new(id as u64, name)).unwrap();
    }
}

fn names(fixture: &Fixture) -> Vec<String> {
    (0..fixture.data_source.size())
        .filter_map(|index| fixture.data_source.get_as::<Person>(index).unwrap())
        .map(|person| person.name)
        .collect()
}

#[test]
fn test_distinct_view_types_per_position() {
    let fixture = Fixture::new(person_definition());
    fixture.data_source.add(Person::new(1, "Ada")).unwrap();
    fixture.data_source.add(Header::new("Staff")).unwrap();

    let adapter = fixture.adapter();
    let first = adapter.view_type_for_position(0).unwrap();
    let second = adapter.view_type_for_position(1).unwrap();

    assert_ne!(first, second);
    assert_eq!(first, fixture.handle.view_type_for::<Person>().unwrap());
    assert_eq!(second, fixture.handle.view_type_for::<Header>().unwrap());
    assert_eq!(
        adapter.view_type_for_position(2),
        Err(Error::IndexOutOfRange { index: 2, len: 2 })
    );
}

#[test]
fn test_unregistered_item_type_fails() {
    let fixture = Fixture::new(person_definition());
    fixture.data_source.add(42u32).unwrap();

    assert!(matches!(
        fixture.adapter().view_type_for_position(0),
        Err(Error::UnknownType { .. })
    ));
}

#[test]
fn test_create_and_bind_view_holders() {
    let fixture = Fixture::new(person_definition());
    fixture.data_source.add(Header::new("Staff")).unwrap();
    fixture.data_source.add(Person::new(1, "Ada")).unwrap();

    let header = fixture.bound_holder(0);
    let person = fixture.bound_holder(1);

    assert_eq!(header.get::<HeaderHolder>().unwrap().title, "Staff");
    assert!(header.get::<PersonHolder>().is_none());

    let holder = person.get::<PersonHolder>().unwrap();
    assert_eq!(holder.name, "Ada");
    assert_eq!(holder.bound_index, Some(1));
    assert_eq!(holder.layout, Some(PERSON_LAYOUT));
    assert_eq!(person.bound_position(), Some(1));
    assert!(person.is_bound());

    assert_eq!(*fixture.host.inflated.lock(), vec![HEADER_LAYOUT, PERSON_LAYOUT]);
}

#[test]
fn test_rebinding_a_holder() {
    let fixture = Fixture::new(person_definition());
    people(&fixture, &["Ada", "Grace"]);

    let mut holder = fixture.bound_holder(0);
    fixture.adapter().bind_view_holder(&mut holder, 1).unwrap();

    assert_eq!(holder.get::<PersonHolder>().unwrap().name, "Grace");
    assert_eq!(holder.bound_position(), Some(1));
}

#[test]
fn test_bind_into_wrong_holder_fails() {
    let fixture = Fixture::new(person_definition());
    fixture.data_source.add(Person::new(1, "Ada")).unwrap();

    let header_type = fixture.handle.view_type_for::<Header>().unwrap();
    let mut holder = fixture.adapter().create_view_holder(header_type).unwrap();

    let err = fixture.adapter().bind_view_holder(&mut holder, 0).unwrap_err();
    assert!(matches!(err, Error::DefinitionMismatch { .. }));
    assert!(!holder.is_bound());
}

#[test]
fn test_create_view_holder_for_unknown_view_type() {
    let fixture = Fixture::new(person_definition());
    assert_eq!(
        fixture.adapter().create_view_holder(ViewType(99)).unwrap_err(),
        Error::UnknownViewType(ViewType(99))
    );
}

#[test]
fn test_click_reports_current_index() {
    let clicks = recorder();
    let c = clicks.clone();
    let fixture = Fixture::new(
        person_definition()
            .on_click(move |scope| c.lock().push((scope.index(), scope.item().name.clone()))),
    );
    people(&fixture, &["Ada", "Grace", "Linus"]);

    let holder = fixture.bound_holder(2);
    fixture.data_source.remove_at(0).unwrap();

    assert!(fixture.adapter().dispatch_click(&holder).unwrap());
    assert_eq!(*clicks.lock(), vec![(1, "Linus".to_string())]);
    assert_eq!(holder.bound_position(), Some(2));
}

#[test]
fn test_click_on_removed_item_is_ignored() {
    let clicks = recorder::<usize>();
    let c = clicks.clone();
    let fixture = Fixture::new(person_definition().on_click(move |scope| c.lock().push(scope.index())));
    people(&fixture, &["Ada"]);

    let holder = fixture.bound_holder(0);
    fixture.data_source.clear().unwrap();

    assert!(!fixture.adapter().dispatch_click(&holder).unwrap());
    assert!(clicks.lock().is_empty());
}

#[test]
fn test_long_click_and_missing_callbacks() {
    let long_clicks = recorder();
    let l = long_clicks.clone();
    let fixture = Fixture::new(
        person_definition().on_long_click(move |scope| l.lock().push(scope.item().id)),
    );
    people(&fixture, &["Ada", "Grace"]);
    fixture.data_source.add(Header::new("Staff")).unwrap();

    let grace = fixture.bound_holder(1);
    assert!(!fixture.adapter().dispatch_click(&grace).unwrap());
    assert!(fixture.adapter().dispatch_long_click(&grace).unwrap());

    let header = fixture.bound_holder(2);
    assert!(!fixture.adapter().dispatch_long_click(&header).unwrap());

    assert_eq!(*long_clicks.lock(), vec![1]);
}

#[test]
fn test_click_on_unbound_holder() {
    let fixture = Fixture::new(person_definition().on_click(|_| {}));
    let view_type = fixture.handle.view_type_for::<Person>().unwrap();
    let holder = fixture.adapter().create_view_holder(view_type).unwrap();

    assert!(!fixture.adapter().dispatch_click(&holder).unwrap());
}

#[test]
fn test_click_callback_removes_its_item() {
    let fixture = Fixture::new(person_definition().on_click(|scope| {
        scope
            .handle()
            .data_source()
            .remove_at(scope.index())
            .unwrap();
    }));
    people(&fixture, &["Ada", "Grace"]);
    fixture.host.take_changes();

    let holder = fixture.bound_holder(1);
    assert!(fixture.adapter().dispatch_click(&holder).unwrap());

    assert_eq!(names(&fixture), vec!["Ada"]);
    assert_eq!(
        fixture.host.take_changes(),
        vec![ListChange::Removed { index: 1, count: 1 }]
    );
}

#[test]
fn test_swipe_returning_true_removes_item() {
    let swiped = recorder();
    let s = swiped.clone();
    let fixture = Fixture::new(person_definition().with_swipe_action(
        SwipeLocation::Left,
        SwipeAction::<Person>::new()
            .icon(ResourceId(1))
            .color(ResourceId(2))
            .callback(move |scope| {
                s.lock().push(scope.item().name.clone());
                true
            }),
    ));
    people(&fixture, &["Ada", "Grace", "Linus"]);
    fixture.host.take_changes();

    assert!(fixture.adapter().dispatch_swipe(1, SwipeLocation::Left).unwrap());

    assert_eq!(*swiped.lock(), vec!["Grace".to_string()]);
    assert_eq!(names(&fixture), vec!["Ada", "Linus"]);
    assert_eq!(
        fixture.host.take_changes(),
        vec![ListChange::Removed { index: 1, count: 1 }]
    );
}

#[test]
fn test_swipe_returning_false_keeps_item() {
    let fixture = Fixture::new(
        person_definition()
            .with_swipe_action(SwipeLocation::Right, SwipeAction::<Person>::new().callback(|_| false)),
    );
    people(&fixture, &["Ada", "Grace"]);
    fixture.host.take_changes();

    assert!(!fixture.adapter().dispatch_swipe(0, SwipeLocation::Right).unwrap());

    assert_eq!(names(&fixture), vec!["Ada", "Grace"]);
    assert_eq!(
        fixture.host.take_changes(),
        vec![ListChange::Changed { index: 0, count: 1 }]
    );
}

#[test]
fn test_swipe_at_unconfigured_location() {
    let fixture = Fixture::new(
        person_definition().with_swipe_action(SwipeLocation::Left, SwipeAction::<Person>::new().callback(|_| true)),
    );
    people(&fixture, &["Ada"]);

    assert_eq!(
        fixture.adapter().swipe_locations(0).unwrap(),
        vec![SwipeLocation::Left]
    );
    assert!(!fixture.adapter().dispatch_swipe(0, SwipeLocation::Right).unwrap());
    assert_eq!(fixture.data_source.size(), 1);
}

#[test]
fn test_swipe_callback_mutating_list_removes_right_item() {
    let fixture = Fixture::new(person_definition().with_swipe_action_on(
        &SwipeLocation::ALL,
        SwipeAction::<Person>::new().callback(|scope| {
            scope
                .handle()
                .data_source()
                .insert(0, Person::new(99, "New"))
                .unwrap();
            true
        }),
    ));
    people(&fixture, &["Ada", "Grace"]);

    assert!(fixture.adapter().dispatch_swipe(1, SwipeLocation::Right).unwrap());

    assert_eq!(names(&fixture), vec!["New", "Ada"]);
}

#[test]
fn test_swipe_styles_exposed_through_definition() {
    let fixture = Fixture::new(person_definition().with_swipe_action(
        SwipeLocation::Left,
        SwipeAction::<Person>::new().text(ResourceId(5)).callback(|_| true),
    ));

    let definition = fixture.handle.definition_for::<Person>().unwrap();
    assert_eq!(
        definition.swipe_style(SwipeLocation::Left),
        Some(&SwipeStyle {
            icon: None,
            text: Some(ResourceId(5)),
            color: None,
        })
    );
    assert_eq!(definition.swipe_style(SwipeLocation::Right), None);
}

#[test]
fn test_stable_ids() {
    let fixture = Fixture::new(person_definition().has_stable_ids(|person| person.id + 1000));
    fixture.data_source.add(Person::new(7, "Ada")).unwrap();
    fixture.data_source.add(Header::new("Staff")).unwrap();

    let adapter = fixture.adapter();
    assert!(adapter.has_stable_ids());
    assert_eq!(adapter.item_id(0).unwrap(), 1007);
    assert_eq!(adapter.item_id(1).unwrap(), 1);
    assert!(adapter.item_id(2).is_err());
}

#[test]
fn test_positions_as_ids_without_extractor() {
    let fixture = Fixture::new(person_definition());
    people(&fixture, &["Ada", "Grace"]);

    assert!(!fixture.adapter().has_stable_ids());
    assert_eq!(fixture.adapter().item_id(1).unwrap(), 1);
}

#[test]
fn test_recycle_clears_binding() {
    let fixture = Fixture::new(person_definition().on_recycled(|holder| {
        holder.recycled += 1;
        holder.name.clear();
    }));
    people(&fixture, &["Ada"]);

    let mut holder = fixture.bound_holder(0);
    fixture.adapter().on_view_recycled(&mut holder).unwrap();

    let person = holder.get::<PersonHolder>().unwrap();
    assert_eq!(person.recycled, 1);
    assert!(person.name.is_empty());
    assert!(!holder.is_bound());
    assert_eq!(holder.bound_position(), None);
}

#[test]
fn test_detached_adapter_rejects_events() {
    let fixture = Fixture::new(person_definition().on_click(|_| {}));
    people(&fixture, &["Ada"]);
    let mut holder = fixture.bound_holder(0);

    fixture.handle.detach_data_source();
    let adapter = fixture.adapter();

    assert!(!adapter.is_attached());
    assert_eq!(adapter.bind_view_holder(&mut holder, 0), Err(Error::NotAttached));
    assert_eq!(adapter.dispatch_click(&holder), Err(Error::NotAttached));
    assert_eq!(
        adapter.dispatch_swipe(0, SwipeLocation::Left),
        Err(Error::NotAttached)
    );

    // Reads and holder creation keep working.
    assert_eq!(adapter.item_count(), 1);
    let view_type = adapter.view_type_for_position(0).unwrap();
    assert!(adapter.create_view_holder(view_type).is_ok());
}

#[test]
fn test_notify_visible_rows() {
    let fixture = Fixture::new(person_definition());
    people(&fixture, &["Ada", "Grace", "Linus"]);
    fixture.host.take_changes();

    fixture.adapter().notify_visible_rows_changed();
    fixture.host.set_visible(1..10);
    fixture.adapter().notify_visible_rows_changed();
    fixture.host.set_visible(5..8);
    fixture.adapter().notify_visible_rows_changed();

    assert_eq!(
        fixture.host.take_changes(),
        vec![
            ListChange::Reset,
            ListChange::Changed { index: 1, count: 2 },
        ]
    );
}

#[test]
fn test_bulk_changes_reach_host() {
    let fixture = Fixture::new(person_definition());

    fixture
        .data_source
        .add_all([Person::new(1, "Ada"), Person::new(2, "Grace")])
        .unwrap();
    fixture.data_source.move_item(0, 1).unwrap();
    fixture.data_source.set_items([Person::new(3, "Linus")]).unwrap();

    assert_eq!(
        fixture.host.take_changes(),
        vec![
            ListChange::Inserted { index: 0, count: 2 },
            ListChange::Moved { from: 0, to: 1 },
            ListChange::Reset,
        ]
    );
    assert_eq!(names(&fixture), vec!["Linus"]);
    assert_eq!(fixture.empty_view.is_visible(), Some(false));
}

#[test]
fn test_header_definition_has_no_callbacks() {
    let definition = header_definition();
    assert!(!definition.handles_click(ClickKind::Click));
    assert!(definition.swipe_locations().is_empty());
}
