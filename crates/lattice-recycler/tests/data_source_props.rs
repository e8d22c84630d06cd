//! Property tests: any sequence of mutations leaves the data source, the
//! adapter and the empty view agreeing with a plain `Vec` model.

mod common;

use common::{person_definition, Fixture, Person};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(u64),
    Insert(usize, u64),
    RemoveAt(usize),
    Set(usize, u64),
    Move(usize, usize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u64>().prop_map(Op::Add),
        2 => (0usize..8, any::<u64>()).prop_map(|(index, id)| Op::Insert(index, id)),
        3 => (0usize..8).prop_map(Op::RemoveAt),
        2 => (0usize..8, any::<u64>()).prop_map(|(index, id)| Op::Set(index, id)),
        2 => (0usize..8, 0usize..8).prop_map(|(from, to)| Op::Move(from, to)),
        1 => Just(Op::Clear),
    ]
}

fn person(id: u64) -> Person {
    Person::new(id, &format!("person-{id}"))
}

/// Applies `op` to the model. Returns `false` where the data source must
/// reject it with an index error.
fn apply(model: &mut Vec<u64>, op: &Op) -> bool {
    match *op {
        Op::Add(id) => model.push(id),
        Op::Insert(index, id) => {
            if index > model.len() {
                return false;
            }
            model.insert(index, id);
        }
        Op::RemoveAt(index) => {
            if index >= model.len() {
                return false;
            }
            model.remove(index);
        }
        Op::Set(index, id) => match model.get_mut(index) {
            Some(slot) => *slot = id,
            None => return false,
        },
        Op::Move(from, to) => {
            if from >= model.len() || to >= model.len() {
                return false;
            }
            let id = model.remove(from);
            model.insert(to, id);
        }
        Op::Clear => model.clear(),
    }
    true
}

proptest! {
    #[test]
    fn mutations_match_vec_model(ops in prop::collection::vec(op(), 0..40)) {
        let fixture = Fixture::new(person_definition());
        let data_source = &fixture.data_source;
        let mut model: Vec<u64> = Vec::new();

        for op in &ops {
            let accepted = apply(&mut model, op);
            let result = match *op {
                Op::Add(id) => data_source.add(person(id)),
                Op::Insert(index, id) => data_source.insert(index, person(id)),
                Op::RemoveAt(index) => data_source.remove_at(index).map(drop),
                Op::Set(index, id) => data_source.set(index, person(id)).map(drop),
                Op::Move(from, to) => data_source.move_item(from, to),
                Op::Clear => data_source.clear(),
            };
            prop_assert_eq!(result.is_ok(), accepted, "{:?}", op);

            prop_assert_eq!(data_source.size(), model.len());
            prop_assert_eq!(fixture.adapter().item_count(), model.len());
            for (index, id) in model.iter().enumerate() {
                let item = data_source.get_as::<Person>(index).unwrap();
                prop_assert_eq!(item.map(|person| person.id), Some(*id));
            }
            prop_assert_eq!(fixture.empty_view.is_visible(), Some(data_source.is_empty()));
        }
    }
}
