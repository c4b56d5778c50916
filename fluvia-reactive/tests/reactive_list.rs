//! Reactive list tests

// Modules
mod common;

// Imports
use {
	common::{init_logger, recorder},
	fluvia_reactive::{ListChange, ListUpdate, MutableReactiveList, ReactiveList},
	itertools::Itertools,
};

#[test]
fn set() {
	init_logger();

	let list = MutableReactiveList::new(vec![1, 2, 3]);
	let (changes, listener) = recorder::<ListChange<i32>>();
	let _subscription = list.list().changes().listen(listener);

	list.set(1, 5);
	assert_eq!(list.current_elements(), [1, 5, 3]);
	assert_eq!(*changes.borrow(), [ListChange::single(1..2, vec![5])]);
}

#[test]
fn map() {
	init_logger();

	let list = MutableReactiveList::new(vec![1, 2, 3]);
	let mapped = list.list().map(|value| value.to_string());
	assert_eq!(mapped.current_elements(), ["1", "2", "3"]);

	let (changes, listener) = recorder::<ListChange<String>>();
	let _subscription = mapped.changes().listen(listener);

	list.set(0, 10);
	list.push(4);
	list.insert(1, 0);
	assert_eq!(list.remove(2), 2);
	assert_eq!(mapped.current_elements(), ["10", "0", "3", "4"]);
	assert_eq!(mapped.len(), 4);
	assert_eq!(changes.borrow().len(), 4);
	assert_eq!(changes.borrow()[0], ListChange::single(0..1, vec![String::from("10")]));
}

/// Mapped lists stay correct while unobserved
#[test]
fn map_tracks_unobserved() {
	init_logger();

	let list = MutableReactiveList::new(vec![1, 2]);
	let mapped = list.list().map(|value| value * 2);

	list.apply(ListChange::new(vec![
		ListUpdate::new(0..1, vec![]),
		ListUpdate::new(2..2, vec![3, 4]),
	]));
	assert_eq!(mapped.current_elements(), [4, 6, 8]);
}

#[test]
fn const_list() {
	let list = ReactiveList::of([1, 2, 3]).map(|value| value + 1);
	assert!(matches!(list, ReactiveList::Const(_)));
	assert_eq!(list.current_elements(), [2, 3, 4]);
	assert!(list.changes().is_never());
	assert!(!list.is_empty());
}

/// Applying the updates of a change in any order gives the same result
#[test]
fn update_order_independence() {
	init_logger();

	let initial = (0..10).collect::<Vec<_>>();
	let updates = vec![
		ListUpdate::new(0..2, vec![100]),
		ListUpdate::new(3..3, vec![200, 201]),
		ListUpdate::new(4..7, vec![]),
		ListUpdate::new(8..10, vec![300, 301, 302]),
	];

	let results = updates
		.iter()
		.cloned()
		.permutations(updates.len())
		.map(|updates| {
			let list = MutableReactiveList::new(initial.clone());
			list.apply(ListChange::new(updates));
			list.current_elements()
		})
		.collect::<Vec<_>>();

	assert_eq!(results.len(), 24);
	assert!(results.iter().all_equal(), "Update order changed the result: {results:?}");
	assert_eq!(results[0], [100, 2, 200, 201, 3, 7, 300, 301, 302]);
}

#[test]
#[should_panic(expected = "overlap")]
fn overlapping_updates() {
	init_logger();

	let list = MutableReactiveList::new(vec![0, 1, 2, 3]);
	list.apply(ListChange::new(vec![
		ListUpdate::new(2..4, vec![]),
		ListUpdate::new(0..3, vec![]),
	]));
}

#[test]
#[should_panic(expected = "out of bounds")]
fn remove_out_of_bounds() {
	init_logger();

	let list = MutableReactiveList::new(vec![0]);
	list.remove(1);
}
