//! List changes

// Imports
use {core::ops::Range, itertools::Itertools};

/// A single update of a list.
///
/// Replaces the elements in `range` with `elements`.
#[derive(PartialEq, Eq, Clone, Hash, Debug)]
pub struct ListUpdate<E> {
	/// Range of replaced elements
	pub range: Range<usize>,

	/// Elements to replace them with
	pub elements: Vec<E>,
}

impl<E> ListUpdate<E> {
	/// Creates a new update
	#[must_use]
	pub const fn new(range: Range<usize>, elements: Vec<E>) -> Self {
		Self { range, elements }
	}

	/// Maps the elements of this update
	pub fn map<F, U>(&self, f: F) -> ListUpdate<U>
	where
		F: FnMut(&E) -> U,
	{
		ListUpdate {
			range:    self.range.clone(),
			elements: self.elements.iter().map(f).collect(),
		}
	}
}

/// A change of a list.
///
/// Every range of every update refers to the list as it was before the change,
/// so the updates may be given in any order, but they must not overlap.
#[derive(PartialEq, Eq, Clone, Hash, Debug)]
pub struct ListChange<E> {
	/// Updates
	pub updates: Vec<ListUpdate<E>>,
}

impl<E> ListChange<E> {
	/// Creates a new change from its updates
	#[must_use]
	pub const fn new(updates: Vec<ListUpdate<E>>) -> Self {
		Self { updates }
	}

	/// Creates a change with a single update
	#[must_use]
	pub fn single(range: Range<usize>, elements: Vec<E>) -> Self {
		Self::new(vec![ListUpdate::new(range, elements)])
	}

	/// Maps the elements of all updates
	pub fn map<F, U>(&self, mut f: F) -> ListChange<U>
	where
		F: FnMut(&E) -> U,
	{
		ListChange {
			updates: self.updates.iter().map(|update| update.map(&mut f)).collect(),
		}
	}

	/// Applies this change to `elements`.
	///
	/// # Panics
	/// Panics if any range is out of bounds, or if two ranges overlap or start
	/// at the same index.
	#[track_caller]
	pub fn apply_to(&self, elements: &mut Vec<E>)
	where
		E: Clone,
	{
		let updates = self
			.updates
			.iter()
			.sorted_by_key(|update| update.range.start)
			.collect::<Vec<_>>();

		for update in &updates {
			assert!(
				update.range.start <= update.range.end && update.range.end <= elements.len(),
				"List update range {:?} is out of bounds for a list of length {}",
				update.range,
				elements.len()
			);
		}
		for (prev, next) in updates.iter().tuple_windows() {
			assert!(
				prev.range.end <= next.range.start && prev.range.start != next.range.start,
				"List update ranges {:?} and {:?} overlap",
				prev.range,
				next.range
			);
		}

		// Note: Going back to front keeps the ranges of the remaining updates valid
		for update in updates.iter().rev() {
			elements.splice(update.range.clone(), update.elements.iter().cloned());
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn replace_insert_remove() {
		let mut elements = vec![0, 1, 2, 3, 4];
		let change = ListChange::new(vec![
			ListUpdate::new(4..5, vec![]),
			ListUpdate::new(0..1, vec![10, 11]),
			ListUpdate::new(2..2, vec![20]),
		]);

		change.apply_to(&mut elements);
		assert_eq!(elements, [10, 11, 1, 20, 2, 3]);
	}

	#[test]
	#[should_panic(expected = "overlap")]
	fn overlapping() {
		let change = ListChange::new(vec![ListUpdate::new(0..2, vec![]), ListUpdate::new(1..3, vec![])]);
		change.apply_to(&mut vec![0, 1, 2]);
	}

	#[test]
	#[should_panic(expected = "overlap")]
	fn shared_start() {
		let change = ListChange::new(vec![ListUpdate::new(1..1, vec![5]), ListUpdate::new(1..2, vec![6])]);
		change.apply_to(&mut vec![0, 1, 2]);
	}

	#[test]
	#[should_panic(expected = "out of bounds")]
	fn out_of_bounds() {
		ListChange::single(3..4, vec![0]).apply_to(&mut vec![0, 1, 2]);
	}

	#[test]
	fn map_keeps_ranges() {
		let change = ListChange::single(1..2, vec![1, 2]).map(|value| value.to_string());
		assert_eq!(change, ListChange::single(1..2, vec![String::from("1"), String::from("2")]));
	}
}
