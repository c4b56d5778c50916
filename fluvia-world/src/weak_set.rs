//! Weak set
//!
//! A set of weak references whose entries may die at any point
//! between two operations on the set.
//!
//! Since there's no collector running in the background, entries
//! aren't removed when their value is dropped. Instead, dead entries
//! are found and removed the next time the set is iterated through
//! [`WeakSet::upgrade_all`] or [`WeakSet::prune`].

// Imports
use {
	crate::AllocId,
	core::fmt,
	std::rc::{Rc, Weak},
};

/// Weak set
pub struct WeakSet<T: ?Sized> {
	/// Entries, in insertion order
	entries: Vec<Weak<T>>,
}

impl<T: ?Sized> WeakSet<T> {
	/// Creates a new, empty, weak set
	#[must_use]
	pub const fn new() -> Self {
		Self { entries: vec![] }
	}

	/// Returns the number of entries in this set, including
	/// any dead entries that weren't pruned yet.
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns if this set has no entries, dead or alive.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns if `value` is in this set
	#[must_use]
	pub fn contains(&self, value: &Weak<T>) -> bool {
		self.position(value).is_some()
	}

	/// Inserts `value` into this set.
	///
	/// Returns `false` if it was already present.
	pub fn insert(&mut self, value: Weak<T>) -> bool {
		if self.contains(&value) {
			return false;
		}

		self.entries.push(value);
		true
	}

	/// Removes `value` from this set.
	///
	/// Works even if the value behind `value` has already been dropped.
	/// Returns `false` if it wasn't present.
	pub fn remove(&mut self, value: &Weak<T>) -> bool {
		match self.position(value) {
			Some(idx) => {
				self.entries.remove(idx);
				true
			},
			None => false,
		}
	}

	/// Removes all dead entries.
	///
	/// Returns the number of entries removed.
	pub fn prune(&mut self) -> usize {
		let prev_len = self.entries.len();
		self.entries.retain(|entry| entry.strong_count() != 0);
		prev_len - self.entries.len()
	}

	/// Upgrades all live entries, pruning the dead ones.
	///
	/// Returns the upgraded entries, in insertion order, alongside
	/// the number of pruned entries.
	pub fn upgrade_all(&mut self) -> (Vec<Rc<T>>, usize) {
		let mut alive = Vec::with_capacity(self.entries.len());
		let prev_len = self.entries.len();
		self.entries.retain(|entry| match entry.upgrade() {
			Some(value) => {
				alive.push(value);
				true
			},
			None => false,
		});

		(alive, prev_len - self.entries.len())
	}

	/// Returns the index of `value`
	fn position(&self, value: &Weak<T>) -> Option<usize> {
		let id = value.alloc_id();
		self.entries.iter().position(|entry| entry.alloc_id() == id)
	}
}

impl<T: ?Sized> Default for WeakSet<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: ?Sized> fmt::Debug for WeakSet<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set()
			.entries(self.entries.iter().map(|entry| match entry.strong_count() {
				0 => format!("{:#x} (dead)", entry.alloc_id()),
				_ => format!("{:#x}", entry.alloc_id()),
			}))
			.finish()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn insert_twice() {
		let value = Rc::new(1_i32);
		let mut set = WeakSet::new();

		assert!(set.insert(Rc::downgrade(&value)));
		assert!(!set.insert(Rc::downgrade(&value)), "Same allocation was inserted twice");
		assert_eq!(set.len(), 1);
	}

	#[test]
	fn remove_dead() {
		let value = Rc::new(1_i32);
		let weak = Rc::downgrade(&value);
		let mut set = WeakSet::new();
		assert!(set.insert(Weak::clone(&weak)));

		drop(value);
		assert!(set.remove(&weak), "Dead entry couldn't be removed by identity");
		assert!(set.is_empty());
	}

	#[test]
	fn dead_entries_stay_until_pruned() {
		let value0 = Rc::new(0_i32);
		let value1 = Rc::new(1_i32);
		let mut set = WeakSet::new();
		set.insert(Rc::downgrade(&value0));
		set.insert(Rc::downgrade(&value1));

		drop(value0);
		assert_eq!(set.len(), 2, "Dead entry was removed without being accessed");

		let (alive, pruned) = set.upgrade_all();
		assert_eq!(pruned, 1);
		assert_eq!(alive.len(), 1);
		assert_eq!(*alive[0], 1);
		assert_eq!(set.len(), 1);
	}

	#[test]
	fn prune_counts() {
		let mut set = WeakSet::<i32>::new();
		for _ in 0..3 {
			let value = Rc::new(0_i32);
			set.insert(Rc::downgrade(&value));
		}

		assert_eq!(set.prune(), 3);
		assert_eq!(set.prune(), 0);
		assert!(set.is_empty());
	}
}
