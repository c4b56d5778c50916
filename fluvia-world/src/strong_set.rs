//! Strong set

// Imports
use {
	crate::AllocId,
	core::fmt,
	std::rc::Rc,
};

/// A set of reference-counted values, keyed by the address of their allocation.
pub struct StrongSet<T: ?Sized> {
	/// Entries, in insertion order
	entries: Vec<Rc<T>>,
}

impl<T: ?Sized> StrongSet<T> {
	/// Creates a new, empty, strong set
	#[must_use]
	pub const fn new() -> Self {
		Self { entries: vec![] }
	}

	/// Returns the number of entries in this set
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns if this set is empty
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns if `value` is in this set
	#[must_use]
	pub fn contains(&self, value: &Rc<T>) -> bool {
		self.position(value.alloc_id()).is_some()
	}

	/// Inserts `value` into this set.
	///
	/// Returns `false` if it was already present.
	pub fn insert(&mut self, value: Rc<T>) -> bool {
		if self.contains(&value) {
			return false;
		}

		self.entries.push(value);
		true
	}

	/// Removes `value` from this set, returning the removed entry.
	pub fn remove(&mut self, value: &Rc<T>) -> Option<Rc<T>> {
		let idx = self.position(value.alloc_id())?;
		Some(self.entries.remove(idx))
	}

	/// Returns all entries, in insertion order
	#[must_use]
	pub fn snapshot(&self) -> Vec<Rc<T>> {
		self.entries.clone()
	}

	/// Returns the index of the entry with id `id`
	fn position(&self, id: usize) -> Option<usize> {
		self.entries.iter().position(|entry| entry.alloc_id() == id)
	}
}

impl<T: ?Sized> Default for StrongSet<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: ?Sized> fmt::Debug for StrongSet<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set()
			.entries(self.entries.iter().map(|entry| format!("{:#x}", entry.alloc_id())))
			.finish()
	}
}
