//! Allocation identity

// Imports
use std::rc::{Rc, Weak};

/// Reference-counted pointers which may be identified by their allocation.
///
/// A `Rc` and every `Weak` downgraded from it share the same id, for as long
/// as any of them exist.
pub trait AllocId {
	/// Returns the address of the allocation this pointer points to
	fn alloc_id(&self) -> usize;
}

#[duplicate::duplicate_item(
	Ptr;
	[ Rc ];
	[ Weak ];
)]
impl<T: ?Sized> AllocId for Ptr<T> {
	fn alloc_id(&self) -> usize {
		Ptr::as_ptr(self).cast::<()>().addr()
	}
}
