//! Listener
//!
//! Listeners are the receiving end of a vertex. They're always registered
//! as reference-counted objects, so that their identity (the address of
//! their allocation) is the same whether they're held strongly or weakly.

// Imports
use {
	core::{any::Any, cell::RefCell, fmt},
	std::rc::{Rc, Weak},
};

/// Reference strength of a listener registration
#[derive(PartialEq, Eq, Clone, Copy, Hash, Debug)]
#[derive(derive_more::Display)]
pub enum Strength {
	/// The vertex only keeps a `Weak` to the listener
	#[display("weak")]
	Weak,

	/// The vertex keeps the listener alive
	#[display("strong")]
	Strong,
}

/// Listener
pub trait Listener<T: ?Sized> {
	/// Handles a value pushed by a vertex
	fn handle(&self, value: &T);

	/// Sets whether this listener should keep the node it forwards to alive.
	///
	/// Called with `true` right before the listener is registered strongly,
	/// and with `false` right after a strong registration is removed.
	fn set_pinned(&self, _pinned: bool) {}
}

impl<T, F> Listener<T> for F
where
	T: ?Sized,
	F: Fn(&T),
{
	fn handle(&self, value: &T) {
		self(value);
	}
}

/// Relay
///
/// Forwards values from an upstream vertex into the downstream node that owns it.
///
/// The relay itself only holds a weak reference to its owner, since the owner
/// holds the subscription that keeps the relay alive. While registered strongly,
/// the relay also pins its owner, so that the upstream vertex keeps the whole
/// downstream node alive, not just the relay.
pub struct Relay<T: ?Sized> {
	/// Owner
	owner: Weak<dyn Any>,

	/// Strong reference to the owner, while pinned
	pin: RefCell<Option<Rc<dyn Any>>>,

	/// Handler
	handler: Box<dyn Fn(&T)>,
}

impl<T: ?Sized + 'static> Relay<T> {
	/// Creates a new relay to `owner`.
	///
	/// Values are only forwarded to `handler` while `owner` is alive.
	pub fn new<N>(owner: &Weak<N>, handler: impl Fn(&N, &T) + 'static) -> Rc<Self>
	where
		N: 'static,
	{
		let target = Weak::clone(owner);
		let owner: Weak<dyn Any> = Weak::<N>::clone(owner);
		Rc::new(Self {
			owner,
			pin: RefCell::new(None),
			handler: Box::new(move |value: &T| {
				if let Some(target) = target.upgrade() {
					handler(&target, value);
				}
			}),
		})
	}
}

impl<T: ?Sized> Relay<T> {
	/// Returns if this relay is currently pinning its owner
	#[must_use]
	pub fn is_pinned(&self) -> bool {
		self.pin.borrow().is_some()
	}
}

impl<T: ?Sized> Listener<T> for Relay<T> {
	fn handle(&self, value: &T) {
		(self.handler)(value);
	}

	fn set_pinned(&self, pinned: bool) {
		let pin = match pinned {
			true => self.owner.upgrade(),
			false => None,
		};

		// Note: The previous pin must be dropped outside of the borrow, since
		//       it might be the last reference to the owner.
		let prev_pin = self.pin.replace(pin);
		drop(prev_pin);
	}
}

impl<T: ?Sized> fmt::Debug for Relay<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Relay")
			.field("owner_alive", &(self.owner.strong_count() != 0))
			.field("pinned", &self.is_pinned())
			.finish_non_exhaustive()
	}
}
