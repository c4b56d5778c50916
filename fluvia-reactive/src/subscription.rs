//! Subscription
//!
//! A subscription is the cancellation token of a listener registered on a node.

// Imports
use {
	crate::{Listener, Node, Strength},
	core::{cell::Cell, fmt},
	std::rc::Rc,
};

/// A cancellable registration whose strength may be changed after the fact
pub trait Link {
	/// Changes the strength of this registration.
	///
	/// Does nothing if cancelled, or if already at `strength`.
	fn update_strength(&self, strength: Strength);

	/// Cancels this registration.
	///
	/// Cancelling more than once does nothing.
	fn cancel(&self);

	/// Returns if this registration was cancelled
	fn is_cancelled(&self) -> bool;
}

/// A listener registered on a single node
pub struct VertexSubscription<T> {
	/// Node
	node: Rc<dyn Node<T>>,

	/// Listener
	listener: Rc<dyn Listener<T>>,

	/// Current strength, or `None`, if cancelled
	strength: Cell<Option<Strength>>,
}

impl<T: 'static> VertexSubscription<T> {
	/// Registers `listener` on `node` with strength `strength`.
	pub fn new(node: Rc<dyn Node<T>>, listener: Rc<dyn Listener<T>>, strength: Strength) -> Rc<Self> {
		let subscription = Self {
			node,
			listener,
			strength: Cell::new(Some(strength)),
		};
		subscription.register(strength);

		Rc::new(subscription)
	}

	/// Returns the current strength of this subscription, if not cancelled
	#[must_use]
	pub fn strength(&self) -> Option<Strength> {
		self.strength.get()
	}

	/// Adds the listener to the set of `strength`
	fn register(&self, strength: Strength) {
		let vertex = self.node.vertex();
		match strength {
			Strength::Strong => {
				self.listener.set_pinned(true);
				vertex.add_strong_listener(Rc::clone(&self.listener));
			},
			Strength::Weak => vertex.add_weak_listener(Rc::downgrade(&self.listener)),
		}
	}

	/// Removes the listener from the set of `strength`
	fn unregister(&self, strength: Strength) {
		let vertex = self.node.vertex();
		match strength {
			Strength::Strong => {
				vertex.remove_strong_listener(&self.listener);
				self.listener.set_pinned(false);
			},
			Strength::Weak => vertex.remove_weak_listener(&Rc::downgrade(&self.listener)),
		}
	}
}

impl<T: 'static> Link for VertexSubscription<T> {
	fn update_strength(&self, strength: Strength) {
		let Some(prev_strength) = self.strength.get() else {
			return;
		};
		if prev_strength == strength {
			return;
		}

		tracing::trace!(
			vertex = self.node.vertex().id(),
			defined_loc = %self.node.vertex().defined_loc(),
			from = %prev_strength,
			to = %strength,
			"Switching subscription strength"
		);

		// Note: We register with the new strength before unregistering the
		//       old one, so the vertex never sees itself without listeners
		//       and doesn't pause in between.
		self.strength.set(Some(strength));
		self.register(strength);
		self.unregister(prev_strength);
	}

	fn cancel(&self) {
		if let Some(strength) = self.strength.take() {
			self.unregister(strength);
		}
	}

	fn is_cancelled(&self) -> bool {
		self.strength.get().is_none()
	}
}

impl<T: 'static> fmt::Debug for VertexSubscription<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("VertexSubscription")
			.field("vertex", &self.node.vertex().id())
			.field("strength", &self.strength.get())
			.finish_non_exhaustive()
	}
}

/// Subscription
///
/// Dropping a subscription does *not* cancel it. A strong subscription
/// keeps its listener alive for as long as the node it listens to.
#[derive(Clone)]
pub struct Subscription {
	/// Link, if any
	link: Option<Rc<dyn Link>>,
}

impl Subscription {
	/// Creates a subscription to nothing.
	///
	/// Used for listening to nodes that will never produce anything.
	#[must_use]
	pub const fn empty() -> Self {
		Self { link: None }
	}

	/// Creates a subscription from a link
	#[must_use]
	pub fn new(link: Rc<dyn Link>) -> Self {
		Self { link: Some(link) }
	}

	/// Cancels this subscription.
	///
	/// Cancelling more than once does nothing.
	pub fn cancel(&self) {
		if let Some(link) = &self.link {
			link.cancel();
		}
	}

	/// Changes the strength of this subscription
	pub fn update_strength(&self, strength: Strength) {
		if let Some(link) = &self.link {
			link.update_strength(strength);
		}
	}

	/// Returns if this subscription is cancelled.
	///
	/// Empty subscriptions are always cancelled.
	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		self.link.as_ref().is_none_or(|link| link.is_cancelled())
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("cancelled", &self.is_cancelled())
			.finish()
	}
}

#[cfg(test)]
mod test {
	use {super::*, crate::Vertex};

	#[test]
	fn cancel_twice() {
		let vertex = Rc::new(Vertex::<i32>::source());
		let listener: Rc<dyn Listener<i32>> = Rc::new(|_: &i32| ());
		let subscription = Subscription::new(VertexSubscription::new(
			Rc::clone(&vertex) as Rc<dyn Node<i32>>,
			listener,
			Strength::Strong,
		));

		subscription.cancel();
		subscription.cancel();
		assert!(subscription.is_cancelled());
		assert_eq!(vertex.strong_listener_count(), 0);
		assert!(!vertex.is_resumed());
	}

	#[test]
	fn switch_strength_keeps_resumed() {
		let vertex = Rc::new(Vertex::<i32>::source());
		let listener: Rc<dyn Listener<i32>> = Rc::new(|_: &i32| ());
		let subscription = VertexSubscription::new(Rc::clone(&vertex) as Rc<dyn Node<i32>>, listener, Strength::Weak);
		assert_eq!((vertex.strong_listener_count(), vertex.weak_listener_count()), (0, 1));

		subscription.update_strength(Strength::Strong);
		assert_eq!((vertex.strong_listener_count(), vertex.weak_listener_count()), (1, 0));
		assert!(vertex.is_resumed());

		subscription.update_strength(Strength::Weak);
		assert_eq!((vertex.strong_listener_count(), vertex.weak_listener_count()), (0, 1));

		subscription.cancel();
		subscription.update_strength(Strength::Strong);
		assert_eq!((vertex.strong_listener_count(), vertex.weak_listener_count()), (0, 0));
		assert_eq!(subscription.strength(), None);
	}

	#[test]
	fn empty_is_cancelled() {
		let subscription = Subscription::empty();
		assert!(subscription.is_cancelled());
		subscription.cancel();
	}
}
