//! Vertex
//!
//! The pause/resume state machine shared by every node of the graph.
//!
//! A vertex keeps two sets of listeners, one strong and one weak, and is
//! [`Resumed`](VertexState::Resumed) exactly while at least one of them is
//! non-empty. Crossing that boundary runs the vertex's [`Upstream`] behavior,
//! which is what lets derived nodes only subscribe to their sources while
//! someone is observing them.

// Imports
use {
	crate::{CellVertex, Change, FutureVertex, ListChange, ListVertex, Listener, Loc, Upstream},
	core::{
		cell::{Cell, RefCell},
		fmt,
		ptr,
	},
	fluvia_world::{StrongSet, WeakSet},
	std::rc::{Rc, Weak},
};

/// Vertex state
#[derive(PartialEq, Eq, Clone, Copy, Hash, Debug)]
#[derive(derive_more::Display)]
pub enum VertexState {
	/// No listeners are registered
	#[display("paused")]
	Paused,

	/// At least one listener is registered
	#[display("resumed")]
	Resumed,
}

/// Vertex
pub struct Vertex<T> {
	/// State
	state: Cell<VertexState>,

	/// Strong listeners
	strong: RefCell<StrongSet<dyn Listener<T>>>,

	/// Weak listeners
	weak: RefCell<WeakSet<dyn Listener<T>>>,

	/// Upstream behavior
	upstream: Box<dyn Upstream>,

	/// Where this vertex was defined
	defined_loc: Loc,
}

impl<T: 'static> Vertex<T> {
	/// Creates a new vertex, with no upstream
	#[must_use]
	#[track_caller]
	pub fn source() -> Self {
		Self::new_at((), Loc::caller())
	}

	/// Creates a new vertex, with an upstream behavior
	#[must_use]
	#[track_caller]
	pub fn new(upstream: impl Upstream + 'static) -> Self {
		Self::new_at(upstream, Loc::caller())
	}

	/// Creates a new vertex defined at `defined_loc`.
	///
	/// Used by combinators that create their vertex inside of a closure,
	/// where the caller location isn't available.
	#[must_use]
	pub fn new_at(upstream: impl Upstream + 'static, defined_loc: Loc) -> Self {
		Self {
			state: Cell::new(VertexState::Paused),
			strong: RefCell::new(StrongSet::new()),
			weak: RefCell::new(WeakSet::new()),
			upstream: Box::new(upstream),
			defined_loc,
		}
	}

	/// Returns the state of this vertex
	#[must_use]
	pub fn state(&self) -> VertexState {
		self.state.get()
	}

	/// Returns if this vertex is resumed
	#[must_use]
	pub fn is_resumed(&self) -> bool {
		self.state() == VertexState::Resumed
	}

	/// Returns where this vertex was defined
	#[must_use]
	pub const fn defined_loc(&self) -> Loc {
		self.defined_loc
	}

	/// Returns a unique identifier to this vertex.
	#[must_use]
	pub fn id(&self) -> usize {
		ptr::from_ref(self).addr()
	}

	/// Returns the number of strong listeners
	#[must_use]
	pub fn strong_listener_count(&self) -> usize {
		self.strong.borrow().len()
	}

	/// Returns the number of weak listeners, including dead ones
	/// that weren't pruned yet.
	///
	/// Dead listeners are pruned whenever the listeners change or a value is notified.
	#[must_use]
	pub fn weak_listener_count(&self) -> usize {
		self.weak.borrow().len()
	}

	/// Adds a strong listener.
	///
	/// # Panics
	/// Panics if `listener` is already registered strongly.
	#[track_caller]
	pub fn add_strong_listener(&self, listener: Rc<dyn Listener<T>>) {
		let inserted = self.strong.borrow_mut().insert(listener);
		assert!(
			inserted,
			"Strong listener was already registered on vertex defined at {}",
			self.defined_loc
		);

		self.update_state();
	}

	/// Removes a strong listener.
	///
	/// # Panics
	/// Panics if `listener` isn't registered strongly.
	#[track_caller]
	pub fn remove_strong_listener(&self, listener: &Rc<dyn Listener<T>>) {
		let removed = self.strong.borrow_mut().remove(listener);
		assert!(
			removed.is_some(),
			"Strong listener wasn't registered on vertex defined at {}",
			self.defined_loc
		);

		self.update_state();

		// Note: The listener might be the last reference to some other node,
		//       so only drop it once we're done with our own state.
		drop(removed);
	}

	/// Adds a weak listener.
	///
	/// # Panics
	/// Panics if `listener` is already registered weakly.
	#[track_caller]
	pub fn add_weak_listener(&self, listener: Weak<dyn Listener<T>>) {
		let inserted = self.weak.borrow_mut().insert(listener);
		assert!(
			inserted,
			"Weak listener was already registered on vertex defined at {}",
			self.defined_loc
		);

		self.update_state();
	}

	/// Removes a weak listener.
	///
	/// # Panics
	/// Panics if `listener` isn't registered weakly.
	#[track_caller]
	pub fn remove_weak_listener(&self, listener: &Weak<dyn Listener<T>>) {
		let removed = self.weak.borrow_mut().remove(listener);
		assert!(
			removed,
			"Weak listener wasn't registered on vertex defined at {}",
			self.defined_loc
		);

		self.update_state();
	}

	/// Notifies all listeners of `value`.
	///
	/// Strong listeners are notified before weak listeners. Both sets are
	/// snapshotted beforehand, so listeners added during this call won't
	/// receive `value`, and listeners removed during this call still will.
	///
	/// Any weak listeners that were dropped are pruned, which may pause
	/// this vertex.
	pub fn notify(&self, value: &T) {
		let strong = self.strong.borrow().snapshot();
		let (weak, pruned) = self.weak.borrow_mut().upgrade_all();
		if pruned != 0 {
			tracing::debug!(vertex = self.id(), defined_loc = %self.defined_loc, pruned, "Pruned dead weak listeners");
			self.update_state();
		}

		for listener in strong.iter().chain(&weak) {
			listener.handle(value);
		}
	}

	/// Updates the state of this vertex after its listeners changed.
	///
	/// Any dead weak listeners are pruned first, so they can't keep the vertex resumed.
	fn update_state(&self) {
		let pruned = self.weak.borrow_mut().prune();
		if pruned != 0 {
			tracing::debug!(vertex = self.id(), defined_loc = %self.defined_loc, pruned, "Pruned dead weak listeners");
		}

		let has_listeners = !self.strong.borrow().is_empty() || !self.weak.borrow().is_empty();
		match (self.state.get(), has_listeners) {
			(VertexState::Paused, true) => {
				self.state.set(VertexState::Resumed);
				tracing::trace!(vertex = self.id(), defined_loc = %self.defined_loc, "Resuming vertex");
				self.upstream.resume();
			},
			(VertexState::Resumed, false) => {
				self.state.set(VertexState::Paused);
				tracing::trace!(vertex = self.id(), defined_loc = %self.defined_loc, "Pausing vertex");
				self.upstream.pause();
			},
			(VertexState::Paused, false) | (VertexState::Resumed, true) => (),
		}
	}
}

impl<T> fmt::Debug for Vertex<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Vertex")
			.field("id", &ptr::from_ref(self).addr())
			.field("defined_loc", &self.defined_loc)
			.field("state", &self.state.get())
			.field("strong", &*self.strong.borrow())
			.field("weak", &*self.weak.borrow())
			.finish_non_exhaustive()
	}
}

/// A node of the graph, backed by a vertex.
pub trait Node<T> {
	/// Returns the vertex of this node
	fn vertex(&self) -> &Vertex<T>;
}

#[duplicate::duplicate_item(
	Ty Value body;
	[ Vertex<T> ] [ T ] [ self ];
	[ CellVertex<T> ] [ Change<T> ] [ &self.vertex ];
	[ ListVertex<T> ] [ ListChange<T> ] [ &self.vertex ];
	[ FutureVertex<T> ] [ T ] [ &self.vertex ];
)]
impl<T> Node<Value> for Ty {
	fn vertex(&self) -> &Vertex<Value> {
		body
	}
}
