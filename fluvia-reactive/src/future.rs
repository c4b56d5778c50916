//! Future
//!
//! A value that becomes available at most once.

// Modules
mod oscillate;

// Imports
use {
	crate::{Cell, EventStream, HybridSubscription, Link, Loc, Node, Relay, Strength, Subscription, Vertex, VertexSubscription},
	core::{cell::RefCell, fmt},
	std::rc::{Rc, Weak},
};

/// Future state
#[derive(PartialEq, Eq, Clone, Copy, Hash, Debug)]
pub enum FutureState<V> {
	/// Not fulfilled yet
	Pending,

	/// Fulfilled with a value
	Fulfilled(V),
}

/// Future vertex
///
/// Notifies its listeners once, with the value it was fulfilled with.
pub struct FutureVertex<V> {
	/// Vertex
	pub(crate) vertex: Vertex<V>,

	/// State
	state: RefCell<FutureState<V>>,
}

impl<V: Clone + 'static> FutureVertex<V> {
	/// Creates a new pending future vertex with no upstream
	#[track_caller]
	pub fn source() -> Rc<Self> {
		Rc::new(Self {
			vertex: Vertex::source(),
			state:  RefCell::new(FutureState::Pending),
		})
	}

	/// Creates a new pending future vertex fulfilled with `f` of the next value of `source`.
	///
	/// The subscription to `source` is cancelled once fulfilled.
	pub fn dependent_once<S, F>(defined_loc: Loc, source: Rc<dyn Node<S>>, f: F) -> Rc<Self>
	where
		S: 'static,
		F: Fn(&S) -> V + 'static,
	{
		Rc::new_cyclic(|this: &Weak<Self>| {
			let hybrid = HybridSubscription::new(Strength::Weak, |hybrid, strength| {
				let hybrid = Weak::clone(hybrid);
				let relay = Relay::new(this, move |future: &Self, value: &S| {
					// Note: We cancel before completing, in case any listener
					//       makes `source` emit again.
					if let Some(hybrid) = hybrid.upgrade() {
						hybrid.cancel();
					}
					future.complete(f(value));
				});

				let link: Rc<dyn Link> = VertexSubscription::new(source, relay, strength);
				vec![link]
			});

			Self {
				vertex: Vertex::new_at(hybrid, defined_loc),
				state:  RefCell::new(FutureState::Pending),
			}
		})
	}

	/// Returns the current state
	#[must_use]
	pub fn state(&self) -> FutureState<V> {
		self.state.borrow().clone()
	}

	/// Returns if this future was fulfilled
	#[must_use]
	pub fn is_fulfilled(&self) -> bool {
		matches!(*self.state.borrow(), FutureState::Fulfilled(_))
	}

	/// Fulfills this future and notifies all listeners.
	///
	/// # Panics
	/// Panics if this future was already fulfilled.
	#[track_caller]
	pub(crate) fn complete(&self, value: V) {
		{
			let mut state = self.state.borrow_mut();
			assert!(
				matches!(*state, FutureState::Pending),
				"Future defined at {} was already fulfilled",
				self.vertex.defined_loc()
			);
			*state = FutureState::Fulfilled(value.clone());
		}

		tracing::trace!(vertex = self.vertex.id(), defined_loc = %self.vertex.defined_loc(), "Fulfilling future");
		self.vertex.notify(&value);
	}
}

impl<V: fmt::Debug> fmt::Debug for FutureVertex<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FutureVertex")
			.field("vertex", &self.vertex)
			.field("state", &*self.state.borrow())
			.finish()
	}
}

/// Future
///
/// Only the [`FutureCompleter`] of a future may fulfill it. Derived futures
/// are fulfilled by their source:
///
/// ```compile_fail
/// # use fluvia_reactive::{Emitter, Future};
/// let emitter = Emitter::<i32>::new();
/// let Future::Proper(node) = emitter.stream().next() else {
/// 	unreachable!();
/// };
/// node.complete(1);
/// ```
#[derive(Clone)]
pub enum Future<V> {
	/// Never fulfilled
	Hang,

	/// Fulfilled from the start
	Prefilled(V),

	/// Fulfilled by a node
	Proper(Rc<FutureVertex<V>>),
}

impl<V: Clone + 'static> Future<V> {
	/// Returns the current state
	#[must_use]
	pub fn current_state(&self) -> FutureState<V> {
		match self {
			Self::Hang => FutureState::Pending,
			Self::Prefilled(value) => FutureState::Fulfilled(value.clone()),
			Self::Proper(node) => node.state(),
		}
	}

	/// Returns a stream that emits the value of this future once it's fulfilled.
	///
	/// Futures that are already fulfilled return a stream that never emits.
	#[must_use]
	pub fn stream(&self) -> EventStream<V> {
		match self {
			Self::Proper(node) if !node.is_fulfilled() => EventStream::Active(Rc::clone(node) as Rc<dyn Node<V>>),
			Self::Hang | Self::Prefilled(_) | Self::Proper(_) => EventStream::Never,
		}
	}

	/// Calls `f` with the value of this future.
	///
	/// If already fulfilled, `f` is called right away.
	pub fn listen<F>(&self, f: F) -> Subscription
	where
		F: Fn(&V) + 'static,
	{
		match self.current_state() {
			FutureState::Pending => self.stream().listen(f),
			FutureState::Fulfilled(value) => {
				f(&value);
				Subscription::empty()
			},
		}
	}

	/// Maps the value of this future.
	///
	/// If already fulfilled, `f` is called right away.
	#[track_caller]
	pub fn map<F, U>(&self, f: F) -> Future<U>
	where
		F: Fn(&V) -> U + 'static,
		U: Clone + 'static,
	{
		match self {
			Self::Hang => Future::Hang,
			Self::Prefilled(value) => Future::Prefilled(f(value)),
			Self::Proper(node) => match node.state() {
				FutureState::Fulfilled(value) => Future::Prefilled(f(&value)),
				FutureState::Pending =>
					Future::Proper(FutureVertex::dependent_once(Loc::caller(), Rc::clone(node) as Rc<dyn Node<V>>, f)),
			},
		}
	}

	/// Holds the value of this future in a cell, starting at `initial`.
	#[track_caller]
	pub fn hold(&self, initial: V) -> Cell<V> {
		// Note: The state must be sampled once, before holding, or
		//       we could miss a completion in between.
		match self.current_state() {
			FutureState::Pending => self.stream().hold(initial),
			FutureState::Fulfilled(value) => Cell::Const(value),
		}
	}
}

impl<V: Clone + 'static> Future<Cell<V>> {
	/// Follows `initial` until this future is fulfilled, then follows the cell it was fulfilled with.
	#[track_caller]
	pub fn switch_hold(&self, initial: Cell<V>) -> Cell<V> {
		self.hold(initial).switch()
	}
}

impl<E: 'static> Future<EventStream<E>> {
	/// Emits the events of `initial` until this future is fulfilled, then those of
	/// the stream it was fulfilled with.
	#[track_caller]
	pub fn divert_hold(&self, initial: EventStream<E>) -> EventStream<E> {
		self.hold(initial).divert()
	}
}

impl<V: fmt::Debug> fmt::Debug for Future<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Hang => f.pad("Hang"),
			Self::Prefilled(value) => f.debug_tuple("Prefilled").field(value).finish(),
			Self::Proper(node) => f.debug_tuple("Proper").field(node).finish(),
		}
	}
}

/// Future completer
///
/// The source of a future.
pub struct FutureCompleter<V> {
	/// Node
	node: Rc<FutureVertex<V>>,
}

impl<V: Clone + 'static> FutureCompleter<V> {
	/// Creates a new, pending, future completer
	#[track_caller]
	#[must_use]
	pub fn new() -> Self {
		Self {
			node: FutureVertex::source(),
		}
	}

	/// Fulfills the future.
	///
	/// # Panics
	/// Panics if the future was already fulfilled.
	#[track_caller]
	pub fn complete(&self, value: V) {
		self.node.complete(value);
	}

	/// Returns the current state
	#[must_use]
	pub fn state(&self) -> FutureState<V> {
		self.node.state()
	}

	/// Returns the future of this completer
	#[must_use]
	pub fn future(&self) -> Future<V> {
		Future::Proper(Rc::clone(&self.node))
	}
}

impl<V: Clone + 'static> Default for FutureCompleter<V> {
	#[track_caller]
	fn default() -> Self {
		Self::new()
	}
}

impl<V> Clone for FutureCompleter<V> {
	fn clone(&self) -> Self {
		Self {
			node: Rc::clone(&self.node),
		}
	}
}

impl<V: fmt::Debug> fmt::Debug for FutureCompleter<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("FutureCompleter").field(&self.node).finish()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn prefilled_is_eager() {
		let future = Future::Prefilled(2).map(|value| value * 2);
		assert_eq!(future.current_state(), FutureState::Fulfilled(4));
		assert!(future.stream().is_never());
		assert_eq!(future.hold(0).current_value(), 4);
	}

	#[test]
	fn hang_never_fulfills() {
		let future = Future::<i32>::Hang.map(|value| value + 1);
		assert_eq!(future.current_state(), FutureState::Pending);
		assert!(matches!(future.hold(7), Cell::Const(7)));
	}

	#[test]
	fn map_after_fulfillment_is_eager() {
		let completer = FutureCompleter::new();
		completer.complete(3);

		let mapped = completer.future().map(|value| value + 1);
		assert!(matches!(mapped, Future::Prefilled(4)));
	}

	#[test]
	fn dependent_cancels_once_fulfilled() {
		let completer = FutureCompleter::<i32>::new();
		let mapped = completer.future().map(|value| value + 1);
		let Future::Proper(source) = completer.future() else {
			panic!("Completer future wasn't proper");
		};
		assert_eq!(source.vertex().weak_listener_count(), 1);

		completer.complete(1);
		assert_eq!(mapped.current_state(), FutureState::Fulfilled(2));
		assert_eq!(source.vertex().weak_listener_count(), 0);
		assert!(!source.vertex().is_resumed());
	}
}
