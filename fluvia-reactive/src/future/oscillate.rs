//! Phase oscillation
//!
//! Walks through an unbounded sequence of phases, where each phase
//! decides, as it starts, the future that ends it.

// Imports
use {
	crate::{Cell, EventStream, Future},
	std::rc::Rc,
};

/// Returns the future of the phase after some phase
type NextPhase<P> = Rc<dyn Fn(&P) -> Future<P>>;

impl<V: Clone + 'static> Future<V> {
	/// Creates a cell that starts at `initial`, and moves to the value each phase's
	/// future is fulfilled with.
	///
	/// `next` is called with every phase's value as soon as that phase starts. If it
	/// returns an already fulfilled future, the phase ends right away, so `next` must
	/// eventually return a pending future.
	pub fn oscillate<F>(initial: V, next: F) -> Cell<V>
	where
		F: Fn(&V) -> Self + 'static,
	{
		self::oscillate_from(initial, Rc::new(next))
	}
}

impl<E: 'static> Future<EventStream<E>> {
	/// Creates a stream that emits the events of `initial`, and then those of each
	/// stream the current phase's future is fulfilled with.
	///
	/// `next` is called with every phase's stream as soon as that phase starts.
	pub fn deflect<F>(initial: EventStream<E>, next: F) -> EventStream<E>
	where
		F: Fn(&EventStream<E>) -> Self + 'static,
	{
		self::deflect_from(initial, Rc::new(next))
	}
}

/// Starts a phase of [`Future::oscillate`]
fn oscillate_from<V: Clone + 'static>(value: V, next: NextPhase<V>) -> Cell<V> {
	let upcoming = next(&value);
	upcoming
		.map(move |value: &V| self::oscillate_from(value.clone(), Rc::clone(&next)))
		.switch_hold(Cell::Const(value))
}

/// Starts a phase of [`Future::deflect`]
fn deflect_from<E: 'static>(stream: EventStream<E>, next: NextPhase<EventStream<E>>) -> EventStream<E> {
	let upcoming = next(&stream);
	upcoming
		.map(move |stream: &EventStream<E>| self::deflect_from(stream.clone(), Rc::clone(&next)))
		.divert_hold(stream)
}
