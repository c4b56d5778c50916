//! Event stream
//!
//! A discrete sequence of events, with no current value.

// Modules
mod divert;
mod emitter;

// Exports
pub use self::emitter::Emitter;

// Imports
use {
	crate::{
		Cell,
		CellVertex,
		Future,
		FutureVertex,
		HybridSubscription,
		LazyUpstream,
		Link,
		Listener,
		Loc,
		Node,
		Relay,
		Strength,
		Subscription,
		Vertex,
		VertexState,
		VertexSubscription,
	},
	core::fmt,
	std::rc::{Rc, Weak},
};

/// Event stream
pub enum EventStream<E> {
	/// A stream that never emits anything
	Never,

	/// A stream backed by a node
	Active(Rc<dyn Node<E>>),
}

impl<E: 'static> EventStream<E> {
	/// Returns if this stream never emits
	#[must_use]
	pub const fn is_never(&self) -> bool {
		matches!(self, Self::Never)
	}

	/// Returns the state of the vertex behind this stream, if any
	#[must_use]
	pub fn state(&self) -> Option<VertexState> {
		match self {
			Self::Never => None,
			Self::Active(node) => Some(node.vertex().state()),
		}
	}

	/// Subscribes `listener` to this stream with strength `strength`.
	pub fn subscribe(&self, listener: Rc<dyn Listener<E>>, strength: Strength) -> Subscription {
		self.subscribe_link(listener, strength)
			.map_or_else(Subscription::empty, Subscription::new)
	}

	/// Subscribes `listener` to this stream, returning the underlying link.
	///
	/// Returns `None` if this stream never emits.
	pub(crate) fn subscribe_link(&self, listener: Rc<dyn Listener<E>>, strength: Strength) -> Option<Rc<dyn Link>> {
		match self {
			Self::Never => None,
			Self::Active(node) => {
				let link: Rc<dyn Link> = VertexSubscription::new(Rc::clone(node), listener, strength);
				Some(link)
			},
		}
	}

	/// Calls `f` on every event.
	///
	/// The stream keeps `f` alive until the returned subscription is cancelled.
	pub fn listen<F>(&self, f: F) -> Subscription
	where
		F: Fn(&E) + 'static,
	{
		self.subscribe(Rc::new(f), Strength::Strong)
	}

	/// Subscribes `listener` weakly.
	///
	/// The listener stops receiving events once both it and the
	/// returned subscription are dropped.
	pub fn listen_weak(&self, listener: &Rc<dyn Listener<E>>) -> Subscription {
		self.subscribe(Rc::clone(listener), Strength::Weak)
	}

	/// Maps every event of this stream
	#[track_caller]
	pub fn map<F, U>(&self, f: F) -> EventStream<U>
	where
		F: Fn(&E) -> U + 'static,
		U: 'static,
	{
		self.transform(Loc::caller(), move |vertex: &Vertex<U>, event: &E| vertex.notify(&f(event)))
	}

	/// Only keeps the events for which `f` returns `true`
	#[track_caller]
	#[must_use]
	pub fn filter<F>(&self, f: F) -> Self
	where
		F: Fn(&E) -> bool + 'static,
	{
		self.transform(Loc::caller(), move |vertex: &Vertex<E>, event: &E| {
			if f(event) {
				vertex.notify(event);
			}
		})
	}

	/// Emits the events of both this stream and `other`
	#[track_caller]
	#[must_use]
	pub fn merge(&self, other: &Self) -> Self {
		let (lhs, rhs) = match (self, other) {
			(Self::Never, stream) | (stream, Self::Never) => return stream.clone(),
			(Self::Active(lhs), Self::Active(rhs)) => (Rc::clone(lhs), Rc::clone(rhs)),
		};

		let loc = Loc::caller();
		let vertex = Rc::new_cyclic(|this: &Weak<Vertex<E>>| {
			let this = Weak::clone(this);
			let upstream = LazyUpstream::new(move || {
				let hybrid = HybridSubscription::new(Strength::Strong, |_, strength| {
					[&lhs, &rhs]
						.into_iter()
						.map(|source| {
							let relay = Relay::new(&this, |vertex: &Vertex<E>, event: &E| vertex.notify(event));
							let link: Rc<dyn Link> = VertexSubscription::new(Rc::clone(source), relay, strength);
							link
						})
						.collect()
				});
				Subscription::new(hybrid)
			});

			Vertex::new_at(upstream, loc)
		});

		Self::Active(vertex as Rc<dyn Node<E>>)
	}

	/// Holds the latest event of this stream in a cell
	#[track_caller]
	pub fn hold(&self, initial: E) -> Cell<E>
	where
		E: Clone,
	{
		let Self::Active(source) = self else {
			return Cell::Const(initial);
		};

		let node = CellVertex::dependent(initial, Loc::caller(), |this| {
			HybridSubscription::new(Strength::Weak, |_, strength| {
				let relay = Relay::new(this, |cell: &CellVertex<E>, event: &E| cell.update(event.clone()));
				let link: Rc<dyn Link> = VertexSubscription::new(Rc::clone(source), relay, strength);
				vec![link]
			})
		});

		Cell::Active(node)
	}

	/// Returns a future fulfilled by the next event of this stream
	#[track_caller]
	pub fn next(&self) -> Future<E>
	where
		E: Clone,
	{
		match self {
			Self::Never => Future::Hang,
			Self::Active(source) => Future::Proper(FutureVertex::dependent_once(Loc::caller(), Rc::clone(source), E::clone)),
		}
	}

	/// Creates a lazy stream that runs `handler` on each of our events while it's observed
	fn transform<U, F>(&self, loc: Loc, handler: F) -> EventStream<U>
	where
		U: 'static,
		F: Fn(&Vertex<U>, &E) + 'static,
	{
		let Self::Active(source) = self else {
			return EventStream::Never;
		};

		let source = Rc::clone(source);
		let handler = Rc::new(handler);
		let vertex = Rc::new_cyclic(|this: &Weak<Vertex<U>>| {
			let this = Weak::clone(this);
			let upstream = LazyUpstream::new(move || {
				let handler = Rc::clone(&handler);
				let relay = Relay::new(&this, move |vertex: &Vertex<U>, event: &E| handler(vertex, event));
				Subscription::new(VertexSubscription::new(Rc::clone(&source), relay, Strength::Strong))
			});

			Vertex::new_at(upstream, loc)
		});

		EventStream::Active(vertex as Rc<dyn Node<U>>)
	}
}

impl<E> Clone for EventStream<E> {
	fn clone(&self) -> Self {
		match self {
			Self::Never => Self::Never,
			Self::Active(node) => Self::Active(Rc::clone(node)),
		}
	}
}

impl<E> fmt::Debug for EventStream<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Never => f.pad("Never"),
			Self::Active(node) => f.debug_tuple("Active").field(node.vertex()).finish(),
		}
	}
}

#[cfg(test)]
mod test {
	use {super::*, core::cell::RefCell};

	#[test]
	fn never_degrades() {
		let never = EventStream::<i32>::Never;
		assert!(never.map(|value| value + 1).is_never());
		assert!(never.filter(|_| true).is_never());
		assert!(never.listen(|_| ()).is_cancelled());
		assert_eq!(never.hold(5).current_value(), 5);
		assert!(matches!(never.next(), Future::Hang));
	}

	/// Returns the id of the vertex behind `stream`
	fn vertex_id(stream: &EventStream<i32>) -> Option<usize> {
		match stream {
			EventStream::Never => None,
			EventStream::Active(node) => Some(node.vertex().id()),
		}
	}

	#[test]
	fn merge_with_never_is_identity() {
		let emitter = Emitter::<i32>::new();
		let merged = emitter.stream().merge(&EventStream::Never);
		assert!(vertex_id(&merged).is_some());
		assert_eq!(vertex_id(&merged), vertex_id(&emitter.stream()));
	}

	#[test]
	fn transform_only_subscribes_while_observed() {
		let emitter = Emitter::<i32>::new();
		let mapped = emitter.stream().map(|value| value * 2);
		assert_eq!(emitter.stream().state(), Some(VertexState::Paused));

		let seen = Rc::new(RefCell::new(vec![]));
		let subscription = mapped.listen({
			let seen = Rc::clone(&seen);
			move |value| seen.borrow_mut().push(*value)
		});
		assert_eq!(emitter.stream().state(), Some(VertexState::Resumed));

		emitter.emit(2);
		subscription.cancel();
		assert_eq!(emitter.stream().state(), Some(VertexState::Paused));
		emitter.emit(3);

		assert_eq!(*seen.borrow(), [4]);
	}
}
