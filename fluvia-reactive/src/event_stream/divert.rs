//! Divert

// Imports
use {
	crate::{
		Cell,
		CellVertex,
		Change,
		EventStream,
		HybridSubscription,
		LazyUpstream,
		Link,
		Loc,
		Node,
		Relay,
		Strength,
		Subscription,
		Vertex,
		VertexSubscription,
	},
	std::rc::{Rc, Weak},
};

impl<E: 'static> Cell<EventStream<E>> {
	/// Emits the events of whichever stream this cell currently holds.
	///
	/// While observed, the resulting stream follows the cell, and when the cell
	/// changes, it stops listening to the previous stream before listening to
	/// the new one.
	///
	/// The new stream is only followed once this stream receives the cell's change.
	/// Any event the new stream emits before that, such as from a listener of the
	/// cell that runs earlier, isn't forwarded. Unlike `Cell::switch`, there's no
	/// value to catch up with afterwards.
	#[track_caller]
	pub fn divert(&self) -> EventStream<E> {
		let outer = match self {
			Self::Const(stream) => return stream.clone(),
			Self::Active(outer) => Rc::clone(outer),
		};

		let loc = Loc::caller();
		let vertex = Rc::new_cyclic(|this: &Weak<Vertex<E>>| {
			let this = Weak::clone(this);
			Vertex::new_at(LazyUpstream::new(move || self::connect(&this, &outer)), loc)
		});

		EventStream::Active(vertex as Rc<dyn Node<E>>)
	}
}

/// Connects a divert vertex to the outer cell and its current stream
fn connect<E: 'static>(this: &Weak<Vertex<E>>, outer: &Rc<CellVertex<EventStream<E>>>) -> Subscription {
	let hybrid = HybridSubscription::new(Strength::Strong, |hybrid, strength| {
		let hybrid = Weak::clone(hybrid);
		let forward_to = Weak::clone(this);
		let relay = Relay::new(this, move |_: &Vertex<E>, change: &Change<EventStream<E>>| {
			if let Some(hybrid) = hybrid.upgrade() {
				hybrid.switch_to(|strength| self::follow(&forward_to, &change.new, strength));
			}
		});

		let outer = Rc::clone(outer) as Rc<dyn Node<Change<EventStream<E>>>>;
		let link: Rc<dyn Link> = VertexSubscription::new(outer, relay, strength);
		vec![link]
	});

	let stream = outer.current_value();
	hybrid.switch_to(|strength| self::follow(this, &stream, strength));

	Subscription::new(hybrid)
}

/// Forwards the events of `stream` into the divert vertex
fn follow<E: 'static>(this: &Weak<Vertex<E>>, stream: &EventStream<E>, strength: Strength) -> Option<Rc<dyn Link>> {
	let relay = Relay::new(this, |vertex: &Vertex<E>, event: &E| vertex.notify(event));
	stream.subscribe_link(relay, strength)
}
