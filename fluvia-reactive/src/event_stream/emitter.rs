//! Emitter

// Imports
use {
	crate::{EventStream, Node, Vertex},
	core::fmt,
	std::rc::Rc,
};

/// Emitter
///
/// The source of an event stream.
pub struct Emitter<E> {
	/// Vertex
	vertex: Rc<Vertex<E>>,
}

impl<E: 'static> Emitter<E> {
	/// Creates a new emitter
	#[track_caller]
	#[must_use]
	pub fn new() -> Self {
		Self {
			vertex: Rc::new(Vertex::source()),
		}
	}

	/// Emits an event to all current listeners.
	///
	/// Emitting without any listeners does nothing.
	pub fn emit(&self, event: E) {
		self.vertex.notify(&event);
	}

	/// Returns the stream of emitted events
	#[must_use]
	pub fn stream(&self) -> EventStream<E> {
		EventStream::Active(Rc::clone(&self.vertex) as Rc<dyn Node<E>>)
	}
}

impl<E: 'static> Default for Emitter<E> {
	#[track_caller]
	fn default() -> Self {
		Self::new()
	}
}

impl<E> Clone for Emitter<E> {
	fn clone(&self) -> Self {
		Self {
			vertex: Rc::clone(&self.vertex),
		}
	}
}

impl<E> fmt::Debug for Emitter<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Emitter").field("vertex", &*self.vertex).finish()
	}
}
