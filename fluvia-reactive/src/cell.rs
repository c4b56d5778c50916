//! Cell
//!
//! A value that may always be read, alongside a stream of its changes.
//!
//! Derived cells keep tracking their upstream even while nobody listens to
//! them, so their current value is always correct. They do so through a weak
//! subscription, which only becomes strong once they have listeners of their own.

// Modules
mod switch;

// Imports
use {
	crate::{EventStream, HybridSubscription, Link, Loc, Node, Relay, Strength, Subscription, Upstream, Vertex, VertexSubscription},
	core::{
		cell::{self, RefCell},
		fmt,
		mem,
	},
	std::rc::{Rc, Weak},
};

/// A change of a cell's value
#[derive(PartialEq, Eq, Clone, Copy, Hash, Debug)]
#[derive(derive_more::Display)]
#[display("{old} -> {new}")]
pub struct Change<V> {
	/// Previous value
	pub old: V,

	/// New value
	pub new: V,
}

/// Cell vertex
///
/// The node behind every non-constant cell.
pub struct CellVertex<V> {
	/// Vertex
	pub(crate) vertex: Vertex<Change<V>>,

	/// Current value
	value: RefCell<V>,

	/// Number of updates so far
	updates: cell::Cell<u64>,
}

impl<V: Clone + 'static> CellVertex<V> {
	/// Creates a new cell vertex with no upstream
	#[track_caller]
	pub fn source(initial: V) -> Rc<Self> {
		Rc::new(Self {
			vertex:  Vertex::source(),
			value:   RefCell::new(initial),
			updates: cell::Cell::new(0),
		})
	}

	/// Creates a new cell vertex that depends on some upstream.
	///
	/// `connect` receives a weak reference to the vertex being created and must
	/// subscribe to the upstream right away, so the value is tracked from the start.
	pub fn dependent<F, U>(initial: V, defined_loc: Loc, connect: F) -> Rc<Self>
	where
		F: FnOnce(&Weak<Self>) -> U,
		U: Upstream + 'static,
	{
		Rc::new_cyclic(|this| Self {
			vertex:  Vertex::new_at(connect(this), defined_loc),
			value:   RefCell::new(initial),
			updates: cell::Cell::new(0),
		})
	}

	/// Returns a clone of the current value
	#[must_use]
	pub fn current_value(&self) -> V {
		self.with_value(V::clone)
	}

	/// Uses the current value
	#[track_caller]
	pub fn with_value<F, O>(&self, f: F) -> O
	where
		F: FnOnce(&V) -> O,
	{
		let value = self.value.try_borrow().expect("Cannot read cell value while updating it");
		f(&value)
	}

	/// Returns the number of times this cell was updated
	pub(crate) fn updates(&self) -> u64 {
		self.updates.get()
	}

	/// Replaces the current value and notifies all listeners of the change
	#[track_caller]
	pub(crate) fn update(&self, new: V) {
		let old = {
			let mut value = self.value.try_borrow_mut().expect("Cannot update cell value while reading it");
			mem::replace(&mut *value, new.clone())
		};
		self.updates.set(self.updates.get() + 1);

		self.vertex.notify(&Change { old, new });
	}
}

impl<V: fmt::Debug> fmt::Debug for CellVertex<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("CellVertex");
		s.field("vertex", &self.vertex);
		match self.value.try_borrow() {
			Ok(value) => s.field("value", &*value),
			Err(_) => s.field("value", &"<borrowed>"),
		};
		s.finish()
	}
}

/// Cell
#[derive(Clone)]
pub enum Cell<V> {
	/// A value that never changes
	Const(V),

	/// A value backed by a node
	Active(Rc<CellVertex<V>>),
}

impl<V: Clone + 'static> Cell<V> {
	/// Creates a cell that never changes
	#[must_use]
	pub const fn constant(value: V) -> Self {
		Self::Const(value)
	}

	/// Returns a clone of the current value
	#[must_use]
	pub fn current_value(&self) -> V {
		self.with_value(V::clone)
	}

	/// Uses the current value
	#[track_caller]
	pub fn with_value<F, O>(&self, f: F) -> O
	where
		F: FnOnce(&V) -> O,
	{
		match self {
			Self::Const(value) => f(value),
			Self::Active(node) => node.with_value(f),
		}
	}

	/// Returns the stream of changes of this cell
	#[must_use]
	pub fn changes(&self) -> EventStream<Change<V>> {
		match self {
			Self::Const(_) => EventStream::Never,
			Self::Active(node) => EventStream::Active(Rc::clone(node) as Rc<dyn Node<Change<V>>>),
		}
	}

	/// Returns the stream of new values of this cell
	#[track_caller]
	#[must_use]
	pub fn new_values(&self) -> EventStream<V> {
		self.changes().map(|change: &Change<V>| change.new.clone())
	}

	/// Calls `f` with every new value of this cell.
	///
	/// `f` isn't called with the current value.
	pub fn listen<F>(&self, f: F) -> Subscription
	where
		F: Fn(&V) + 'static,
	{
		self.changes().listen(move |change: &Change<V>| f(&change.new))
	}

	/// Maps this cell's value.
	///
	/// `f` is called right away on the current value, and then
	/// once for every change of this cell.
	#[track_caller]
	pub fn map<F, U>(&self, f: F) -> Cell<U>
	where
		F: Fn(&V) -> U + 'static,
		U: Clone + 'static,
	{
		let source = match self {
			Self::Const(value) => return Cell::Const(f(value)),
			Self::Active(source) => source,
		};

		let initial = source.with_value(&f);
		let node = CellVertex::dependent(initial, Loc::caller(), |this| {
			HybridSubscription::new(Strength::Weak, |_, strength| {
				let relay = Relay::new(this, move |cell: &CellVertex<U>, change: &Change<V>| cell.update(f(&change.new)));
				let link: Rc<dyn Link> =
					VertexSubscription::new(Rc::clone(source) as Rc<dyn Node<Change<V>>>, relay, strength);
				vec![link]
			})
		});

		Cell::Active(node)
	}
}

impl<V: fmt::Debug> fmt::Debug for Cell<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Const(value) => f.debug_tuple("Const").field(value).finish(),
			Self::Active(node) => f.debug_tuple("Active").field(node).finish(),
		}
	}
}

/// Mutable cell
///
/// The source of a cell.
pub struct MutableCell<V> {
	/// Node
	node: Rc<CellVertex<V>>,
}

impl<V: Clone + 'static> MutableCell<V> {
	/// Creates a new mutable cell
	#[track_caller]
	pub fn new(initial: V) -> Self {
		Self {
			node: CellVertex::source(initial),
		}
	}

	/// Sets the value of this cell.
	///
	/// Notifies listeners even if `value` is equal to the current value.
	#[track_caller]
	pub fn set(&self, value: V) {
		self.node.update(value);
	}

	/// Sets the value of this cell from the current value
	#[track_caller]
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&V) -> V,
	{
		let value = self.node.with_value(f);
		self.node.update(value);
	}

	/// Returns a clone of the current value
	#[must_use]
	pub fn current_value(&self) -> V {
		self.node.current_value()
	}

	/// Returns the cell of this mutable cell
	#[must_use]
	pub fn cell(&self) -> Cell<V> {
		Cell::Active(Rc::clone(&self.node))
	}
}

impl<V> Clone for MutableCell<V> {
	fn clone(&self) -> Self {
		Self {
			node: Rc::clone(&self.node),
		}
	}
}

impl<V: fmt::Debug> fmt::Debug for MutableCell<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("MutableCell").field(&self.node).finish()
	}
}

#[cfg(test)]
mod test {
	use {super::*, core::cell::RefCell as StdRefCell};

	#[test]
	fn const_map_is_eager() {
		let cell = Cell::constant(2).map(|value| value * 3);
		assert!(matches!(cell, Cell::Const(6)));
		assert!(cell.changes().is_never());
	}

	#[test]
	fn map_tracks_while_unobserved() {
		let source = MutableCell::new(1);
		let mapped = source.cell().map(|value| value + 10);

		source.set(2);
		assert_eq!(mapped.current_value(), 12);

		let Cell::Active(node) = &mapped else {
			panic!("Mapped an active cell into a constant one");
		};
		assert!(!node.vertex().is_resumed());
	}

	#[test]
	fn update_from_current() {
		let cell = MutableCell::new(String::from("a"));
		let changes = Rc::new(StdRefCell::new(vec![]));
		let _subscription = cell.cell().changes().listen({
			let changes = Rc::clone(&changes);
			move |change: &Change<String>| changes.borrow_mut().push(change.to_string())
		});

		cell.update(|value| format!("{value}b"));
		assert_eq!(cell.current_value(), "ab");
		assert_eq!(*changes.borrow(), ["a -> ab"]);
	}
}
