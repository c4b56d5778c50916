//! Reactive list
//!
//! An ordered sequence, alongside a stream of range updates to it.

// Modules
mod change;

// Exports
pub use self::change::{ListChange, ListUpdate};

// Imports
use {
	crate::{EventStream, HybridSubscription, Link, Loc, Node, Relay, Strength, Upstream, Vertex, VertexSubscription},
	core::{cell::RefCell, fmt},
	std::rc::{Rc, Weak},
};

/// List vertex
pub struct ListVertex<E> {
	/// Vertex
	pub(crate) vertex: Vertex<ListChange<E>>,

	/// Current elements
	elements: RefCell<Vec<E>>,
}

impl<E: Clone + 'static> ListVertex<E> {
	/// Creates a new list vertex with no upstream
	#[track_caller]
	pub fn source(elements: Vec<E>) -> Rc<Self> {
		Rc::new(Self {
			vertex:   Vertex::source(),
			elements: RefCell::new(elements),
		})
	}

	/// Creates a new list vertex that depends on some upstream
	pub fn dependent<F, U>(elements: Vec<E>, defined_loc: Loc, connect: F) -> Rc<Self>
	where
		F: FnOnce(&Weak<Self>) -> U,
		U: Upstream + 'static,
	{
		Rc::new_cyclic(|this| Self {
			vertex:   Vertex::new_at(connect(this), defined_loc),
			elements: RefCell::new(elements),
		})
	}

	/// Uses the current elements
	#[track_caller]
	pub fn with_elements<F, O>(&self, f: F) -> O
	where
		F: FnOnce(&[E]) -> O,
	{
		let elements = self
			.elements
			.try_borrow()
			.expect("Cannot read list elements while updating them");
		f(&elements)
	}

	/// Applies `change` and notifies all listeners of it
	#[track_caller]
	pub(crate) fn apply(&self, change: ListChange<E>) {
		{
			let mut elements = self
				.elements
				.try_borrow_mut()
				.expect("Cannot update list elements while reading them");
			change.apply_to(&mut elements);
		}

		self.vertex.notify(&change);
	}
}

impl<E: fmt::Debug> fmt::Debug for ListVertex<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ListVertex")
			.field("vertex", &self.vertex)
			.field("elements", &self.elements.try_borrow().ok())
			.finish()
	}
}

/// Reactive list
#[derive(Clone)]
pub enum ReactiveList<E> {
	/// Elements that never change
	Const(Rc<[E]>),

	/// Elements backed by a node
	Active(Rc<ListVertex<E>>),
}

impl<E: Clone + 'static> ReactiveList<E> {
	/// Creates a list that never changes
	pub fn of<I>(elements: I) -> Self
	where
		I: IntoIterator<Item = E>,
	{
		Self::Const(elements.into_iter().collect())
	}

	/// Uses the current elements
	#[track_caller]
	pub fn with_elements<F, O>(&self, f: F) -> O
	where
		F: FnOnce(&[E]) -> O,
	{
		match self {
			Self::Const(elements) => f(&**elements),
			Self::Active(node) => node.with_elements(f),
		}
	}

	/// Returns a clone of the current elements
	#[must_use]
	pub fn current_elements(&self) -> Vec<E> {
		self.with_elements(<[E]>::to_vec)
	}

	/// Returns the current number of elements
	#[must_use]
	pub fn len(&self) -> usize {
		self.with_elements(<[E]>::len)
	}

	/// Returns if there are currently no elements
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the stream of changes of this list
	#[must_use]
	pub fn changes(&self) -> EventStream<ListChange<E>> {
		match self {
			Self::Const(_) => EventStream::Never,
			Self::Active(node) => EventStream::Active(Rc::clone(node) as Rc<dyn Node<ListChange<E>>>),
		}
	}

	/// Maps every element of this list.
	///
	/// All current elements are mapped right away, and afterwards only
	/// the elements of each update are.
	#[track_caller]
	pub fn map<F, U>(&self, f: F) -> ReactiveList<U>
	where
		F: Fn(&E) -> U + 'static,
		U: Clone + 'static,
	{
		let source = match self {
			Self::Const(elements) => return ReactiveList::Const(elements.iter().map(&f).collect()),
			Self::Active(source) => source,
		};

		let elements = source.with_elements(|elements| elements.iter().map(&f).collect::<Vec<_>>());
		let node = ListVertex::dependent(elements, Loc::caller(), |this| {
			HybridSubscription::new(Strength::Weak, |_, strength| {
				let relay = Relay::new(this, move |list: &ListVertex<U>, change: &ListChange<E>| {
					list.apply(change.map(&f));
				});
				let link: Rc<dyn Link> =
					VertexSubscription::new(Rc::clone(source) as Rc<dyn Node<ListChange<E>>>, relay, strength);
				vec![link]
			})
		});

		ReactiveList::Active(node)
	}
}

impl<E: fmt::Debug> fmt::Debug for ReactiveList<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Const(elements) => f.debug_tuple("Const").field(elements).finish(),
			Self::Active(node) => f.debug_tuple("Active").field(node).finish(),
		}
	}
}

/// Mutable reactive list
///
/// The source of a reactive list.
pub struct MutableReactiveList<E> {
	/// Node
	node: Rc<ListVertex<E>>,
}

impl<E: Clone + 'static> MutableReactiveList<E> {
	/// Creates a new mutable list
	#[track_caller]
	pub fn new(elements: Vec<E>) -> Self {
		Self {
			node: ListVertex::source(elements),
		}
	}

	/// Replaces the element at `index`
	#[track_caller]
	pub fn set(&self, index: usize, element: E) {
		self.node.apply(ListChange::single(index..index + 1, vec![element]));
	}

	/// Inserts an element before `index`
	#[track_caller]
	pub fn insert(&self, index: usize, element: E) {
		self.node.apply(ListChange::single(index..index, vec![element]));
	}

	/// Appends an element
	#[track_caller]
	pub fn push(&self, element: E) {
		let len = self.node.with_elements(<[E]>::len);
		self.insert(len, element);
	}

	/// Removes the element at `index`, returning it
	#[track_caller]
	pub fn remove(&self, index: usize) -> E {
		let element = self.node.with_elements(|elements| {
			assert!(
				index < elements.len(),
				"Removal index {index} is out of bounds for a list of length {}",
				elements.len()
			);
			elements[index].clone()
		});
		self.node.apply(ListChange::single(index..index + 1, vec![]));

		element
	}

	/// Applies a change
	#[track_caller]
	pub fn apply(&self, change: ListChange<E>) {
		self.node.apply(change);
	}

	/// Returns a clone of the current elements
	#[must_use]
	pub fn current_elements(&self) -> Vec<E> {
		self.node.with_elements(<[E]>::to_vec)
	}

	/// Returns the reactive list of this mutable list
	#[must_use]
	pub fn list(&self) -> ReactiveList<E> {
		ReactiveList::Active(Rc::clone(&self.node))
	}
}

impl<E> Clone for MutableReactiveList<E> {
	fn clone(&self) -> Self {
		Self {
			node: Rc::clone(&self.node),
		}
	}
}

impl<E: fmt::Debug> fmt::Debug for MutableReactiveList<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("MutableReactiveList").field(&self.node).finish()
	}
}
