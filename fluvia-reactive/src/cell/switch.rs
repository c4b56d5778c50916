//! Switch

// Imports
use {
	crate::{Cell, CellVertex, Change, HybridSubscription, Link, Loc, Node, Relay, Strength, VertexSubscription},
	std::rc::{Rc, Weak},
};

impl<V: Clone + 'static> Cell<Cell<V>> {
	/// Flattens a cell of cells.
	///
	/// The resulting cell always holds the value of the inner cell that is currently
	/// selected. When another inner cell is selected, its value is taken within the
	/// same notification, and only then are its changes followed.
	#[track_caller]
	pub fn switch(&self) -> Cell<V> {
		let outer = match self {
			Self::Const(inner) => return inner.clone(),
			Self::Active(outer) => outer,
		};

		let inner = outer.current_value();
		let node = CellVertex::dependent(inner.current_value(), Loc::caller(), |this| {
			let hybrid = HybridSubscription::new(Strength::Weak, |hybrid, strength| {
				let hybrid = Weak::clone(hybrid);
				let follower = Weak::clone(this);
				let relay = Relay::new(this, move |cell: &CellVertex<V>, change: &Change<Cell<V>>| {
					let selected = &change.new;
					let updates = self::updates(selected);
					cell.update(selected.current_value());
					let Some(hybrid) = hybrid.upgrade() else {
						return;
					};
					hybrid.switch_to(|strength| self::follow(&follower, selected, strength));

					// Note: Our own listeners may have changed the selected cell before we
					//       started following it, so catch up with it.
					if self::updates(selected) != updates {
						cell.update(selected.current_value());
					}
				});

				let link: Rc<dyn Link> =
					VertexSubscription::new(Rc::clone(outer) as Rc<dyn Node<Change<Cell<V>>>>, relay, strength);
				vec![link]
			});
			hybrid.switch_to(|strength| self::follow(this, &inner, strength));

			hybrid
		});

		Cell::Active(node)
	}
}

/// Returns the number of updates of `inner`, if it may change
fn updates<V: Clone + 'static>(inner: &Cell<V>) -> Option<u64> {
	match inner {
		Cell::Const(_) => None,
		Cell::Active(inner) => Some(inner.updates()),
	}
}

/// Follows the changes of `inner`.
///
/// Constant cells never change, so they aren't followed.
fn follow<V: Clone + 'static>(
	this: &Weak<CellVertex<V>>,
	inner: &Cell<V>,
	strength: Strength,
) -> Option<Rc<dyn Link>> {
	let Cell::Active(inner) = inner else {
		return None;
	};

	let relay = Relay::new(this, |cell: &CellVertex<V>, change: &Change<V>| cell.update(change.new.clone()));
	let link: Rc<dyn Link> = VertexSubscription::new(Rc::clone(inner) as Rc<dyn Node<Change<V>>>, relay, strength);
	Some(link)
}
