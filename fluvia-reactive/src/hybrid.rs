//! Hybrid subscription
//!
//! A subscription whose strength towards its upstream can be changed
//! without re-subscribing, so no event is ever lost in between.
//!
//! A hybrid subscription may track several upstream nodes at once. Some
//! of them are *fixed* for the whole lifetime of the subscription, while
//! one of them may be *switched* for another at any point, such as the
//! inner cell of a switch, or the inner stream of a divert.

// Imports
use {
	crate::{Link, Strength, Upstream},
	core::{
		cell::{Cell, RefCell},
		fmt,
	},
	std::rc::{Rc, Weak},
};

/// Hybrid subscription
pub struct HybridSubscription {
	/// Current strength
	strength: Cell<Strength>,

	/// Whether we've been cancelled
	cancelled: Cell<bool>,

	/// Fixed links
	fixed: Vec<Rc<dyn Link>>,

	/// Switched link
	switched: RefCell<Option<Rc<dyn Link>>>,
}

impl HybridSubscription {
	/// Creates a new hybrid subscription with strength `strength`.
	///
	/// `connect` must create the fixed links with the strength it's given. It
	/// also receives a weak reference to the subscription itself, so the
	/// listeners it creates may later switch the switched link.
	pub fn new<F>(strength: Strength, connect: F) -> Rc<Self>
	where
		F: FnOnce(&Weak<Self>, Strength) -> Vec<Rc<dyn Link>>,
	{
		Rc::new_cyclic(|this| Self {
			strength: Cell::new(strength),
			cancelled: Cell::new(false),
			fixed: connect(this, strength),
			switched: RefCell::new(None),
		})
	}

	/// Returns the current strength
	#[must_use]
	pub fn strength(&self) -> Strength {
		self.strength.get()
	}

	/// Replaces the switched link.
	///
	/// The previous link is cancelled before `connect` is called with the
	/// current strength, so an upstream shared between both is never held
	/// twice. Does nothing if cancelled.
	pub fn switch_to<F>(&self, connect: F)
	where
		F: FnOnce(Strength) -> Option<Rc<dyn Link>>,
	{
		if self.cancelled.get() {
			return;
		}

		let prev = self.switched.take();
		if let Some(prev) = prev {
			prev.cancel();
		}

		let link = connect(self.strength.get());
		*self.switched.borrow_mut() = link;
	}

	/// Returns the switched link, if any
	fn switched(&self) -> Option<Rc<dyn Link>> {
		self.switched.borrow().as_ref().map(Rc::clone)
	}
}

impl Link for HybridSubscription {
	fn update_strength(&self, strength: Strength) {
		if self.cancelled.get() || self.strength.replace(strength) == strength {
			return;
		}

		for link in &self.fixed {
			link.update_strength(strength);
		}
		if let Some(link) = self.switched() {
			link.update_strength(strength);
		}
	}

	fn cancel(&self) {
		if self.cancelled.replace(true) {
			return;
		}

		for link in &self.fixed {
			link.cancel();
		}
		let switched = self.switched.take();
		if let Some(link) = switched {
			link.cancel();
		}
	}

	fn is_cancelled(&self) -> bool {
		self.cancelled.get()
	}
}

impl Upstream for HybridSubscription {
	fn resume(&self) {
		self.update_strength(Strength::Strong);
	}

	fn pause(&self) {
		self.update_strength(Strength::Weak);
	}
}

impl fmt::Debug for HybridSubscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HybridSubscription")
			.field("strength", &self.strength.get())
			.field("cancelled", &self.cancelled.get())
			.field("fixed", &self.fixed.len())
			.field("switched", &self.switched.borrow().is_some())
			.finish()
	}
}
