//! Upstream behaviors
//!
//! What a vertex does with its own dependencies when it's resumed or paused.
//!
//! - Sources (emitters, mutable cells and lists, future completers) use `()`.
//! - Transforms that only care about upstream values while observed use [`LazyUpstream`].
//! - Nodes that must keep a correct current value use a [`HybridSubscription`](crate::HybridSubscription).

// Imports
use {
	crate::Subscription,
	core::{cell::RefCell, fmt},
	std::rc::Rc,
};

/// Upstream behavior of a vertex
pub trait Upstream {
	/// Called when the vertex gains its first listener
	fn resume(&self);

	/// Called when the vertex loses its last listener
	fn pause(&self);
}

impl Upstream for () {
	fn resume(&self) {}

	fn pause(&self) {}
}

impl<U: ?Sized + Upstream> Upstream for Rc<U> {
	fn resume(&self) {
		(**self).resume();
	}

	fn pause(&self) {
		(**self).pause();
	}
}

/// Lazy upstream
///
/// Subscribes to the upstream when resumed, and cancels
/// the subscription when paused.
pub struct LazyUpstream {
	/// Connects to the upstream
	connect: Box<dyn Fn() -> Subscription>,

	/// Active subscription
	active: RefCell<Option<Subscription>>,
}

impl LazyUpstream {
	/// Creates a new lazy upstream from a function that subscribes to it.
	pub fn new(connect: impl Fn() -> Subscription + 'static) -> Self {
		Self {
			connect: Box::new(connect),
			active:  RefCell::new(None),
		}
	}

	/// Returns if currently subscribed to the upstream
	#[must_use]
	pub fn is_connected(&self) -> bool {
		self.active.borrow().is_some()
	}
}

impl Upstream for LazyUpstream {
	fn resume(&self) {
		let subscription = (self.connect)();
		if let Some(prev) = self.active.replace(Some(subscription)) {
			prev.cancel();
		}
	}

	fn pause(&self) {
		let subscription = self.active.take();
		if let Some(subscription) = subscription {
			subscription.cancel();
		}
	}
}

impl fmt::Debug for LazyUpstream {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LazyUpstream")
			.field("connected", &self.is_connected())
			.finish_non_exhaustive()
	}
}
