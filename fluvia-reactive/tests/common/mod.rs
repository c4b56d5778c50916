//! Helpers shared by all tests

// Imports
use {
	core::cell::RefCell,
	std::{rc::Rc, sync::Once},
};

/// Initializes logging once for all tests
pub fn init_logger() {
	static LOGGER: Once = Once::new();
	LOGGER.call_once(fluvia_logger::init);
}

/// Creates a listener that records every value it's called with
pub fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T) + 'static) {
	let values = Rc::new(RefCell::new(vec![]));
	let listener = {
		let values = Rc::clone(&values);
		move |value: &T| values.borrow_mut().push(value.clone())
	};

	(values, listener)
}
