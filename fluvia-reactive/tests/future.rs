//! Future tests

// Modules
mod common;

// Imports
use {
	common::{init_logger, recorder},
	core::cell::RefCell,
	fluvia_reactive::{Cell, Emitter, EventStream, Future, FutureCompleter, FutureState, MutableCell},
	std::rc::Rc,
};

#[test]
fn one_shot() {
	init_logger();

	let completer = FutureCompleter::<i32>::new();
	assert_eq!(completer.future().current_state(), FutureState::Pending);

	completer.complete(1);
	assert_eq!(completer.future().current_state(), FutureState::Fulfilled(1));
}

#[test]
#[should_panic(expected = "was already fulfilled")]
fn complete_twice() {
	init_logger();

	let completer = FutureCompleter::<i32>::new();
	completer.complete(1);
	completer.complete(2);
}

#[test]
fn hold() {
	init_logger();

	let completer = FutureCompleter::<i32>::new();
	let held = completer.future().hold(-1);
	assert_eq!(held.current_value(), -1);

	let (seen, listener) = recorder::<i32>();
	let _subscription = held.new_values().listen(listener);
	completer.complete(1);

	assert_eq!(*seen.borrow(), [1]);
	assert_eq!(held.current_value(), 1);
}

#[test]
fn listen_and_map() {
	init_logger();

	let completer = FutureCompleter::<i32>::new();
	let mapped = completer.future().map(|value| value * 10);

	let (seen, listener) = recorder::<i32>();
	let _subscription = mapped.listen(listener);
	completer.complete(2);
	assert_eq!(*seen.borrow(), [20]);

	// Note: Listening to a fulfilled future calls the listener right away
	let (late, late_listener) = recorder::<i32>();
	let subscription = mapped.listen(late_listener);
	assert!(subscription.is_cancelled());
	assert_eq!(*late.borrow(), [20]);
}

#[test]
fn divert_hold() {
	init_logger();

	let first = Emitter::<i32>::new();
	let second = Emitter::<i32>::new();
	let completer = FutureCompleter::<EventStream<i32>>::new();
	let diverted = completer.future().divert_hold(first.stream());

	let (seen, listener) = recorder::<i32>();
	let _subscription = diverted.listen(listener);

	first.emit(-11);
	second.emit(11);
	assert_eq!(*seen.borrow(), [-11]);
	seen.borrow_mut().clear();

	completer.complete(second.stream());
	first.emit(-12);
	second.emit(12);
	assert_eq!(*seen.borrow(), [12]);
}

#[test]
fn switch_hold() {
	init_logger();

	let first = MutableCell::new(-10);
	let second = MutableCell::new(10);
	let completer = FutureCompleter::<Cell<i32>>::new();
	let switched = completer.future().switch_hold(first.cell());

	let (seen, listener) = recorder::<i32>();
	let _subscription = switched.listen(listener);

	first.set(-11);
	second.set(11);
	assert_eq!(switched.current_value(), -11);
	assert_eq!(*seen.borrow(), [-11]);
	seen.borrow_mut().clear();

	completer.complete(second.cell());
	assert_eq!(switched.current_value(), 11);
	assert_eq!(*seen.borrow(), [11]);
	seen.borrow_mut().clear();

	first.set(-12);
	second.set(12);
	assert_eq!(switched.current_value(), 12);
	assert_eq!(*seen.borrow(), [12]);
}

/// Creates a phase function that records the completer of every phase it starts
fn phases<V: Clone + 'static>() -> (Rc<RefCell<Vec<FutureCompleter<V>>>>, impl Fn(&V) -> Future<V> + 'static) {
	let completers = Rc::new(RefCell::new(vec![]));
	let next = {
		let completers = Rc::clone(&completers);
		move |_: &V| {
			let completer = FutureCompleter::new();
			completers.borrow_mut().push(completer.clone());
			completer.future()
		}
	};

	(completers, next)
}

/// Completes the last started phase
fn complete_last<V: Clone + 'static>(completers: &RefCell<Vec<FutureCompleter<V>>>, value: V) {
	let completer = completers.borrow().last().cloned().expect("No phase was started");
	completer.complete(value);
}

#[test]
fn oscillate() {
	init_logger();

	let (completers, next) = phases::<i32>();
	let oscillating = Future::oscillate(0, next);
	assert_eq!(oscillating.current_value(), 0);
	assert_eq!(completers.borrow().len(), 1, "First phase's future wasn't created right away");

	let (seen, listener) = recorder::<i32>();
	let _subscription = oscillating.listen(listener);

	complete_last(&completers, 5);
	assert_eq!(oscillating.current_value(), 5);
	assert_eq!(completers.borrow().len(), 2);

	complete_last(&completers, 7);
	complete_last(&completers, 9);
	assert_eq!(oscillating.current_value(), 9);
	assert_eq!(*seen.borrow(), [5, 7, 9]);
}

#[test]
fn deflect() {
	init_logger();

	let first = Emitter::<i32>::new();
	let second = Emitter::<i32>::new();
	let (completers, next) = phases::<EventStream<i32>>();
	let deflected = Future::deflect(first.stream(), next);

	let (seen, listener) = recorder::<i32>();
	let _subscription = deflected.listen(listener);
	first.emit(1);

	complete_last(&completers, second.stream());
	first.emit(2);
	second.emit(3);

	complete_last(&completers, first.stream());
	first.emit(4);
	second.emit(5);

	assert_eq!(*seen.borrow(), [1, 3, 4]);
	assert_eq!(completers.borrow().len(), 3);
}
