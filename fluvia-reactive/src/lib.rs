//! Reactivity for `fluvia`
//!
//! A push-based dataflow engine. Every node of the graph is backed by a
//! [`Vertex`], which only subscribes to its own upstream while something
//! is listening to it.
//!
//! Nodes that must answer "current value" queries while unobserved
//! (cells, lists and derived futures) instead keep a [`HybridSubscription`]
//! to their upstream, which is weak while they're paused and strong while
//! they're resumed.

// Modules
pub mod cell;
pub mod event_stream;
pub mod future;
pub mod hybrid;
pub mod listener;
pub mod loc;
pub mod reactive_list;
pub mod subscription;
pub mod upstream;
pub mod vertex;

// Exports
pub use self::{
	cell::{Cell, CellVertex, Change, MutableCell},
	event_stream::{Emitter, EventStream},
	future::{Future, FutureCompleter, FutureState, FutureVertex},
	hybrid::HybridSubscription,
	listener::{Listener, Relay, Strength},
	loc::Loc,
	reactive_list::{ListChange, ListUpdate, ListVertex, MutableReactiveList, ReactiveList},
	subscription::{Link, Subscription, VertexSubscription},
	upstream::{LazyUpstream, Upstream},
	vertex::{Node, Vertex, VertexState},
};
