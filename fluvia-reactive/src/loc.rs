//! Definition location of graph nodes

// Imports
use core::{fmt, panic::Location};

/// Where a node of the graph was created.
///
/// Only recorded with `debug_assertions`.
#[derive(PartialEq, Eq, Clone, Copy, Hash, Debug)]
pub struct Loc(Option<&'static Location<'static>>);

impl Loc {
	/// Gets the caller's location
	#[track_caller]
	#[must_use]
	pub fn caller() -> Self {
		match cfg!(debug_assertions) {
			true => Self(Some(Location::caller())),
			false => Self(None),
		}
	}

	/// Returns the recorded location, if any
	#[must_use]
	pub const fn location(self) -> Option<&'static Location<'static>> {
		self.0
	}
}

impl fmt::Display for Loc {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0 {
			Some(location) => write!(f, "{location}"),
			None => f.pad("<optimized out>"),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	#[cfg(debug_assertions)]
	fn records_caller() {
		let loc = Loc::caller();
		let location = loc.location().expect("Location wasn't recorded");
		assert_eq!(location.file(), file!());
		assert_eq!(loc.to_string(), format!("{}:{}:{}", location.file(), location.line(), location.column()));
	}
}
