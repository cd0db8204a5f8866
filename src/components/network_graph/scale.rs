//! Ordinal colour scale over the ten `category10` colours.

use std::collections::HashMap;

/// The `category10` palette.
pub const CATEGORY10: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Assigns palette colours to keys in first-seen order, cycling once the
/// palette is exhausted.
#[derive(Clone, Debug, Default)]
pub struct OrdinalScale {
	assigned: HashMap<String, usize>,
}

impl OrdinalScale {
	/// An empty scale.
	pub fn new() -> Self {
		Self::default()
	}

	/// Colour for `key`, registering it if unseen.
	pub fn color(&mut self, key: &str) -> &'static str {
		let next = self.assigned.len();
		let slot = *self.assigned.entry(key.to_string()).or_insert(next);
		CATEGORY10[slot % CATEGORY10.len()]
	}

	/// Number of distinct keys seen so far.
	pub fn len(&self) -> usize {
		self.assigned.len()
	}

	/// True before any key was looked up.
	pub fn is_empty(&self) -> bool {
		self.assigned.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_first_seen_order_is_stable() {
		let mut scale = OrdinalScale::new();
		assert_eq!(scale.color("Derived Fact"), "#1f77b4");
		assert_eq!(scale.color("Derivation"), "#ff7f0e");
		assert_eq!(scale.color("Derived Fact"), "#1f77b4");
		assert_eq!(scale.len(), 2);
	}

	#[test]
	fn test_palette_wraps() {
		let mut scale = OrdinalScale::new();
		for i in 0..10 {
			scale.color(&i.to_string());
		}
		assert_eq!(scale.color("ten"), "#1f77b4");
	}
}
