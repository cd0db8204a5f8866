use serde::{Deserialize, Serialize};

/// Network zones of the model-driven view, left to right.
pub const DEFAULT_LAYERS: [&str; 9] = [
	"remote_attack",
	"corp_fw_1",
	"corp_dmz",
	"corp_fw_2",
	"corp_lan",
	"cs_fw_1",
	"cs_dmz",
	"cs_fw_2",
	"cs_lan",
];

/// Ordered list of zone names. Doubles as the bucket key and the rendering order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerTaxonomy(Vec<String>);

impl Default for LayerTaxonomy {
	fn default() -> Self {
		Self::new(DEFAULT_LAYERS)
	}
}

impl LayerTaxonomy {
	/// Taxonomy from zone names in rendering order.
	pub fn new<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self(names.into_iter().map(Into::into).collect())
	}

	/// Position of `layer` in the taxonomy.
	pub fn index_of(&self, layer: &str) -> Option<usize> {
		self.0.iter().position(|name| name == layer)
	}

	/// Zone names in order.
	pub fn names(&self) -> &[String] {
		&self.0
	}

	/// Number of zones.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// True for a taxonomy with no zones.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_order() {
		let layers = LayerTaxonomy::default();
		assert_eq!(layers.len(), 9);
		assert_eq!(layers.index_of("remote_attack"), Some(0));
		assert_eq!(layers.index_of("corp_dmz"), Some(2));
		assert_eq!(layers.index_of("cs_lan"), Some(8));
		assert_eq!(layers.index_of("internet"), None);
	}
}
