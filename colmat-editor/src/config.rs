//! Document types for the collision matrix editor.
//!
//! A document pairs a named layer list with the matrix it labels and
//! round-trips through JSON on disk.

use std::fmt;
use std::fs;
use std::path::Path;

use colmat::CollisionMatrix;
use serde::{Deserialize, Serialize};

/// Errors raised when a loaded document is internally inconsistent.
#[derive(Debug)]
pub enum DocumentError {
    /// The layer list does not label every matrix key.
    LayerCountMismatch {
        /// Number of layer names in the document.
        layers: usize,
        /// Number of keys the matrix actually has.
        keys: usize,
    },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::LayerCountMismatch { layers, keys } => write!(
                f,
                "document lists {layers} layers but the matrix has {keys} keys"
            ),
        }
    }
}

impl std::error::Error for DocumentError {}

/// An editable collision matrix document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatrixConfig {
    /// Display name of the document.
    pub name: String,
    /// Layer names; index `i` labels matrix key `i`.
    pub layers: Vec<String>,
    /// The pairwise collision flags.
    pub matrix: CollisionMatrix<bool>,
}

impl MatrixConfig {
    /// Create a document with one matrix key per layer name.
    pub fn new(name: impl Into<String>, layers: Vec<String>, self_intersect: bool) -> Self {
        let matrix = CollisionMatrix::new(layers.len(), self_intersect);
        Self {
            name: name.into(),
            layers,
            matrix,
        }
    }

    /// Check that the layer list and the matrix agree.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.layers.len() != self.matrix.key_count() {
            return Err(DocumentError::LayerCountMismatch {
                layers: self.layers.len(),
                keys: self.matrix.key_count(),
            });
        }
        Ok(())
    }

    /// Write the document as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Append a layer, growing the matrix and keeping existing pairs.
    pub fn add_layer(&mut self, name: impl Into<String>) {
        self.layers.push(name.into());
        self.matrix.set_size(self.layers.len());
    }

    /// Whether a layer can be removed without leaving the matrix with no
    /// representable pairs.
    pub fn can_remove_layer(&self) -> bool {
        let min = if self.matrix.self_intersect() { 1 } else { 2 };
        self.layers.len() > min
    }

    /// Drop the last layer and its pairs. Returns whether anything changed.
    pub fn remove_last_layer(&mut self) -> bool {
        if !self.can_remove_layer() {
            return false;
        }

        self.layers.pop();
        self.matrix.set_size(self.layers.len());
        true
    }
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self::new(
            "Untitled",
            vec![
                "Default".to_string(),
                "Static".to_string(),
                "Dynamic".to_string(),
                "Trigger".to_string(),
            ],
            false,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_is_valid() {
        let config = MatrixConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.layers.len(), config.matrix.key_count());
    }

    #[test]
    fn test_add_and_remove_layer_keep_pairs() {
        let mut config = MatrixConfig::default();
        config.matrix.set(0, 1, true);

        config.add_layer("Debris");
        assert!(config.validate().is_ok());
        assert!(config.matrix[(0, 1)]);

        assert!(config.remove_last_layer());
        assert!(config.validate().is_ok());
        assert!(config.matrix[(0, 1)]);
    }

    #[test]
    fn test_remove_layer_stops_at_minimum() {
        let mut config = MatrixConfig::new(
            "Tiny",
            vec!["A".to_string(), "B".to_string()],
            false,
        );
        assert!(!config.remove_last_layer());
        assert_eq!(config.layers.len(), 2);
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut config = MatrixConfig::default();
        config.matrix.set(2, 3, true);

        let json = serde_json::to_string(&config).unwrap();
        let loaded: MatrixConfig = serde_json::from_str(&json).unwrap();

        assert!(loaded.validate().is_ok());
        assert!(loaded.matrix[(3, 2)]);
        assert_eq!(loaded.layers, config.layers);
    }

    #[test]
    fn test_validate_rejects_layer_mismatch() {
        let json = r#"{
            "name": "Broken",
            "layers": ["Only one"],
            "matrix": { "self_intersect": false, "storage": [false, false, false] }
        }"#;
        let config: MatrixConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }
}
