//! In-memory assets

use super::AssetSource;
use std::collections::HashMap;
use std::io::{self, Cursor, Read};

/// Assets held in a map from key to bytes
#[derive(Debug, Default, Clone)]
pub struct MemoryAssets {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(key, data);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.assets.insert(key.into(), data.into());
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetSource for MemoryAssets {
    fn open(&self, key: &str) -> io::Result<Box<dyn Read + Send + '_>> {
        match self.assets.get(key) {
            Some(data) => Ok(Box::new(Cursor::new(data.as_slice()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such asset: {}", key),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_known_and_unknown_keys() {
        let assets = MemoryAssets::new().with("config/defaults.json", "{}");
        assert_eq!(assets.len(), 1);

        let mut content = String::new();
        assets
            .open("config/defaults.json")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "{}");

        let err = assets.open("missing").err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
