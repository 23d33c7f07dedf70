use serde::ser::{Serialize, SerializeMap, Serializer};

/// Section name → section body for one document.
///
/// Names are normalized (lowercase, spaces replaced by underscores). Iteration
/// follows the order in which sections appear in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    entries: Vec<(String, String)>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a section, replacing the body of an existing section with the same name.
    pub fn insert(&mut self, name: impl Into<String>, body: impl Into<String>) {
        let name = name.into();
        let body = body.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = body,
            None => self.entries.push((name, body)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, body)| body.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, b)| (n.as_str(), b.as_str()))
    }

    pub fn bodies(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, b)| b.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SectionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SectionMap::new();
        for (name, body) in iter {
            map.insert(name, body);
        }
        map
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, body) in &self.entries {
            map.serialize_entry(name, body)?;
        }
        map.end()
    }
}
