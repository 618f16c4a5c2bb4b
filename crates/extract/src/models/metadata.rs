/// Front matter key/value pairs, in the order the keys first appeared.
///
/// Inserting an existing key replaces its value in place, so the last
/// occurrence in a document wins while the key keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata(Vec<(String, String)>);

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Like [`Metadata::get`], but treats an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::default();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Metadata {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_value_wins_first_position_kept() {
        let metadata = Metadata::from_iter([("a", "1"), ("b", "2"), ("a", "3")]);
        assert_eq!(metadata.get("a"), Some("3"));
        assert_eq!(metadata.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
        assert_eq!(metadata.len(), 2);
    }

    #[test]
    fn empty_values_are_absent_for_non_empty_lookup() {
        let metadata = Metadata::from_iter([("id", ""), ("title", "T")]);
        assert!(metadata.contains_key("id"));
        assert_eq!(metadata.get_non_empty("id"), None);
        assert_eq!(metadata.get_non_empty("title"), Some("T"));
        assert_eq!(metadata.get("missing"), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_ordered_map() {
        let metadata = Metadata::from_iter([("title", "T"), ("id", "x")]);
        assert_eq!(serde_json::to_string(&metadata).unwrap(), r#"{"title":"T","id":"x"}"#);
    }
}
