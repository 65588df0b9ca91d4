use serde::{Deserialize, Serialize};

/// Variant dimension name to selected option value.
///
/// Keeps insertion order. Re-selecting a dimension replaces its value in
/// place, so the dimension keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selections {
    entries: Vec<(String, String)>,
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `value` for `dimension`, replacing any earlier choice.
    pub fn select(&mut self, dimension: impl Into<String>, value: impl Into<String>) {
        let dimension = dimension.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(d, _)| *d == dimension) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((dimension, value)),
        }
    }

    /// Builder form of [`select`](Self::select).
    pub fn with(mut self, dimension: impl Into<String>, value: impl Into<String>) -> Self {
        self.select(dimension, value);
        self
    }

    /// Drop the selection for `dimension`, if any.
    pub fn deselect(&mut self, dimension: &str) {
        self.entries.retain(|(d, _)| d != dimension);
    }

    pub fn get(&self, dimension: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(d, _)| d == dimension)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, dimension: &str) -> bool {
        self.get(dimension).is_some()
    }

    /// Iterate `(dimension, value)` pairs in selection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(d, v)| (d.as_str(), v.as_str()))
    }

    /// Selected values in selection order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label for a cart line, e.g. "Red / Large". `None` when nothing is selected.
    pub fn variant_label(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.values().collect::<Vec<_>>().join(" / "))
    }
}

impl<D: Into<String>, V: Into<String>> FromIterator<(D, V)> for Selections {
    fn from_iter<I: IntoIterator<Item = (D, V)>>(iter: I) -> Self {
        let mut selections = Selections::new();
        for (d, v) in iter {
            selections.select(d, v);
        }
        selections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reselect_keeps_position() {
        let mut s = Selections::new();
        s.select("Color", "Red");
        s.select("Size", "M");
        s.select("Color", "Blue");

        let pairs: Vec<_> = s.iter().collect();
        assert_eq!(pairs, vec![("Color", "Blue"), ("Size", "M")]);
    }

    #[test]
    fn test_variant_label() {
        assert_eq!(Selections::new().variant_label(), None);
        let s = Selections::new().with("Color", "Red").with("Size", "Large");
        assert_eq!(s.variant_label().as_deref(), Some("Red / Large"));
    }

    #[test]
    fn test_deselect_and_collect() {
        let mut s: Selections = [("Color", "Red"), ("Size", "M")].into_iter().collect();
        assert_eq!(s.len(), 2);
        s.deselect("Color");
        assert!(!s.contains("Color"));
        assert_eq!(s.get("Size"), Some("M"));
    }
}
