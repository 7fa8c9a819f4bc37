use crate::http::parser::ParseError;

const CRLF: &str = "\r\n";

/// An ordered set of HTTP header fields.
///
/// Field names are matched exactly as written (no case folding). Setting a
/// name that is already present replaces its value in place, so the set
/// keeps the order in which names were first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    fields: Vec<(String, String)>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Parses a raw header block such as `"Host: a\r\nAccept: */*\r\n\r\n"`.
    ///
    /// Empty lines are skipped. Every other line must contain a colon,
    /// preceded by a non-empty name and immediately followed by a single
    /// space; the value is everything after that space. A repeated field
    /// name overwrites the earlier one.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::headers::HeaderSet;
    /// let headers = HeaderSet::parse("Host: example.com\r\n\r\n").unwrap();
    /// assert_eq!(headers.get("Host"), Some("example.com"));
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let mut headers = Self::new();

        for line in raw.split(CRLF).filter(|line| !line.is_empty()) {
            let (name, rest) = line
                .split_once(':')
                .filter(|(name, _)| !name.is_empty())
                .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))?;

            let value = rest
                .strip_prefix(' ')
                .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))?;

            headers.set(name, value);
        }

        Ok(headers)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Adds or replaces a header. `name` must be non-empty and free of
    /// colons and line breaks, `value` free of line breaks.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        debug_assert!(
            !name.is_empty() && !name.contains([':', '\r', '\n']),
            "invalid header name {name:?}"
        );
        debug_assert!(!value.contains(['\r', '\n']), "invalid header value {value:?}");

        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.fields.iter().position(|(k, _)| k == name)?;
        Some(self.fields.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes every field as `Name: value\r\n`, followed by the blank
    /// line that ends the header block.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.iter() {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push_str(CRLF);
        }
        out.push_str(CRLF);
        out
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (k, v) in iter {
            headers.set(k, v);
        }
        headers
    }
}
