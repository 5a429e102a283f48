use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::form::form_model::FormState;

/// Field name to trimmed value, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionPayload {
    entries: Vec<(String, String)>,
}

impl SubmissionPayload {
    /// Snapshot the form's current values. A repeated name keeps the last
    /// value at the position of its first occurrence.
    pub fn from_form(form: &FormState) -> Self {
        let mut payload = Self::default();
        for field in &form.fields {
            payload.insert(&field.name, field.trimmed());
        }
        payload
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Stable SHA-1 over the ordered entries, used to correlate trace lines.
    pub fn fingerprint(&self) -> String {
        use sha1::{Digest, Sha1};

        let mut hasher = Sha1::new();
        for (k, v) in &self.entries {
            hasher.update(k.as_bytes());
            hasher.update([0u8]);
            hasher.update(v.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }
}

impl Serialize for SubmissionPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Request body: the payload wrapped under `data`.
#[derive(Debug, serde::Serialize)]
pub struct SubmissionRequest<'a> {
    pub data: &'a SubmissionPayload,
}

impl<'a> SubmissionRequest<'a> {
    pub fn new(data: &'a SubmissionPayload) -> Self {
        Self { data }
    }
}
