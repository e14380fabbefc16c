use serde::Serialize;

use crate::enums::Severity;

/// One diagnostic entry returned by the gateway
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Status {
    code: String,
    description: String,
    severity: Severity,
}

impl Status {
    pub fn new(code: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            severity,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// Statuses in document order
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatusCollection(Vec<Status>);

impl StatusCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, status: Status) {
        self.0.push(status);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Status> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Statuses carrying the given severity, in document order
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Status> + '_ {
        self.0.iter().filter(move |status| status.severity == severity)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Status> {
        self.0.iter().find(|status| status.code == code)
    }
}

impl FromIterator<Status> for StatusCollection {
    fn from_iter<I: IntoIterator<Item = Status>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for StatusCollection {
    type Item = Status;
    type IntoIter = std::vec::IntoIter<Status>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StatusCollection {
    type Item = &'a Status;
    type IntoIter = std::slice::Iter<'a, Status>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
