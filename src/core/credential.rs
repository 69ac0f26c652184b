use std::fmt;

/// The process-wide API key. Lives only in memory; `Debug` never prints it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps `key`, trimming surrounding whitespace a paste tends to bring.
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(key.as_ref().trim().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Replaces the key unless `key` is blank, which leaves it untouched.
    /// Returns whether the key changed.
    pub fn replace(&mut self, key: &str) -> bool {
        let candidate = Credential::new(key);
        if candidate.is_empty() {
            return false;
        }
        *self = candidate;
        true
    }

    /// Short hint safe to show on screen, e.g. `••••1234`.
    pub fn masked(&self) -> String {
        if self.0.is_empty() {
            return "not set".to_string();
        }
        let tail: String = self
            .0
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("••••{tail}")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Credential(<unset>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}
