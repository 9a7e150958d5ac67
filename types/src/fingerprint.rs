use std::time::SystemTime;

/// Last-modified time of the staged file.
///
/// Equality is exact. A fingerprint taken after the editor exits is compared
/// with the one taken right after staging to decide whether anything was saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint(SystemTime);

impl Fingerprint {
    #[must_use]
    pub fn from_modified(modified: SystemTime) -> Self {
        Self(modified)
    }

    #[must_use]
    pub fn modified(self) -> SystemTime {
        self.0
    }

    #[must_use]
    pub fn differs_from(self, other: Fingerprint) -> bool {
        self != other
    }
}
