use std::fmt;

/// Text content in the native representation of an input field: UTF-16 code units,
/// without a terminator.
///
/// The units are not required to be well-formed UTF-16. Controls can hold unpaired
/// surrogates, and those must reach the storage encoder unchanged so it can refuse them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TextBuffer(Vec<u16>);

impl TextBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn from_units(units: Vec<u16>) -> Self {
        Self(units)
    }

    #[must_use]
    pub fn as_units(&self) -> &[u16] {
        &self.0
    }

    #[must_use]
    pub fn into_units(self) -> Vec<u16> {
        self.0
    }

    /// Length in code units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of the units followed by a NUL, for APIs that take C strings.
    #[must_use]
    pub fn to_terminated(&self) -> Vec<u16> {
        let mut units = Vec::with_capacity(self.0.len() + 1);
        units.extend_from_slice(&self.0);
        units.push(0);
        units
    }

    /// Lossy view for tests and diagnostics. Never used for staging.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }
}

impl From<&str> for TextBuffer {
    fn from(value: &str) -> Self {
        Self(value.encode_utf16().collect())
    }
}

// Content stays out of Debug output so a stray `{:?}` cannot leak field text into logs.
impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("units", &self.0.len())
            .finish()
    }
}
