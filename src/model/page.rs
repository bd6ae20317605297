//! Page numbering for the paginated member source.

use std::fmt;
use std::num::NonZeroU32;

/// One-based page number.
///
/// Page 0 is unrepresentable; the first page is [`PageNumber::first`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page (1).
    pub const FIRST: PageNumber = PageNumber(NonZeroU32::MIN);

    /// Smart constructor: returns `None` for 0.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// The first page (1).
    pub const fn first() -> Self {
        Self::FIRST
    }

    /// The page after this one, saturating at `u32::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Raw one-based value.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// True for page 1.
    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
