//! Derived asset status.

use std::fmt;

/// Change status of a source asset relative to its stored record.
///
/// Always computed fresh from the filesystem, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetStatus {
    /// No metadata record exists.
    New,
    /// A record exists but its hash differs from the current content.
    Modified,
    /// A record exists and the hashes match.
    Unchanged,
}

impl AssetStatus {
    /// `New` and `Modified` assets need (re)processing.
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::New | Self::Modified)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Modified => "modified",
            Self::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_statuses() {
        assert!(AssetStatus::New.is_pending());
        assert!(AssetStatus::Modified.is_pending());
        assert!(!AssetStatus::Unchanged.is_pending());
        assert_eq!(AssetStatus::Modified.to_string(), "modified");
    }
}
