//! Visibility modifiers for members.

use std::fmt;

/// Visibility modifier for members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    /// No modifier: visible inside the declaring package.
    Package,
    Private,
}

impl Visibility {
    #[inline]
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }

    /// Private members are not inherited.
    #[inline]
    pub fn is_private(self) -> bool {
        self == Visibility::Private
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Package => write!(f, "package-private"),
            Visibility::Private => write!(f, "private"),
        }
    }
}
