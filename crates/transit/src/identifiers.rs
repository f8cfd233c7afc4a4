//! Type-safe identifiers for catalog entities.
//!
//! All identifiers use Arc<str> for cheap cloning and minimal memory overhead.
//! Source datasets carry ids as either JSON strings or numbers; both are
//! stored in string form so lookups never miss on a type mismatch.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_identifier!(StopIdentifier);
impl_identifier!(ZoneIdentifier);

impl StopIdentifier {
    /// Synthesize an id from a record's load-order position.
    ///
    /// Positions are unique within one source sequence, so synthesized ids
    /// never collide with each other.
    pub fn from_position(position: usize) -> Self {
        Self::new(position.to_string())
    }
}

impl ZoneIdentifier {
    /// Catalog-wide fallback zone for stops without a zone tag.
    pub fn fallback() -> Self {
        Self::new("other")
    }
}
