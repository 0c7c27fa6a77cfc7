//! Numeric identifiers for the entities a merge touches.
//!
//! Identifiers are assigned by the persistence layer; the merge engine only
//! compares and copies them. Each one displays with a short prefix
//! (`line#12`) and parses from either the bare number or the prefixed form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                let digits = trimmed
                    .strip_prefix(concat!($prefix, "#"))
                    .unwrap_or(trimmed);
                digits
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| TypeError::InvalidId(s.to_string()))
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

numeric_id!(
    /// Identity of a segmented line.
    LineId,
    "line"
);
numeric_id!(
    /// Identity of a document part (one page image).
    PartId,
    "part"
);
numeric_id!(
    /// Identity of a structural region grouping lines.
    BlockId,
    "block"
);
numeric_id!(
    /// Identity of a categorical line typology tag.
    TypologyId,
    "typology"
);
numeric_id!(
    /// Identity of a transcription layer shared across a document.
    LayerId,
    "layer"
);
