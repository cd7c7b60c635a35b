//! The 13 causal relation kinds carried by edges.

use serde::{Deserialize, Serialize};

/// Typed kind of a causal assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Causes,
    Enables,
    Prevents,
    Increases,
    Decreases,
    CorrelatesWith,
    Requires,
    Produces,
    Inhibits,
    Modulates,
    Triggers,
    Amplifies,
    Mediates,
}

impl RelationKind {
    /// Total number of relation kinds.
    pub const COUNT: usize = 13;

    /// All variants, in one-hot encoding order.
    pub const ALL: [RelationKind; 13] = [
        Self::Causes,
        Self::Enables,
        Self::Prevents,
        Self::Increases,
        Self::Decreases,
        Self::CorrelatesWith,
        Self::Requires,
        Self::Produces,
        Self::Inhibits,
        Self::Modulates,
        Self::Triggers,
        Self::Amplifies,
        Self::Mediates,
    ];

    /// Position of this kind in [`RelationKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Fixed one-hot encoding of this kind.
    pub fn one_hot(self) -> [f32; Self::COUNT] {
        let mut encoding = [0.0; Self::COUNT];
        encoding[self.index()] = 1.0;
        encoding
    }

    /// Parse from string (matching the serde rename).
    pub fn from_str_name(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == s)
    }

    /// String name for this relation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Causes => "causes",
            Self::Enables => "enables",
            Self::Prevents => "prevents",
            Self::Increases => "increases",
            Self::Decreases => "decreases",
            Self::CorrelatesWith => "correlates_with",
            Self::Requires => "requires",
            Self::Produces => "produces",
            Self::Inhibits => "inhibits",
            Self::Modulates => "modulates",
            Self::Triggers => "triggers",
            Self::Amplifies => "amplifies",
            Self::Mediates => "mediates",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_serde_and_lookup() {
        for kind in RelationKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(RelationKind::from_str_name(kind.as_str()), Some(kind));
        }
        assert_eq!(RelationKind::from_str_name("caused"), None);
    }

    #[test]
    fn one_hot_has_single_set_position() {
        let encoding = RelationKind::CorrelatesWith.one_hot();
        assert_eq!(encoding.iter().sum::<f32>(), 1.0);
        assert_eq!(encoding[5], 1.0);
        assert_eq!(RelationKind::Mediates.index(), RelationKind::COUNT - 1);
    }
}
