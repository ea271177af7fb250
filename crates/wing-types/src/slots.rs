use serde::{Deserialize, Serialize};

/// The five curve inputs of a wing.
///
/// Each slot names the sketch that supplies one planar curve. The order of
/// [`CurveSlot::ALL`] is the order used for storage and for the property table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CurveSlot {
    /// Planform outline at the front of the wing, root to tip.
    LeadingEdge,
    /// Planform outline at the back of the wing. Its vertices also define
    /// the section stations in sketch-span mode.
    TrailingEdge,
    /// Aerofoil section at the root.
    RootProfile,
    /// Aerofoil section at the tip.
    TipProfile,
    /// Twist graph: x spans the wing, y above the graph's minimum is degrees.
    AngleGraph,
}

impl CurveSlot {
    pub const ALL: [CurveSlot; 5] = [
        CurveSlot::LeadingEdge,
        CurveSlot::TrailingEdge,
        CurveSlot::RootProfile,
        CurveSlot::TipProfile,
        CurveSlot::AngleGraph,
    ];

    pub fn index(self) -> usize {
        match self {
            CurveSlot::LeadingEdge => 0,
            CurveSlot::TrailingEdge => 1,
            CurveSlot::RootProfile => 2,
            CurveSlot::TipProfile => 3,
            CurveSlot::AngleGraph => 4,
        }
    }

    /// Human-readable title shown in property editors.
    pub fn title(self) -> &'static str {
        match self {
            CurveSlot::LeadingEdge => "leading edge",
            CurveSlot::TrailingEdge => "trailing edge",
            CurveSlot::RootProfile => "root profile",
            CurveSlot::TipProfile => "tip profile",
            CurveSlot::AngleGraph => "angle graph",
        }
    }

    /// Key under which the slot's sketch id is stored in a document.
    pub fn document_key(self) -> &'static str {
        match self {
            CurveSlot::LeadingEdge => "LeadingEdge",
            CurveSlot::TrailingEdge => "TrailingEdge",
            CurveSlot::RootProfile => "RootProfile",
            CurveSlot::TipProfile => "TipProfile",
            CurveSlot::AngleGraph => "AngleGraph",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_indices_follow_all_order() {
        for (i, slot) in CurveSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn test_document_keys_are_unique() {
        let mut keys: Vec<&str> = CurveSlot::ALL.iter().map(|s| s.document_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 5);
    }
}
