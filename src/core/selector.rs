//! The four Bell states and the cyclic order the explorer walks through them.

use std::fmt;

use super::error::{BellError, Result};

/// One of the four maximally entangled two-qubit states.
///
/// Ordinals run 0..3 in declaration order and wrap modulo 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum BellStateSelector {
    /// |Φ+> = (|00> + |11>)/√2
    #[default]
    PhiPlus,
    /// |Φ-> = (|00> - |11>)/√2
    PhiMinus,
    /// |Ψ+> = (|01> + |10>)/√2
    PsiPlus,
    /// |Ψ-> = (|10> - |01>)/√2
    PsiMinus,
}

impl BellStateSelector {
    /// Number of selectable states.
    pub const COUNT: usize = 4;

    /// All selectors in ordinal order.
    pub const ALL: [BellStateSelector; 4] = [
        BellStateSelector::PhiPlus,
        BellStateSelector::PhiMinus,
        BellStateSelector::PsiPlus,
        BellStateSelector::PsiMinus,
    ];

    /// Position in the cycle, 0..3.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Selector for an ordinal.
    ///
    /// # Errors
    /// `InvalidSelectorState` when `ordinal` is outside 0..3.
    pub fn from_ordinal(ordinal: usize) -> Result<Self> {
        Self::ALL
            .get(ordinal)
            .copied()
            .ok_or(BellError::InvalidSelectorState { ordinal })
    }

    /// Selector `delta` steps away, wrapping modulo 4.
    pub fn offset(self, delta: i32) -> Self {
        let next = (self.ordinal() as i64 + delta as i64).rem_euclid(Self::COUNT as i64);
        Self::ALL[next as usize]
    }

    /// Next selector in the cycle.
    pub fn next(self) -> Self {
        self.offset(1)
    }

    /// Previous selector in the cycle.
    pub fn previous(self) -> Self {
        self.offset(-1)
    }

    /// Whether the recipe flips q0 before entangling (the "minus" states).
    pub fn flips_control(self) -> bool {
        matches!(self, BellStateSelector::PhiMinus | BellStateSelector::PsiMinus)
    }

    /// Whether the recipe flips q1 before entangling (the Ψ states).
    pub fn flips_target(self) -> bool {
        matches!(self, BellStateSelector::PsiPlus | BellStateSelector::PsiMinus)
    }

    /// The two basis labels this state can be measured in.
    pub fn support(self) -> [&'static str; 2] {
        if self.flips_target() { ["01", "10"] } else { ["00", "11"] }
    }

    /// Kebab-case name, used on the command line and for asset file names.
    pub fn name(self) -> &'static str {
        match self {
            BellStateSelector::PhiPlus => "phi-plus",
            BellStateSelector::PhiMinus => "phi-minus",
            BellStateSelector::PsiPlus => "psi-plus",
            BellStateSelector::PsiMinus => "psi-minus",
        }
    }
}

impl fmt::Display for BellStateSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BellStateSelector::PhiPlus => "Φ+",
            BellStateSelector::PhiMinus => "Φ-",
            BellStateSelector::PsiPlus => "Ψ+",
            BellStateSelector::PsiMinus => "Ψ-",
        };
        f.write_str(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_round_trip() -> Result<()> {
        for (i, sel) in BellStateSelector::ALL.iter().enumerate() {
            assert_eq!(sel.ordinal(), i);
            assert_eq!(BellStateSelector::from_ordinal(i)?, *sel);
        }
        Ok(())
    }

    #[test]
    fn out_of_range_ordinal_is_rejected() {
        match BellStateSelector::from_ordinal(4) {
            Err(BellError::InvalidSelectorState { ordinal }) => assert_eq!(ordinal, 4),
            other => panic!("expected InvalidSelectorState, got {:?}", other),
        }
    }

    #[test]
    fn offset_wraps_both_ways() {
        assert_eq!(BellStateSelector::PsiMinus.next(), BellStateSelector::PhiPlus);
        assert_eq!(BellStateSelector::PhiPlus.previous(), BellStateSelector::PsiMinus);
        assert_eq!(BellStateSelector::PhiMinus.offset(-9), BellStateSelector::PhiPlus);
        assert_eq!(BellStateSelector::PsiPlus.offset(0), BellStateSelector::PsiPlus);
    }

    #[test]
    fn support_matches_bell_family() {
        assert_eq!(BellStateSelector::PhiMinus.support(), ["00", "11"]);
        assert_eq!(BellStateSelector::PsiMinus.support(), ["01", "10"]);
    }
}
