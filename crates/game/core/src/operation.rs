//! Arithmetic operations offered by the game.
//!
//! [`Operation`] carries the display symbol and the integer evaluation rule;
//! [`OperationSet`] is the flag set each difficulty tier uses to describe which
//! operations it may draw from.

use arrayvec::ArrayVec;
use bitflags::bitflags;
use strum::IntoEnumIterator;

/// Number of distinct operations.
pub const OPERATION_COUNT: usize = 5;

/// A binary arithmetic operation over two integer operands.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// `first` is the base, `second` is the percentage.
    Percentage,
}

impl Operation {
    /// Symbol shown between the two operands.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Percentage => "%",
        }
    }

    /// Evaluates `first op second`.
    ///
    /// Division by zero yields `0` instead of failing. Percentages use integer
    /// division, so `25 % 50` evaluates to `12`; the generator only produces
    /// exact percentages.
    pub fn evaluate(self, first: i64, second: i64) -> i64 {
        match self {
            Self::Add => first.saturating_add(second),
            Self::Subtract => first.saturating_sub(second),
            Self::Multiply => first.saturating_mul(second),
            Self::Divide => first.checked_div(second).unwrap_or(0),
            Self::Percentage => first.saturating_mul(second) / 100,
        }
    }

    /// The flag representing this operation inside an [`OperationSet`].
    pub const fn flag(self) -> OperationSet {
        match self {
            Self::Add => OperationSet::ADD,
            Self::Subtract => OperationSet::SUBTRACT,
            Self::Multiply => OperationSet::MULTIPLY,
            Self::Divide => OperationSet::DIVIDE,
            Self::Percentage => OperationSet::PERCENTAGE,
        }
    }
}

bitflags! {
    /// Set of operations a tier is allowed to generate.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OperationSet: u8 {
        const ADD = 1 << 0;
        const SUBTRACT = 1 << 1;
        const MULTIPLY = 1 << 2;
        const DIVIDE = 1 << 3;
        const PERCENTAGE = 1 << 4;

        /// The four classic operations.
        const BASIC = Self::ADD.bits()
            | Self::SUBTRACT.bits()
            | Self::MULTIPLY.bits()
            | Self::DIVIDE.bits();
    }
}

impl OperationSet {
    pub fn includes(self, operation: Operation) -> bool {
        self.contains(operation.flag())
    }

    /// Members of the set in declaration order.
    pub fn operations(self) -> ArrayVec<Operation, OPERATION_COUNT> {
        Operation::iter().filter(|op| self.includes(*op)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_each_operation() {
        assert_eq!(Operation::Add.evaluate(3, 4), 7);
        assert_eq!(Operation::Subtract.evaluate(3, 4), -1);
        assert_eq!(Operation::Multiply.evaluate(6, 7), 42);
        assert_eq!(Operation::Divide.evaluate(42, 6), 7);
        assert_eq!(Operation::Percentage.evaluate(200, 25), 50);
    }

    #[test]
    fn division_by_zero_yields_zero() {
        assert_eq!(Operation::Divide.evaluate(10, 0), 0);
    }

    #[test]
    fn basic_set_excludes_percentage() {
        let ops = OperationSet::BASIC.operations();
        assert_eq!(
            ops.as_slice(),
            &[
                Operation::Add,
                Operation::Subtract,
                Operation::Multiply,
                Operation::Divide
            ]
        );
        assert!(OperationSet::all().includes(Operation::Percentage));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Multiply".parse::<Operation>(), Ok(Operation::Multiply));
        assert_eq!(Operation::Percentage.to_string(), "percentage");
    }
}
