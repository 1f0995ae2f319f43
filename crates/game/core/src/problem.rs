use crate::operation::Operation;

/// A single arithmetic question, replaced wholesale when a new one is needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    pub first_term: i64,
    pub second_term: i64,
    pub operation: Operation,
}

impl Problem {
    pub const fn new(first_term: i64, second_term: i64, operation: Operation) -> Self {
        Self {
            first_term,
            second_term,
            operation,
        }
    }

    pub fn correct_result(&self) -> i64 {
        self.operation.evaluate(self.first_term, self.second_term)
    }

    /// Human readable form, e.g. `"3 + 4 = "`.
    pub fn display_text(&self) -> String {
        format!(
            "{} {} {} = ",
            self.first_term,
            self.operation.symbol(),
            self.second_term
        )
    }

    /// Number of decimal digits in the answer, ignoring its sign.
    pub fn answer_digits(&self) -> usize {
        decimal_digits(self.correct_result().unsigned_abs())
    }

    /// Width of the answer as typed, including a leading minus sign.
    pub fn answer_width(&self) -> usize {
        let result = self.correct_result();
        self.answer_digits() + usize::from(result < 0)
    }
}

fn decimal_digits(mut value: u64) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_display_text() {
        let problem = Problem::new(3, 4, Operation::Add);
        assert_eq!(problem.display_text(), "3 + 4 = ");
        assert_eq!(Problem::new(12, 3, Operation::Divide).display_text(), "12 ÷ 3 = ");
    }

    #[test]
    fn counts_answer_digits() {
        assert_eq!(Problem::new(3, 4, Operation::Add).answer_digits(), 1);
        assert_eq!(Problem::new(5, 5, Operation::Subtract).answer_digits(), 1);
        assert_eq!(Problem::new(25, 8, Operation::Multiply).answer_digits(), 3);
        assert_eq!(Problem::new(3, 15, Operation::Subtract).answer_digits(), 2);
    }

    #[test]
    fn negative_answers_are_one_wider() {
        let problem = Problem::new(3, 15, Operation::Subtract);
        assert_eq!(problem.correct_result(), -12);
        assert_eq!(problem.answer_width(), 3);
    }
}
