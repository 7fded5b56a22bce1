use core::fmt;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::QuickMathConfig;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    pub const ALL: [Operator; 3] = [Self::Add, Self::Subtract, Self::Multiply];

    pub const fn symbol(self) -> char {
        use Operator::*;
        match self {
            Add => '+',
            Subtract => '-',
            Multiply => '×',
        }
    }

    /// `None` when the true result would be negative.
    pub const fn apply(self, lhs: u32, rhs: u32) -> Option<u32> {
        use Operator::*;
        match self {
            Add => lhs.checked_add(rhs),
            Subtract => lhs.checked_sub(rhs),
            Multiply => lhs.checked_mul(rhs),
        }
    }
}

/// A displayed arithmetic claim `lhs op rhs = shown`, possibly false.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    lhs: u32,
    op: Operator,
    rhs: u32,
    shown: u32,
    answer: u32,
}

impl Problem {
    /// Builds a problem from its displayed parts.
    ///
    /// A subtraction that would go negative becomes an addition, so the true
    /// answer is never negative.
    pub fn new(lhs: u32, op: Operator, rhs: u32, shown: u32) -> Self {
        let (op, answer) = match op.apply(lhs, rhs) {
            Some(answer) => (op, answer),
            None => (Operator::Add, lhs.saturating_add(rhs)),
        };
        Self {
            lhs,
            op,
            rhs,
            shown,
            answer,
        }
    }

    pub const fn lhs(&self) -> u32 {
        self.lhs
    }

    pub const fn op(&self) -> Operator {
        self.op
    }

    pub const fn rhs(&self) -> u32 {
        self.rhs
    }

    pub const fn shown(&self) -> u32 {
        self.shown
    }

    pub const fn answer(&self) -> u32 {
        self.answer
    }

    /// Whether the displayed result is arithmetically right.
    pub const fn is_true(&self) -> bool {
        self.shown == self.answer
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.lhs,
            self.op.symbol(),
            self.rhs,
            self.shown
        )
    }
}

/// Draws two operands and an operator, then shows either the true result or
/// one nudged by a nonzero offset, each with even odds.
pub fn generate_problem<R: Rng + ?Sized>(config: &QuickMathConfig, rng: &mut R) -> Problem {
    let max = config.operand_max.max(1);
    let lhs = rng.random_range(1..=max);
    let rhs = rng.random_range(1..=max);
    let op = Operator::ALL[rng.random_range(0..Operator::ALL.len())];

    // Normalize first so the perturbation is applied to the final operator.
    let answer = Problem::new(lhs, op, rhs, 0).answer();
    let shown = if rng.random_bool(0.5) {
        answer
    } else {
        perturb(answer, config.max_offset, rng)
    };

    Problem::new(lhs, op, rhs, shown)
}

fn perturb<R: Rng + ?Sized>(answer: u32, max_offset: u32, rng: &mut R) -> u32 {
    let offset = rng.random_range(1..=max_offset.max(1));
    if answer < offset || rng.random_bool(0.5) {
        answer.saturating_add(offset)
    } else {
        answer - offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn negative_subtraction_becomes_addition() {
        let problem = Problem::new(3, Operator::Subtract, 7, 10);

        assert_eq!(problem.op(), Operator::Add);
        assert_eq!(problem.answer(), 10);
        assert!(problem.is_true());
    }

    #[test]
    fn display_reads_like_the_statement() {
        assert_eq!(Problem::new(4, Operator::Add, 5, 9).to_string(), "4 + 5 = 9");
        assert_eq!(
            Problem::new(3, Operator::Multiply, 3, 8).to_string(),
            "3 × 3 = 8"
        );
    }

    #[test]
    fn generated_problems_are_consistent() {
        let config = QuickMathConfig::default();
        let mut rng = SmallRng::seed_from_u64(11);
        let mut true_count = 0;

        for _ in 0..1000 {
            let problem = generate_problem(&config, &mut rng);

            assert!((1..=config.operand_max).contains(&problem.lhs()));
            assert!((1..=config.operand_max).contains(&problem.rhs()));
            assert_eq!(
                problem.op().apply(problem.lhs(), problem.rhs()),
                Some(problem.answer())
            );
            if problem.is_true() {
                true_count += 1;
            } else {
                let diff = problem.shown().abs_diff(problem.answer());
                assert!((1..=config.max_offset).contains(&diff), "{}", problem);
            }
        }

        assert!((350..=650).contains(&true_count), "true_count {}", true_count);
    }
}
