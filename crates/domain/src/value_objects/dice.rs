//! Dice rolling value objects and parsing
//!
//! Supports compact dice notation like "4d6", "1d10", "3D8".
//! Entropy is supplied by the caller through [`RandomPort`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;
use thiserror::Error;

use crate::ports::RandomPort;

/// Error when parsing a dice expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// Not dice notation at all - expected `<count>d<sides>`
    #[error("Malformed dice expression '{0}': expected XdY format, e.g. '3d20'")]
    Malformed(String),
    /// Dice notation whose count or sides is below 1
    #[error("Invalid dice range {count}d{sides}: dice count and sides must both be at least 1")]
    InvalidRange { count: i64, sides: i64 },
    /// Dice notation whose best possible total does not fit in an `i32`
    #[error("Dice expression '{0}' is too large: count times sides must not exceed 2147483647")]
    TooLarge(String),
}

/// A parsed dice expression like "4d6"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceExpression {
    count: u32,
    sides: u32,
}

impl DiceExpression {
    /// Create a new dice expression.
    ///
    /// `count * sides` is capped at `i32::MAX` so every total is representable.
    pub fn new(count: i64, sides: i64) -> Result<Self, DiceParseError> {
        if count < 1 || sides < 1 {
            return Err(DiceParseError::InvalidRange { count, sides });
        }
        let too_large = || DiceParseError::TooLarge(format!("{}d{}", count, sides));
        match count.checked_mul(sides) {
            Some(best) if best <= i64::from(i32::MAX) => Ok(Self {
                count: u32::try_from(count).map_err(|_| too_large())?,
                sides: u32::try_from(sides).map_err(|_| too_large())?,
            }),
            _ => Err(too_large()),
        }
    }

    /// Compile-time constructor for catalog data. Both parts must be >= 1.
    pub(crate) const fn from_parts(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }

    /// Parse a dice expression string like "4d6"
    ///
    /// The separator is case-insensitive and whitespace around either number
    /// is ignored. Anything that is not exactly two integers around a single
    /// `d` is [`DiceParseError::Malformed`]; integers below 1 are
    /// [`DiceParseError::InvalidRange`]; integers whose product (or own
    /// magnitude) exceeds `i32::MAX` are [`DiceParseError::TooLarge`].
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let lowered = input.to_lowercase();
        let malformed = || DiceParseError::Malformed(input.to_string());

        let mut parts = lowered.split('d');
        let (Some(count_str), Some(sides_str), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let part = |raw: &str| {
            raw.trim().parse::<i64>().map_err(|e| match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    DiceParseError::TooLarge(input.to_string())
                }
                _ => malformed(),
            })
        };

        Self::new(part(count_str)?, part(sides_str)?)
    }

    /// Number of dice rolled (X in XdY)
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Sides on each die (Y in XdY)
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Roll with the standard floor of 1 per die.
    pub fn roll(&self, rng: &dyn RandomPort) -> DiceRoll {
        self.roll_with(rng, 1)
    }

    /// Roll every die in `[minimum_value, sides]`.
    ///
    /// `minimum_value <= sides` is the caller's responsibility.
    pub fn roll_with(&self, rng: &dyn RandomPort, minimum_value: i32) -> DiceRoll {
        let rolls: Vec<i32> = (0..self.count)
            .map(|_| rng.gen_range(minimum_value, self.sides as i32))
            .collect();
        // The port may hand back values outside [minimum_value, sides]
        let total = rolls.iter().fold(0i32, |sum, r| sum.saturating_add(*r));

        DiceRoll {
            expression: *self,
            rolls,
            total,
        }
    }

    /// Get the minimum possible roll with the standard floor of 1
    pub fn min_roll(&self) -> i32 {
        self.count as i32
    }

    /// Get the maximum possible roll
    pub fn max_roll(&self) -> i32 {
        (self.count as i32).saturating_mul(self.sides as i32)
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

impl FromStr for DiceExpression {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DiceExpression {
    type Error = DiceParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DiceExpression> for String {
    fn from(expression: DiceExpression) -> String {
        expression.to_string()
    }
}

impl PartialEq<&str> for DiceExpression {
    fn eq(&self, other: &&str) -> bool {
        Self::parse(other).is_ok_and(|parsed| parsed == *self)
    }
}

/// Result of rolling dice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// The expression that was rolled
    pub expression: DiceExpression,
    /// Individual die results, in draw order
    pub rolls: Vec<i32>,
    /// Sum of all individual rolls
    pub total: i32,
}

impl DiceRoll {
    /// Format as a breakdown string (e.g., "4d6[3, 4, 5, 6] = 18")
    pub fn breakdown(&self) -> String {
        let rolls_str: Vec<String> = self.rolls.iter().map(|r| r.to_string()).collect();
        format!(
            "{}[{}] = {}",
            self.expression,
            rolls_str.join(", "),
            self.total
        )
    }
}

/// Parse `expression` and roll it, flooring each die at `minimum_value`.
///
/// Returns the total alongside every individual draw.
pub fn roll(
    expression: &str,
    minimum_value: i32,
    rng: &dyn RandomPort,
) -> Result<DiceRoll, DiceParseError> {
    Ok(DiceExpression::parse(expression)?.roll_with(rng, minimum_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::testing::{CyclingRandom, FixedRandom};
    use crate::ports::MockRandomPort;
    use mockall::predicate::eq;

    fn scripted(values: Vec<i32>, min: i32, max: i32) -> MockRandomPort {
        let times = values.len();
        let mut values = values.into_iter();
        let mut rng = MockRandomPort::new();
        rng.expect_gen_range()
            .with(eq(min), eq(max))
            .times(times)
            .returning(move |_, _| values.next().unwrap_or_default());
        rng
    }

    #[test]
    fn test_parse_simple() {
        let expression = DiceExpression::parse("4d6").unwrap();
        assert_eq!(expression.count(), 4);
        assert_eq!(expression.sides(), 6);
    }

    #[test]
    fn test_parse_case_insensitive() {
        let expression = DiceExpression::parse("3D8").unwrap();
        assert_eq!(expression.count(), 3);
        assert_eq!(expression.sides(), 8);
    }

    #[test]
    fn test_parse_with_whitespace() {
        let expression = DiceExpression::parse(" 2 d 10 ").unwrap();
        assert_eq!(expression.to_string(), "2d10");
    }

    #[test]
    fn test_parse_malformed() {
        for input in ["abcd", "4x6", "d6", "6", "", "4d", "1d6d6", "1.5d6", "4d6+2"] {
            assert!(
                matches!(DiceExpression::parse(input), Err(DiceParseError::Malformed(_))),
                "expected malformed for {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_invalid_range() {
        assert_eq!(
            DiceExpression::parse("0d6"),
            Err(DiceParseError::InvalidRange { count: 0, sides: 6 })
        );
        assert_eq!(
            DiceExpression::parse("4d0"),
            Err(DiceParseError::InvalidRange { count: 4, sides: 0 })
        );
        assert_eq!(
            DiceExpression::parse("-1d6"),
            Err(DiceParseError::InvalidRange {
                count: -1,
                sides: 6
            })
        );
        assert_eq!(
            DiceExpression::parse("4d-6"),
            Err(DiceParseError::InvalidRange {
                count: 4,
                sides: -6
            })
        );
    }

    #[test]
    fn test_parse_too_large() {
        assert_eq!(
            DiceExpression::parse("99999999999d6"),
            Err(DiceParseError::TooLarge("99999999999d6".to_string()))
        );
        assert_eq!(
            DiceExpression::parse("2d2000000000"),
            Err(DiceParseError::TooLarge("2d2000000000".to_string()))
        );
        assert_eq!(
            DiceExpression::new(3, i64::from(i32::MAX)),
            Err(DiceParseError::TooLarge("3d2147483647".to_string()))
        );

        let widest = DiceExpression::parse("1d2147483647").unwrap();
        assert_eq!(widest.max_roll(), i32::MAX);
    }

    #[test]
    fn test_roll_total_saturates() {
        let largest = DiceExpression::new(2, 1_073_741_823).unwrap();
        let rng = FixedRandom(i32::MAX);
        let result = largest.roll_with(&rng, 1);
        assert_eq!(result.rolls, vec![i32::MAX, i32::MAX]);
        assert_eq!(result.total, i32::MAX);
        assert_eq!(largest.max_roll(), 2_147_483_646);

        let mut rng = MockRandomPort::new();
        rng.expect_gen_range().times(0);
        assert!(matches!(
            roll("3d2147483647", i32::MAX, &rng),
            Err(DiceParseError::TooLarge(_))
        ));
    }

    #[test]
    fn test_roll_fixed_sequence() {
        let rng = scripted(vec![3, 4, 5, 6], 1, 6);
        let result = roll("4d6", 1, &rng).unwrap();
        assert_eq!(result.rolls, vec![3, 4, 5, 6]);
        assert_eq!(result.total, 18);
        assert_eq!(result.breakdown(), "4d6[3, 4, 5, 6] = 18");
    }

    #[test]
    fn test_roll_minimum_value_passed_to_rng() {
        let rng = scripted(vec![3, 3, 3], 3, 6);
        let result = roll("3d6", 3, &rng).unwrap();
        assert_eq!(result.rolls, vec![3, 3, 3]);
        assert_eq!(result.total, 9);
    }

    #[test]
    fn test_roll_rejects_before_drawing() {
        let mut rng = MockRandomPort::new();
        rng.expect_gen_range().times(0);
        assert!(matches!(
            roll("0d6", 1, &rng),
            Err(DiceParseError::InvalidRange { .. })
        ));
        assert!(matches!(
            roll("4x6", 1, &rng),
            Err(DiceParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_roll_count_and_range() {
        let rng = CyclingRandom::default();
        for (expression, minimum) in [("1d20", 1), ("4d6", 1), ("10d4", 2), ("3d1", 1)] {
            let parsed = DiceExpression::parse(expression).unwrap();
            for _ in 0..50 {
                let result = parsed.roll_with(&rng, minimum);
                assert_eq!(result.rolls.len(), parsed.count() as usize);
                assert!(result
                    .rolls
                    .iter()
                    .all(|r| *r >= minimum && *r <= parsed.sides() as i32));
                assert_eq!(result.total, result.rolls.iter().sum::<i32>());
            }
        }
    }

    #[test]
    fn test_min_max_roll() {
        let expression = DiceExpression::parse("4d5").unwrap();
        assert_eq!(expression.min_roll(), 4);
        assert_eq!(expression.max_roll(), 20);
    }

    #[test]
    fn test_serde_as_string() {
        let expression = DiceExpression::parse("1d10").unwrap();
        let json = serde_json::to_string(&expression).unwrap();
        assert_eq!(json, "\"1d10\"");
        let back: DiceExpression = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expression);
        assert!(serde_json::from_str::<DiceExpression>("\"0d10\"").is_err());
    }

    #[test]
    fn test_compare_with_str() {
        let expression = DiceExpression::parse("1d6").unwrap();
        assert!(expression == "1d6");
        assert!(expression == "1D6");
        assert!(expression != "1d8");
    }
}
