use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::diff::difference::Difference;

/// Differences found by one comparison, in detection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    equal: bool,
    identical: bool,
    differences: Vec<Difference>,
}

impl DiffResult {
    pub fn new() -> Self {
        Self {
            equal: true,
            identical: true,
            differences: Vec::new(),
        }
    }

    pub(crate) fn record_difference(&mut self, difference: Difference) {
        self.identical = false;
        if difference.is_major() {
            self.equal = false;
        }
        self.differences.push(difference);
    }

    /// True when no major difference was recorded.
    pub fn is_equal(&self) -> bool {
        self.equal
    }

    /// True when nothing at all was recorded, minor differences included.
    pub fn is_identical(&self) -> bool {
        self.identical
    }

    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    /// The major difference that stopped the scan, if any.
    pub fn halting_difference(&self) -> Option<&Difference> {
        self.differences.last().filter(|d| d.is_major())
    }

    pub fn major_count(&self) -> usize {
        self.differences.iter().filter(|d| d.is_major()).count()
    }

    pub fn minor_count(&self) -> usize {
        self.differences.len() - self.major_count()
    }
}

impl Default for DiffResult {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DiffResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.differences.is_empty() {
            return f.write_str("identical");
        }
        for (index, difference) in self.differences.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{difference}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::DiffResult;
    use crate::diff::catalog::DifferenceType;
    use crate::diff::difference::Difference;

    #[test]
    fn empty_result_is_equal_and_identical() {
        let result = DiffResult::new();
        assert!(result.is_equal());
        assert!(result.is_identical());
        assert!(result.halting_difference().is_none());
        assert_eq!(result.to_string(), "identical");
    }

    #[test]
    fn minor_difference_keeps_result_equal() {
        let mut result = DiffResult::new();
        result.record_difference(Difference::new(DifferenceType::AttrSequence));

        assert!(result.is_equal());
        assert!(!result.is_identical());
        assert_eq!(result.minor_count(), 1);
        assert!(result.halting_difference().is_none());
    }

    #[test]
    fn major_difference_is_reported_as_halting() {
        let mut result = DiffResult::new();
        result.record_difference(Difference::new(DifferenceType::AttrSequence));
        result.record_difference(Difference::new(DifferenceType::AttrValue));

        assert!(!result.is_equal());
        assert_eq!(result.major_count(), 1);
        assert_eq!(
            result.halting_difference().map(Difference::kind),
            Some(DifferenceType::AttrValue)
        );
        assert_eq!(
            result.to_string(),
            "Expected same sequence of attributes\nExpected same attribute value"
        );
    }
}
