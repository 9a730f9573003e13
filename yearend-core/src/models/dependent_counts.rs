/// Head counts per dependent category for the dependent deduction.
///
/// Categories are not cross-checked; a person counted in two categories is
/// counted twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependentCounts {
    pub general: i32,
    pub specified: i32,
    pub elderly: i32,
    pub elderly_living: i32,
}

impl DependentCounts {
    /// Total number of dependents across all categories, or `None` if the
    /// sum does not fit in an `i32`.
    pub fn checked_total(&self) -> Option<i32> {
        self.named_counts()
            .iter()
            .try_fold(0i32, |sum, &(_, count)| sum.checked_add(count))
    }

    /// Field name and count for each category, in declaration order.
    pub fn named_counts(&self) -> [(&'static str, i32); 4] {
        [
            ("general", self.general),
            ("specified", self.specified),
            ("elderly", self.elderly),
            ("elderly_living", self.elderly_living),
        ]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn checked_total_sums_every_category() {
        let counts = DependentCounts {
            general: 2,
            specified: 1,
            elderly: 0,
            elderly_living: 3,
        };

        assert_eq!(counts.checked_total(), Some(6));
    }

    #[test]
    fn checked_total_reports_overflow() {
        let counts = DependentCounts {
            general: i32::MAX,
            specified: 1,
            ..DependentCounts::default()
        };

        assert_eq!(counts.checked_total(), None);
    }
}
