use crate::action::TerminationAction;
use std::time::Duration;

/// The budget is padded by `1 / FUDGE_DIVISOR` (20%) of the summed allowances
/// to absorb scheduling jitter.
const FUDGE_DIVISOR: u32 = 5;

/// Computes the total wall-clock budget for the given actions: the sum of
/// their allowances plus 20%.
///
/// The caller is responsible for passing only the actions applicable to the
/// current termination mode. Saturates at [`Duration::MAX`].
pub(crate) fn total_budget<'a>(actions: impl IntoIterator<Item = &'a TerminationAction>) -> Duration {
    let sum = actions
        .into_iter()
        .map(TerminationAction::allowance)
        .fold(Duration::ZERO, Duration::saturating_add);

    sum.saturating_add(sum / FUDGE_DIVISOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::TerminationActionBuilder;
    use crate::TerminationOption;
    use pretty_assertions::assert_eq;

    fn action(allowance: Option<Duration>) -> TerminationAction {
        let builder = TerminationActionBuilder::new(Box::new(|| {}));
        let builder = match allowance {
            Some(allowance) => builder.apply(TerminationOption::Allowance(allowance)),
            None => builder,
        };

        builder.build()
    }

    #[test]
    fn empty() {
        let actions: [TerminationAction; 0] = [];

        assert_eq!(total_budget(&actions), Duration::ZERO);
    }

    #[test]
    fn default_allowance() {
        // Given
        let actions = [action(None)];

        // Then
        assert_eq!(total_budget(&actions), Duration::from_millis(120));
    }

    #[test]
    fn padded_sum() {
        // Given
        let actions = [
            action(Some(Duration::from_millis(50))),
            action(None),
        ];

        // Then
        assert_eq!(total_budget(&actions), Duration::from_millis(180));
    }

    #[test]
    fn tiny_allowance() {
        // Given
        let actions = [action(Some(Duration::from_millis(10)))];

        // Then
        assert_eq!(total_budget(&actions), Duration::from_millis(12));
    }

    #[test]
    fn saturates_on_huge_allowance() {
        // Given
        let actions = [action(Some(Duration::MAX))];

        // Then
        assert_eq!(total_budget(&actions), Duration::MAX);
    }

    #[test]
    fn saturates_on_huge_sum() {
        // Given
        let actions = [
            action(Some(Duration::MAX)),
            action(Some(Duration::MAX)),
            action(None),
        ];

        // Then
        assert_eq!(total_budget(&actions), Duration::MAX);
    }
}
