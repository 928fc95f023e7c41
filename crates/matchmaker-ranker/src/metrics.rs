//! Association metrics between a target and a disease.
//!
//! Counts follow the usual notation:
//! n0 = documents mentioning both, n1 = corpus size,
//! n2 = documents mentioning the target, n3 = documents mentioning the disease.
//!
//! Every function returns `Err(MetricError)` instead of a number when the
//! inputs do not admit one; callers turn that into a [`Score`] sentinel.

use matchmaker_common::{score::round_to, CooccurrenceCounts, MetricError, Score};

/// Digits kept when a metric is asked to round.
pub const ROUND_DIGITS: u32 = 5;

/// Anything that can be read as a non-negative document count.
pub trait CountInput {
    fn to_count(&self) -> Result<u64, MetricError>;
}

impl CountInput for u64 {
    fn to_count(&self) -> Result<u64, MetricError> {
        Ok(*self)
    }
}

impl CountInput for u32 {
    fn to_count(&self) -> Result<u64, MetricError> {
        Ok(u64::from(*self))
    }
}

impl CountInput for usize {
    fn to_count(&self) -> Result<u64, MetricError> {
        u64::try_from(*self).map_err(|_| MetricError::InvalidCount)
    }
}

impl CountInput for i64 {
    fn to_count(&self) -> Result<u64, MetricError> {
        u64::try_from(*self).map_err(|_| MetricError::InvalidCount)
    }
}

impl CountInput for i32 {
    fn to_count(&self) -> Result<u64, MetricError> {
        u64::try_from(*self).map_err(|_| MetricError::InvalidCount)
    }
}

impl CountInput for str {
    fn to_count(&self) -> Result<u64, MetricError> {
        self.trim().parse::<u64>().map_err(|_| MetricError::InvalidCount)
    }
}

impl CountInput for String {
    fn to_count(&self) -> Result<u64, MetricError> {
        self.as_str().to_count()
    }
}

impl<T: CountInput + ?Sized> CountInput for &T {
    fn to_count(&self) -> Result<u64, MetricError> {
        (**self).to_count()
    }
}

fn ratio(numerator: u64, denominator: u64) -> Result<f64, MetricError> {
    if denominator == 0 {
        return Err(MetricError::ZeroDivision);
    }
    Ok(numerator as f64 / denominator as f64)
}

fn finish(value: f64, round: bool) -> f64 {
    if round { round_to(value, ROUND_DIGITS) } else { value }
}

/// f0: joint occurrences per million documents, (n0 / n1) × 10^6.
pub fn relative_frequency(
    n0: impl CountInput,
    n1: impl CountInput,
    round: bool,
) -> Result<f64, MetricError> {
    let value = ratio(n0.to_count()?, n1.to_count()?)? * 1e6;
    Ok(finish(value, round))
}

/// f1: share of target documents that also mention the disease, n0 / n2.
/// Importance of the disease to the target.
pub fn target_conditional(
    n0: impl CountInput,
    n2: impl CountInput,
    round: bool,
) -> Result<f64, MetricError> {
    let value = ratio(n0.to_count()?, n2.to_count()?)?;
    Ok(finish(value, round))
}

/// f2: share of disease documents that also mention the target, n0 / n3.
/// Importance of the target to the disease.
pub fn disease_conditional(
    n0: impl CountInput,
    n3: impl CountInput,
    round: bool,
) -> Result<f64, MetricError> {
    let value = ratio(n0.to_count()?, n3.to_count()?)?;
    Ok(finish(value, round))
}

/// Frequency-based pointwise mutual information (Manning & Schütze),
/// log2( (n0/n1) / ((n2/n1) × (n3/n1)) ).
///
/// The three ratios are formed first and combined afterwards; do not fold
/// this into log2(n0·n1 / (n2·n3)), the products overflow precision first.
/// Ranks rare pairs high.
pub fn pointwise_mutual_information(
    n0: impl CountInput,
    n1: impl CountInput,
    n2: impl CountInput,
    n3: impl CountInput,
    round: bool,
) -> Result<f64, MetricError> {
    let n1 = n1.to_count()?;
    let p_xy = ratio(n0.to_count()?, n1)?;
    let p_x = ratio(n2.to_count()?, n1)?;
    let p_y = ratio(n3.to_count()?, n1)?;

    let independent = p_x * p_y;
    if independent == 0.0 {
        return Err(MetricError::ZeroDivision);
    }

    let lift = p_xy / independent;
    if lift <= 0.0 || !lift.is_finite() {
        return Err(MetricError::LogDomain);
    }

    Ok(finish(lift.log2(), round))
}

/// All four scores for one pair, as sentinels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssociationScores {
    pub f0: Score,
    pub f1: Score,
    pub f2: Score,
    pub pmi: Score,
}

pub fn score_counts(counts: &CooccurrenceCounts, round: bool) -> AssociationScores {
    let CooccurrenceCounts { joint, corpus, target, disease } = *counts;
    AssociationScores {
        f0: relative_frequency(joint, corpus, round).into(),
        f1: target_conditional(joint, target, round).into(),
        f2: disease_conditional(joint, disease, round).into(),
        pmi: pointwise_mutual_information(joint, corpus, target, disease, round).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N1: u64 = 9_680_305;

    #[test]
    fn test_relative_frequency_per_million() {
        let f0 = relative_frequency(3u64, N1, false).unwrap();
        assert!((f0 - 3.0 / N1 as f64 * 1e6).abs() < 1e-12);
        assert_eq!(relative_frequency(5u64, 1_000_000u64, false).unwrap(), 5.0);
    }

    #[test]
    fn test_conditionals() {
        assert_eq!(target_conditional(3u64, 6u64, false).unwrap(), 0.5);
        assert_eq!(disease_conditional(3u64, 5u64, false).unwrap(), 0.6);
    }

    #[test]
    fn test_string_counts_are_parsed() {
        assert_eq!(target_conditional("3", "6", false).unwrap(), 0.5);
        assert_eq!(target_conditional(" 3 ", String::from("6"), false).unwrap(), 0.5);
        assert_eq!(target_conditional("three", "6", false), Err(MetricError::InvalidCount));
        assert_eq!(target_conditional("-3", "6", false), Err(MetricError::InvalidCount));
        assert_eq!(target_conditional(-3i64, 6i64, false), Err(MetricError::InvalidCount));
    }

    #[test]
    fn test_zero_divisors() {
        assert_eq!(relative_frequency(1u64, 0u64, false), Err(MetricError::ZeroDivision));
        assert_eq!(target_conditional(0u64, 0u64, false), Err(MetricError::ZeroDivision));
        assert_eq!(disease_conditional(1u64, 0u64, true), Err(MetricError::ZeroDivision));
        assert_eq!(
            pointwise_mutual_information(1u64, 0u64, 1u64, 1u64, false),
            Err(MetricError::ZeroDivision)
        );
        assert_eq!(
            pointwise_mutual_information(1u64, 10u64, 0u64, 1u64, false),
            Err(MetricError::ZeroDivision)
        );
    }

    #[test]
    fn test_pmi_known_value() {
        let pmi = pointwise_mutual_information(3u64, N1, 6u64, 5u64, false).unwrap();
        let expected = ((3.0 / N1 as f64) / ((6.0 / N1 as f64) * (5.0 / N1 as f64))).log2();
        assert_eq!(pmi, expected);
        assert!((pmi - (3.0 * N1 as f64 / 30.0).log2()).abs() < 1e-6);
    }

    #[test]
    fn test_pmi_independence_is_zero() {
        // p_xy == p_x * p_y
        let pmi = pointwise_mutual_information(25u64, 100u64, 50u64, 50u64, false).unwrap();
        assert!(pmi.abs() < 1e-12);
    }

    #[test]
    fn test_zero_joint_is_log_domain_for_pmi_only() {
        for (n1, n2, n3) in [(100u64, 10u64, 5u64), (N1, 1, 1), (7, 7, 7)] {
            assert_eq!(
                pointwise_mutual_information(0u64, n1, n2, n3, false),
                Err(MetricError::LogDomain)
            );
            assert_eq!(relative_frequency(0u64, n1, false), Ok(0.0));
            assert_eq!(target_conditional(0u64, n2, false), Ok(0.0));
            assert_eq!(disease_conditional(0u64, n3, false), Ok(0.0));
        }
    }

    #[test]
    fn test_valid_counts_never_error() {
        for n0 in 0u64..=4 {
            for n2 in n0.max(1)..=6 {
                for n3 in n0.max(1)..=6 {
                    let f0 = relative_frequency(n0, 1000u64, false).unwrap();
                    let f1 = target_conditional(n0, n2, false).unwrap();
                    let f2 = disease_conditional(n0, n3, false).unwrap();
                    assert!(f0 >= 0.0 && f0 <= 1e6);
                    assert!((0.0..=1.0).contains(&f1));
                    assert!((0.0..=1.0).contains(&f2));
                }
            }
        }
    }

    #[test]
    fn test_rounded_equals_round_of_unrounded() {
        let cases = [(3u64, N1, 6u64, 5u64), (1, 1000, 7, 3), (17, 123_457, 91, 33)];
        for (n0, n1, n2, n3) in cases {
            assert_eq!(
                relative_frequency(n0, n1, true).unwrap(),
                round_to(relative_frequency(n0, n1, false).unwrap(), 5)
            );
            assert_eq!(
                target_conditional(n0, n2, true).unwrap(),
                round_to(target_conditional(n0, n2, false).unwrap(), 5)
            );
            assert_eq!(
                disease_conditional(n0, n3, true).unwrap(),
                round_to(disease_conditional(n0, n3, false).unwrap(), 5)
            );
            assert_eq!(
                pointwise_mutual_information(n0, n1, n2, n3, true).unwrap(),
                round_to(pointwise_mutual_information(n0, n1, n2, n3, false).unwrap(), 5)
            );
        }
    }

    #[test]
    fn test_score_counts_keeps_row_on_pmi_failure() {
        let scores = score_counts(
            &CooccurrenceCounts { joint: 0, corpus: N1, target: 6, disease: 5 },
            true,
        );
        assert_eq!(scores.f0, Score::Value(0.0));
        assert_eq!(scores.f1, Score::Value(0.0));
        assert_eq!(scores.pmi.error(), Some(MetricError::LogDomain));
    }
}
