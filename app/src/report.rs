use firclass::KnnError;
use ndarray::Array2;

use crate::app::{CaseResult, ScenarioReport};
use crate::classifier::{FilterClassifier, describe};

/// Width the label text is padded to so the coefficients line up.
const LABEL_WIDTH: usize = 29;

/// A run of the sweep over which the classifier gave the same labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub from: f64,
    pub to: f64,
    pub labels: Vec<i32>,
}

/// Walks the second coefficient from `from` to `to` in `steps` equal steps
/// with `b0` held fixed and merges neighbouring points with equal labels.
///
/// With `b0` fixed every boundary between two exemplars collapses to a single
/// threshold on `b1`, so the returned intervals are the decision map along
/// that line.
pub fn sweep(
    classifier: &FilterClassifier,
    b0: f64,
    from: f64,
    to: f64,
    steps: usize,
) -> Result<Vec<Interval>, KnnError> {
    let steps = steps.max(1);
    let step = (to - from) / steps as f64;
    let b1: Vec<f64> = (0..=steps).map(|i| from + step * i as f64).collect();

    let mut rows = Array2::zeros((b1.len(), 2));
    for (mut row, &y) in rows.rows_mut().into_iter().zip(&b1) {
        row[0] = b0;
        row[1] = y;
    }
    let classified = classifier.classify_rows(rows.view())?;

    let mut intervals: Vec<Interval> = Vec::new();
    for (&y, labels) in b1.iter().zip(classified) {
        match intervals.last_mut() {
            Some(last) if last.labels == labels => last.to = y,
            _ => intervals.push(Interval {
                from: y,
                to: y,
                labels,
            }),
        }
    }
    Ok(intervals)
}

fn label_text(labels: &[i32]) -> String {
    match labels.first() {
        Some(&code) => describe(code),
        None => describe(-1),
    }
}

pub fn format_case(result: &CaseResult) -> String {
    let [b0, b1] = result.case.coefficients;
    let mark = if result.passed() { "ok" } else { "FAILED" };
    match &result.actual {
        Ok(labels) => format!(
            "{:<width$}: {{{}, {}}} {}",
            label_text(labels),
            b0,
            b1,
            mark,
            width = LABEL_WIDTH
        ),
        Err(e) => format!(
            "{:<width$}: {{{}, {}}} {}",
            e.to_string(),
            b0,
            b1,
            mark,
            width = LABEL_WIDTH
        ),
    }
}

pub fn print_scenario(report: &ScenarioReport) {
    println!("{}", report.name);
    for result in &report.results {
        println!("  {}", format_case(result));
        if !result.passed() {
            println!("    expected: {}", result.case.expected);
        }
    }
}

pub fn print_sweep(b0: f64, intervals: &[Interval]) {
    println!("Decision map along b1 with b0 = {}", b0);
    for interval in intervals {
        println!(
            "  [{:>7.3}, {:>7.3}] {}",
            interval.from,
            interval.to,
            label_text(&interval.labels)
        );
    }
}

/// Prints the totals and returns whether every case passed.
pub fn print_summary(classifier: &FilterClassifier, reports: &[ScenarioReport]) -> bool {
    let total: usize = reports.iter().map(|r| r.results.len()).sum();
    let failed: usize = reports.iter().map(|r| r.failures()).sum();
    println!(
        "{}: {} cases, {} passed, {} failed",
        classifier.name(),
        total,
        total - failed,
        failed
    );
    failed == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Case, CaseResult};
    use crate::classifier::{DistanceMetric, FilterType};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sweep_finds_midpoint_thresholds() {
        let classifier = FilterClassifier::new(1, DistanceMetric::L2).unwrap();
        let intervals = sweep(&classifier, 1.0, -1.0, 1.0, 40).unwrap();

        let labels: Vec<i32> = intervals.iter().map(|i| i.labels[0]).collect();
        assert_eq!(labels, vec![1, 2, 0]);

        // thresholds sit halfway between {1, 0} and {1, ±0.1}
        assert_abs_diff_eq!(intervals[0].from, -1.0, epsilon = 1e-9);
        assert!(intervals[0].to >= -0.1 - 1e-9 && intervals[0].to < -0.05);
        assert!(intervals[1].from <= 0.0 && intervals[1].to >= 0.0);
        assert!(intervals[2].from > 0.0 && intervals[2].from <= 0.1 + 1e-9);
        assert_abs_diff_eq!(intervals[2].to, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sweep_single_point() {
        let classifier = FilterClassifier::new(1, DistanceMetric::L2).unwrap();
        let intervals = sweep(&classifier, -1.0, 1.0, 1.0, 0).unwrap();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].labels, vec![FilterType::HighPass.code()]);
    }

    #[test]
    fn test_format_case() {
        let result = CaseResult {
            case: Case {
                coefficients: [1.0, 0.5],
                expected: FilterType::LowPass,
            },
            actual: Ok(vec![0]),
        };
        assert_eq!(
            format_case(&result),
            "Closer to a low pass filter  : {1, 0.5} ok"
        );

        let failed = CaseResult {
            actual: Ok(vec![2]),
            ..result
        };
        assert_eq!(
            format_case(&failed),
            "Pretty much the same         : {1, 0.5} FAILED"
        );
    }
}
