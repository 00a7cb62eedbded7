use crate::classifier::{FilterClassifier, FilterType};
use firclass::KnnError;

/// One coefficient pair and the filter type it should be recognised as.
#[derive(Debug, Clone, Copy)]
pub struct Case {
    pub coefficients: [f64; 2],
    pub expected: FilterType,
}

/// A named group of cases, run in order.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub cases: Vec<Case>,
}

impl Scenario {
    fn new(name: &'static str, cases: &[([f64; 2], FilterType)]) -> Self {
        Self {
            name,
            cases: cases
                .iter()
                .map(|&(coefficients, expected)| Case {
                    coefficients,
                    expected,
                })
                .collect(),
        }
    }
}

/// What the classifier answered for one case.
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub case: Case,
    pub actual: Result<Vec<i32>, KnnError>,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        matches!(&self.actual, Ok(labels) if labels.first() == Some(&self.case.expected.code()))
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub results: Vec<CaseResult>,
}

impl ScenarioReport {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| !r.passed()).count()
    }
}

/// The full list of filter scenarios.
pub fn scenarios() -> Vec<Scenario> {
    use FilterType::{HighPass, LowPass, NoFilter};

    vec![
        Scenario::new(
            "Training examples 1",
            &[([1.0, 1.0], LowPass), ([1.0, -1.0], HighPass), ([1.0, 0.0], NoFilter)],
        ),
        Scenario::new(
            "Training examples 2",
            &[([1.0, 0.25], LowPass), ([1.0, -0.25], HighPass)],
        ),
        Scenario::new(
            "Threshold between lowpass and 'no filter'",
            &[([1.0, 0.1], LowPass), ([1.0, 0.075], LowPass), ([1.0, 0.05], NoFilter)],
        ),
        Scenario::new(
            "Threshold between hipass and 'no filter'",
            &[([1.0, -0.1], HighPass), ([1.0, -0.075], HighPass), ([1.0, -0.05], NoFilter)],
        ),
        Scenario::new(
            "Inverted values should be correct",
            &[
                ([-1.0, -1.0], LowPass),
                ([-1.0, 1.0], HighPass),
                ([-1.0, -0.25], LowPass),
                ([-1.0, 0.25], HighPass),
            ],
        ),
        Scenario::new(
            "Try scattered values",
            &[
                ([-1.0, -0.9980292110703886], LowPass),
                ([-0.9167379969730973, -0.6467147152870893], LowPass),
                ([-0.27079550363123417, -0.8173387758433819], LowPass),
                ([-0.8154047047719359, -0.0255655525252223], LowPass),
                ([0.05350055918097496, -0.0911331526003778], HighPass),
                ([-0.53364313300699, 0.6625835755839944], HighPass),
                ([0.8634629636071622, 0.1361192255280912], LowPass),
                ([0.11218866473063827, -0.8983361716382205], HighPass),
                ([0.5341023192740977, -0.9621703932061791], HighPass),
                ([-0.49528047628700733, -0.4036056534387171], LowPass),
                ([0.7519617341458797, 0.06311372900381684], LowPass),
                ([0.8405218836851418, 0.030862302519381046], NoFilter),
            ],
        ),
    ]
}

/// Runs every case of every scenario against `classifier`.
pub fn run(classifier: &FilterClassifier, scenarios: &[Scenario]) -> Vec<ScenarioReport> {
    scenarios
        .iter()
        .map(|scenario| ScenarioReport {
            name: scenario.name,
            results: scenario
                .cases
                .iter()
                .map(|&case| CaseResult {
                    case,
                    actual: classifier.classify(case.coefficients),
                })
                .collect(),
        })
        .collect()
}
