use lp_nexus_simulation::SimulationResult;
use std::cmp::Ordering;

pub trait ObjectiveFunction {
    /// Short label used in reports.
    fn name(&self) -> &'static str;
    /// Higher is better.
    fn evaluate(&self, result: &SimulationResult) -> f64;
    fn compare(&self, a: &SimulationResult, b: &SimulationResult) -> Ordering {
        self.evaluate(a).total_cmp(&self.evaluate(b))
    }
}

pub struct MaximizeExpectedPnl;
impl ObjectiveFunction for MaximizeExpectedPnl {
    fn name(&self) -> &'static str {
        "expected-pnl"
    }

    fn evaluate(&self, result: &SimulationResult) -> f64 {
        result.expected_pnl
    }
}

pub struct MaximizeProbBeatHodl;
impl ObjectiveFunction for MaximizeProbBeatHodl {
    fn name(&self) -> &'static str {
        "prob-beat-hodl"
    }

    fn evaluate(&self, result: &SimulationResult) -> f64 {
        result.prob_beat_hodl
    }
}

/// Expected PNL penalized by the size of the 5th percentile tail.
pub struct MaximizeRiskAdjusted {
    pub lambda: f64,
}
impl ObjectiveFunction for MaximizeRiskAdjusted {
    fn name(&self) -> &'static str {
        "risk-adjusted"
    }

    fn evaluate(&self, result: &SimulationResult) -> f64 {
        result.expected_pnl - self.lambda * result.percentile5.abs()
    }
}
