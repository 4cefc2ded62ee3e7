use std::fmt;
use std::time::Duration;

/// Outcome of one agent's run.
#[derive(Debug, Clone)]
pub struct Statistics {
    pub agent_id: usize,
    pub success: bool,
    pub total_moves: usize,
    /// Cost of the path the agent was given, 0 if it had none.
    pub path_cost: f64,
    /// Cost reported by the baseline solver, when one was run.
    pub optimal_cost: Option<f64>,
    pub nodes_expanded: usize,
    pub route_efficiency: f64,
}

impl Statistics {
    pub fn new(agent_id: usize) -> Self {
        Statistics {
            agent_id,
            success: false,
            total_moves: 0,
            path_cost: 0.0,
            optimal_cost: None,
            nodes_expanded: 0,
            route_efficiency: 0.0,
        }
    }

    /// Ratio of the planned cost to the baseline cost; 1.0 means optimal.
    pub fn calculate_efficiency(&mut self) {
        self.route_efficiency = match self.optimal_cost {
            Some(optimal) if optimal > 0.0 && self.path_cost > 0.0 => self.path_cost / optimal,
            Some(_) if self.success => 1.0,
            _ => 0.0,
        };
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Agent {}:", self.agent_id)?;
        writeln!(f, "  Reached target: {}", if self.success { "yes" } else { "no" })?;
        writeln!(f, "  Total moves: {}", self.total_moves)?;
        writeln!(f, "  Path cost: {:.3}", self.path_cost)?;
        if let Some(optimal) = self.optimal_cost {
            writeln!(f, "  Baseline cost: {:.3}", optimal)?;
            writeln!(f, "  Route efficiency: {:.3}", self.route_efficiency)?;
        }
        writeln!(f, "  Nodes expanded: {}", self.nodes_expanded)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimingData {
    pub find_path_times: Vec<Duration>,
}

impl TimingData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.find_path_times.push(elapsed);
    }

    pub fn average_find_path_time(&self) -> Duration {
        if self.find_path_times.is_empty() {
            Duration::from_nanos(0)
        } else {
            self.total_find_path_time() / self.find_path_times.len() as u32
        }
    }

    pub fn total_find_path_time(&self) -> Duration {
        self.find_path_times.iter().sum()
    }

    pub fn total_calls(&self) -> usize {
        self.find_path_times.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_efficiency() {
        let mut stats = Statistics::new(1);
        stats.success = true;
        stats.path_cost = 12.0;
        stats.optimal_cost = Some(10.0);
        stats.calculate_efficiency();
        assert!((stats.route_efficiency - 1.2).abs() < 1e-12);

        let mut at_target = Statistics::new(2);
        at_target.success = true;
        at_target.optimal_cost = Some(0.0);
        at_target.calculate_efficiency();
        assert_eq!(at_target.route_efficiency, 1.0);

        let mut unplanned = Statistics::new(3);
        unplanned.calculate_efficiency();
        assert_eq!(unplanned.route_efficiency, 0.0);
    }

    #[test]
    fn test_timing_averages() {
        let mut timing = TimingData::new();
        assert_eq!(timing.average_find_path_time(), Duration::ZERO);
        timing.record(Duration::from_micros(10));
        timing.record(Duration::from_micros(30));
        assert_eq!(timing.total_calls(), 2);
        assert_eq!(timing.total_find_path_time(), Duration::from_micros(40));
        assert_eq!(timing.average_find_path_time(), Duration::from_micros(20));
    }
}
