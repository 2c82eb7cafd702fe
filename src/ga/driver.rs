//! Generational evolution driver.
//!
//! # Phases
//!
//! ```text
//! Uninitialized → Initialized → Evaluating → Evolving(1) → … → Evolving(max) → Terminated
//! ```
//!
//! - `initialize`: random population of permutations
//! - `evaluate_initial`: first fitness pass and elite capture (generation 0)
//! - `step`: selection → crossover → mutation → evaluation → elitism
//! - `finish`: decode the elite into routes and emit the final report
//!
//! The run always lasts exactly `max_generations` steps.

use rand::Rng;

use crate::error::{CvrpError, Result};
use crate::io::ReportSink;
use crate::models::{ProblemInstance, RoutePlan};

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::crossover::crossover;
use super::elitism::{apply_elitism, capture_elite, EliteUpdate};
use super::fitness::FitnessEvaluator;
use super::mutation::mutate;
use super::population::Population;
use super::selection::select;

/// Where the driver is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created; no population yet.
    Uninitialized,
    /// Random population exists but is unscored.
    Initialized,
    /// Generation 0 is scored and the first elite captured.
    Evaluating,
    /// `generation` steps have completed.
    Evolving { generation: usize },
    /// The final report was emitted; no further transitions.
    Terminated,
}

/// Mutable search state: the population (with its elite) and the
/// generation counter.
#[derive(Debug, Clone)]
pub struct EvolutionState {
    population: Population,
    generation: usize,
}

impl EvolutionState {
    /// The current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Generations completed so far (0 after the initial evaluation).
    pub fn generation(&self) -> usize {
        self.generation
    }
}

/// Final result of a run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Best chromosome found.
    pub best: Chromosome,
    /// Route decomposition of `best`.
    pub plan: RoutePlan,
    /// Generations executed.
    pub generations: usize,
}

/// Runs the GA on one instance.
///
/// # Examples
///
/// ```
/// use cvrp_ga::models::{Customer, Point, ProblemInstance};
/// use cvrp_ga::ga::{EvolutionDriver, GaConfig};
/// use cvrp_ga::io::MemoryReportSink;
///
/// let instance = ProblemInstance::new(
///     Point::new(0.0, 0.0),
///     30.0,
///     vec![
///         Customer::new(1, 1.0, 0.0, 10.0),
///         Customer::new(2, 2.0, 0.0, 10.0),
///         Customer::new(3, 3.0, 0.0, 10.0),
///     ],
/// )
/// .unwrap();
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(30);
///
/// let mut driver = EvolutionDriver::new(instance, config).unwrap();
/// let mut rng = u_numflow::random::create_rng(42);
/// let mut sink = MemoryReportSink::new();
/// let outcome = driver.run(&mut rng, &mut sink).unwrap();
///
/// // 0→1→2→3→0 = 6 is optimal
/// assert!((outcome.plan.cost() - 6.0).abs() < 1e-10);
/// assert_eq!(sink.generations.len(), 31);
/// ```
pub struct EvolutionDriver {
    evaluator: FitnessEvaluator,
    config: GaConfig,
    state: Option<EvolutionState>,
    phase: Phase,
}

impl EvolutionDriver {
    /// Creates a driver after validating the configuration.
    pub fn new(instance: ProblemInstance, config: GaConfig) -> Result<Self> {
        config.validate()?;
        let evaluator = FitnessEvaluator::new(instance, config.penalty_weight);
        Ok(Self {
            evaluator,
            config,
            state: None,
            phase: Phase::Uninitialized,
        })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Search state, once initialized.
    pub fn state(&self) -> Option<&EvolutionState> {
        self.state.as_ref()
    }

    /// Run configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// The evaluator, for decoding arbitrary chromosomes.
    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    fn num_customers(&self) -> usize {
        self.evaluator.instance().num_customers()
    }

    fn wrong_phase(&self, expected: &'static str) -> CvrpError {
        CvrpError::InvalidPhase {
            expected,
            found: format!("{:?}", self.phase),
        }
    }

    fn state_mut(&mut self) -> Result<&mut EvolutionState> {
        let found = format!("{:?}", self.phase);
        self.state.as_mut().ok_or(CvrpError::InvalidPhase {
            expected: "initialized",
            found,
        })
    }

    /// Creates the random initial population.
    pub fn initialize<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        if self.phase != Phase::Uninitialized {
            return Err(self.wrong_phase("Uninitialized"));
        }
        let population =
            Population::random(self.config.population_size, self.num_customers(), rng);
        self.state = Some(EvolutionState {
            population,
            generation: 0,
        });
        self.phase = Phase::Initialized;
        tracing::info!(
            population = self.config.population_size,
            customers = self.num_customers(),
            "Initial population created"
        );
        Ok(())
    }

    /// Scores the initial population, captures the first elite and reports
    /// generation 0.
    pub fn evaluate_initial<S: ReportSink>(&mut self, sink: &mut S) -> Result<()> {
        if self.phase != Phase::Initialized {
            return Err(self.wrong_phase("Initialized"));
        }
        let n = self.num_customers();
        let evaluator = &self.evaluator;
        let state = self.state.as_mut().ok_or(CvrpError::InvalidPhase {
            expected: "initialized",
            found: "missing state".into(),
        })?;

        // decoding indexes by customer id, so reject broken genes first
        state.population.validate(n)?;
        evaluator.evaluate_all(state.population.members_mut());
        capture_elite(&mut state.population);

        let elite = state.population.elite();
        sink.generation(0, elite.cost(), elite.genes())?;
        tracing::info!(best = elite.cost(), "Initial population evaluated");

        self.phase = Phase::Evaluating;
        Ok(())
    }

    /// Runs one generation: selection, crossover, mutation, evaluation and
    /// elitism, then reports the elite.
    pub fn step<R: Rng, S: ReportSink>(&mut self, rng: &mut R, sink: &mut S) -> Result<()> {
        let generation = match self.phase {
            Phase::Evaluating => 1,
            Phase::Evolving { generation } if generation < self.config.max_generations => {
                generation + 1
            }
            _ => return Err(self.wrong_phase("Evaluating or Evolving below max_generations")),
        };

        let n = self.num_customers();
        let config = &self.config;
        let evaluator = &self.evaluator;
        let state = self.state.as_mut().ok_or(CvrpError::InvalidPhase {
            expected: "initialized",
            found: "missing state".into(),
        })?;
        let members = state.population.members_mut();

        select(members, rng);
        let pairs = crossover(members, config.crossover_rate, rng);
        let mutated = mutate(members, config.mutation_rate, config.mutation_swaps, rng);
        state.population.validate(n)?;
        evaluator.evaluate_all(state.population.members_mut());
        let update = apply_elitism(&mut state.population);
        state.generation = generation;

        let elite = state.population.elite();
        sink.generation(generation, elite.cost(), elite.genes())?;
        tracing::debug!(
            generation,
            best = elite.cost(),
            pairs,
            mutated,
            improved = matches!(update, EliteUpdate::Improved { .. }),
            "Generation complete"
        );

        self.phase = Phase::Evolving { generation };
        Ok(())
    }

    /// Decodes the elite, emits the final report and terminates the driver.
    pub fn finish<S: ReportSink>(&mut self, sink: &mut S) -> Result<RunOutcome> {
        let generations = match self.phase {
            Phase::Evolving { generation } if generation == self.config.max_generations => {
                generation
            }
            _ => return Err(self.wrong_phase("Evolving at max_generations")),
        };
        let state = self.state_mut()?;
        let best = state.population.elite().clone();
        let plan = self.evaluator.decode(&best);

        sink.finish(generations, best.genes(), &plan)?;

        if !plan.is_feasible() {
            tracing::warn!(
                penalty = plan.penalty,
                "Best plan still has overloaded routes"
            );
        }
        match self.evaluator.instance().best_known() {
            Some(reference) => tracing::info!(
                best = plan.cost(),
                routes = plan.num_routes(),
                gap_percent = (plan.cost() - reference) / reference * 100.0,
                "Evolution finished"
            ),
            None => tracing::info!(
                best = plan.cost(),
                routes = plan.num_routes(),
                "Evolution finished"
            ),
        }

        self.phase = Phase::Terminated;
        Ok(RunOutcome {
            best,
            plan,
            generations,
        })
    }

    /// Runs the whole lifecycle from an uninitialized driver.
    pub fn run<R: Rng, S: ReportSink>(&mut self, rng: &mut R, sink: &mut S) -> Result<RunOutcome> {
        self.initialize(rng)?;
        self.evaluate_initial(sink)?;
        while self.state.as_ref().map_or(0, EvolutionState::generation) < self.config.max_generations
        {
            self.step(rng, sink)?;
        }
        self.finish(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryReportSink;
    use crate::models::{Customer, Point};

    fn fixture() -> ProblemInstance {
        ProblemInstance::new(
            Point::new(0.0, 0.0),
            6.0,
            vec![
                Customer::new(1, 0.0, 1.0, 3.0),
                Customer::new(2, 0.0, 2.0, 4.0),
                Customer::new(3, 1.0, 2.0, 2.0),
                Customer::new(4, 1.0, 0.0, 5.0),
            ],
        )
        .expect("valid")
    }

    fn grid(n: usize) -> ProblemInstance {
        let customers = (1..=n)
            .map(|i| {
                let x = (i % 5) as f64 * 3.0 + 1.0;
                let y = (i / 5) as f64 * 2.0 - 4.0;
                Customer::new(i, x, y, (i % 4 + 1) as f64)
            })
            .collect();
        ProblemInstance::new(Point::new(0.0, 0.0), 10.0, customers).expect("valid")
    }

    #[test]
    fn test_phase_transitions() {
        let config = GaConfig::default()
            .with_population_size(6)
            .with_max_generations(2);
        let mut driver = EvolutionDriver::new(fixture(), config).expect("valid");
        let mut rng = u_numflow::random::create_rng(1);
        let mut sink = MemoryReportSink::new();

        assert_eq!(driver.phase(), Phase::Uninitialized);
        assert!(driver.state().is_none());
        driver.initialize(&mut rng).expect("init");
        assert_eq!(driver.phase(), Phase::Initialized);
        driver.evaluate_initial(&mut sink).expect("evaluate");
        assert_eq!(driver.phase(), Phase::Evaluating);
        driver.step(&mut rng, &mut sink).expect("step");
        assert_eq!(driver.phase(), Phase::Evolving { generation: 1 });
        driver.step(&mut rng, &mut sink).expect("step");
        assert_eq!(driver.phase(), Phase::Evolving { generation: 2 });
        driver.finish(&mut sink).expect("finish");
        assert_eq!(driver.phase(), Phase::Terminated);
    }

    #[test]
    fn test_out_of_order_transitions_fail() {
        let config = GaConfig::default()
            .with_population_size(4)
            .with_max_generations(1);
        let mut driver = EvolutionDriver::new(fixture(), config).expect("valid");
        let mut rng = u_numflow::random::create_rng(1);
        let mut sink = MemoryReportSink::new();

        assert!(matches!(
            driver.step(&mut rng, &mut sink),
            Err(CvrpError::InvalidPhase { .. })
        ));
        assert!(driver.evaluate_initial(&mut sink).is_err());
        driver.initialize(&mut rng).expect("init");
        assert!(driver.initialize(&mut rng).is_err());
        driver.evaluate_initial(&mut sink).expect("evaluate");
        assert!(driver.finish(&mut sink).is_err());
        driver.step(&mut rng, &mut sink).expect("step");
        // max_generations reached
        assert!(driver.step(&mut rng, &mut sink).is_err());
        driver.finish(&mut sink).expect("finish");
        assert!(driver.finish(&mut sink).is_err());
    }

    #[test]
    fn test_broken_initial_genes_are_reported() {
        let config = GaConfig::default()
            .with_population_size(4)
            .with_max_generations(1);
        let mut driver = EvolutionDriver::new(fixture(), config).expect("valid");
        let mut rng = u_numflow::random::create_rng(1);
        driver.initialize(&mut rng).expect("init");
        let state = driver.state.as_mut().expect("state");
        state.population.members_mut()[2].genes_mut()[0] = 0;

        let err = driver
            .evaluate_initial(&mut MemoryReportSink::new())
            .unwrap_err();
        assert!(matches!(
            err,
            CvrpError::InvariantViolation { index: Some(2), .. }
        ));
    }

    #[test]
    fn test_broken_genes_abort_step() {
        let config = GaConfig::default()
            .with_population_size(4)
            .with_max_generations(3)
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0);
        let mut driver = EvolutionDriver::new(fixture(), config).expect("valid");
        let mut rng = u_numflow::random::create_rng(1);
        let mut sink = MemoryReportSink::new();
        driver.initialize(&mut rng).expect("init");
        driver.evaluate_initial(&mut sink).expect("evaluate");

        // id 99 is outside 1..=4 in every member
        let state = driver.state.as_mut().expect("state");
        for member in state.population.members_mut() {
            member.genes_mut()[0] = 99;
        }
        let err = driver.step(&mut rng, &mut sink).unwrap_err();
        assert!(matches!(
            err,
            CvrpError::InvariantViolation { index: Some(0), .. }
        ));
        assert_eq!(sink.generations.len(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GaConfig::default().with_population_size(0);
        assert!(matches!(
            EvolutionDriver::new(fixture(), config),
            Err(CvrpError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_reports_every_generation() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_max_generations(25);
        let mut driver = EvolutionDriver::new(grid(12), config).expect("valid");
        let mut sink = MemoryReportSink::new();
        let outcome = driver
            .run(&mut u_numflow::random::create_rng(42), &mut sink)
            .expect("run");

        assert_eq!(outcome.generations, 25);
        assert_eq!(sink.generations.len(), 26);
        for (i, record) in sink.generations.iter().enumerate() {
            assert_eq!(record.generation, i);
        }
        let (gens, genes, plan) = sink.finished.expect("finished");
        assert_eq!(gens, 25);
        assert_eq!(genes, outcome.best.genes());
        assert_eq!(plan, outcome.plan);
        assert_eq!(driver.state().expect("state").generation(), 25);
    }

    #[test]
    fn test_elite_never_regresses() {
        let config = GaConfig::default()
            .with_population_size(12)
            .with_max_generations(60);
        let mut driver = EvolutionDriver::new(grid(15), config).expect("valid");
        let mut sink = MemoryReportSink::new();
        driver
            .run(&mut u_numflow::random::create_rng(7), &mut sink)
            .expect("run");

        for pair in sink.generations.windows(2) {
            assert!(pair[1].best_cost <= pair[0].best_cost);
        }
    }

    #[test]
    fn test_population_stays_valid() {
        let config = GaConfig::default()
            .with_population_size(8)
            .with_max_generations(5)
            .with_crossover_rate(1.0)
            .with_mutation_rate(1.0);
        let mut driver = EvolutionDriver::new(grid(9), config).expect("valid");
        let mut rng = u_numflow::random::create_rng(3);
        let mut sink = MemoryReportSink::new();
        driver.initialize(&mut rng).expect("init");
        driver.evaluate_initial(&mut sink).expect("evaluate");
        for _ in 0..5 {
            driver.step(&mut rng, &mut sink).expect("step");
            let pop = driver.state().expect("state").population();
            assert_eq!(pop.len(), 8);
            assert!(pop.validate(9).is_ok());
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_max_generations(15);
        let run = |seed| {
            let mut driver = EvolutionDriver::new(grid(10), config.clone()).expect("valid");
            driver
                .run(
                    &mut u_numflow::random::create_rng(seed),
                    &mut MemoryReportSink::new(),
                )
                .expect("run")
        };
        let a = run(5);
        let b = run(5);
        assert_eq!(a.best.genes(), b.best.genes());
        assert_eq!(a.plan, b.plan);
    }

    #[test]
    fn test_finds_fixture_optimum() {
        let config = GaConfig::default()
            .with_population_size(30)
            .with_max_generations(100);
        let mut driver = EvolutionDriver::new(fixture(), config).expect("valid");
        let outcome = driver
            .run(
                &mut u_numflow::random::create_rng(11),
                &mut MemoryReportSink::new(),
            )
            .expect("run");
        assert!(outcome.plan.is_feasible());
        assert_eq!(outcome.plan.num_served(), 4);
        // Any feasible tour is no worse than the fixed [1,2,3,4] split
        assert!(outcome.plan.cost() <= 7.0 + 5f64.sqrt() + 1e-10);
    }
}
