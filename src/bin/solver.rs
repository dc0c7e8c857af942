use clap::Parser;
use itertools::Itertools;
use parksolver::{
    config::{ConfigError, ProblemConfig, ProblemFile},
    search::{
        domains::{translate_moves, Move, PuzzleExpansion},
        search_engines::{SearchEngineName, SearchOptions, SearchResult, StepResult, SteppingMode},
        validate, ExpansionRule, Goal, SearchProblem, SearchState, SearchStatistics, Verbosity,
    },
};
use serde::Serialize;
use std::{fmt::Display, path::PathBuf, process::ExitCode};
use tracing::{debug, error, info, warn};

#[derive(Parser)]
#[command(version)]
/// Route a car through a parking lot or solve a sliding-tile puzzle with
/// heuristic search.
struct Cli {
    #[arg(help = "The TOML problem file")]
    problem: PathBuf,
    #[arg(
        help = "Write the solution as JSON to this file",
        short = 'o',
        long = "output",
        id = "OUTPUT"
    )]
    output: Option<PathBuf>,
    #[arg(
        value_enum,
        help = "The search engine to use, overrides the problem file",
        short = 'e',
        long = "engine",
        id = "ENGINE"
    )]
    engine: Option<SearchEngineName>,
    #[arg(
        help = "The heuristic to use, overrides the problem file",
        long = "heuristic",
        id = "HEURISTIC"
    )]
    heuristic: Option<String>,
    #[arg(
        help = "Maximum number of expansions, 0 for unbounded",
        short = 'i',
        long = "iteration-limit",
        id = "ITERATIONS"
    )]
    iteration_limit: Option<usize>,
    #[arg(
        help = "Maximum path length, 0 for unbounded",
        short = 'd',
        long = "depth-limit",
        id = "DEPTH"
    )]
    depth_limit: Option<usize>,
    #[arg(help = "Step through the search one expansion at a time", long = "step")]
    step: bool,
    #[arg(
        help = "Stop at the first goal generated, the path may not be the cheapest",
        long = "goal-on-generation"
    )]
    goal_on_generation: bool,
    #[arg(
        value_enum,
        help = "The verbosity level",
        short = 'v',
        long = "verbosity",
        id = "VERBOSITY",
        default_value_t = Verbosity::Normal
    )]
    verbosity: Verbosity,
    #[arg(help = "Whether to use coloured output", short = 'c', long = "colour")]
    colour: bool,
}

#[derive(Serialize)]
struct Report<P> {
    domain: &'static str,
    solved: bool,
    cost: Option<f64>,
    iterations: usize,
    path: Vec<P>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    moves: Vec<Move>,
    failure: Option<String>,
    statistics: StatisticsReport,
}

impl<P> Report<P> {
    fn map_path<Q>(self, f: impl FnMut(&P) -> Q) -> Report<Q> {
        Report {
            domain: self.domain,
            solved: self.solved,
            cost: self.cost,
            iterations: self.iterations,
            path: self.path.iter().map(f).collect(),
            moves: self.moves,
            failure: self.failure,
            statistics: self.statistics,
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy)]
struct StatisticsReport {
    expanded: i64,
    generated: i64,
    reopened: i64,
    dominated: i64,
    frontier_high_water: usize,
}

impl From<&SearchStatistics> for StatisticsReport {
    fn from(statistics: &SearchStatistics) -> Self {
        Self {
            expanded: statistics.expanded_nodes(),
            generated: statistics.generated_nodes(),
            reopened: statistics.reopened_nodes(),
            dominated: statistics.dominated_nodes(),
            frontier_high_water: statistics.frontier_high_water(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level: tracing::Level = cli.verbosity.into();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(cli.colour)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match solve(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Load the problem, search and report. Returns whether a valid solution was
/// found.
fn solve(cli: &Cli) -> Result<bool, ConfigError> {
    let mut file = ProblemFile::from_path(&cli.problem)?;
    if let Some(engine) = cli.engine {
        file.search.engine = engine;
    }
    if let Some(iteration_limit) = cli.iteration_limit {
        file.search.iteration_limit = iteration_limit;
    }
    if let Some(depth_limit) = cli.depth_limit {
        file.search.depth_limit = depth_limit;
    }
    if cli.step {
        file.search.stepping = SteppingMode::Cooperative;
    }
    if cli.goal_on_generation {
        file.search.goal_on_generation = true;
    }
    if let Some(heuristic) = &cli.heuristic {
        file.problem.set_heuristic(heuristic)?;
    }
    let options = file.search.options();
    info!(domain = file.problem.domain(), engine = ?file.search.engine);

    let report = match &file.problem {
        ProblemConfig::Grid(config) => {
            let problem = config.build()?;
            println!("Parking lot:\n{}", problem.board());
            let (start, goal, expansion) = (problem.start(), problem.goal(), problem.expansion());
            let (result, statistics) = run(
                file.search.engine,
                &options,
                problem.into_search_problem(config.heuristic),
            );
            let report = check(result, statistics, &start, &goal, &expansion, "grid");
            if report.solved {
                println!("Route: {}", report.path.iter().join(" -> "));
            }
            output(cli, &report)?;
            report.solved
        }
        ProblemConfig::Puzzle(config) => {
            let problem = config.build()?;
            if !problem.is_solvable() {
                warn!("the goal arrangement is not reachable from the start");
            }
            println!("Start:\n{}", problem.start());
            let start = problem.start().clone();
            let goal = Goal::state(problem.goal_state().clone());
            let expansion = PuzzleExpansion::new(config.dim);
            let (result, statistics) = run(
                file.search.engine,
                &options,
                problem.into_search_problem(config.heuristic),
            );
            let mut report = check(result, statistics, &start, &goal, &expansion, "puzzle");
            let moves = translate_moves(&report.path);
            for (step, slide) in moves.iter().enumerate() {
                println!(
                    "{}: move {} {} from {:?} to {:?}",
                    step + 1,
                    slide.tile,
                    slide.direction,
                    slide.from,
                    slide.to
                );
            }
            report.moves = moves;
            let report = report.map_path(|state| {
                state.symbols().into_iter().map(String::from).collect_vec()
            });
            output(cli, &report)?;
            report.solved
        }
    };
    Ok(report)
}

/// Run the search, either in one go or one expansion at a time.
fn run<S: SearchState + Display + 'static>(
    engine_name: SearchEngineName,
    options: &SearchOptions,
    problem: SearchProblem<S>,
) -> (SearchResult<S>, StatisticsReport) {
    let mut engine = engine_name.create(problem, options);
    let result = match options.stepping {
        SteppingMode::Blocking => engine.run(),
        SteppingMode::Cooperative => loop {
            match engine.step() {
                StepResult::Expanded(report) => debug!(
                    iteration = report.iterations,
                    g = report.cost_so_far.into_inner(),
                    h = report.heuristic_value.into_inner(),
                    frontier = report.frontier_size,
                    "expanded {}",
                    engine.state(report.node_id)
                ),
                StepResult::Finished(result) => break result,
            }
        },
    };
    (result, engine.statistics().into())
}

/// Validate a search result and turn it into a report.
fn check<S: SearchState>(
    result: SearchResult<S>,
    statistics: StatisticsReport,
    start: &S,
    goal: &Goal<S>,
    expansion: &dyn ExpansionRule<S>,
    domain: &'static str,
) -> Report<S> {
    let mut report = Report {
        domain,
        solved: false,
        cost: None,
        iterations: 0,
        path: vec![],
        moves: vec![],
        failure: None,
        statistics,
    };
    match result {
        Ok(solution) => {
            info!("validating solution");
            report.iterations = solution.iterations();
            match validate(solution.path(), start, goal, expansion) {
                Ok(cost) if cost == solution.cost() => {
                    info!("solution is valid");
                    println!(
                        "Solution found: {} moves, cost {}, {} iterations",
                        solution.num_moves(),
                        solution.cost(),
                        solution.iterations()
                    );
                    report.solved = true;
                    report.cost = Some(solution.cost().into_inner());
                    report.path = solution.into_path();
                }
                Ok(cost) => {
                    error!(
                        "solution cost {} does not match the path cost {}",
                        solution.cost(),
                        cost
                    );
                    report.failure = Some(format!("solution cost differs from path cost {}", cost));
                }
                Err(e) => {
                    error!("solution is invalid: {}", e);
                    report.failure = Some(e);
                }
            }
        }
        Err(failure) => {
            info!("no solution found");
            println!("No solution found: {}", failure);
            report.failure = Some(failure.to_string());
        }
    }
    report
}

fn output<P: Serialize>(cli: &Cli, report: &Report<P>) -> Result<(), ConfigError> {
    let Some(path) = &cli.output else {
        return Ok(());
    };
    let text = serde_json::to_string_pretty(report)?;
    std::fs::write(path, text).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    info!(output = %path.display(), "solution written");
    Ok(())
}
