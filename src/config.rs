//! Problem files. A problem file is TOML with an optional `[search]` table
//! holding the search options and a `[problem]` table whose `domain` key
//! selects between grid routing and sliding-tile puzzles.

use crate::search::{
    domains::{Cell, GridBoard, GridProblem, PuzzleProblem, PuzzleState, DEFAULT_BLANK},
    heuristics::{GridHeuristicName, PuzzleHeuristicName},
    search_engines::{SearchEngineName, SearchOptions, SteppingMode, DEFAULT_ITERATION_LIMIT},
    ProblemError,
};
use clap::ValueEnum;
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse problem file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid problem: {0}")]
    Problem(#[from] ProblemError),
    #[error("failed to serialise solution: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ProblemFile {
    #[serde(default)]
    pub search: SearchConfig,
    pub problem: ProblemConfig,
}

impl ProblemFile {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }
}

impl FromStr for ProblemFile {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct SearchConfig {
    /// 0 for unbounded
    pub iteration_limit: usize,
    /// 0 for unbounded
    pub depth_limit: usize,
    pub engine: SearchEngineName,
    pub stepping: SteppingMode,
    /// Stop at the first goal generated, giving up optimality
    pub goal_on_generation: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iteration_limit: DEFAULT_ITERATION_LIMIT,
            depth_limit: 0,
            engine: SearchEngineName::default(),
            stepping: SteppingMode::default(),
            goal_on_generation: false,
        }
    }
}

impl SearchConfig {
    pub fn options(&self) -> SearchOptions {
        SearchOptions::default()
            .with_iteration_limit(self.iteration_limit)
            .with_depth_limit(self.depth_limit)
            .with_stepping(self.stepping)
            .with_goal_on_generation(self.goal_on_generation)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "domain", rename_all = "kebab-case")]
pub enum ProblemConfig {
    Grid(GridConfig),
    Puzzle(PuzzleConfig),
}

impl ProblemConfig {
    pub fn domain(&self) -> &'static str {
        match self {
            ProblemConfig::Grid(_) => "grid",
            ProblemConfig::Puzzle(_) => "puzzle",
        }
    }

    /// Replace the configured heuristic by the one called `name`, which has
    /// to be one of the domain's heuristics.
    pub fn set_heuristic(&mut self, name: &str) -> Result<(), ProblemError> {
        let domain = self.domain();
        let unsupported = |_| ProblemError::UnsupportedHeuristic {
            heuristic: name.to_string(),
            domain,
        };
        match self {
            ProblemConfig::Grid(grid) => {
                grid.heuristic = GridHeuristicName::from_str(name, true).map_err(unsupported)?;
            }
            ProblemConfig::Puzzle(puzzle) => {
                puzzle.heuristic = PuzzleHeuristicName::from_str(name, true).map_err(unsupported)?;
            }
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// One string per row, see [`crate::search::domains::CellKind`]
    pub board: Vec<String>,
    /// Per-cell traversal costs, all 1 when missing
    pub costs: Option<Vec<Vec<f64>>>,
    /// `[row, col]`, the routed car on the board when missing
    pub start: Option<(usize, usize)>,
    pub target: (usize, usize),
    #[serde(default)]
    pub heuristic: GridHeuristicName,
}

impl GridConfig {
    pub fn build(&self) -> Result<GridProblem, ProblemError> {
        let board = GridBoard::parse(self.board.as_slice(), self.costs.as_deref())?;
        GridProblem::new(board, self.start.map(Cell::from), Cell::from(self.target))
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PuzzleConfig {
    pub dim: usize,
    pub start: Vec<String>,
    pub goal: Vec<String>,
    #[serde(default = "default_blank")]
    pub blank: String,
    #[serde(default)]
    pub heuristic: PuzzleHeuristicName,
}

fn default_blank() -> String {
    DEFAULT_BLANK.to_string()
}

impl PuzzleConfig {
    pub fn build(&self) -> Result<PuzzleProblem, ProblemError> {
        let start = PuzzleState::parse(self.dim, self.start.as_slice(), &self.blank)?;
        let goal = PuzzleState::parse(self.dim, self.goal.as_slice(), &self.blank)?;
        PuzzleProblem::new(start, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Cost;
    use std::io::Write;

    const GRID_FILE: &str = r#"
[search]
iteration-limit = 500
engine = "breadth-first"
goal-on-generation = true

[problem]
domain = "grid"
board = ["...T", "...X", "....", "...."]
costs = [[1, 1, 2, 1], [1, 1, 1, 2], [1, 1, 1, 1], [1, 1, 1, 1]]
target = [3, 0]
heuristic = "manhattan"
"#;

    const PUZZLE_FILE: &str = r#"
[problem]
domain = "puzzle"
dim = 3
start = ["2", "8", "5", "6", "_", "3", "1", "4", "7"]
goal = ["1", "2", "3", "4", "5", "6", "7", "8", "_"]
"#;

    #[test]
    fn grid_file() {
        let file: ProblemFile = GRID_FILE.parse().unwrap();
        assert_eq!(file.search.iteration_limit, 500);
        assert_eq!(file.search.depth_limit, 0);
        assert_eq!(file.search.engine, SearchEngineName::BreadthFirst);
        assert_eq!(file.search.stepping, SteppingMode::Blocking);
        assert!(file.search.options().goal_on_generation);

        let ProblemConfig::Grid(grid) = &file.problem else {
            panic!("expected a grid problem, got {:?}", file.problem);
        };
        assert_eq!(grid.heuristic, GridHeuristicName::Manhattan);
        let problem = grid.build().unwrap();
        assert_eq!(problem.start(), Cell::new(0, 3));
        assert_eq!(problem.target(), Cell::new(3, 0));
        assert_eq!(problem.board().cost(Cell::new(1, 3)), Some(Cost::from(2.)));
    }

    #[test]
    fn puzzle_file_defaults() {
        let file: ProblemFile = PUZZLE_FILE.parse().unwrap();
        assert_eq!(file.search, SearchConfig::default());
        assert_eq!(file.search.options(), SearchOptions::default());

        let ProblemConfig::Puzzle(puzzle) = &file.problem else {
            panic!("expected a puzzle problem, got {:?}", file.problem);
        };
        assert_eq!(puzzle.blank, DEFAULT_BLANK);
        assert_eq!(puzzle.heuristic, PuzzleHeuristicName::Manhattan);
        assert!(puzzle.build().unwrap().is_solvable());
    }

    #[test]
    fn read_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PUZZLE_FILE.as_bytes()).unwrap();
        let problem_file = ProblemFile::from_path(file.path()).unwrap();
        assert_eq!(problem_file.problem.domain(), "puzzle");

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            ProblemFile::from_path(&missing),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn unknown_domain_is_parse_error() {
        let text = PUZZLE_FILE.replace("\"puzzle\"", "\"chess\"");
        assert!(matches!(text.parse::<ProblemFile>(), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn occupied_target_is_rejected() {
        let file: ProblemFile = GRID_FILE.replace("[3, 0]", "[1, 3]").parse().unwrap();
        let ProblemConfig::Grid(grid) = file.problem else {
            panic!("expected a grid problem");
        };
        assert_eq!(
            grid.build().unwrap_err(),
            ProblemError::OccupiedCell { row: 1, col: 3 }
        );
    }

    #[test]
    fn heuristic_override() {
        let mut file: ProblemFile = PUZZLE_FILE.parse().unwrap();
        file.problem.set_heuristic("zero").unwrap();
        assert!(matches!(
            &file.problem,
            ProblemConfig::Puzzle(PuzzleConfig {
                heuristic: PuzzleHeuristicName::Zero,
                ..
            })
        ));
        assert_eq!(
            file.problem.set_heuristic("squared-euclidean"),
            Err(ProblemError::UnsupportedHeuristic {
                heuristic: "squared-euclidean".to_string(),
                domain: "puzzle",
            })
        );
    }
}
