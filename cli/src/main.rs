//! `pixpath` — find a least-cost path across a weight grid or an image.
//!
//! Without an image argument the built-in 5x5 demo grid (or `--grid FILE`) is
//! searched from `(x, y)` to its bottom-right tile. With an image, the search
//! runs pixel to pixel towards the lower-right corner and the path is painted
//! onto a copy of the image.

mod report;

use std::fmt::Display;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, warn};
use pixpath_image::ImageProblem;
use pixpath_search::{AStar, GridProblem, Point, SearchProblem, chebyshev, manhattan};

use report::Summary;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image to search; the demo grid is used when omitted
    image: Option<PathBuf>,

    /// Log search progress
    #[arg(long)]
    verbose: bool,

    /// Initial x coordinate (row in grid mode)
    #[arg(short, default_value_t = 0)]
    x: i32,

    /// Initial y coordinate (column in grid mode)
    #[arg(short, default_value_t = 0)]
    y: i32,

    /// Show only the first n states on the path
    #[arg(short, default_value_t = -1, allow_negative_numbers = true)]
    n: i64,

    /// JSON file holding grid weights as an array of rows
    #[arg(long, conflicts_with = "image")]
    grid: Option<PathBuf>,

    /// Heuristic towards the goal [default: zero for images, manhattan for grids]
    #[arg(long, value_enum)]
    heuristic: Option<Heuristic>,

    /// Abort once the cheapest frontier node costs more than this
    #[arg(long)]
    cost_limit: Option<f64>,

    /// Where to write the painted path in image mode
    #[arg(long, default_value = "path.png")]
    output: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Heuristic {
    /// Uniform-cost search
    Zero,
    /// L1 distance; overestimates when diagonal moves exist
    Manhattan,
    /// L∞ distance
    Chebyshev,
}

impl Heuristic {
    fn estimate(self, from: Point, to: Point) -> f64 {
        match self {
            Self::Zero => 0.0,
            Self::Manhattan => manhattan(from, to) as f64,
            Self::Chebyshev => chebyshev(from, to) as f64,
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
    debug!("{args:?}");

    match &args.image {
        Some(path) => run_image(&args, path),
        None => run_grid(&args),
    }
}

fn run_grid(args: &Args) -> Result<ExitCode> {
    let problem = match &args.grid {
        Some(path) => load_grid(path)?,
        None => GridProblem::default(),
    };
    let goal = problem.bottom_right().to_point();
    let kind = args.heuristic.unwrap_or(Heuristic::Manhattan);
    let problem = problem.with_heuristic(move |p| kind.estimate(p.to_point(), goal));
    let start = problem.pos(args.x, args.y)?;

    Ok(match solve(&problem, start, args, &mut io::stdout().lock())? {
        Some(_) => ExitCode::SUCCESS,
        None => ExitCode::FAILURE,
    })
}

fn run_image(args: &Args, path: &Path) -> Result<ExitCode> {
    let problem = open_image(path, args.heuristic.unwrap_or(Heuristic::Zero))?;
    let start = problem.point(args.x, args.y)?;

    let Some(states) = solve(&problem, start, args, &mut io::stdout().lock())? else {
        return Ok(ExitCode::FAILURE);
    };
    problem
        .save_path(&states, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    Ok(ExitCode::SUCCESS)
}

/// Load an image whose goal is its lower-right pixel.
fn open_image(path: &Path, kind: Heuristic) -> Result<ImageProblem> {
    let problem = ImageProblem::open(path, |_| false, |_| 0.0)
        .with_context(|| format!("opening {}", path.display()))?;
    let goal = problem.bottom_right();
    Ok(problem
        .with_goal_fn(move |p| p == goal)
        .with_heuristic(move |p| kind.estimate(p, goal)))
}

/// Run one search and write the report to `out`. Returns the path, or `None`
/// after reporting why no goal was reached.
fn solve<P, W>(
    problem: &P,
    start: P::State,
    args: &Args,
    out: &mut W,
) -> Result<Option<Vec<P::State>>>
where
    P: SearchProblem,
    P::State: Display,
    W: Write,
{
    let mut astar = AStar::new(problem);
    let started = Instant::now();
    let outcome = astar.search(start, args.cost_limit);
    let elapsed = started.elapsed();

    let id = match outcome {
        Ok(id) => id,
        Err(reason) => {
            warn!("{:?} after {} expansions", astar.status(), astar.stats().expanded);
            eprintln!("no path found: {reason}");
            return Ok(None);
        }
    };

    let goal = astar.node(id).context("goal node missing from the search")?;
    let states = astar
        .reconstruct_path(id)
        .context("goal node missing from the search")?;
    report::write_path(out, &states, args.n)?;
    report::write_summary(
        out,
        &Summary {
            elapsed,
            reached: astar.reached_len(),
            path_len: states.len(),
            cost: goal.g(),
        },
    )?;
    Ok(Some(states))
}

fn load_grid(path: &Path) -> Result<GridProblem> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rows: Vec<Vec<f64>> = serde_json::from_str(&text)
        .with_context(|| format!("parsing grid weights in {}", path.display()))?;
    GridProblem::new(rows.as_slice())
        .with_context(|| format!("invalid grid in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixpath_search::GridPos;

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "pixpath",
            "-x",
            "2",
            "-y",
            "3",
            "-n",
            "-1",
            "--heuristic",
            "chebyshev",
            "--cost-limit",
            "12.5",
        ])
        .unwrap();
        assert_eq!((args.x, args.y, args.n), (2, 3, -1));
        assert_eq!(args.heuristic, Some(Heuristic::Chebyshev));
        assert_eq!(args.cost_limit, Some(12.5));
        assert!(args.image.is_none());
        assert_eq!(args.output, PathBuf::from("path.png"));
    }

    #[test]
    fn grid_conflicts_with_image() {
        assert!(Args::try_parse_from(["pixpath", "a.png", "--grid", "g.json"]).is_err());
    }

    #[test]
    fn heuristics() {
        let a = Point::new(0, 0);
        let b = Point::new(4, 2);
        assert_eq!(Heuristic::Zero.estimate(a, b), 0.0);
        assert_eq!(Heuristic::Manhattan.estimate(a, b), 6.0);
        assert_eq!(Heuristic::Chebyshev.estimate(a, b), 4.0);
    }

    fn report_lines<P>(problem: &P, start: P::State, args: &[&str]) -> Vec<String>
    where
        P: SearchProblem,
        P::State: Display,
    {
        let args = Args::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        assert!(solve(problem, start, &args, &mut out).unwrap().is_some());
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn grid_mode_report() {
        let p = GridProblem::default();
        let lines = report_lines(&p, GridPos::new(0, 0), &["pixpath"]);
        assert_eq!(lines[0], "(0, 0)");
        assert_eq!(lines[lines.len() - 2], "9 states on path to goal");
        assert_eq!(lines[lines.len() - 1], "cost is: 8.00");
    }

    #[test]
    fn image_mode_report() {
        // 12x8 black image with white walls at column 2 (rows 0..5) and
        // column 7 (rows 3..8).
        let img = image::RgbImage::from_fn(12, 8, |x, y| {
            if (x == 2 && y < 5) || (x == 7 && y >= 3) {
                image::Rgb([255, 255, 255])
            } else {
                image::Rgb([0, 0, 0])
            }
        });
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walls.png");
        img.save(&path).unwrap();

        let p = open_image(&path, Heuristic::Zero).unwrap();
        let lines = report_lines(&p, Point::new(0, 0), &["pixpath", "walls.png", "-n", "0"]);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "16 states on path to goal");
        assert_eq!(lines[3], "cost is: 15.00");
    }

    #[test]
    fn open_image_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_image(&dir.path().join("nope.png"), Heuristic::Zero).unwrap_err();
        assert!(format!("{err:#}").contains("opening"));
    }

    #[test]
    fn loads_grid_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        fs::write(&path, "[[1, 2, 3], [4, 5, 6]]").unwrap();
        let g = load_grid(&path).unwrap();
        assert_eq!((g.rows(), g.cols()), (2, 3));
        assert_eq!(g.weight(GridPos::new(1, 2)), Some(6.0));

        fs::write(&path, "[[1, 2], [3]]").unwrap();
        let err = load_grid(&path).unwrap_err();
        assert!(format!("{err:#}").contains("columns"));
    }
}
