// lints
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod config;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use qtree::{Grid, NodeRef, Quadtree, Rgb};
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Build a quadtree from a text grid of hex colors and query it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// grid file, one row of `#rrggbb` cells per line
    grid: PathBuf,

    #[arg(short, long, default_value = "qtree.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// list every node LEVEL steps below the root
    #[command(allow_negative_numbers = true)]
    Levels { level: Option<i32> },
    /// list the nodes LEVEL steps below the root whose color is close to COLOR
    #[command(allow_negative_numbers = true)]
    Match {
        color: Rgb,
        level: Option<i32>,
        /// overrides the configured tolerance
        #[arg(short, long)]
        tolerance: Option<u8>,
    },
    /// find the node LEVEL steps below the root that covers X, Y
    #[command(allow_negative_numbers = true)]
    Locate { level: i32, x: i64, y: i64 },
    /// print the size of the grid and the tree
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config)?;

    let text = fs::read_to_string(&args.grid)
        .with_context(|| format!("reading grid {}", args.grid.display()))?;
    let grid = Grid::<Rgb>::read_from_string(&text)
        .with_context(|| format!("parsing grid {}", args.grid.display()))?;
    info!(side = grid.side(), "loaded grid");

    let tree = Quadtree::build(&grid, Rgb::average);
    run(&tree, &args.command, &config, &mut io::stdout().lock())?;
    Ok(())
}

fn run(
    tree: &Quadtree<Rgb>,
    command: &Command,
    config: &Config,
    out: &mut impl Write,
) -> io::Result<()> {
    let default_level = config.query.default_level;
    match *command {
        Command::Levels { level } => {
            let nodes = tree.collect_at_level(level.unwrap_or(default_level));
            write_nodes(out, &nodes)
        }
        Command::Match {
            color,
            level,
            tolerance,
        } => {
            let tolerance = tolerance.map_or(config.color.tolerance(), qtree::Tolerance);
            let matches = tree.find_matching(&color, level.unwrap_or(default_level), |a, b| {
                a.similar(*b, tolerance)
            });
            writeln!(out, "{} matching", matches.count())?;
            write_nodes(out, matches.nodes())
        }
        Command::Locate { level, x, y } => match tree.locate(level, x, y) {
            Some(node) => write_nodes(out, &[node]),
            None => writeln!(out, "not found"),
        },
        Command::Stats => {
            writeln!(out, "side {}", tree.side())?;
            writeln!(out, "depth {}", tree.depth())?;
            writeln!(out, "nodes {}", tree.node_count())
        }
    }
}

fn write_nodes(out: &mut impl Write, nodes: &[NodeRef<'_, Rgb>]) -> io::Result<()> {
    for node in nodes {
        writeln!(out, "{} {}", node.region(), node.color())?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use clap::Parser;
    use qtree::{test_grid, Grid, Quadtree, Rgb};
    use unindent::unindent;

    use super::{run, Args, Command};
    use crate::config::Config;

    fn output(command: &Command, config: &Config) -> String {
        let grid: Grid<Rgb> = test_grid! {"
            #ff0000 #ff0000 #0000ff #0000ff
            #ff0000 #ff0000 #0000ff #0000ff
            #00ff00 #00ff00 #ffffff #000000
            #00ff00 #00ff00 #000000 #ffffff
        "};
        let tree = Quadtree::build(&grid, Rgb::average);
        let mut out = Vec::new();
        run(&tree, command, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn levels() {
        let expected = unindent(
            "
            (0, 0) 2x2 #ff0000
            (2, 0) 2x2 #0000ff
            (0, 2) 2x2 #00ff00
            (2, 2) 2x2 #7f7f7f
            ",
        );
        let command = Command::Levels { level: Some(1) };
        assert_eq!(expected, output(&command, &Config::default()));

        let mut config = Config::default();
        config.query.default_level = 0;
        let command = Command::Levels { level: None };
        assert_eq!("(0, 0) 4x4 #5f5f5f\n", output(&command, &config));
    }

    #[test]
    fn matching() {
        let command = Command::Match {
            color: Rgb::from_bits(0x00_00_f0),
            level: Some(2),
            tolerance: None,
        };
        let out = output(&command, &Config::default());
        assert!(out.starts_with("4 matching\n"));
        assert!(out.contains("(3, 1) 1x1 #0000ff"));

        let exact = Command::Match {
            color: Rgb::from_bits(0x00_00_f0),
            level: Some(2),
            tolerance: Some(0),
        };
        assert_eq!("0 matching\n", output(&exact, &Config::default()));
    }

    #[test]
    fn locate() {
        let command = Command::Locate { level: 2, x: 3, y: 3 };
        assert_eq!("(3, 3) 1x1 #ffffff\n", output(&command, &Config::default()));
        let command = Command::Locate { level: 2, x: 4, y: 0 };
        assert_eq!("not found\n", output(&command, &Config::default()));
    }

    #[test]
    fn stats() {
        assert_eq!(
            "side 4\ndepth 2\nnodes 21\n",
            output(&Command::Stats, &Config::default())
        );
    }

    #[test]
    fn parses_arguments() {
        let args = Args::try_parse_from(["qtree", "image.txt", "match", "#00ff00", "1", "-t", "5"])
            .unwrap();
        assert_eq!(
            Command::Match {
                color: Rgb::from_bits(0x00_ff_00),
                level: Some(1),
                tolerance: Some(5)
            },
            args.command
        );
        let args = Args::try_parse_from(["qtree", "image.txt", "locate", "2", "-1", "0"]).unwrap();
        assert_eq!(Command::Locate { level: 2, x: -1, y: 0 }, args.command);
        assert!(Args::try_parse_from(["qtree", "image.txt", "match", "green"]).is_err());
    }
}
