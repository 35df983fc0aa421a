use anyhow::{Context, bail};
use zoom_cluster::Color;

pub const HELP: &str = "\
commands:
  add <color> <x> <y>     place a point (data-space)
  random <color> [count]  place points at random canvas positions
  cluster                 regroup at the current zoom
  zoom in | out | <value> adjust the zoom level
  expand <index|id>       open one cluster (index from `list` or id prefix)
  list                    show every entity
  json                    dump the scene as JSON
  clear                   remove every entity
  help                    show this text
  quit                    exit
colors: red, yellow, green";

#[derive(Debug, Clone, PartialEq)]
pub enum ZoomArg {
    In,
    Out,
    To(f64),
}

/// One line of console input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add { color: Color, x: f64, y: f64 },
    Random { color: Color, count: usize },
    Cluster,
    Zoom(ZoomArg),
    Expand(String),
    List,
    Json,
    Clear,
    Help,
    Quit,
}

impl Command {
    /// Parses a line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> anyhow::Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match (verb.as_str(), args.as_slice()) {
            ("add", [color, x, y]) => Command::Add {
                color: color.parse()?,
                x: parse_number(x)?,
                y: parse_number(y)?,
            },
            ("random", [color]) => Command::Random {
                color: color.parse()?,
                count: 1,
            },
            ("random", [color, count]) => Command::Random {
                color: color.parse()?,
                count: count
                    .parse()
                    .with_context(|| format!("count must be a whole number, got {count:?}"))?,
            },
            ("cluster", []) => Command::Cluster,
            ("zoom", ["in"]) | ("+", []) => Command::Zoom(ZoomArg::In),
            ("zoom", ["out"]) | ("-", []) => Command::Zoom(ZoomArg::Out),
            ("zoom", [value]) => Command::Zoom(ZoomArg::To(parse_number(value)?)),
            ("expand", [target]) => Command::Expand(target.to_string()),
            ("list", []) | ("ls", []) => Command::List,
            ("json", []) => Command::Json,
            ("clear", []) => Command::Clear,
            ("help", []) | ("?", []) => Command::Help,
            ("quit", []) | ("exit", []) => Command::Quit,
            (verb, _) => bail!("unrecognized command {verb:?} (try `help`)"),
        };
        Ok(Some(command))
    }
}

fn parse_number(raw: &str) -> anyhow::Result<f64> {
    let value: f64 = raw
        .parse()
        .with_context(|| format!("expected a number, got {raw:?}"))?;
    if !value.is_finite() {
        bail!("expected a finite number, got {raw:?}");
    }
    Ok(value)
}
