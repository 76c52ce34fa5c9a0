// Command line arguments and console report
use crate::domain::node::Node;
use clap::Parser;
use clap::error::ErrorKind;
use std::fmt;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: dashboard-node-split <dashboard.json>";

/// Split a Grafana dashboard into one row of panels per node.
#[derive(Debug, Parser)]
#[command(name = "dashboard-node-split", version)]
pub struct Args {
    /// Dashboard JSON file to split
    pub dashboard: PathBuf,

    /// Anything after the dashboard path is ignored
    #[arg(num_args = 0.., allow_hyphen_values = true, hide = true)]
    #[allow(dead_code)]
    pub ignored: Vec<String>,
}

/// Parse process arguments. A missing or invalid argument prints the usage
/// line to stdout and exits with status 1.
pub fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            println!("{}", USAGE);
            std::process::exit(1);
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct SplitReport {
    pub output: PathBuf,
    pub nodes: Vec<Node>,
    pub total_panels: usize,
}

impl fmt::Display for SplitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<&str> = self.nodes.iter().map(Node::as_str).collect();

        writeln!(f, "Created multi-node dashboard: {}", self.output.display())?;
        writeln!(f, "Nodes: {}", nodes.join(", "))?;
        write!(f, "Total panels: {}", self.total_panels)
    }
}
