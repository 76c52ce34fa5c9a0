use crate::application::query_filter::DEFAULT_NODE_LABEL;
use crate::domain::node::Node;
use serde::Deserialize;

const CONFIG_FILE: &str = "config/split";
const ENV_PREFIX: &str = "SPLIT";

pub const DEFAULT_NODES: [&str; 2] = ["opti", "thinkpad"];
pub const DEFAULT_OUTPUT_SUFFIX: &str = "-multi-node";
pub const DEFAULT_TITLE_SUFFIX: &str = " (Multi-Node)";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SplitConfig {
    pub nodes: Vec<String>,
    pub label: String,
    pub output_suffix: String,
    pub title_suffix: String,
}

impl SplitConfig {
    pub fn nodes(&self) -> Vec<Node> {
        self.nodes.iter().map(Node::new).collect()
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODES.iter().map(|n| n.to_string()).collect(),
            label: DEFAULT_NODE_LABEL.to_string(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            title_suffix: DEFAULT_TITLE_SUFFIX.to_string(),
        }
    }
}

/// Load settings from `config/split.*` (optional) and `SPLIT_*` variables,
/// e.g. `SPLIT_NODES=opti,thinkpad` or `SPLIT_LABEL=instance`.
pub fn load_split_config() -> anyhow::Result<SplitConfig> {
    let builder = defaults()?
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("nodes"),
        );

    finish(builder)
}

fn defaults() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    let fallback = SplitConfig::default();

    Ok(config::Config::builder()
        .set_default("nodes", fallback.nodes)?
        .set_default("label", fallback.label)?
        .set_default("output_suffix", fallback.output_suffix)?
        .set_default("title_suffix", fallback.title_suffix)?)
}

fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> anyhow::Result<SplitConfig> {
    let settings: SplitConfig = builder.build()?.try_deserialize()?;
    validate(&settings)?;

    Ok(settings)
}

fn validate(settings: &SplitConfig) -> anyhow::Result<()> {
    anyhow::ensure!(!settings.nodes.is_empty(), "no nodes configured to split by");
    anyhow::ensure!(
        settings.nodes.iter().all(|n| !n.trim().is_empty()),
        "node names must not be blank: {:?}",
        settings.nodes
    );
    anyhow::ensure!(!settings.label.is_empty(), "node label must not be empty");
    Ok(())
}
