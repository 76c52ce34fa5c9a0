// Node domain model
use std::fmt;

/// A host the dashboard is split by, e.g. a Kubernetes node name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    pub name: String,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn row_title(&self) -> String {
        format!("Node: {}", self.name)
    }

    pub fn panel_title(&self, original: &str) -> String {
        format!("{} ({})", original, self.name)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        let node = Node::new("opti");
        assert_eq!(node.row_title(), "Node: opti");
        assert_eq!(node.panel_title("CPU Usage"), "CPU Usage (opti)");
    }
}
