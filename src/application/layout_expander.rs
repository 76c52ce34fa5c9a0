// Layout expander - One row section of duplicated panels per node
use crate::application::query_filter::QueryFilter;
use crate::domain::dashboard::{GridPos, Panel};
use crate::domain::node::Node;
use std::sync::Arc;

const SECTION_GAP: i64 = 1;

#[derive(Clone)]
pub struct LayoutExpander {
    filter: Arc<dyn QueryFilter>,
}

impl LayoutExpander {
    pub fn new(filter: Arc<dyn QueryFilter>) -> Self {
        Self { filter }
    }

    /// Build the per-node panel list.
    ///
    /// Existing row panels are dropped. For every node a row header is
    /// emitted, followed by a copy of each content panel shifted down below
    /// the previous section. Panels within a section keep their original
    /// relative layout.
    pub fn expand(&self, panels: &[Panel], nodes: &[Node]) -> Vec<Panel> {
        let content: Vec<&Panel> = panels.iter().filter(|p| !p.is_row()).collect();
        let section_height = section_height(&content);

        let mut expanded = Vec::with_capacity(nodes.len() * (content.len() + 1));
        let mut current_y = 0;

        for node in nodes {
            expanded.push(Panel::row(node.row_title(), current_y));
            current_y = current_y.saturating_add(1);

            for panel in &content {
                expanded.push(self.duplicate(panel, node, current_y));
            }

            // A dashboard with only rows stacks the headers directly.
            if !content.is_empty() {
                current_y = current_y
                    .saturating_add(section_height)
                    .saturating_add(SECTION_GAP);
            }
        }

        tracing::debug!(
            "Expanded {} content panels across {} nodes into {} panels",
            content.len(),
            nodes.len(),
            expanded.len()
        );

        expanded
    }

    fn duplicate(&self, panel: &Panel, node: &Node, offset: i64) -> Panel {
        let mut copy = panel.clone();

        copy.title = Some(node.panel_title(panel.title_or_default()));

        let grid = panel.grid_pos_or_default();
        copy.grid_pos = Some(GridPos::new(grid.x, offset.saturating_add(grid.y), grid.w, grid.h));

        if let Some(targets) = copy.targets.take() {
            copy.targets = Some(
                targets
                    .into_iter()
                    .map(|target| self.filter.inject(target, node))
                    .collect(),
            );
        }

        copy
    }
}

/// Lowest grid line reached by any content panel, 0 when there are none.
fn section_height(content: &[&Panel]) -> i64 {
    content
        .iter()
        .map(|p| p.grid_pos_or_default().bottom())
        .max()
        .unwrap_or_default()
}
