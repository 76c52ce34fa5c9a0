// Split service - Use case for turning a dashboard into a multi-node dashboard
use crate::application::layout_expander::LayoutExpander;
use crate::application::query_filter::LabelFilterInjector;
use crate::domain::dashboard::Document;
use crate::domain::node::Node;
use crate::infrastructure::config::SplitConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct SplitService {
    expander: LayoutExpander,
    title_suffix: String,
}

impl SplitService {
    pub fn new(expander: LayoutExpander, title_suffix: String) -> Self {
        Self {
            expander,
            title_suffix,
        }
    }

    pub fn from_config(config: &SplitConfig) -> Self {
        let filter = Arc::new(LabelFilterInjector::new(config.label.clone()));
        Self::new(LayoutExpander::new(filter), config.title_suffix.clone())
    }

    /// Replace the document's panels with one section per node and mark the
    /// title as multi-node. Everything else in the document is kept.
    pub fn split(&self, mut document: Document, nodes: &[Node]) -> Document {
        let source_panels = document.panels.len();
        let panels = self.expander.expand(&document.panels, nodes);
        let title = format!("{}{}", document.title_or_default(), self.title_suffix);

        tracing::info!(
            "Split '{}' ({} panels) across {} nodes into {} panels",
            title,
            source_panels,
            nodes.len(),
            panels.len()
        );

        document.panels = panels;
        document.title = Some(title);
        document
    }
}
