// Query filter - Restricts a panel target to a single node
use crate::domain::dashboard::Query;
use crate::domain::node::Node;

pub const DEFAULT_NODE_LABEL: &str = "kubernetes_io_hostname";

pub trait QueryFilter: Send + Sync {
    /// Return `query` restricted to `node`. Queries that are already
    /// filtered, or carry no expression, come back unchanged.
    fn inject(&self, query: Query, node: &Node) -> Query;
}

/// Injects a `label="node"` matcher into the PromQL text of a target.
///
/// This is a text rewrite, not a parser: an expression with a label block
/// gets the matcher prepended inside its first `{`, a bare metric
/// (`metric`, `metric[5m]`, `rate(metric[5m])`) gets a new block appended
/// to the metric name.
#[derive(Debug, Clone)]
pub struct LabelFilterInjector {
    label: String,
}

impl LabelFilterInjector {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Rewritten expression, or `None` when `expr` should be left alone.
    pub fn rewrite_expr(&self, expr: &str, node: &Node) -> Option<String> {
        if expr.is_empty() || self.is_filtered(expr, node) {
            return None;
        }

        if expr.contains('{') {
            let matcher = format!("{{{}=\"{}\",", self.label, node);
            return Some(expr.replacen('{', &matcher, 1));
        }

        let metric = metric_name(expr);
        let filtered = format!("{}{{{}=\"{}\"}}", metric, self.label, node);
        Some(expr.replacen(metric, &filtered, 1))
    }

    // Matches on the bare label name too, so an expression filtering on a
    // different host with the same label is skipped.
    fn is_filtered(&self, expr: &str, node: &Node) -> bool {
        expr.contains(&self.label) || expr.contains(&format!("instance=~\".*{}.*\"", node))
    }
}

impl Default for LabelFilterInjector {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_LABEL)
    }
}

impl QueryFilter for LabelFilterInjector {
    fn inject(&self, mut query: Query, node: &Node) -> Query {
        let Some(expr) = query.expr.as_deref() else {
            return query;
        };

        match self.rewrite_expr(expr, node) {
            Some(rewritten) => {
                tracing::debug!("Filtered query for {}: {} -> {}", node, expr, rewritten);
                query.expr = Some(rewritten);
            }
            None => {
                tracing::debug!("Leaving query unchanged for {}: {}", node, expr);
            }
        }

        query
    }
}

/// Innermost metric token: text before any range selector, after the last `(`.
fn metric_name(expr: &str) -> &str {
    let before_range = expr.split('[').next().unwrap_or(expr);
    before_range
        .rsplit('(')
        .next()
        .unwrap_or(before_range)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opti() -> Node {
        Node::new("opti")
    }

    #[test]
    fn test_bare_metric_with_range() {
        let injector = LabelFilterInjector::default();
        let result = injector.inject(Query::with_expr("node_cpu_seconds_total[5m]"), &opti());

        assert_eq!(
            result.expr.as_deref(),
            Some("node_cpu_seconds_total{kubernetes_io_hostname=\"opti\"}[5m]")
        );
    }

    #[test]
    fn test_bare_metric() {
        let injector = LabelFilterInjector::default();
        let result = injector.inject(Query::with_expr("up"), &opti());

        assert_eq!(result.expr.as_deref(), Some("up{kubernetes_io_hostname=\"opti\"}"));
    }

    #[test]
    fn test_aggregation_wrapped_metric() {
        let injector = LabelFilterInjector::default();
        let result = injector.inject(
            Query::with_expr("sum(rate(node_network_receive_bytes_total[5m]))"),
            &opti(),
        );

        assert_eq!(
            result.expr.as_deref(),
            Some(
                "sum(rate(node_network_receive_bytes_total{kubernetes_io_hostname=\"opti\"}[5m]))"
            )
        );
    }

    #[test]
    fn test_existing_label_block() {
        let injector = LabelFilterInjector::default();
        let result = injector.inject(
            Query::with_expr("rate(node_cpu_seconds_total{mode=\"idle\"}[5m])"),
            &opti(),
        );

        assert_eq!(
            result.expr.as_deref(),
            Some("rate(node_cpu_seconds_total{kubernetes_io_hostname=\"opti\",mode=\"idle\"}[5m])")
        );
    }

    #[test]
    fn test_only_first_label_block_is_rewritten() {
        let injector = LabelFilterInjector::default();
        let result = injector.inject(Query::with_expr("a{job=\"x\"} / b{job=\"y\"}"), &opti());

        assert_eq!(
            result.expr.as_deref(),
            Some("a{kubernetes_io_hostname=\"opti\",job=\"x\"} / b{job=\"y\"}")
        );
    }

    #[test]
    fn test_already_filtered_is_unchanged() {
        let injector = LabelFilterInjector::default();
        let query = Query::with_expr("up{kubernetes_io_hostname=\"opti\"}");

        assert_eq!(injector.inject(query.clone(), &opti()), query);
    }

    #[test]
    fn test_instance_regex_is_unchanged() {
        let injector = LabelFilterInjector::default();
        let query = Query::with_expr("node_load1{instance=~\".*opti.*\"}");

        assert_eq!(injector.inject(query.clone(), &opti()), query);
    }

    #[test]
    fn test_other_host_label_is_unchanged() {
        // Any use of the label counts as filtered, whichever host it names.
        let injector = LabelFilterInjector::default();
        let query = Query::with_expr("up{kubernetes_io_hostname=\"thinkpad\"}");

        assert_eq!(injector.inject(query.clone(), &opti()), query);
    }

    #[test]
    fn test_missing_or_empty_expr() {
        let injector = LabelFilterInjector::default();

        let missing = Query::default();
        assert_eq!(injector.inject(missing.clone(), &opti()), missing);

        let empty = Query::with_expr("");
        assert_eq!(injector.inject(empty.clone(), &opti()), empty);
    }

    #[test]
    fn test_injection_is_idempotent() {
        let injector = LabelFilterInjector::default();
        let node = opti();

        for expr in [
            "node_memory_MemAvailable_bytes",
            "rate(node_disk_read_bytes_total[1m])",
            "node_filesystem_avail_bytes{mountpoint=\"/\"}",
        ] {
            let once = injector.inject(Query::with_expr(expr), &node);
            let twice = injector.inject(once.clone(), &node);
            assert_eq!(once.expr, twice.expr, "double injection for {}", expr);
        }
    }

    #[test]
    fn test_other_fields_pass_through() {
        let injector = LabelFilterInjector::default();
        let query: Query = serde_json::from_value(json!({
            "expr": "up",
            "refId": "A",
            "legendFormat": "{{instance}}"
        }))
        .unwrap();

        let result = injector.inject(query, &opti());
        assert_eq!(result.extra["refId"], "A");
        assert_eq!(result.extra["legendFormat"], "{{instance}}");
    }

    #[test]
    fn test_custom_label() {
        let injector = LabelFilterInjector::new("instance");
        let result = injector.inject(Query::with_expr("up[1m]"), &opti());

        assert_eq!(result.expr.as_deref(), Some("up{instance=\"opti\"}[1m]"));
    }

    #[test]
    fn test_metric_name() {
        assert_eq!(metric_name("up"), "up");
        assert_eq!(metric_name("node_load1[5m]"), "node_load1");
        assert_eq!(metric_name("max(rate( http_requests_total [1m]))"), "http_requests_total");
        assert_eq!(metric_name("[5m]"), "");
    }
}
