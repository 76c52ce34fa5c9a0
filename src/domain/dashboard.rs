// Dashboard domain model
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

pub const ROW_PANEL_TYPE: &str = "row";
pub const DEFAULT_DASHBOARD_TITLE: &str = "Dashboard";
pub const DEFAULT_PANEL_TITLE: &str = "Panel";

const ROW_HEIGHT: i64 = 1;
const ROW_WIDTH: i64 = 24;

/// Top-level dashboard document. Keys we don't touch are kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub panels: Vec<Panel>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_DASHBOARD_TITLE)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Panel {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "gridPos", default, skip_serializing_if = "Option::is_none")]
    pub grid_pos: Option<GridPos>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<Query>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Panel {
    /// Section header spanning the full grid width.
    pub fn row(title: String, y: i64) -> Self {
        let mut extra = Map::new();
        extra.insert("collapsed".to_string(), json!(false));
        extra.insert("id".to_string(), Value::Null);
        extra.insert("panels".to_string(), json!([]));

        Self {
            kind: Some(ROW_PANEL_TYPE.to_string()),
            title: Some(title),
            grid_pos: Some(GridPos::new(0, y, ROW_WIDTH, ROW_HEIGHT)),
            targets: None,
            extra,
        }
    }

    pub fn is_row(&self) -> bool {
        self.kind.as_deref() == Some(ROW_PANEL_TYPE)
    }

    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_PANEL_TITLE)
    }

    /// Grid position with missing fields filled in.
    pub fn grid_pos_or_default(&self) -> GridPos {
        self.grid_pos.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPos {
    #[serde(default = "default_height")]
    pub h: i64,
    #[serde(default = "default_width")]
    pub w: i64,
    #[serde(default)]
    pub x: i64,
    #[serde(default)]
    pub y: i64,
}

impl GridPos {
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { h, w, x, y }
    }

    /// First grid line below this rectangle.
    pub fn bottom(&self) -> i64 {
        self.y.saturating_add(self.h)
    }
}

impl Default for GridPos {
    fn default() -> Self {
        Self {
            h: default_height(),
            w: default_width(),
            x: 0,
            y: 0,
        }
    }
}

fn default_height() -> i64 {
    8
}

fn default_width() -> i64 {
    12
}

/// A panel target. Only `expr` is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expr: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
impl Query {
    pub fn with_expr(expr: impl Into<String>) -> Self {
        Self {
            expr: Some(expr.into()),
            extra: Map::new(),
        }
    }
}
