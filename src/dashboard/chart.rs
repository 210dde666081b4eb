//! Chart results
//!
//! A `ChartResult` is the renderer-independent output of one aggregation:
//! ordered `(label, value)` points plus titles and styling hints. It converts
//! to a Plotly figure (`{"data": [...], "layout": {...}}`) that the page
//! hands straight to `Plotly.react`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Discrete palette, one colour per category
const SERIES_COLORS: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Colour scale for value-coloured bars
const CONTINUOUS_SCALE: &str = "Plasma";

/// Colour scale for the state map
const MAP_SCALE: &str = "Viridis";

/// Kind of chart to draw
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
    Choropleth,
}

/// How bars are coloured
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    #[default]
    None,
    /// One colour (and legend entry) per label
    Discrete,
    /// Colour follows the value on a continuous scale
    Continuous,
}

/// X-axis / slice / location label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(untagged)]
pub enum Label {
    Number(i64),
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Number(n) => write!(f, "{}", n),
            Label::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Text(s)
    }
}

impl From<i32> for Label {
    fn from(n: i32) -> Self {
        Label::Number(n as i64)
    }
}

impl From<u32> for Label {
    fn from(n: u32) -> Self {
        Label::Number(n as i64)
    }
}

/// One data point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub label: Label,
    pub value: f64,
}

/// Where the choropleth finds its geometry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeoBinding {
    /// URL the browser fetches the boundary document from
    pub geojson_url: String,
    /// Dotted path of the property joined against the labels
    pub feature_id_key: String,
}

/// A fully computed chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartResult {
    /// DOM id of the chart placeholder
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    #[serde(default)]
    pub color: ColorMode,
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoBinding>,
}

impl ChartResult {
    /// Create an empty chart
    pub fn new(
        id: impl Into<String>,
        kind: ChartKind,
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            x_label: x_label.into(),
            y_label: y_label.into(),
            color: ColorMode::None,
            points: Vec::new(),
            geo: None,
        }
    }

    /// Builder method: set colour mode
    pub fn color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Builder method: attach geometry for a choropleth
    pub fn geo(mut self, geo: GeoBinding) -> Self {
        self.geo = Some(geo);
        self
    }

    /// Builder method: append points in order
    pub fn points<L, I>(mut self, points: I) -> Self
    where
        L: Into<Label>,
        I: IntoIterator<Item = (L, f64)>,
    {
        self.points.extend(points.into_iter().map(|(label, value)| Point {
            label: label.into(),
            value,
        }));
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> Vec<&Label> {
        self.points.iter().map(|p| &p.label).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Value for a label, if present
    pub fn value_of(&self, label: impl Into<Label>) -> Option<f64> {
        let label = label.into();
        self.points.iter().find(|p| p.label == label).map(|p| p.value)
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Plotly figure for this chart
    pub fn figure(&self) -> Value {
        json!({
            "data": self.traces(),
            "layout": self.layout(),
        })
    }

    fn traces(&self) -> Vec<Value> {
        let labels = self.labels();
        let values = self.values();

        match (self.kind, self.color) {
            (ChartKind::Bar, ColorMode::Discrete) => self
                .points
                .iter()
                .enumerate()
                .map(|(idx, p)| {
                    json!({
                        "type": "bar",
                        "name": p.label.to_string(),
                        "legendgroup": p.label.to_string(),
                        "x": [p.label],
                        "y": [p.value],
                        "marker": { "color": SERIES_COLORS[idx % SERIES_COLORS.len()] },
                        "showlegend": true,
                    })
                })
                .collect(),
            (ChartKind::Bar, ColorMode::Continuous) => vec![json!({
                "type": "bar",
                "x": labels,
                "y": values,
                "marker": {
                    "color": values,
                    "colorscale": CONTINUOUS_SCALE,
                    "showscale": true,
                    "colorbar": { "title": { "text": self.y_label } },
                },
            })],
            (ChartKind::Bar, ColorMode::None) => vec![json!({
                "type": "bar",
                "x": labels,
                "y": values,
            })],
            (ChartKind::Pie, _) => vec![json!({
                "type": "pie",
                "labels": labels,
                "values": values,
            })],
            (ChartKind::Line, _) => vec![json!({
                "type": "scatter",
                "mode": "lines",
                "x": labels,
                "y": values,
            })],
            (ChartKind::Choropleth, _) => {
                let mut trace = json!({
                    "type": "choropleth",
                    "locations": labels,
                    "z": values,
                    "colorscale": MAP_SCALE,
                    "colorbar": { "title": { "text": self.y_label } },
                });
                if let Some(geo) = &self.geo {
                    trace["geojson"] = json!(geo.geojson_url);
                    trace["featureidkey"] = json!(geo.feature_id_key);
                }
                vec![trace]
            }
        }
    }

    fn layout(&self) -> Value {
        let mut layout = json!({
            "title": { "text": self.title },
            "margin": { "t": 60, "l": 40, "r": 20, "b": 40 },
        });

        match self.kind {
            ChartKind::Bar | ChartKind::Line => {
                layout["xaxis"] = json!({ "title": { "text": self.x_label } });
                layout["yaxis"] = json!({ "title": { "text": self.y_label } });
                if self.color == ColorMode::Discrete {
                    layout["legend"] = json!({ "title": { "text": self.x_label } });
                    layout["barmode"] = json!("relative");
                }
            }
            ChartKind::Choropleth => {
                layout["geo"] = json!({ "fitbounds": "locations", "visible": false });
            }
            ChartKind::Pie => {}
        }

        layout
    }
}
