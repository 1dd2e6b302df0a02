//! Typed chart specifications
//!
//! One struct per chart kind, naming every field the dashboard uses. The
//! render callback produces these; [`super::figure`] turns them into Plotly
//! documents for the browser.

use super::stats::{ols_fit, OlsFit};
use crate::dataset::Cell;
use serde::Serialize;

/// How choropleth locations are matched to map regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LocationMode {
    /// Two-letter upper-case U.S. state abbreviations
    #[serde(rename = "USA-states")]
    UsaStates,
}

/// Visible extent of the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GeoScope {
    #[serde(rename = "usa")]
    Usa,
}

/// An extra column shown in the map tooltip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverField {
    pub name: String,
    pub values: Vec<Cell>,
}

/// Map of U.S. states shaded by one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethSpec {
    pub title: String,
    pub location_mode: LocationMode,
    pub scope: GeoScope,
    /// Geographic keys, one per row
    pub locations: Vec<Option<Cell>>,
    pub color_field: String,
    pub color: Vec<Cell>,
    /// Column used as the tooltip heading
    pub hover_name_field: String,
    pub hover_names: Vec<Option<Cell>>,
    pub hover_fields: Vec<HoverField>,
}

impl ChoroplethSpec {
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendlineMethod {
    Ols,
}

/// Fitted line drawn over a scatter plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trendline {
    pub method: TrendlineMethod,
    pub fit: OlsFit,
    /// Sorted x positions of the line
    pub x: Vec<f64>,
    /// Fitted y at each x
    pub y: Vec<f64>,
}

impl Trendline {
    /// Fit an OLS trendline. `None` unless every value is numeric and a
    /// line is defined (at least two points, x not constant).
    pub fn ols(x: &[Cell], y: &[Cell]) -> Option<Self> {
        let xs = x.iter().map(Cell::as_f64).collect::<Option<Vec<f64>>>()?;
        let ys = y.iter().map(Cell::as_f64).collect::<Option<Vec<f64>>>()?;
        let fit = ols_fit(&xs, &ys)?;

        let mut line_x = xs;
        line_x.sort_by(f64::total_cmp);
        let line_y = line_x.iter().map(|&v| fit.predict(v)).collect();

        Some(Self {
            method: TrendlineMethod::Ols,
            fit,
            x: line_x,
            y: line_y,
        })
    }
}

/// Scatter plot of two columns with an optional trendline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x_field: String,
    pub y_field: String,
    pub x: Vec<Cell>,
    pub y: Vec<Cell>,
    pub labels: AxisLabels,
    pub trendline: Option<Trendline>,
}

impl ScatterSpec {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}
