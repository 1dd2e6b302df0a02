//! Plotly figure documents
//!
//! Converts chart specifications into the `{ data, layout }` JSON that
//! `Plotly.react` consumes in the browser.

use super::spec::{ChoroplethSpec, ScatterSpec};
use crate::dataset::Cell;
use serde::Serialize;
use serde_json::{json, Value};

/// A Plotly figure: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl From<&ChoroplethSpec> for Figure {
    fn from(spec: &ChoroplethSpec) -> Self {
        let customdata: Vec<Vec<&Cell>> = (0..spec.len())
            .map(|row| {
                spec.hover_fields
                    .iter()
                    .filter_map(|field| field.values.get(row))
                    .collect()
            })
            .collect();

        let mut hovertemplate = String::from("<b>%{hovertext}</b><br><br>State=%{location}<br>");
        for (i, field) in spec.hover_fields.iter().enumerate() {
            hovertemplate.push_str(&format!("{}=%{{customdata[{}]}}<br>", field.name, i));
        }
        hovertemplate.push_str(&format!("{}=%{{z}}<extra></extra>", spec.color_field));

        let trace = json!({
            "type": "choropleth",
            "geo": "geo",
            "name": "",
            "locations": spec.locations,
            "locationmode": spec.location_mode,
            "z": spec.color,
            "coloraxis": "coloraxis",
            "hovertext": spec.hover_names,
            "customdata": customdata,
            "hovertemplate": hovertemplate,
        });

        let layout = json!({
            "title": { "text": spec.title },
            "geo": {
                "domain": { "x": [0.0, 1.0], "y": [0.0, 1.0] },
                "center": {},
                "scope": spec.scope,
            },
            "coloraxis": {
                "colorbar": { "title": { "text": spec.color_field } },
            },
            "legend": { "tracegroupgap": 0 },
            "margin": { "t": 60 },
        });

        Figure {
            data: vec![trace],
            layout,
        }
    }
}

impl From<&ScatterSpec> for Figure {
    fn from(spec: &ScatterSpec) -> Self {
        let mut data = vec![json!({
            "type": "scatter",
            "mode": "markers",
            "name": "",
            "showlegend": false,
            "x": spec.x,
            "y": spec.y,
            "xaxis": "x",
            "yaxis": "y",
            "marker": { "symbol": "circle" },
            "hovertemplate": format!(
                "{}=%{{x}}<br>{}=%{{y}}<extra></extra>",
                spec.labels.x, spec.labels.y
            ),
        })];

        if let Some(trend) = &spec.trendline {
            let fit = &trend.fit;
            data.push(json!({
                "type": "scatter",
                "mode": "lines",
                "name": "",
                "showlegend": false,
                "x": trend.x,
                "y": trend.y,
                "xaxis": "x",
                "yaxis": "y",
                "hovertemplate": format!(
                    "<b>OLS trendline</b><br>{y} = {slope:.6} * {x} + {intercept:.6}<br>R<sup>2</sup>={r2:.6}<br><br>{x}=%{{x}}<br>{y}=%{{y}} <b>(trend)</b><extra></extra>",
                    x = spec.labels.x,
                    y = spec.labels.y,
                    slope = fit.slope,
                    intercept = fit.intercept,
                    r2 = fit.r_squared,
                ),
            }));
        }

        let layout = json!({
            "title": { "text": spec.title },
            "xaxis": {
                "anchor": "y",
                "domain": [0.0, 1.0],
                "title": { "text": spec.labels.x },
            },
            "yaxis": {
                "anchor": "x",
                "domain": [0.0, 1.0],
                "title": { "text": spec.labels.y },
            },
            "legend": { "tracegroupgap": 0 },
            "margin": { "t": 60 },
        });

        Figure { data, layout }
    }
}
