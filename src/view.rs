//! Dashboard page shell
//!
//! Static description of the page: heading, the two dropdown selectors and
//! the two chart containers. The same [`Layout`] is served as JSON and
//! rendered to the HTML page that drives the render endpoint.

use crate::dataset::{Indicator, Outcome};
use serde::Serialize;

pub const HEADING: &str =
    "Dashboard: Dental Health Outcomes, Fluoridation, and Unmet Dental Needs in the US";

pub const OUTCOME_DROPDOWN_ID: &str = "dental-outcome-dropdown";
pub const INDICATOR_DROPDOWN_ID: &str = "indicator-dropdown";
pub const MAP_CHART_ID: &str = "choropleth-map";
pub const CORRELATION_CHART_ID: &str = "correlation-plot";
pub const SUMMARY_ID: &str = "correlation-summary";

/// Bootswatch Sandstone theme
pub const THEME_STYLESHEET: &str =
    "https://cdn.jsdelivr.net/npm/bootswatch@5.3.3/dist/sandstone/bootstrap.min.css";

pub const PLOTLY_SCRIPT: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dropdown {
    pub id: String,
    pub label: String,
    pub options: Vec<DropdownOption>,
    /// Initially selected option value
    pub value: String,
}

impl Dropdown {
    fn new<'a>(
        id: &str,
        label: &str,
        columns: impl IntoIterator<Item = &'a str>,
        value: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            options: columns
                .into_iter()
                .map(|column| DropdownOption {
                    label: column.to_string(),
                    value: column.to_string(),
                })
                .collect(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartContainer {
    pub id: String,
}

/// Page structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub heading: String,
    pub stylesheet: String,
    pub controls: Vec<Dropdown>,
    /// Rendered left to right in a flex row
    pub charts: Vec<ChartContainer>,
}

/// The dashboard layout with its fixed options and defaults
pub fn dashboard_layout() -> Layout {
    Layout {
        heading: HEADING.to_string(),
        stylesheet: THEME_STYLESHEET.to_string(),
        controls: vec![
            Dropdown::new(
                OUTCOME_DROPDOWN_ID,
                "Select a Dental Outcome:",
                Outcome::ALL.iter().map(|o| o.column()),
                Outcome::default().column(),
            ),
            Dropdown::new(
                INDICATOR_DROPDOWN_ID,
                "Select an Indicator:",
                Indicator::ALL.iter().map(|i| i.column()),
                Indicator::default().column(),
            ),
        ],
        charts: vec![
            ChartContainer {
                id: MAP_CHART_ID.to_string(),
            },
            ChartContainer {
                id: CORRELATION_CHART_ID.to_string(),
            },
        ],
    }
}

/// Render the layout as a complete HTML document
pub fn render_page(layout: &Layout) -> String {
    let controls: String = layout
        .controls
        .iter()
        .enumerate()
        .map(|(i, dropdown)| {
            let margin = if i + 1 < layout.controls.len() {
                " margin-right: 4%;"
            } else {
                ""
            };
            format!(
                "      <div style=\"width: 48%; display: inline-block;{margin}\">\n{}      </div>\n",
                render_dropdown(dropdown)
            )
        })
        .collect();

    let charts: String = layout
        .charts
        .iter()
        .map(|chart| {
            format!(
                "      <div id=\"{}\" style=\"flex: 1; min-height: 450px;\"></div>\n",
                escape_html(&chart.id)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="{stylesheet}">
  <script src="{plotly}"></script>
</head>
<body style="font-family: Arial, sans-serif;">
  <div>
    <h1 style="text-align: center; width: 70%; margin: 0 auto 20px; font-size: 23px;">{title}</h1>
    <div style="display: flex; flex-wrap: wrap;">
{controls}    </div>
    <div style="display: flex;">
{charts}    </div>
    <p id="{summary_id}" class="text-muted" style="text-align: right; margin-right: 2%;"></p>
    <div id="render-error" class="text-danger" style="text-align: center;"></div>
  </div>
  <script>
    const outcome = document.getElementById('{outcome_id}');
    const indicator = document.getElementById('{indicator_id}');

    async function update() {{
      const params = new URLSearchParams({{ outcome: outcome.value, indicator: indicator.value }});
      const res = await fetch('/api/v1/render?' + params.toString());
      const errorBox = document.getElementById('render-error');
      if (!res.ok) {{
        const body = await res.json().catch(() => null);
        errorBox.textContent = body && body.error ? body.error.message : 'Failed to render charts';
        return;
      }}
      errorBox.textContent = '';
      const charts = await res.json();
      Plotly.react('{map_id}', charts.map.data, charts.map.layout);
      Plotly.react('{correlation_id}', charts.correlation.data, charts.correlation.layout);
      const summary = charts.summary;
      document.getElementById('{summary_id}').textContent = summary
        ? `Pearson r = ${{summary.coefficient.toFixed(2)}} (${{summary.strength}} ${{summary.direction}}, n = ${{summary.sample_size}})`
        : '';
    }}

    outcome.addEventListener('change', update);
    indicator.addEventListener('change', update);
    update();
  </script>
</body>
</html>
"#,
        title = escape_html(&layout.heading),
        stylesheet = escape_html(&layout.stylesheet),
        plotly = PLOTLY_SCRIPT,
        controls = controls,
        charts = charts,
        outcome_id = OUTCOME_DROPDOWN_ID,
        indicator_id = INDICATOR_DROPDOWN_ID,
        map_id = MAP_CHART_ID,
        correlation_id = CORRELATION_CHART_ID,
        summary_id = SUMMARY_ID,
    )
}

fn render_dropdown(dropdown: &Dropdown) -> String {
    let id = escape_html(&dropdown.id);
    let options: String = dropdown
        .options
        .iter()
        .map(|option| {
            let selected = if option.value == dropdown.value {
                " selected"
            } else {
                ""
            };
            format!(
                "          <option value=\"{}\"{}>{}</option>\n",
                escape_html(&option.value),
                selected,
                escape_html(&option.label)
            )
        })
        .collect();

    format!(
        "        <label for=\"{id}\" style=\"display: block;\">{label}</label>\n        <select id=\"{id}\" class=\"form-select\" style=\"width: 70%;\">\n{options}        </select>\n",
        id = id,
        label = escape_html(&dropdown.label),
        options = options,
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
