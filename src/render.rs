//! Dashboard render callback
//!
//! Maps the current (outcome, indicator) selection to the two chart
//! specifications shown on the page. Pure: the shared table is only read and
//! every call derives its own filtered copy.

use crate::charts::{
    AxisLabels, ChoroplethSpec, Correlation, Figure, GeoScope, HoverField, LocationMode,
    ScatterSpec, Trendline,
};
use crate::dataset::{
    Cell, DatasetError, ObservationTable, Selection, UnknownColumn, LOCATION_COLUMN,
    STATE_COLUMN,
};
use serde::Serialize;
use thiserror::Error;

/// Errors raised while rendering a selection
#[derive(Error, Debug)]
pub enum RenderError {
    /// Selection value outside the dropdown options
    #[error(transparent)]
    UnknownColumn(#[from] UnknownColumn),

    /// Selection is valid but the loaded dataset lacks the column
    #[error("Column not found in dataset: {0}")]
    ColumnNotFound(String),

    #[error("Dataset error: {0}")]
    Dataset(DatasetError),
}

impl From<DatasetError> for RenderError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::ColumnNotFound(column) => RenderError::ColumnNotFound(column),
            other => RenderError::Dataset(other),
        }
    }
}

/// Output of one render: the map and the correlation plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charts {
    pub map: ChoroplethSpec,
    pub correlation: ScatterSpec,
}

impl Charts {
    pub fn map_figure(&self) -> Figure {
        Figure::from(&self.map)
    }

    pub fn correlation_figure(&self) -> Figure {
        Figure::from(&self.correlation)
    }

    /// Pearson summary of the plotted points, when all are numeric
    pub fn correlation_summary(&self) -> Option<Correlation> {
        let x = self
            .correlation
            .x
            .iter()
            .map(Cell::as_f64)
            .collect::<Option<Vec<_>>>()?;
        let y = self
            .correlation
            .y
            .iter()
            .map(Cell::as_f64)
            .collect::<Option<Vec<_>>>()?;
        Correlation::between(&x, &y)
    }
}

/// Render both charts for a selection
pub fn render(table: &ObservationTable, selection: Selection) -> Result<Charts, RenderError> {
    let filtered = filtered_table(table, selection)?;

    let charts = Charts {
        map: choropleth(&filtered, selection)?,
        correlation: scatter(&filtered, selection)?,
    };

    tracing::debug!(
        outcome = %selection.outcome,
        indicator = %selection.indicator,
        rows = filtered.len(),
        trendline = charts.correlation.trendline.is_some(),
        "Rendered dashboard charts"
    );

    Ok(charts)
}

/// Render from raw dropdown values, rejecting anything outside the options
pub fn render_by_name(
    table: &ObservationTable,
    outcome: &str,
    indicator: &str,
) -> Result<Charts, RenderError> {
    let selection = Selection::parse(outcome, indicator)?;
    render(table, selection)
}

/// Rows with both selected columns present, with the indicator rounded when
/// it calls for it
pub fn filtered_table(
    table: &ObservationTable,
    selection: Selection,
) -> Result<ObservationTable, RenderError> {
    let outcome = selection.outcome.column();
    let indicator = selection.indicator.column();

    let mut filtered = table.drop_missing(&[outcome, indicator])?;
    if let Some(decimals) = selection.indicator.rounding() {
        filtered = filtered.round_column(indicator, decimals)?;
    }
    Ok(filtered)
}

fn choropleth(
    filtered: &ObservationTable,
    selection: Selection,
) -> Result<ChoroplethSpec, RenderError> {
    let outcome = selection.outcome.column();
    let indicator = selection.indicator.column();

    Ok(ChoroplethSpec {
        title: format!("{} by State", outcome),
        location_mode: LocationMode::UsaStates,
        scope: GeoScope::Usa,
        locations: filtered.column_values(STATE_COLUMN)?,
        color_field: outcome.to_string(),
        color: present_values(filtered, outcome)?,
        hover_name_field: LOCATION_COLUMN.to_string(),
        hover_names: filtered.column_values(LOCATION_COLUMN)?,
        hover_fields: vec![HoverField {
            name: indicator.to_string(),
            values: present_values(filtered, indicator)?,
        }],
    })
}

fn scatter(filtered: &ObservationTable, selection: Selection) -> Result<ScatterSpec, RenderError> {
    let outcome = selection.outcome.column();
    let indicator = selection.indicator.column();

    let x = present_values(filtered, indicator)?;
    let y = present_values(filtered, outcome)?;
    let trendline = Trendline::ols(&x, &y);

    Ok(ScatterSpec {
        title: format!("Correlation between {} and {}", indicator, outcome),
        x_field: indicator.to_string(),
        y_field: outcome.to_string(),
        x,
        y,
        labels: AxisLabels {
            x: indicator.to_string(),
            y: outcome.to_string(),
        },
        trendline,
    })
}

/// Values of a column already filtered for nulls
fn present_values(table: &ObservationTable, column: &str) -> Result<Vec<Cell>, RenderError> {
    Ok(table.column_values(column)?.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::testing::sample_table;
    use crate::dataset::{parse_csv, Indicator, Outcome};

    fn text(s: &str) -> Option<Cell> {
        Some(Cell::Text(s.to_string()))
    }

    fn nums(values: &[f64]) -> Vec<Cell> {
        values.iter().map(|&v| Cell::Number(v)).collect()
    }

    #[test]
    fn test_every_pair_renders() {
        let table = sample_table();
        for selection in Selection::all() {
            let charts = render(&table, selection).unwrap();
            assert_eq!(charts.map.len(), charts.correlation.len());
        }
    }

    #[test]
    fn test_every_pair_renders_on_empty_table() {
        let table = parse_csv(SAMPLE_HEADER_ONLY.as_bytes()).unwrap();
        for selection in Selection::all() {
            let charts = render(&table, selection).unwrap();
            assert!(charts.map.is_empty());
            assert!(charts.correlation.is_empty());
            assert!(charts.correlation.trendline.is_none());
            assert!(charts.correlation_summary().is_none());
        }
    }

    const SAMPLE_HEADER_ONLY: &str = "State,Location,Treated Untreated Decay,Untreated Decay,Sealants,Avg Fluoride Concentration 2020,Fluoridated Total 2020,Fluoridated Adjusted 2020,Fluoridated Consecutive 2020,Fluoridated Natural 2020,Non Fluoridated 2020,Percent of Need Met,Practitioners Needed to Remove HPSA Designation\n";

    #[test]
    fn test_filtering_drops_rows_with_nulls() {
        let table = sample_table();
        for selection in Selection::all() {
            let filtered = filtered_table(&table, selection).unwrap();
            let outcome = filtered.column_index(selection.outcome.column()).unwrap();
            let indicator = filtered.column_index(selection.indicator.column()).unwrap();

            for row in filtered.rows() {
                assert!(row[outcome].is_some());
                assert!(row[indicator].is_some());
            }

            let expected = table
                .rows()
                .iter()
                .filter(|row| row[outcome].is_some() && row[indicator].is_some())
                .count();
            assert_eq!(filtered.len(), expected);
        }
    }

    #[test]
    fn test_rounding_only_for_fluoride_concentration() {
        let table = sample_table();
        for selection in Selection::all() {
            let filtered = filtered_table(&table, selection).unwrap();
            let column = selection.indicator.column();
            let source = table.drop_missing(&[selection.outcome.column(), column]).unwrap();

            let derived = filtered.column_values(column).unwrap();
            let original = source.column_values(column).unwrap();

            if selection.indicator == Indicator::AvgFluorideConcentration2020 {
                for value in derived.iter().flatten().filter_map(Cell::as_f64) {
                    assert_eq!(value, crate::dataset::round_to(value, 2));
                }
            } else {
                assert_eq!(derived, original);
            }
        }
    }

    #[test]
    fn test_fluoride_halves_round_to_even() {
        let table = parse_csv(
            b"State,Location,Sealants,Avg Fluoride Concentration 2020\n\
              ga,Georgia,40,0.125\n\
              hi,Hawaii,30,0.705\n\
              id,Idaho,35,0.675\n",
        )
        .unwrap();

        let charts = render(&table, Selection::default()).unwrap();
        assert_eq!(charts.correlation.x, nums(&[0.12, 0.7, 0.68]));
        assert_eq!(charts.map.hover_fields[0].values, nums(&[0.12, 0.7, 0.68]));
    }

    #[test]
    fn test_shared_table_not_mutated() {
        let table = sample_table();
        let before = table.clone();
        render(&table, Selection::default()).unwrap();
        assert_eq!(table, before);
        assert_eq!(
            table.column_values("Avg Fluoride Concentration 2020").unwrap()[0],
            Some(Cell::Number(0.6789))
        );
    }

    #[test]
    fn test_idempotent() {
        let table = sample_table();
        for selection in Selection::all() {
            let first = render(&table, selection).unwrap();
            let second = render(&table, selection).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.map_figure(), second.map_figure());
            assert_eq!(first.correlation_figure(), second.correlation_figure());
        }
    }

    #[test]
    fn test_sealants_by_fluoride_concentration() {
        let table = sample_table();
        let charts = render(
            &table,
            Selection::new(Outcome::Sealants, Indicator::AvgFluorideConcentration2020),
        )
        .unwrap();

        let map = &charts.map;
        assert_eq!(map.title, "Sealants by State");
        assert_eq!(map.location_mode, LocationMode::UsaStates);
        assert_eq!(map.scope, GeoScope::Usa);
        assert_eq!(
            map.locations,
            vec![text("AL"), text("AK"), text("AZ"), text("DE")]
        );
        assert_eq!(map.color_field, "Sealants");
        assert_eq!(map.color, nums(&[41.0, 35.5, 38.2, 37.3]));
        assert_eq!(map.hover_name_field, "Location");
        assert_eq!(
            map.hover_names,
            vec![text("Alabama"), text("Alaska"), text("Arizona"), text("Delaware")]
        );
        assert_eq!(map.hover_fields.len(), 1);
        assert_eq!(map.hover_fields[0].name, "Avg Fluoride Concentration 2020");
        assert_eq!(map.hover_fields[0].values, nums(&[0.68, 0.41, 0.73, 0.7]));

        let plot = &charts.correlation;
        assert_eq!(
            plot.title,
            "Correlation between Avg Fluoride Concentration 2020 and Sealants"
        );
        assert_eq!(plot.x, nums(&[0.68, 0.41, 0.73, 0.7]));
        assert_eq!(plot.y, nums(&[41.0, 35.5, 38.2, 37.3]));
        assert_eq!(plot.labels.x, "Avg Fluoride Concentration 2020");
        assert_eq!(plot.labels.y, "Sealants");

        let trend = plot.trendline.as_ref().unwrap();
        assert_eq!(trend.fit.sample_size, 4);
        assert_eq!(trend.x, vec![0.41, 0.68, 0.7, 0.73]);
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let table = sample_table();
        let err = render_by_name(&table, "Sealants", "Fluoride 1999").unwrap_err();
        assert!(matches!(err, RenderError::UnknownColumn(_)));
        assert_eq!(err.to_string(), "Unknown indicator column: Fluoride 1999");
    }

    #[test]
    fn test_column_missing_from_dataset() {
        let table = parse_csv(b"State,Location,Sealants\nal,Alabama,41\n").unwrap();
        let err = render(&table, Selection::default()).unwrap_err();
        assert!(
            matches!(err, RenderError::ColumnNotFound(ref c) if c == "Avg Fluoride Concentration 2020")
        );
    }

    #[test]
    fn test_text_indicator_has_no_trendline() {
        let table = parse_csv(
            b"State,Location,Sealants,Percent of Need Met\nal,Alabama,41,low\nak,Alaska,35,12\n",
        )
        .unwrap();
        let charts = render(
            &table,
            Selection::new(Outcome::Sealants, Indicator::PercentOfNeedMet),
        )
        .unwrap();
        assert_eq!(charts.correlation.len(), 2);
        assert!(charts.correlation.trendline.is_none());
    }
}
