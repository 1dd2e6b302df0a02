//! Chart construction
//!
//! - [`spec`]: typed choropleth and scatter specifications
//! - [`stats`]: OLS trendline fitting and Pearson correlation
//! - [`figure`]: Plotly JSON documents built from the specs

pub mod figure;
pub mod spec;
pub mod stats;

pub use figure::Figure;
pub use spec::{
    AxisLabels, ChoroplethSpec, GeoScope, HoverField, LocationMode, ScatterSpec, Trendline,
    TrendlineMethod,
};
pub use stats::{ols_fit, pearson_correlation, Correlation, OlsFit};
