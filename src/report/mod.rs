//! Presentation of projection results: display formatting, text tables, CSV and chart series

mod csv_out;
pub mod format;
mod series;
mod table;

pub use csv_out::{write_outcomes_csv, write_projection_csv, write_sweep_csv};
pub use format::{
    format_currency, format_currency_short, format_dscr, format_input_currency, format_multiple,
    format_percent, PLACEHOLDER,
};
pub use series::ChartSeries;
pub use table::{ProjectionTable, ScenarioTable, SummaryTable, SweepTable};
