/// CSV telemetry export for season reports.
pub mod export;
/// CSV irradiance input.
pub mod weather;
