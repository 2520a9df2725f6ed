//! CSV input of hourly solar irradiance.

use std::path::Path;

use serde::Deserialize;

use crate::HOURS_PER_DAY;
use crate::devices::{IrradianceProfile, Season};
use crate::error::InputError;

/// One season's worth of irradiance per row:
/// `hour,winter_kw_m2,summer_kw_m2`. Hours absent from the file stay at
/// zero irradiance.
#[derive(Debug, Deserialize)]
struct WeatherRow {
    hour: usize,
    winter_kw_m2: f32,
    summer_kw_m2: f32,
}

/// Per-season irradiance profiles read from one weather file.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalIrradiance {
    /// Winter profile.
    pub winter: IrradianceProfile,
    /// Summer profile.
    pub summer: IrradianceProfile,
}

impl SeasonalIrradiance {
    /// The profile for the given season.
    pub fn for_season(&self, season: Season) -> &IrradianceProfile {
        match season {
            Season::Winter => &self.winter,
            Season::Summer => &self.summer,
        }
    }
}

/// Reads per-season irradiance from a CSV file with the header
/// `hour,winter_kw_m2,summer_kw_m2`.
///
/// Rows may cover any subset of the day; unlisted hours are zero. Rows
/// with out-of-range hours, duplicate hours, or negative values are
/// rejected rather than zero-filled.
///
/// # Errors
///
/// Returns an [`InputError`] when the file cannot be read, a row does not
/// parse, or a row carries invalid values.
pub fn read_irradiance_csv(path: &Path) -> Result<SeasonalIrradiance, InputError> {
    let display_path = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| InputError::WeatherIo {
            path: display_path.clone(),
            source,
        })?;

    let mut winter = Vec::with_capacity(HOURS_PER_DAY);
    let mut summer = Vec::with_capacity(HOURS_PER_DAY);
    for (index, row) in reader.deserialize::<WeatherRow>().enumerate() {
        // Header is record 0.
        let record = index + 1;
        let row = row.map_err(|err| InputError::WeatherRecord {
            path: display_path.clone(),
            record,
            message: err.to_string(),
        })?;
        if row.hour >= HOURS_PER_DAY {
            return Err(InputError::WeatherRecord {
                path: display_path.clone(),
                record,
                message: format!("hour {} is out of range (expected 0..24)", row.hour),
            });
        }
        for (column, value) in [
            ("winter_kw_m2", row.winter_kw_m2),
            ("summer_kw_m2", row.summer_kw_m2),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InputError::WeatherRecord {
                    path: display_path.clone(),
                    record,
                    message: format!("{column} must be finite and >= 0, got {value}"),
                });
            }
        }
        winter.push((row.hour, row.winter_kw_m2));
        summer.push((row.hour, row.summer_kw_m2));
    }

    // Duplicate hours are caught here by the profile builder.
    let build = |pairs: Vec<(usize, f32)>| {
        IrradianceProfile::from_pairs(pairs).map_err(|err| InputError::WeatherRecord {
            path: display_path.clone(),
            record: 0,
            message: err.to_string(),
        })
    };
    Ok(SeasonalIrradiance {
        winter: build(winter)?,
        summer: build(summer)?,
    })
}
