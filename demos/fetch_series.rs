//! Fetches a month of Beverly Hills temperatures and prints the cached slice.
//!
//! Requires `VC_API_KEY` in the environment or a `.env` file.

use chrono::NaiveDate;
use zipweather::{ZipWeather, ZipWeatherError};

#[tokio::main]
async fn main() -> Result<(), ZipWeatherError> {
    let client = ZipWeather::from_env().await?;

    let series = client
        .get_series()
        .postal_code("90210")
        .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .end_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        .call()
        .await?;

    for record in &series {
        println!(
            "{}  min {:>6}  avg {:>6}  max {:>6}  rh {:>5}",
            record.date,
            fmt(record.temp_min),
            fmt(record.temp_avg),
            fmt(record.temp_max),
            fmt(record.humidity),
        );
    }
    Ok(())
}

fn fmt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".to_string())
}
