use anyhow::{Context, Result};

use postcal::config::Config;
use postcal::holidays::{HolidayResolver, NagerClient};

pub async fn holidays(config: &Config, year: i32, country: Option<String>) -> Result<()> {
    let client = NagerClient::new(config.holidays.clone()).context("Failed to create holiday client")?;
    let country = country
        .unwrap_or_else(|| config.holidays.default_country.clone())
        .to_uppercase();

    let holidays = client.holidays(year, &country).await;

    println!("Public holidays for {country} in {year}");
    println!("{:-<40}", "");
    if holidays.is_empty() {
        println!("  (none found)");
    }
    for holiday in &holidays {
        println!("  {}  {}", holiday.date, holiday.name);
    }

    Ok(())
}

pub async fn countries(config: &Config) -> Result<()> {
    let client = NagerClient::new(config.holidays.clone()).context("Failed to create holiday client")?;

    let countries = client.available_countries().await;
    if countries.is_empty() {
        println!("No countries available (holiday service unreachable?)");
    }
    for country in &countries {
        println!("  {}  {}", country.country_code, country.name);
    }

    Ok(())
}
