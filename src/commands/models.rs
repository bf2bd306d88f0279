use anyhow::Result;

use postcal::config::Config;
use postcal::llm::ModelRoster;

/// Print the configured roster as the API would report it
pub fn models(config: &Config) -> Result<()> {
    let roster = ModelRoster::new(config.llm.models.iter().cloned())?;
    println!("{}", serde_json::to_string_pretty(&roster.status())?);
    Ok(())
}
