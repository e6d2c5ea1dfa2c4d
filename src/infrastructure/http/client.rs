use anyhow::Result;
use reqwest::Client;

use crate::infrastructure::config::FetchConfig;

pub fn get(config: &FetchConfig) -> Result<Client> {
    let client = Client::builder().user_agent(&config.user_agent).build()?;

    Ok(client)
}
