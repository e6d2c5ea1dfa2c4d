use anyhow::Result;
use cve_fix_advisor::advisory::{Advisor, Settings};
use cve_fix_advisor::api::routes;
use cve_fix_advisor::infrastructure::{config::Config, http, logging, server::Server};
use cve_fix_advisor::types::server::Data;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = Config::load().await?;
    let client = http::client::get(&config.fetch)?;
    let advisor = Advisor::new(client, Settings::from(&config));
    let router = routes::build(Data::new(advisor));

    Server::start(&config.server.bind_address, router).await
}
