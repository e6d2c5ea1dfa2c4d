use reqwest::Client;
use url::Url;

/// Fetches a disclosure page and returns its body as text.
///
/// The status code is not checked: an error page still has readable content.
pub async fn get(client: &Client, url: &Url) -> Result<String, reqwest::Error> {
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%url, %status, "advisory page answered with a non-success status");
    }

    response.text().await
}
