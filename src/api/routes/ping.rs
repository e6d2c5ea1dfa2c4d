pub async fn handle() -> &'static str {
    "Pong!"
}
