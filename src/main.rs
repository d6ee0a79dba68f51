#[tokio::main]
async fn main() {
    subtrack_be::start_bot().await;
}
