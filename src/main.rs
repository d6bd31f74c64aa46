#[tokio::main]
async fn main() {
    campus_eats::start_server().await;
}
