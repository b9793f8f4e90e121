#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pledger::cli::run().await
}
