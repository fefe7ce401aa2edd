use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    deckedit_cli::run_cli().await
}
