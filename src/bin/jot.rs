use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    jot::cli::run().await
}
