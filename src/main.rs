use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is normal; real environment variables still apply.
    let _ = dotenvy::dotenv();
    raindrop_mcp::infra::logging::init();
    raindrop_mcp::cli::run().await
}
