use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    personality_client::run(std::env::args().nth(1)).await
}
