use gleif::cli::SearchCli;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    SearchCli::run().await
}
