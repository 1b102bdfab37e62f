use gleif::cli::ReferenceCli;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    ReferenceCli::run().await
}
