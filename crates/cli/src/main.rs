#[tokio::main]
async fn main() {
    if let Err(err) = ihub_cli::run().await {
        eprintln!("{}", ihub_cli::describe_error(&err));
        std::process::exit(1);
    }
}
