mod cli;

#[tokio::main]
async fn main() {
    let code = cli::run().await;
    if code != 0 {
        std::process::exit(code);
    }
}
