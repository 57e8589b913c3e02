use archimedes::{cli, ui};

#[tokio::main]
async fn main() {
    if let Err(e) = cli::main().await {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
