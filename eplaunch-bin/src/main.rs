use clap::Parser;
use eplaunch_cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("❌ Error: {e}");
            if let Some(hint) = Cli::error_hint(&e) {
                eprintln!("   {hint}");
            }
            std::process::exit(1);
        }
    }
}
