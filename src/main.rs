use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = ergal::cli::Cli::parse();
    ergal::logging::init(cli.verbose);

    if let Err(err) = ergal::run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
