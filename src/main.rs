use clap::Parser;
use station_map::cli::{run, Cli};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
