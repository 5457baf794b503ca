mod app;
mod lookup;
mod settings;
mod style;
mod terminal;
mod worldmap;

use clap::Parser;
use std::io;

#[derive(Parser)]
#[command(name = "ipviz")]
#[command(version)]
#[command(about = "Geolocate your public IP and mark it on an ASCII world map", long_about = None)]
struct Cli {}

fn main() -> io::Result<()> {
    let _cli = Cli::parse();

    let settings = settings::Settings::load();
    app::run(app::AppConfig {
        endpoint: settings.endpoint(),
        timeout: settings.timeout(),
    })
}
