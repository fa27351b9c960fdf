use crate::models::{BasemapType, InstrumentType};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "station-map")]
#[command(about = "Interactive map of Indonesian monitoring stations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Settings file [default: station-map.toml if present]"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Directory holding data/, image/ and shapefile/"
    )]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive dashboard server
    Serve {
        #[arg(long, help = "Address to bind")]
        host: Option<String>,

        #[arg(short, long, help = "Port to listen on")]
        port: Option<u16>,

        #[arg(long, help = "Number of HTTP workers")]
        workers: Option<usize>,
    },

    /// Render the dashboard page for one selection to an HTML file
    Render {
        #[arg(short, long, help = "Instrument type (AAWS, ARG, ASRS, AWS, IKRO, SM)")]
        instrument: InstrumentType,

        #[arg(short, long, default_value = "ZOM", help = "Basemap (ZOM or Provinsi)")]
        basemap: BasemapType,

        #[arg(long, help = "Province to show [default: all]")]
        province: Option<String>,

        #[arg(
            short,
            long,
            help = "Output HTML file [default: {zom|shp}_{INSTRUMENT}.html under the root]"
        )]
        output: Option<PathBuf>,
    },

    /// Summarise the station dataset of one instrument type
    Stations {
        #[arg(short, long)]
        instrument: InstrumentType,
    },
}
