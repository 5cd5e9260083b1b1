mod etl;
mod data;
mod errors;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process;

use clap::{
    Arg, ArgAction, ArgMatches, Command, crate_version, value_parser,
};
use serde::Deserialize;
use structured_logger::json::new_writer;
use structured_logger::Builder;

use crate::data::map::DEFAULT_PIXEL_SIZE;
use crate::etl::draw_map::DrawMapEtl;
use crate::etl::Etl;
use crate::errors::{Error, ErrorKind, Result};

const DEFAULT_LOG_LEVEL: &str = "info";

pub struct UserConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub pixel_size: u32,
    pub log_level: String,
}

/// Optional settings read from the `--config` JSON file.
#[derive(Deserialize)]
struct ConfigFile {
    pixel_size: Option<u32>,
    log_level: Option<String>,
}

fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let file = File::open(path).map_err(|err| Error::new(
        ErrorKind::Config,
        format!("Failed to read config file {}: {}", path.display(), err),
    ))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

impl UserConfig {
    fn get() -> Result<Self> {
        Self::from_matches(Self::command().get_matches())
    }

    fn command() -> Command {
        Command::new("openttd-map")
            .version(crate_version!())
            .about("renders an OpenTTD map export as an isometric picture")
            .arg(Arg::new("input")
                .value_name("INPUT")
                .value_parser(value_parser!(PathBuf))
                .help("plain text export of a saved game")
                .required(true)
            )
            .arg(Arg::new("output")
                .value_name("OUTPUT")
                .value_parser(value_parser!(PathBuf))
                .help("file name of the PNG picture to write")
                .required(true)
            )
            .arg(Arg::new("size")
                .short('s')
                .long("size")
                .value_name("N")
                .value_parser(value_parser!(u32).range(1..))
                .help("'pixel' size, defaults to 3")
                .action(ArgAction::Set)
            )
            .arg(Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("JSON configuration file")
                .action(ArgAction::Set)
            )
            .arg(Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("log debug messages")
                .action(ArgAction::SetTrue)
            )
    }

    fn from_matches(mut matches: ArgMatches) -> Result<Self> {
        let input = matches.remove_one::<PathBuf>("input").ok_or("missing input file")?;
        let output = matches.remove_one::<PathBuf>("output").ok_or("missing output file")?;

        let mut config = UserConfig {
            input,
            output,
            pixel_size: DEFAULT_PIXEL_SIZE,
            log_level: DEFAULT_LOG_LEVEL.into(),
        };

        if let Some(path) = matches.remove_one::<PathBuf>("config") {
            config.apply_file(load_config_file(&path)?);
        }
        config.apply_matches(matches);
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(pixel_size) = file.pixel_size {
            self.pixel_size = pixel_size;
        }
        if let Some(log_level) = file.log_level {
            self.log_level = log_level;
        }
    }

    fn apply_matches(&mut self, mut matches: ArgMatches) {
        if let Some(pixel_size) = matches.remove_one("size") {
            self.pixel_size = pixel_size;
        }
        if matches.get_flag("verbose") {
            self.log_level = "debug".into();
        }
    }
}

fn setup_logging(level: &str) {
    Builder::with_level(level)
        .with_target_writer("*", new_writer(io::stdout()))
        .init();
}

fn main() {
    let user_config = match UserConfig::get() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    setup_logging(&user_config.log_level);

    let mut etl = DrawMapEtl::new(&user_config);
    if let Err(err) = etl.process() {
        eprintln!("Failed to render {}: {}", user_config.input.display(), err);
        process::exit(1);
    }
}
