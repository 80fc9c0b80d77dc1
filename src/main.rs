use std::env;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use spdlog::{info, warn};

use unpress::config::{read_config, Config};
use unpress::extract::Extractor;
use unpress::logger::configure_logger;
use unpress::site::SiteWriter;

const CFG_FILE_NAME: &str = "unpress.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base url of the WordPress site, without final slash (e.g. https://ambiguiti.es)
    base_url: String,

    /// Directory where the migrated site will be written
    target_dir: PathBuf,

    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,
}

fn get_config_path() -> Option<PathBuf> {
    let exe_path = env::current_exe().unwrap();
    let exe_dir = exe_path.parent().unwrap();
    let cur_dir = env::current_dir().unwrap();

    if exe_dir.join(CFG_FILE_NAME).exists() {
        return Some(exe_dir.join(CFG_FILE_NAME));
    }

    if cur_dir.join(CFG_FILE_NAME).exists() {
        return Some(cur_dir.join(CFG_FILE_NAME));
    }

    let cfg_dir = dirs::config_dir().expect("Could not find user config dir");
    if cfg_dir.join(CFG_FILE_NAME).exists() {
        return Some(cfg_dir.join(CFG_FILE_NAME));
    }

    None
}

fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        // No config anywhere is fine, the defaults cover a plain migration
        None => return Ok(Config::default()),
        Some(x) => x,
    };

    println!("Reading config from {}", config_path.to_str().unwrap());
    match read_config(&config_path) {
        Ok(config) => Ok(config),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run unpress --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Migrating posts from {}", args.base_url);

    let mut extractor = Extractor::new(&args.base_url, config.defaults.per_page, config.user_agent())?;
    let site = SiteWriter::new(&args.target_dir, config.index_base_name());

    let mut count = 0;
    for post in extractor.posts()? {
        let post = post?;
        info!("Post: {}", post);
        site.add_post(&post)?;
        count += 1;
    }

    info!("Migrated {} posts to {}", count, args.target_dir.display());
    Ok(())
}
