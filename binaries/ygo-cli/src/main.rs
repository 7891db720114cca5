use structopt::StructOpt;
use ygo_card::{CdbCatalog, StringsConf};
use ygo_config::ToolConfig;

mod deck;
mod replay;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, StructOpt)]
enum Opt {
  Replay {
    #[structopt(subcommand)]
    cmd: replay::Command,
  },
  Deck {
    #[structopt(subcommand)]
    cmd: deck::Command,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  dotenv::dotenv().ok();
  let config = ToolConfig::load_or_default()?;
  ygo_log_subscriber::init_env_override(&config.log_filter);

  let opt = Opt::from_args();

  match opt {
    Opt::Replay { cmd } => {
      cmd.run(&config)?;
    }
    Opt::Deck { cmd } => {
      cmd.run(&config).await?;
    }
  }

  Ok(())
}

pub async fn load_catalog(config: &ToolConfig) -> Result<Option<CdbCatalog>> {
  match config.catalog_path {
    Some(ref path) => Ok(Some(CdbCatalog::open(path).await?)),
    None => Ok(None),
  }
}

pub fn load_strings(config: &ToolConfig) -> Result<Option<StringsConf>> {
  match config.strings_path {
    Some(ref path) => Ok(Some(StringsConf::load(path)?)),
    None => Ok(None),
  }
}
