use std::path::PathBuf;
use structopt::StructOpt;
use ygo_card::{separate_extra, CardCatalog};
use ygo_config::ToolConfig;
use ygo_deck::{Deck, Section};

use crate::{load_catalog, load_strings, Result};

#[derive(Debug, StructOpt)]
pub enum Command {
  /// Lists a deck file, resolving card names when a catalog is configured.
  Show { path: PathBuf },
  /// Moves extra deck monsters out of the main deck section.
  Split {
    path: PathBuf,
    #[structopt(long)]
    out: Option<PathBuf>,
  },
}

impl Command {
  pub async fn run(&self, config: &ToolConfig) -> Result<()> {
    match *self {
      Command::Show { ref path } => {
        let deck = Deck::load_ydk(path)?;
        let catalog = match load_catalog(config).await? {
          Some(catalog) => Some(catalog.load_cards(deck.all()).await?),
          None => None,
        };
        let strings = load_strings(config)?;
        for section in [Section::Main, Section::Extra, Section::Side] {
          let counts = deck.counts(section);
          println!("{:?} ({})", section, deck.section(section).len());
          for (id, count) in counts {
            let card = match catalog {
              Some(ref catalog) => catalog.lookup(id).await?,
              None => None,
            };
            match card {
              Some(card) => {
                let attribute = strings
                  .as_ref()
                  .and_then(|strings| strings.attribute_name(card.attribute()))
                  .unwrap_or("");
                println!("  {}x {}\t{}", count, card, attribute);
              }
              None => println!("  {}x [{}]", count, id),
            }
          }
        }
      }
      Command::Split { ref path, ref out } => {
        let catalog = load_catalog(config)
          .await?
          .ok_or("no card database configured")?;
        let mut deck = Deck::load_ydk(path)?;
        let cache = catalog.load_cards(deck.main.clone()).await?;
        let unknown = separate_extra(&cache, &mut deck).await?;
        for id in unknown {
          tracing::warn!("unknown card id dropped: {}", id);
        }
        deck.save_ydk(out.as_ref().unwrap_or(path))?;
      }
    }
    Ok(())
  }
}
