use std::fs;
use std::path::PathBuf;
use structopt::StructOpt;
use ygo_config::ToolConfig;
use ygo_replay::Replay;

use crate::Result;

#[derive(Debug, StructOpt)]
pub enum Command {
  DumpHeader { path: PathBuf },
  DumpReplay { path: PathBuf },
  DumpResponses { path: PathBuf },
  ExportDecks { path: PathBuf, out_dir: PathBuf },
}

impl Command {
  pub fn run(&self, _config: &ToolConfig) -> Result<()> {
    match *self {
      Command::DumpHeader { ref path } => {
        let bytes = fs::read(path)?;
        let header = ygo_replay::decode_header(&bytes)?;
        println!("{:#?}", header);
        println!("flags: {:?}", header.flags());
      }
      Command::DumpReplay { ref path } => {
        let replay = Replay::open(path)?;
        println!("header: {:?}", replay.header.flags());
        println!(
          "LP = {}, hand = {}, draw = {}, options = {:#x}",
          replay.start_lp, replay.start_hand, replay.draw_count, replay.options
        );
        println!("#\tNAME\tMAIN\tEXTRA");
        for (i, (name, deck)) in replay.decks().into_iter().enumerate() {
          println!("{}\t{}\t{}\t{}", i, name, deck.main.len(), deck.extra.len());
        }
        println!("responses: {}", replay.responses.len());
      }
      Command::DumpResponses { ref path } => {
        let replay = Replay::open(path)?;
        for (i, response) in replay.responses.iter().enumerate() {
          println!("#{} ({} bytes)", i, response.len());
          ygo_util::dump_hex(response);
        }
      }
      Command::ExportDecks {
        ref path,
        ref out_dir,
      } => {
        let replay = Replay::open(path)?;
        fs::create_dir_all(out_dir)?;
        let seats = ["host", "tag-host", "tag-client", "client"];
        let seats: Vec<&str> = if replay.is_tag() {
          seats.to_vec()
        } else {
          vec![seats[0], seats[3]]
        };
        for (seat, (name, deck)) in seats.into_iter().zip(replay.decks()) {
          let file = out_dir.join(format!("{}.ydk", seat));
          deck.save_ydk(&file)?;
          tracing::info!("{} ({}) -> {}", seat, name, file.display());
        }
      }
    }
    Ok(())
  }
}
