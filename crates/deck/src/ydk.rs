//! Line-oriented deck file format.
//!
//! ```text
//! #created by ...
//! #main
//! 89631139
//! #extra
//! 44508094
//! !side
//! 14558127
//! ```

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::Deck;

pub const HEADER: &str = "#created by ygo-replay";
pub const MAIN_MARKER: &str = "#main";
pub const EXTRA_MARKER: &str = "#extra";
pub const SIDE_MARKER: &str = "!side";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
  Main,
  Extra,
  Side,
}

impl Section {
  fn from_marker(line: &str) -> Option<Self> {
    if line.eq_ignore_ascii_case(MAIN_MARKER) {
      Some(Section::Main)
    } else if line.eq_ignore_ascii_case(EXTRA_MARKER) {
      Some(Section::Extra)
    } else if line.eq_ignore_ascii_case(SIDE_MARKER) {
      Some(Section::Side)
    } else {
      None
    }
  }
}

impl Deck {
  pub fn from_ydk(text: &str) -> Result<Deck> {
    let mut deck = Deck::default();
    let mut section = Section::Main;

    for (idx, line) in text.lines().enumerate() {
      let line = line.trim();
      if line.is_empty() {
        continue;
      }

      if let Some(next) = Section::from_marker(line) {
        section = next;
        continue;
      }

      if line.starts_with('#') || line.starts_with('!') {
        continue;
      }

      let id = line.parse::<u32>().map_err(|_| Error::InvalidCardId {
        line: idx + 1,
        text: line.to_string(),
      })?;
      deck.section_mut(section).push(id);
    }

    Ok(deck)
  }

  pub fn to_ydk(&self) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    for (marker, ids) in [
      (MAIN_MARKER, &self.main),
      (EXTRA_MARKER, &self.extra),
      (SIDE_MARKER, &self.side),
    ] {
      out.push_str(marker);
      out.push('\n');
      for id in ids {
        out.push_str(&id.to_string());
        out.push('\n');
      }
    }
    out
  }

  pub fn load_ydk<P: AsRef<Path>>(path: P) -> Result<Deck> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let deck = Self::from_ydk(&text)?;
    tracing::debug!(
      "loaded deck {}: main = {}, extra = {}, side = {}",
      path.display(),
      deck.main.len(),
      deck.extra.len(),
      deck.side.len()
    );
    Ok(deck)
  }

  pub fn save_ydk<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    fs::write(path, self.to_ydk()).map_err(Into::into)
  }
}

#[test]
fn test_parse_sections() {
  let text = "#created by someone\r\n#main\r\n10\r\n20\r\n\r\n10\r\n#extra\r\n30\r\n!side\r\n40\r\n";
  let deck = Deck::from_ydk(text).unwrap();
  assert_eq!(deck.main, vec![10, 20, 10]);
  assert_eq!(deck.extra, vec![30]);
  assert_eq!(deck.side, vec![40]);
}

#[test]
fn test_parse_section_persists_across_lines() {
  let deck = Deck::from_ydk("!side\n1\n2\n3\n").unwrap();
  assert!(deck.main.is_empty());
  assert_eq!(deck.side, vec![1, 2, 3]);
}

#[test]
fn test_parse_ids_before_marker_go_to_main() {
  let deck = Deck::from_ydk("5\n#extra\n6\n").unwrap();
  assert_eq!(deck.main, vec![5]);
  assert_eq!(deck.extra, vec![6]);
}

#[test]
fn test_parse_marker_case() {
  let deck = Deck::from_ydk("#main\n1\n!Side\n2\n").unwrap();
  assert_eq!(deck.side, vec![2]);
}

#[test]
fn test_parse_invalid_id() {
  match Deck::from_ydk("#main\n1\nabc\n") {
    Err(Error::InvalidCardId { line, text }) => {
      assert_eq!(line, 3);
      assert_eq!(text, "abc");
    }
    other => panic!("unexpected result: {:?}", other),
  }
}

#[test]
fn test_write() {
  let mut deck = Deck::new(vec![1, 2], vec![3]);
  deck.side = vec![4];
  assert_eq!(
    deck.to_ydk(),
    "#created by ygo-replay\n#main\n1\n2\n#extra\n3\n!side\n4\n"
  );
  assert_eq!(Deck::from_ydk(&deck.to_ydk()).unwrap(), deck);
}
