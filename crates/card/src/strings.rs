//! `strings.conf` reader.
//!
//! ```text
//! !system 1010 EARTH
//! !setname 0x48 No.	ナンバーズ
//! ```
//!
//! Attribute names start at system string 1010, race names at 1020 and type
//! names at 1050, one entry per flag bit.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::constants::{Attribute, CardType, Race};
use crate::error::{Error, Result};

const ATTRIBUTE_BASE: u32 = 1010;
const RACE_BASE: u32 = 1020;
const TYPE_BASE: u32 = 1050;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetName {
  pub code: u16,
  pub name: String,
  /// Name in the original language, after a tab.
  pub origin_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StringsConf {
  pub system: BTreeMap<u32, String>,
  pub sets: Vec<SetName>,
}

impl StringsConf {
  /// Lines other than `!system` and `!setname` entries are ignored.
  pub fn parse(text: &str) -> Result<Self> {
    let mut conf = StringsConf::default();
    for (idx, line) in text.lines().enumerate() {
      let line = line.trim_end_matches('\r');
      let invalid = || Error::InvalidStringsLine {
        line: idx + 1,
        text: line.to_string(),
      };

      if let Some(rest) = line.strip_prefix("!system ") {
        let (number, value) = rest.split_once(' ').ok_or_else(invalid)?;
        let number = number.parse::<u32>().map_err(|_| invalid())?;
        conf.system.insert(number, value.to_string());
      } else if let Some(rest) = line.strip_prefix("!setname ") {
        let (code, value) = rest.split_once(' ').ok_or_else(invalid)?;
        let code = code
          .strip_prefix("0x")
          .and_then(|hex| u16::from_str_radix(hex, 16).ok())
          .ok_or_else(invalid)?;
        let (name, origin_name) = match value.split_once('\t') {
          Some((name, origin)) => (name.to_string(), Some(origin.to_string())),
          None => (value.to_string(), None),
        };
        conf.sets.push(SetName {
          code,
          name,
          origin_name,
        });
      }
    }
    Ok(conf)
  }

  pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let conf = Self::parse(&fs::read_to_string(path)?)?;
    tracing::debug!(
      "loaded {}: {} system strings, {} set names",
      path.display(),
      conf.system.len(),
      conf.sets.len()
    );
    Ok(conf)
  }

  pub fn attribute_name(&self, flag: Attribute) -> Option<&str> {
    self.flag_name(ATTRIBUTE_BASE, flag.bit_index())
  }

  pub fn race_name(&self, flag: Race) -> Option<&str> {
    self.flag_name(RACE_BASE, flag.bit_index())
  }

  pub fn type_name(&self, flag: CardType) -> Option<&str> {
    self.flag_name(TYPE_BASE, flag.bit_index())
  }

  pub fn set_name(&self, code: u16) -> Option<&SetName> {
    self.sets.iter().find(|set| set.code == code)
  }

  fn flag_name(&self, base: u32, bit_index: Option<u32>) -> Option<&str> {
    let index = bit_index?;
    self.system.get(&(base + index)).map(String::as_str)
  }
}

#[test]
fn test_parse() {
  let conf = StringsConf::parse(
    "#comment\r\n!system 1010 EARTH\r\n!system 1015 DARK\r\n!system 1020 Warrior\r\n!system 1054 Normal\r\n!setname 0x48 No.\tナンバーズ\r\n!setname 0x1048 CNo.\r\n!counter 0x1 Spell Counter\r\n",
  )
  .unwrap();
  assert_eq!(conf.attribute_name(Attribute::EARTH), Some("EARTH"));
  assert_eq!(conf.attribute_name(Attribute::DARK), Some("DARK"));
  assert_eq!(conf.attribute_name(Attribute::WATER), None);
  assert_eq!(conf.race_name(Race::WARRIOR), Some("Warrior"));
  assert_eq!(conf.type_name(CardType::NORMAL), Some("Normal"));
  assert_eq!(conf.sets.len(), 2);
  assert_eq!(
    conf.set_name(0x48),
    Some(&SetName {
      code: 0x48,
      name: "No.".to_string(),
      origin_name: Some("ナンバーズ".to_string()),
    })
  );
  assert_eq!(conf.set_name(0x1048).unwrap().origin_name, None);
}

#[test]
fn test_parse_invalid() {
  match StringsConf::parse("!system 1010 EARTH\n!setname 48 No.\n") {
    Err(Error::InvalidStringsLine { line, .. }) => assert_eq!(line, 2),
    other => panic!("unexpected result: {:?}", other),
  }
}
