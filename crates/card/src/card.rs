use std::fmt;

use crate::constants::{Attribute, CardType, Race, EXTRA_DECK_TYPES};

/// Card metadata as stored in the card database.
///
/// The bit fields are kept raw; the typed views are [`Card::card_type`],
/// [`Card::attribute`] and [`Card::race`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
  pub id: u32,
  pub ot: u32,
  pub alias: u32,
  pub setcode: u64,
  pub type_bits: u32,
  pub category: u64,
  pub name: String,
  pub desc: String,
  /// Low 16 bits are the level or link rating, bits 16..24 and 24..32
  /// the right and left pendulum scales.
  pub level_raw: u32,
  pub race_bits: u32,
  pub attribute_bits: u32,
  pub atk: i32,
  pub def: i32,
}

impl Card {
  pub fn card_type(&self) -> CardType {
    CardType::from_bits_truncate(self.type_bits)
  }

  pub fn attribute(&self) -> Attribute {
    Attribute::from_bits_truncate(self.attribute_bits)
  }

  pub fn race(&self) -> Race {
    Race::from_bits_truncate(self.race_bits)
  }

  pub fn is_alias(&self) -> bool {
    self.alias > 0
  }

  pub fn is_ocg(&self) -> bool {
    self.ot & 1 != 0
  }

  pub fn is_tcg(&self) -> bool {
    self.ot & 2 != 0
  }

  pub fn is_type(&self, flags: CardType) -> bool {
    self.card_type().intersects(flags)
  }

  pub fn is_attribute(&self, flags: Attribute) -> bool {
    self.attribute().intersects(flags)
  }

  pub fn is_race(&self, flags: Race) -> bool {
    self.race().intersects(flags)
  }

  /// Unknown names never match.
  pub fn is_type_named(&self, name: &str) -> bool {
    CardType::from_name(name).map_or(false, |flag| self.is_type(flag))
  }

  pub fn is_attribute_named(&self, name: &str) -> bool {
    Attribute::from_name(name).map_or(false, |flag| self.is_attribute(flag))
  }

  pub fn is_race_named(&self, name: &str) -> bool {
    Race::from_name(name).map_or(false, |flag| self.is_race(flag))
  }

  pub fn is_extra(&self) -> bool {
    self.is_type(EXTRA_DECK_TYPES)
  }

  pub fn level(&self) -> u32 {
    self.level_raw & 0xFFFF
  }

  pub fn link_rating(&self) -> u32 {
    self.level()
  }

  /// `(left, right)`, only for pendulum monsters.
  pub fn pendulum_scales(&self) -> Option<(u8, u8)> {
    if !self.is_type(CardType::PENDULUM) {
      return None;
    }
    Some((
      ((self.level_raw >> 24) & 0xFF) as u8,
      ((self.level_raw >> 16) & 0xFF) as u8,
    ))
  }

  /// The 9 low bits of `def`, lowest first. Index 4 is the center and never set.
  pub fn link_markers(&self) -> [bool; 9] {
    let bits = self.def as u32;
    let mut markers = [false; 9];
    for (i, marker) in markers.iter_mut().enumerate() {
      *marker = (bits >> i) & 1 == 1;
    }
    markers
  }

  /// Whether any of the four 16-bit archetype slots in `setcode` belongs to `code`.
  /// A sub-archetype code also requires its extra high bits.
  pub fn is_set_code(&self, code: u16) -> bool {
    matches_set_code(self.setcode, code)
  }
}

pub(crate) fn matches_set_code(setcode: u64, code: u16) -> bool {
  if code == 0 {
    return false;
  }
  let code = code as u64;
  let mut setcode = setcode;
  while setcode != 0 {
    let slot = setcode & 0xFFFF;
    if slot & 0xFFF == code & 0xFFF && slot & code == code {
      return true;
    }
    setcode >>= 16;
  }
  false
}

impl fmt::Display for Card {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}] {}", self.id, self.name)
  }
}

#[cfg(test)]
fn xyz_card() -> Card {
  Card {
    id: 84013237,
    ot: 3,
    setcode: 0x0048,
    type_bits: (CardType::MONSTER | CardType::EFFECT | CardType::XYZ).bits(),
    name: "Number 39: Utopia".to_string(),
    level_raw: 4,
    race_bits: Race::WARRIOR.bits(),
    attribute_bits: Attribute::LIGHT.bits(),
    atk: 2500,
    def: 2000,
    ..Default::default()
  }
}

#[test]
fn test_flag_queries() {
  let card = xyz_card();
  assert!(card.is_ocg() && card.is_tcg());
  assert!(!card.is_alias());
  assert!(card.is_extra());
  assert!(card.is_type_named("xyz"));
  assert!(card.is_type_named("MONSTER"));
  assert!(!card.is_type_named("synchro"));
  assert!(!card.is_type_named("no such type"));
  assert!(card.is_attribute_named("light"));
  assert!(!card.is_attribute(Attribute::DARK));
  assert!(card.is_race_named("warrior"));
  assert_eq!(card.level(), 4);
  assert_eq!(card.pendulum_scales(), None);
  assert_eq!(card.to_string(), "[84013237] Number 39: Utopia");
}

#[test]
fn test_pendulum_scales() {
  let card = Card {
    type_bits: (CardType::MONSTER | CardType::PENDULUM | CardType::EFFECT).bits(),
    level_raw: 0x0801_0007,
    ..Default::default()
  };
  assert_eq!(card.level(), 7);
  assert_eq!(card.pendulum_scales(), Some((8, 1)));
  assert!(!card.is_extra());
}

#[test]
fn test_link_markers() {
  let card = Card {
    type_bits: (CardType::MONSTER | CardType::LINK).bits(),
    level_raw: 3,
    def: 0b1_0100_0001,
    ..Default::default()
  };
  assert_eq!(card.link_rating(), 3);
  assert_eq!(
    card.link_markers(),
    [true, false, false, false, false, false, true, false, true]
  );
}

#[test]
fn test_is_set_code() {
  let card = Card {
    setcode: 0x1048_0000_0107,
    ..Default::default()
  };
  assert!(card.is_set_code(0x107));
  assert!(card.is_set_code(0x48));
  assert!(card.is_set_code(0x1048));
  assert!(!card.is_set_code(0x2048));
  assert!(!card.is_set_code(0x7));
  assert!(!card.is_set_code(0));
}
