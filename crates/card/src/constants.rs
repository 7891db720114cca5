use bitflags::bitflags;

macro_rules! named_flags {
  (
    pub struct $name:ident: $ty:ty {
      $(const $flag:ident = $value:expr;)*
    }
  ) => {
    bitflags! {
      #[derive(Default)]
      pub struct $name: $ty {
        $(const $flag = $value;)*
      }
    }

    impl $name {
      pub const NAMES: &'static [(&'static str, $name)] = &[
        $((stringify!($flag), $name::$flag),)*
      ];

      /// Looks a flag up by its constant name, ignoring case.
      pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
          .iter()
          .find(|(flag_name, _)| flag_name.eq_ignore_ascii_case(name))
          .map(|(_, flag)| *flag)
      }

      pub fn bit_index(self) -> Option<u32> {
        if self.is_empty() {
          None
        } else {
          Some(self.bits().trailing_zeros())
        }
      }
    }
  };
}

named_flags! {
  pub struct CardType: u32 {
    const MONSTER = 0x1;
    const SPELL = 0x2;
    const TRAP = 0x4;
    const NORMAL = 0x10;
    const EFFECT = 0x20;
    const FUSION = 0x40;
    const RITUAL = 0x80;
    const TRAPMONSTER = 0x100;
    const SPIRIT = 0x200;
    const UNION = 0x400;
    const DUAL = 0x800;
    const TUNER = 0x1000;
    const SYNCHRO = 0x2000;
    const TOKEN = 0x4000;
    const QUICKPLAY = 0x10000;
    const CONTINUOUS = 0x20000;
    const EQUIP = 0x40000;
    const FIELD = 0x80000;
    const COUNTER = 0x100000;
    const FLIP = 0x200000;
    const TOON = 0x400000;
    const XYZ = 0x800000;
    const PENDULUM = 0x1000000;
    const SPSUMMON = 0x2000000;
    const LINK = 0x4000000;
  }
}

named_flags! {
  pub struct Attribute: u32 {
    const EARTH = 0x01;
    const WATER = 0x02;
    const FIRE = 0x04;
    const WIND = 0x08;
    const LIGHT = 0x10;
    const DARK = 0x20;
    const DIVINE = 0x40;
  }
}

named_flags! {
  pub struct Race: u32 {
    const WARRIOR = 0x1;
    const SPELLCASTER = 0x2;
    const FAIRY = 0x4;
    const FIEND = 0x8;
    const ZOMBIE = 0x10;
    const MACHINE = 0x20;
    const AQUA = 0x40;
    const PYRO = 0x80;
    const ROCK = 0x100;
    const WINDBEAST = 0x200;
    const PLANT = 0x400;
    const INSECT = 0x800;
    const THUNDER = 0x1000;
    const DRAGON = 0x2000;
    const BEAST = 0x4000;
    const BEASTWARRIOR = 0x8000;
    const DINOSAUR = 0x10000;
    const FISH = 0x20000;
    const SEASERPENT = 0x40000;
    const REPTILE = 0x80000;
    const PSYCHO = 0x100000;
    const DIVINE = 0x200000;
    const CREATORGOD = 0x400000;
    const WYRM = 0x800000;
    const CYBERSE = 0x1000000;
  }
}

/// Types whose monsters live in the extra deck.
pub const EXTRA_DECK_TYPES: CardType = CardType::from_bits_truncate(
  CardType::FUSION.bits() | CardType::SYNCHRO.bits() | CardType::XYZ.bits() | CardType::LINK.bits(),
);

#[test]
fn test_from_name() {
  assert_eq!(CardType::from_name("synchro"), Some(CardType::SYNCHRO));
  assert_eq!(CardType::from_name("Link"), Some(CardType::LINK));
  assert_eq!(Attribute::from_name("dark"), Some(Attribute::DARK));
  assert_eq!(Race::from_name("beastwarrior"), Some(Race::BEASTWARRIOR));
  assert_eq!(Race::from_name("beast warrior"), None);
}

#[test]
fn test_bit_index() {
  assert_eq!(CardType::MONSTER.bit_index(), Some(0));
  assert_eq!(CardType::NORMAL.bit_index(), Some(4));
  assert_eq!(Attribute::DIVINE.bit_index(), Some(6));
  assert_eq!(Race::CYBERSE.bit_index(), Some(24));
  assert_eq!(Race::empty().bit_index(), None);
}

#[test]
fn test_extra_deck_types() {
  assert!(EXTRA_DECK_TYPES.contains(CardType::XYZ));
  assert!(!EXTRA_DECK_TYPES.intersects(CardType::RITUAL | CardType::PENDULUM));
}
