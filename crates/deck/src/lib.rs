//! Deck shape shared by replay decks and deck files.

use std::collections::BTreeMap;

pub mod error;
pub mod ydk;

pub use ydk::Section;

/// Card ids grouped by deck section, in the order they were recorded.
///
/// Duplicates are kept; position within a section can be significant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
  pub main: Vec<u32>,
  pub extra: Vec<u32>,
  pub side: Vec<u32>,
}

impl Deck {
  pub fn new(main: Vec<u32>, extra: Vec<u32>) -> Self {
    Deck {
      main,
      extra,
      side: vec![],
    }
  }

  pub fn section(&self, section: Section) -> &[u32] {
    match section {
      Section::Main => &self.main,
      Section::Extra => &self.extra,
      Section::Side => &self.side,
    }
  }

  pub fn section_mut(&mut self, section: Section) -> &mut Vec<u32> {
    match section {
      Section::Main => &mut self.main,
      Section::Extra => &mut self.extra,
      Section::Side => &mut self.side,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.main.is_empty() && self.extra.is_empty() && self.side.is_empty()
  }

  pub fn len(&self) -> usize {
    self.main.len() + self.extra.len() + self.side.len()
  }

  /// main ++ extra ++ side
  pub fn all(&self) -> Vec<u32> {
    self
      .main
      .iter()
      .chain(self.extra.iter())
      .chain(self.side.iter())
      .cloned()
      .collect()
  }

  /// Copies of each card id in `section`.
  pub fn counts(&self, section: Section) -> BTreeMap<u32, usize> {
    count_ids(self.section(section))
  }

  /// Copies of each card id across every section.
  pub fn total_counts(&self) -> BTreeMap<u32, usize> {
    count_ids(
      self
        .main
        .iter()
        .chain(self.extra.iter())
        .chain(self.side.iter()),
    )
  }
}

fn count_ids<'a, I>(ids: I) -> BTreeMap<u32, usize>
where
  I: IntoIterator<Item = &'a u32>,
{
  let mut map = BTreeMap::new();
  for id in ids {
    *map.entry(*id).or_insert(0) += 1;
  }
  map
}

#[test]
fn test_counts() {
  let mut deck = Deck::new(vec![3, 1, 3, 3], vec![9]);
  deck.side.push(1);

  let main = deck.counts(Section::Main);
  assert_eq!(main.get(&3), Some(&3));
  assert_eq!(main.get(&1), Some(&1));
  assert_eq!(main.get(&9), None);

  let total = deck.total_counts();
  assert_eq!(total.get(&1), Some(&2));
  assert_eq!(total.get(&9), Some(&1));

  assert_eq!(deck.all(), vec![3, 1, 3, 3, 9, 1]);
  assert_eq!(deck.len(), 6);
}

#[test]
fn test_empty() {
  let deck = Deck::new(vec![], vec![]);
  assert!(deck.is_empty());
  assert!(deck.counts(Section::Extra).is_empty());
}
