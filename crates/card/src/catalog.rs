use async_trait::async_trait;
use std::collections::BTreeMap;

use ygo_deck::Deck;

use crate::card::Card;
use crate::error::Result;

/// Card metadata lookup by id.
#[async_trait]
pub trait CardCatalog: Send + Sync {
  async fn lookup(&self, id: u32) -> Result<Option<Card>>;
}

/// Catalog held entirely in memory, keyed by card id.
///
/// Also serves as the cache in front of a [`CdbCatalog`](crate::CdbCatalog),
/// see [`CdbCatalog::load_all`](crate::CdbCatalog::load_all).
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
  cards: BTreeMap<u32, Card>,
}

impl MemoryCatalog {
  pub fn from_cards<I>(cards: I) -> Self
  where
    I: IntoIterator<Item = Card>,
  {
    MemoryCatalog {
      cards: cards.into_iter().map(|card| (card.id, card)).collect(),
    }
  }

  pub fn insert(&mut self, card: Card) -> Option<Card> {
    self.cards.insert(card.id, card)
  }

  pub fn get(&self, id: u32) -> Option<&Card> {
    self.cards.get(&id)
  }

  pub fn len(&self) -> usize {
    self.cards.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cards.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Card> {
    self.cards.values()
  }

  /// Exact name match first, then the first card whose name contains `name`.
  pub fn find_by_name(&self, name: &str) -> Option<&Card> {
    self
      .iter()
      .find(|card| card.name == name)
      .or_else(|| self.iter().find(|card| card.name.contains(name)))
  }

  /// Every card whose name contains `name`. An empty query matches nothing.
  pub fn find_all_by_name(&self, name: &str) -> Vec<&Card> {
    if name.is_empty() {
      return vec![];
    }
    self.iter().filter(|card| card.name.contains(name)).collect()
  }

  /// Ids of the cards that belong to archetype `code`, ascending.
  pub fn set_members(&self, code: u16) -> Vec<u32> {
    self
      .iter()
      .filter(|card| card.is_set_code(code))
      .map(|card| card.id)
      .collect()
  }
}

#[async_trait]
impl CardCatalog for MemoryCatalog {
  async fn lookup(&self, id: u32) -> Result<Option<Card>> {
    Ok(self.get(id).cloned())
  }
}

/// Moves extra deck monsters out of `deck.main` into `deck.extra`.
///
/// Ids the catalog does not know are removed from the main deck and returned.
pub async fn separate_extra<C>(catalog: &C, deck: &mut Deck) -> Result<Vec<u32>>
where
  C: CardCatalog + ?Sized,
{
  let mut main = Vec::with_capacity(deck.main.len());
  let mut unknown = vec![];
  for id in deck.main.iter().cloned() {
    match catalog.lookup(id).await? {
      Some(card) if card.is_extra() => deck.extra.push(id),
      Some(_) => main.push(id),
      None => unknown.push(id),
    }
  }
  deck.main = main;

  if !unknown.is_empty() {
    tracing::debug!("dropped {} unknown card ids: {:?}", unknown.len(), unknown);
  }

  Ok(unknown)
}

#[cfg(test)]
fn sample_catalog() -> MemoryCatalog {
  use crate::constants::CardType;

  let card = |id: u32, name: &str, type_bits: CardType, setcode: u64| Card {
    id,
    name: name.to_string(),
    type_bits: (CardType::MONSTER | type_bits).bits(),
    setcode,
    ..Default::default()
  };
  MemoryCatalog::from_cards(vec![
    card(89631139, "Blue-Eyes White Dragon", CardType::NORMAL, 0xdd),
    card(23995346, "Blue-Eyes Ultimate Dragon", CardType::FUSION, 0xdd),
    card(44508094, "Stardust Dragon", CardType::SYNCHRO, 0xa3),
    Card {
      id: 5318639,
      name: "Mystical Space Typhoon".to_string(),
      type_bits: (CardType::SPELL | CardType::QUICKPLAY).bits(),
      ..Default::default()
    },
  ])
}

#[cfg(test)]
#[tokio::test]
async fn test_lookup() {
  let catalog = sample_catalog();
  assert_eq!(catalog.len(), 4);
  let card = catalog.lookup(44508094).await.unwrap().unwrap();
  assert_eq!(card.name, "Stardust Dragon");
  assert!(catalog.lookup(1).await.unwrap().is_none());
}

#[test]
fn test_find_by_name() {
  let catalog = sample_catalog();
  assert_eq!(
    catalog.find_by_name("Stardust Dragon").map(|c| c.id),
    Some(44508094)
  );
  // substring fallback walks ids in ascending order
  assert_eq!(catalog.find_by_name("Blue-Eyes").map(|c| c.id), Some(23995346));
  assert!(catalog.find_by_name("Kuriboh").is_none());
  assert_eq!(catalog.find_all_by_name("Dragon").len(), 3);
  assert!(catalog.find_all_by_name("").is_empty());
}

#[test]
fn test_set_members() {
  let catalog = sample_catalog();
  assert_eq!(catalog.set_members(0xdd), vec![23995346, 89631139]);
  assert!(catalog.set_members(0x1).is_empty());
}

#[cfg(test)]
#[tokio::test]
async fn test_separate_extra() {
  let catalog = sample_catalog();
  let mut deck = Deck::new(
    vec![89631139, 23995346, 12345, 5318639, 44508094, 89631139],
    vec![],
  );
  let unknown = separate_extra(&catalog, &mut deck).await.unwrap();
  assert_eq!(unknown, vec![12345]);
  assert_eq!(deck.main, vec![89631139, 5318639, 89631139]);
  assert_eq!(deck.extra, vec![23995346, 44508094]);
}
