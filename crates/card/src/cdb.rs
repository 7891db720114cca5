//! Card databases in the simulator's `cards.cdb` layout.
//!
//! A `.cdb` is an sqlite file with two tables sharing the card id:
//!
//! | table   | columns                                                                        |
//! |---------|--------------------------------------------------------------------------------|
//! | `datas` | id, ot, alias, setcode, type, atk, def, level, race, attribute, category        |
//! | `texts` | id, name, desc, str1 .. str16                                                   |

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::fs;
use std::path::{Path, PathBuf};

use crate::card::{matches_set_code, Card};
use crate::catalog::{CardCatalog, MemoryCatalog};
use crate::error::{Error, Result};

const READ_CARD_SQL: &str = r#"
SELECT datas.id AS id, ot, alias, setcode, type, atk, def, level, race, attribute, category,
  name, texts."desc" AS "desc"
FROM datas JOIN texts ON datas.id = texts.id
WHERE datas.id = ?
"#;

const READ_ALL_CARDS_SQL: &str = r#"
SELECT datas.id AS id, ot, alias, setcode, type, atk, def, level, race, attribute, category,
  name, texts."desc" AS "desc"
FROM datas JOIN texts ON datas.id = texts.id
"#;

const SEARCH_NAME_EXACT_SQL: &str = "SELECT id FROM texts WHERE name = ? ORDER BY id";
const SEARCH_NAME_SQL: &str = "SELECT id FROM texts WHERE name LIKE ? ORDER BY id";
const READ_SETCODES_SQL: &str = "SELECT id, setcode FROM datas WHERE setcode != 0";

#[derive(Debug, sqlx::FromRow)]
struct CardRow {
  id: i64,
  ot: i64,
  alias: i64,
  setcode: i64,
  #[sqlx(rename = "type")]
  kind: i64,
  atk: i64,
  def: i64,
  level: i64,
  race: i64,
  attribute: i64,
  category: i64,
  name: Option<String>,
  desc: Option<String>,
}

impl From<CardRow> for Card {
  fn from(row: CardRow) -> Self {
    Card {
      id: row.id as u32,
      ot: row.ot as u32,
      alias: row.alias as u32,
      setcode: row.setcode as u64,
      type_bits: row.kind as u32,
      category: row.category as u64,
      name: row.name.unwrap_or_default(),
      desc: row.desc.unwrap_or_default(),
      level_raw: row.level as u32,
      race_bits: row.race as u32,
      attribute_bits: row.attribute as u32,
      atk: row.atk as i32,
      def: row.def as i32,
    }
  }
}

/// Read-only catalog over one or more `.cdb` files.
///
/// When several files know the same id, the first one opened wins.
#[derive(Debug, Clone)]
pub struct CdbCatalog {
  pools: Vec<SqlitePool>,
}

impl CdbCatalog {
  /// Opens a single `.cdb`, or every `*.cdb` in a directory in file name order.
  pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let files = if path.is_dir() {
      let files = find_cdb_files(path)?;
      if files.is_empty() {
        return Err(Error::NoCardDatabase(path.to_owned()));
      }
      files
    } else {
      vec![path.to_owned()]
    };

    let mut pools = Vec::with_capacity(files.len());
    for file in files {
      let options = SqliteConnectOptions::new().filename(&file).read_only(true);
      let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
      tracing::debug!("opened card database {}", file.display());
      pools.push(pool);
    }

    Ok(CdbCatalog { pools })
  }

  pub async fn card(&self, id: u32) -> Result<Option<Card>> {
    for pool in &self.pools {
      let row: Option<CardRow> = sqlx::query_as(READ_CARD_SQL)
        .bind(id as i64)
        .fetch_optional(pool)
        .await?;
      if let Some(row) = row {
        return Ok(Some(row.into()));
      }
    }
    Ok(None)
  }

  /// Exact name match first, then the lowest id whose name contains `name`
  /// (sqlite `LIKE`, so ASCII case is ignored).
  pub async fn find_by_name(&self, name: &str) -> Result<Option<Card>> {
    for pool in &self.pools {
      let id: Option<i64> = sqlx::query_scalar(SEARCH_NAME_EXACT_SQL)
        .bind(name)
        .fetch_optional(pool)
        .await?;
      if let Some(id) = id {
        return self.card(id as u32).await;
      }
    }

    let pattern = format!("%{}%", name);
    for pool in &self.pools {
      let id: Option<i64> = sqlx::query_scalar(SEARCH_NAME_SQL)
        .bind(pattern.as_str())
        .fetch_optional(pool)
        .await?;
      if let Some(id) = id {
        return self.card(id as u32).await;
      }
    }

    Ok(None)
  }

  /// Ids of every card whose name contains `name`, ascending. An empty query matches nothing.
  pub async fn find_all_by_name(&self, name: &str) -> Result<Vec<u32>> {
    if name.is_empty() {
      return Ok(vec![]);
    }
    let pattern = format!("%{}%", name);
    let mut ids = vec![];
    for pool in &self.pools {
      let found: Vec<i64> = sqlx::query_scalar(SEARCH_NAME_SQL)
        .bind(pattern.as_str())
        .fetch_all(pool)
        .await?;
      ids.extend(found.into_iter().map(|id| id as u32));
    }
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
  }

  /// Ids of the cards that belong to archetype `code`, ascending.
  pub async fn set_members(&self, code: u16) -> Result<Vec<u32>> {
    let mut ids = vec![];
    for pool in &self.pools {
      let rows: Vec<(i64, i64)> = sqlx::query_as(READ_SETCODES_SQL).fetch_all(pool).await?;
      ids.extend(
        rows
          .into_iter()
          .filter(|(_, setcode)| matches_set_code(*setcode as u64, code))
          .map(|(id, _)| id as u32),
      );
    }
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
  }

  /// Reads the given ids into an in-memory catalog. Unknown ids are skipped.
  pub async fn load_cards<I>(&self, ids: I) -> Result<MemoryCatalog>
  where
    I: IntoIterator<Item = u32>,
  {
    let mut catalog = MemoryCatalog::default();
    for id in ids {
      if catalog.get(id).is_some() {
        continue;
      }
      if let Some(card) = self.card(id).await? {
        catalog.insert(card);
      }
    }
    Ok(catalog)
  }

  /// Reads every card of every opened file into an in-memory catalog.
  pub async fn load_all(&self) -> Result<MemoryCatalog> {
    let mut catalog = MemoryCatalog::default();
    for pool in &self.pools {
      let rows: Vec<CardRow> = sqlx::query_as(READ_ALL_CARDS_SQL).fetch_all(pool).await?;
      for row in rows {
        let card = Card::from(row);
        if catalog.get(card.id).is_none() {
          catalog.insert(card);
        }
      }
    }
    tracing::debug!("loaded {} cards", catalog.len());
    Ok(catalog)
  }
}

#[async_trait]
impl CardCatalog for CdbCatalog {
  async fn lookup(&self, id: u32) -> Result<Option<Card>> {
    self.card(id).await
  }
}

fn find_cdb_files(dir: &Path) -> Result<Vec<PathBuf>> {
  let mut files = vec![];
  for entry in fs::read_dir(dir)? {
    let path = entry?.path();
    if path.is_file() && path.extension().map_or(false, |ext| ext == "cdb") {
      files.push(path);
    }
  }
  files.sort();
  Ok(files)
}

#[test]
fn test_card_from_row() {
  use crate::constants::{Attribute, CardType, Race};

  let card = Card::from(CardRow {
    id: 89631139,
    ot: 3,
    alias: 0,
    setcode: 0xdd,
    kind: 0x11,
    atk: 3000,
    def: 2500,
    level: 8,
    race: 0x2000,
    attribute: 0x10,
    category: 0,
    name: Some("Blue-Eyes White Dragon".to_string()),
    desc: None,
  });
  assert_eq!(card.id, 89631139);
  assert!(card.is_type(CardType::NORMAL));
  assert!(card.is_race(Race::DRAGON));
  assert!(card.is_attribute(Attribute::LIGHT));
  assert!(card.is_set_code(0xdd));
  assert_eq!(card.level(), 8);
  assert_eq!(card.desc, "");
}

#[test]
fn test_card_from_row_wide_setcode() {
  let card = Card::from(CardRow {
    id: 1,
    ot: 0,
    alias: 0,
    setcode: 0x1048_0000_0107_i64,
    kind: 0,
    atk: -2,
    def: 0,
    level: 0x0101_0004,
    race: 0,
    attribute: 0,
    category: 0,
    name: None,
    desc: None,
  });
  assert!(card.is_set_code(0x1048));
  assert_eq!(card.atk, -2);
  assert_eq!(card.level(), 4);
}
