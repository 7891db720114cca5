use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use ygo_card::error::Error;
use ygo_card::{separate_extra, Attribute, CardCatalog, CardType, CdbCatalog};
use ygo_deck::Deck;

const BLUE_EYES: u32 = 89631139;
const BLUE_EYES_ULTIMATE: u32 = 23995346;
const STARDUST: u32 = 44508094;
const MST: u32 = 5318639;

fn temp_path(name: &str) -> PathBuf {
  std::env::temp_dir().join(format!("ygo-card-{}-{}", std::process::id(), name))
}

/// Writes a `.cdb` with the simulator's table layout.
async fn write_cdb(path: &Path, cards: &[(u32, u64, CardType, &str)]) {
  let _ = std::fs::remove_file(path);
  let options = SqliteConnectOptions::new()
    .filename(path)
    .create_if_missing(true);
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .connect_with(options)
    .await
    .unwrap();

  sqlx::query(
    "CREATE TABLE datas(id integer primary key, ot integer, alias integer, setcode integer, \
     type integer, atk integer, def integer, level integer, race integer, attribute integer, \
     category integer)",
  )
  .execute(&pool)
  .await
  .unwrap();
  sqlx::query(
    r#"CREATE TABLE texts(id integer primary key, name text, "desc" text, str1 text, str2 text)"#,
  )
  .execute(&pool)
  .await
  .unwrap();

  for &(id, setcode, kind, name) in cards {
    sqlx::query("INSERT INTO datas VALUES (?, 3, 0, ?, ?, 2500, 2000, 4, 8192, 16, 0)")
      .bind(id as i64)
      .bind(setcode as i64)
      .bind(kind.bits() as i64)
      .execute(&pool)
      .await
      .unwrap();
    sqlx::query("INSERT INTO texts VALUES (?, ?, ?, '', '')")
      .bind(id as i64)
      .bind(name)
      .bind(format!("{} text", name))
      .execute(&pool)
      .await
      .unwrap();
  }

  pool.close().await;
}

async fn sample_cdb(name: &str) -> PathBuf {
  let path = temp_path(name);
  write_cdb(
    &path,
    &[
      (BLUE_EYES, 0xdd, CardType::MONSTER | CardType::NORMAL, "Blue-Eyes White Dragon"),
      (
        BLUE_EYES_ULTIMATE,
        0xdd,
        CardType::MONSTER | CardType::FUSION,
        "Blue-Eyes Ultimate Dragon",
      ),
      (STARDUST, 0xa3, CardType::MONSTER | CardType::SYNCHRO, "Stardust Dragon"),
      (MST, 0, CardType::SPELL | CardType::QUICKPLAY, "Mystical Space Typhoon"),
    ],
  )
  .await;
  path
}

#[tokio::test]
async fn test_lookup() {
  let path = sample_cdb("lookup.cdb").await;
  let catalog = CdbCatalog::open(&path).await.unwrap();

  let card = catalog.lookup(STARDUST).await.unwrap().unwrap();
  assert_eq!(card.name, "Stardust Dragon");
  assert_eq!(card.desc, "Stardust Dragon text");
  assert!(card.is_extra());
  assert!(card.is_attribute(Attribute::LIGHT));
  assert!(card.is_race_named("dragon"));
  assert_eq!(card.atk, 2500);
  assert_eq!(card.level(), 4);
  assert!(catalog.lookup(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_name_and_set_queries() {
  let path = sample_cdb("queries.cdb").await;
  let catalog = CdbCatalog::open(&path).await.unwrap();

  let card = catalog.find_by_name("Blue-Eyes White Dragon").await.unwrap();
  assert_eq!(card.map(|c| c.id), Some(BLUE_EYES));
  let card = catalog.find_by_name("Blue-Eyes").await.unwrap();
  assert_eq!(card.map(|c| c.id), Some(BLUE_EYES_ULTIMATE));
  assert!(catalog.find_by_name("Kuriboh").await.unwrap().is_none());

  assert_eq!(
    catalog.find_all_by_name("Dragon").await.unwrap(),
    vec![BLUE_EYES_ULTIMATE, STARDUST, BLUE_EYES]
  );
  assert!(catalog.find_all_by_name("").await.unwrap().is_empty());

  assert_eq!(
    catalog.set_members(0xdd).await.unwrap(),
    vec![BLUE_EYES_ULTIMATE, BLUE_EYES]
  );
  assert!(catalog.set_members(0x1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_memory_cache() {
  let path = sample_cdb("cache.cdb").await;
  let catalog = CdbCatalog::open(&path).await.unwrap();

  let all = catalog.load_all().await.unwrap();
  assert_eq!(all.len(), 4);
  assert_eq!(all.get(MST).map(|c| c.name.as_str()), Some("Mystical Space Typhoon"));

  let mut deck = Deck::new(vec![BLUE_EYES, STARDUST, 12345, BLUE_EYES], vec![]);
  let cache = catalog.load_cards(deck.main.clone()).await.unwrap();
  assert_eq!(cache.len(), 2);
  let unknown = separate_extra(&cache, &mut deck).await.unwrap();
  assert_eq!(unknown, vec![12345]);
  assert_eq!(deck.main, vec![BLUE_EYES, BLUE_EYES]);
  assert_eq!(deck.extra, vec![STARDUST]);

  let mut deck = Deck::new(vec![BLUE_EYES_ULTIMATE, MST], vec![]);
  assert!(separate_extra(&catalog, &mut deck).await.unwrap().is_empty());
  assert_eq!(deck.main, vec![MST]);
  assert_eq!(deck.extra, vec![BLUE_EYES_ULTIMATE]);
}

#[tokio::test]
async fn test_open_directory() {
  let dir = temp_path("cdb-dir");
  let _ = std::fs::remove_dir_all(&dir);
  std::fs::create_dir_all(&dir).unwrap();
  assert!(matches!(
    CdbCatalog::open(&dir).await,
    Err(Error::NoCardDatabase(_))
  ));

  write_cdb(
    &dir.join("a.cdb"),
    &[(BLUE_EYES, 0xdd, CardType::MONSTER | CardType::NORMAL, "Blue-Eyes White Dragon")],
  )
  .await;
  write_cdb(
    &dir.join("b.cdb"),
    &[
      (BLUE_EYES, 0, CardType::MONSTER, "Overridden"),
      (STARDUST, 0xa3, CardType::MONSTER | CardType::SYNCHRO, "Stardust Dragon"),
    ],
  )
  .await;
  std::fs::write(dir.join("notes.txt"), "not a database").unwrap();

  let catalog = CdbCatalog::open(&dir).await.unwrap();
  let card = catalog.lookup(BLUE_EYES).await.unwrap().unwrap();
  assert_eq!(card.name, "Blue-Eyes White Dragon");
  assert!(catalog.lookup(STARDUST).await.unwrap().is_some());
  assert_eq!(catalog.load_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_open_missing_file() {
  let path = temp_path("missing.cdb");
  let _ = std::fs::remove_file(&path);
  assert!(matches!(
    CdbCatalog::open(&path).await,
    Err(Error::Sqlx(_))
  ));
}
