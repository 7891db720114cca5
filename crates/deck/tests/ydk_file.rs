use ygo_deck::error::Error;
use ygo_deck::Deck;

#[test]
fn test_save_and_load() {
  let path = std::env::temp_dir().join(format!("ygo-deck-{}.ydk", std::process::id()));
  let deck = Deck {
    main: vec![89631139, 89631139, 46986414],
    extra: vec![44508094],
    side: vec![14558127],
  };
  deck.save_ydk(&path).unwrap();
  let loaded = Deck::load_ydk(&path).unwrap();
  std::fs::remove_file(&path).unwrap();
  assert_eq!(loaded, deck);
}

#[test]
fn test_load_missing_file() {
  let path = std::env::temp_dir().join("ygo-deck-does-not-exist.ydk");
  assert!(matches!(Deck::load_ydk(&path), Err(Error::Io(_))));
}
