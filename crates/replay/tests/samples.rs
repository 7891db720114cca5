use ygo_replay::error::Error;
use ygo_replay::{Deck, Replay};

#[test]
fn test_open_duel() {
  let replay = Replay::open(ygo_util::sample_path!("replay", "duel.yrp")).unwrap();
  assert_eq!(replay.header.id, 0x31707279);
  assert_eq!(replay.header.version, 0x12d0);
  assert_eq!(replay.header.seed, 1234);
  assert_eq!(replay.header.hash, 99);
  assert!(!replay.header.is_compressed());
  assert!(!replay.header.is_tag());
  assert!(!replay.header.is_decided());

  assert_eq!(replay.host_name, "Alice");
  assert_eq!(replay.client_name, "Bob");
  assert_eq!(replay.start_lp, 8000);
  assert_eq!(replay.start_hand, 5);
  assert_eq!(replay.draw_count, 1);
  assert_eq!(replay.options, 0x28);
  assert_eq!(
    replay.host_deck,
    Deck::new(vec![89631139, 89631139, 46986414], vec![44508094])
  );
  assert_eq!(replay.client_deck, Deck::new(vec![14558127, 14558127], vec![]));
  assert!(replay.tag.is_none());

  let responses: Vec<&[u8]> = replay.responses.iter().map(|r| r.as_bytes()).collect();
  assert_eq!(
    responses,
    vec![&[1_u8, 0, 0, 0][..], &[2, 0, 0, 0, 5, 0, 0, 0][..], &[][..]]
  );
}

#[test]
fn test_open_compressed_tag() {
  let bytes = ygo_util::sample_bytes!("replay", "tag.yrp");
  let replay = ygo_replay::decode(&bytes).unwrap();
  assert!(replay.header.is_compressed());
  assert!(replay.header.is_tag());
  assert!(replay.header.is_decided());
  assert_eq!(replay.header.declared_size(), 481);

  let tag = replay.tag.as_ref().unwrap();
  assert_eq!(replay.host_name, "Alice");
  assert_eq!(tag.host_name, "Carol");
  assert_eq!(tag.client_name, "Dave");
  assert_eq!(replay.client_name, "Bob");

  assert_eq!(replay.host_deck, Deck::new(vec![1, 2, 3], vec![100]));
  assert_eq!(tag.host_deck, Deck::new(vec![4, 5], vec![]));
  assert_eq!(tag.client_deck, Deck::default());
  assert_eq!(replay.client_deck, Deck::new(vec![6], vec![200, 201]));

  // the list ends at the 0xFF length byte
  assert_eq!(replay.responses.len(), 2);
  assert_eq!(replay.responses[0].as_bytes(), &[0x10; 64][..]);
  assert_eq!(replay.responses[1].as_bytes(), &[0x20, 0x21]);
}

#[test]
fn test_compressed_payload_damaged() {
  let mut bytes = ygo_util::sample_bytes!("replay", "tag.yrp");
  let len = bytes.len();
  bytes.truncate(len - 40);
  assert!(matches!(
    ygo_replay::decode(&bytes),
    Err(Error::DecompressionFailure(_))
  ));
}

#[test]
fn test_reencode_sample() {
  let bytes = ygo_util::sample_bytes!("replay", "duel.yrp");
  let replay = ygo_replay::decode(&bytes).unwrap();
  assert_eq!(ygo_replay::replay::encode(&replay).unwrap(), bytes);
}

#[test]
fn test_open_missing_file() {
  let path = ygo_util::sample_path!("replay", "missing.yrp");
  assert!(matches!(Replay::open(path), Err(Error::IoUnavailable(_))));
}
