use ygo_card::error::Error;
use ygo_card::StringsConf;

#[test]
fn test_load_strings_missing() {
  let path = std::env::temp_dir().join(format!("ygo-card-{}-strings.conf", std::process::id()));
  assert!(matches!(StringsConf::load(path), Err(Error::Io(_))));
}
