#![cfg(unix)]

use std::fs;

use covreport::client::{ClientCommand, oracle};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

/// Node client stand-in: checks the balance flag before asking for the
/// passphrase, then reports the transaction hash.
const CLIENT: &str = r#"
case "$3" in
  0) echo "Error: balance is not enough" >&2; exit 1 ;;
esac
read -r pass
echo "{\"hash\":\"0x01\"}"
"#;

#[test]
fn transfer_without_funds_is_rejected() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("client.sh");
    fs::write(&script, CLIENT).unwrap();
    let script = script.display().to_string();

    let rejected = ClientCommand::new("sh", "transfer")
        .base_args(&[script.as_str()])
        .flag("balance", 0)
        .passphrase("secret")
        .run()
        .unwrap();
    assert!(rejected.expect_error(oracle::BALANCE_NOT_ENOUGH).is_ok());
    assert!(rejected.expect_error(oracle::INTRINSIC_GAS_TOO_LOW).is_err());

    let accepted = ClientCommand::new("sh", "transfer")
        .base_args(&[script.as_str()])
        .flag("balance", 100)
        .passphrase("secret")
        .run()
        .unwrap();
    assert!(accepted.success());
    assert_eq!(
        accepted.json::<serde_json::Value>().unwrap()["hash"],
        "0x01"
    );
}
