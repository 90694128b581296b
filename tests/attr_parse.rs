mod common;

use fix_attrs::config::parse_attr;
use fix_attrs::types::ErrorKind;
use fix_attrs::Attr;

use common::{numeric_resolver, scratch_resolver};

#[test]
fn valid_token_resolves_all_three_fields() {
    let td = tempfile::tempdir().unwrap();
    let mut r = scratch_resolver(
        td.path(),
        "alice:x:501:501::/:/bin/sh\n",
        "staff:x:20:alice\n",
    );
    let attr = parse_attr(&mut r, "attr", "alice:staff:755").unwrap();
    assert_eq!(attr, Attr { uid: 501, gid: 20, mode: 0o755 });
}

#[test]
fn numeric_and_forced_numeric_tokens_resolve() {
    let td = tempfile::tempdir().unwrap();
    let mut r = numeric_resolver(td.path());
    let attr = parse_attr(&mut r, "attr", "0:+0:644").unwrap();
    assert_eq!(attr, Attr { uid: 0, gid: 0, mode: 0o644 });
}

#[test]
fn two_part_token_is_a_structure_error_naming_the_key() {
    let td = tempfile::tempdir().unwrap();
    let mut r = numeric_resolver(td.path());
    let err = parse_attr(&mut r, "attr-dir", "alice:staff").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ConfigStructure);
    assert!(err.msg.contains("attr-dir"), "{}", err.msg);
}

#[test]
fn four_part_token_is_a_structure_error() {
    let td = tempfile::tempdir().unwrap();
    let mut r = numeric_resolver(td.path());
    let err = parse_attr(&mut r, "attr", "0:0:755:extra").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ConfigStructure);
}

#[test]
fn non_octal_mode_fails() {
    let td = tempfile::tempdir().unwrap();
    let mut r = scratch_resolver(
        td.path(),
        "alice:x:501:501::/:/bin/sh\n",
        "staff:x:20:\n",
    );
    // Digit 9 is invalid in base 8.
    let err = parse_attr(&mut r, "attr", "alice:staff:999").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ConfigStructure);
    assert!(err.msg.contains("999"), "{}", err.msg);
}

#[test]
fn owner_failure_short_circuits_before_mode_parsing() {
    let td = tempfile::tempdir().unwrap();
    let mut r = numeric_resolver(td.path());
    let err = parse_attr(&mut r, "attr", "ghost:0:not-octal").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownIdentity);
}
