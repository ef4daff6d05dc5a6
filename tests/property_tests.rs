//! Property-based tests using proptest.

use ini_store::{IniFile, Lookup};
use proptest::prelude::*;

/// Section and key names as they appear in real configuration files.
fn identifier() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9_]{0,15}").unwrap()
}

/// Values may carry surrounding whitespace or quotes but never line breaks.
fn value() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ \"]?[A-Za-z0-9 =;#:.,\"-]{0,20}[ \"]?").unwrap()
}

fn document() -> impl Strategy<Value = Vec<(String, String, String)>> {
    prop::collection::vec((identifier(), identifier(), value()), 0..30)
}

fn build(entries: &[(String, String, String)]) -> IniFile {
    let mut ini = IniFile::new();
    for (section, key, value) in entries {
        ini.set(section, key, value.as_str());
    }
    ini
}

proptest! {
    #[test]
    fn strings_round_trip(entries in document()) {
        let ini = build(&entries);

        let mut loaded = IniFile::new();
        loaded.load_str(&ini.to_string(), false);

        for (section, key, _) in &entries {
            prop_assert_eq!(loaded.get_str(section, key), ini.get_str(section, key));
        }
    }

    #[test]
    fn save_is_idempotent(entries in document()) {
        let mut ini = build(&entries);
        ini.sort_sections();
        let first = ini.to_string();

        let mut loaded = IniFile::new();
        loaded.load_str(&first, false);

        prop_assert_eq!(loaded.to_string(), first);
    }

    #[test]
    fn lookups_ignore_case(section in identifier(), key in identifier(), v in value()) {
        let mut ini = IniFile::new();
        ini.set(&section, &key, v.as_str());

        prop_assert_eq!(
            ini.get_str(&section.to_uppercase(), &key.to_lowercase()),
            Some(v.as_str())
        );
    }

    #[test]
    fn typed_values_round_trip(n in any::<i64>(), x in any::<f64>(), b in any::<bool>()) {
        let mut ini = IniFile::new();
        ini.set("Typed", "n", n);
        ini.set("Typed", "x", x);
        ini.set("Typed", "b", b);

        let mut loaded = IniFile::new();
        loaded.load_str(&ini.to_string(), false);

        prop_assert_eq!(loaded.get_or("Typed", "n", 0_i64), Lookup::Found(n));
        prop_assert_eq!(loaded.get_or("Typed", "b", !b), Lookup::Found(b));

        let parsed = loaded.get::<f64>("Typed", "x");
        prop_assert!(parsed.is_some());
        if !x.is_nan() {
            prop_assert_eq!(parsed.map(f64::to_bits), Some(x.to_bits()));
        }
    }
}
