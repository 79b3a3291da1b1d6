//! Property tests for the decoder and the store.

use chrono::NaiveDate;
use mse_set::text::classify;
use mse_set::{parse, Color, Store, Value};
use proptest::prelude::*;

proptest! {
    #[test]
    fn flat_record_is_one_text_entry(
        title in "[a-z][a-z ]{0,12}[a-z]",
        value in "[a-z][a-z0-9 ,.]{0,24}[a-z0-9]",
    ) {
        let store = parse(&format!("{title}: {value}")).unwrap();
        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(&store.entries()[0].key, &title);
        prop_assert_eq!(store.get_str(&title), Some(value.as_str()));
    }

    #[test]
    fn rgb_in_range_is_color(r: u8, g: u8, b: u8) {
        let value = classify(&format!("rgb({r},{g},{b})"), 1).unwrap();
        prop_assert_eq!(value, Value::Color(Color::new(r, g, b)));
    }

    #[test]
    fn rgb_out_of_range_is_error(r in 256u32..10_000, g: u8, b: u8) {
        let text = format!("rgb({r},{g},{b})");
        prop_assert!(classify(&text, 1).is_err());
    }

    #[test]
    fn valid_timestamp_is_recognized(
        year in 1000i32..=9999,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
    ) {
        let expected = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .unwrap();
        let text = expected.format("%Y-%m-%d %H:%M:%S").to_string();
        prop_assert_eq!(classify(&text, 1).unwrap(), Value::Timestamp(expected));
    }

    #[test]
    fn remove_all_keeps_order(keys in prop::collection::vec(0usize..3, 0..40)) {
        let names = ["card", "keyword", "game"];
        let mut store: Store = keys
            .iter()
            .enumerate()
            .map(|(i, &k)| (names[k], Value::from(i.to_string())))
            .collect();

        let removed: Vec<_> = store.remove_all("card");
        let expected: Vec<_> = keys
            .iter()
            .enumerate()
            .filter(|(_, &k)| k == 0)
            .map(|(i, _)| Value::from(i.to_string()))
            .collect();
        prop_assert_eq!(removed, expected);

        let rest: Vec<_> = store.iter().map(|e| e.value.clone()).collect();
        let expected_rest: Vec<_> = keys
            .iter()
            .enumerate()
            .filter(|(_, &k)| k != 0)
            .map(|(i, _)| Value::from(i.to_string()))
            .collect();
        prop_assert_eq!(rest, expected_rest);
        prop_assert_eq!(store.find_all("card").count(), 0);
    }

    #[test]
    fn nested_block_keeps_child_order(children in prop::collection::vec("[a-z]{1,8}", 1..12)) {
        let mut text = String::from("styling:\n");
        for (i, child) in children.iter().enumerate() {
            text.push_str(&format!("\t{child}: {i}\n"));
        }
        let store = parse(&text).unwrap();
        let styling = store.get_first::<Store>("styling").unwrap();
        let keys: Vec<_> = styling.keys().collect();
        let expected: Vec<_> = children.iter().map(String::as_str).collect();
        prop_assert_eq!(keys, expected);
    }
}
