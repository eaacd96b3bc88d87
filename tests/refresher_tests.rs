use chrono::NaiveDate;
use touchline::baseline::{Baseline, BaselineStore};

fn baseline_on(date: NaiveDate) -> Baseline {
    Baseline {
        ema_prev200: 100.0,
        prior_close: 100.0,
        refreshed_on: date,
    }
}

#[test]
fn stale_selection_respects_rate_cap() {
    let store = BaselineStore::new();
    let yesterday = NaiveDate::from_ymd_opt(2023, 5, 9).unwrap();
    let today = NaiveDate::from_ymd_opt(2023, 5, 10).unwrap();

    for symbol in ["BTCUSDT", "ETHUSDT", "BNBUSDT", "SOLUSDT", "XRPUSDT"] {
        store.insert(symbol, baseline_on(yesterday));
    }

    let batch = store.stale_symbols(today, 3);
    assert_eq!(batch.len(), 3);
    // deterministic (sorted) order
    assert_eq!(batch, vec!["BNBUSDT", "BTCUSDT", "ETHUSDT"]);

    let all = store.stale_symbols(today, 100);
    assert_eq!(all.len(), 5);
}

#[test]
fn refreshed_symbols_drop_out_for_the_day() {
    let store = BaselineStore::new();
    let yesterday = NaiveDate::from_ymd_opt(2023, 5, 9).unwrap();
    let today = NaiveDate::from_ymd_opt(2023, 5, 10).unwrap();

    store.insert("BTCUSDT", baseline_on(yesterday));
    store.insert("ETHUSDT", baseline_on(yesterday));
    assert_eq!(store.stale_symbols(today, 40).len(), 2);

    // a refresh cycle re-derives BTCUSDT
    store.insert("BTCUSDT", baseline_on(today));
    assert_eq!(store.stale_symbols(today, 40), vec!["ETHUSDT"]);

    // once everything is refreshed, the next cycle finds nothing: a symbol
    // is never refreshed twice on the same UTC date
    store.insert("ETHUSDT", baseline_on(today));
    assert!(store.stale_symbols(today, 40).is_empty());

    // the day rolling over makes them stale again
    let tomorrow = NaiveDate::from_ymd_opt(2023, 5, 11).unwrap();
    assert_eq!(store.stale_symbols(tomorrow, 40).len(), 2);
}

#[test]
fn fresh_store_has_no_stale_symbols() {
    let store = BaselineStore::new();
    let today = NaiveDate::from_ymd_opt(2023, 5, 10).unwrap();
    assert!(store.stale_symbols(today, 40).is_empty());
    assert!(store.is_empty());
}
