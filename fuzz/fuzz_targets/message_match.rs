/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

#![no_main]
use libfuzzer_sys::fuzz_target;

use mailbox_search::{
    parsers::address::parse_address_list, DateRange, Mode, ParsedMessage, ZERO_TIMESTAMP,
};

fuzz_target!(|data: &[u8]| {
    let targets = vec!["jane@example.com".to_string(), "@".to_string()];
    let range = DateRange::new(ZERO_TIMESTAMP - 1, i64::MAX);

    if let Ok(value) = std::str::from_utf8(data) {
        let _ = parse_address_list(value);
    }

    if let Some(message) = ParsedMessage::parse(data) {
        for mode in [Mode::ListMatch, Mode::SentOnly, Mode::ListMatchMalformed] {
            let _ = mode.matches(&message, &targets, "example.com", &range);
        }
    }
});
