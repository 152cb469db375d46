/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

pub mod address;
pub mod date;

use crate::{DateRange, Mode, ParsedMessage};

use self::address::{
    contains_any_target, contains_any_target_as_substring, is_any_unique_internal_target,
};

impl Mode {
    /// Evaluates this mode's address and date predicates against a message.
    pub fn matches(
        &self,
        message: &ParsedMessage,
        targets: &[String],
        domain: &str,
        range: &DateRange,
    ) -> bool {
        match self {
            Mode::ListMatch => contains_any_target(message, targets) && range.contains(message.date),
            Mode::SentOnly => {
                is_any_unique_internal_target(message, domain, targets)
                    && range.contains(message.date)
            }
            Mode::ListMatchMalformed => {
                !contains_any_target(message, targets)
                    && range.contains(message.date)
                    && contains_any_target_as_substring(&message.raw_recipients, targets)
            }
        }
    }
}
