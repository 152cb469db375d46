/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

use std::collections::HashSet;

use crate::ParsedMessage;

/// Returns `true` if any To, Cc or Bcc address is exactly equal to a target.
pub fn contains_any_target(message: &ParsedMessage, targets: &[String]) -> bool {
    message
        .addresses()
        .any(|address| targets.iter().any(|target| target == address))
}

/// Returns `true` if `target` is the only distinct address across To, Cc and Bcc
/// that ends with `domain`.
///
/// The domain test is a plain suffix match, `"notexample.com"` ends with
/// `"example.com"`.
pub fn is_unique_internal_target(message: &ParsedMessage, domain: &str, target: &str) -> bool {
    let internal = message
        .addresses()
        .filter(|address| address.ends_with(domain))
        .collect::<HashSet<_>>();

    internal.len() == 1 && internal.contains(target)
}

/// Returns `true` if any target passes [`is_unique_internal_target`].
pub fn is_any_unique_internal_target(
    message: &ParsedMessage,
    domain: &str,
    targets: &[String],
) -> bool {
    targets
        .iter()
        .any(|target| is_unique_internal_target(message, domain, target))
}

/// Returns `true` if any target appears literally in the raw header text.
pub fn contains_any_target_as_substring(raw_headers: &str, targets: &[String]) -> bool {
    targets
        .iter()
        .any(|target| !target.is_empty() && raw_headers.contains(target.as_str()))
}
