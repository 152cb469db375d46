/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

/// Returns `true` if `date` is strictly after `start` and strictly before `end`.
#[inline(always)]
pub fn in_range(date: i64, start: i64, end: i64) -> bool {
    date > start && date < end
}

#[cfg(test)]
mod tests {
    use crate::ZERO_TIMESTAMP;

    use super::in_range;

    #[test]
    fn exclusive_bounds() {
        let (start, end) = (1609459200, 1640995200);

        assert!(in_range(start + 1, start, end));
        assert!(in_range(end - 1, start, end));
        assert!(!in_range(start, start, end));
        assert!(!in_range(end, start, end));
        assert!(!in_range(start - 1, start, end));
        assert!(!in_range(end + 1, start, end));

        // Reversed bounds are not validated and never match.
        assert!(!in_range(start + 1, end, start));
    }

    #[test]
    fn zero_timestamp_fails_closed() {
        assert!(!in_range(ZERO_TIMESTAMP, 0, 1640995200));
        assert!(!in_range(ZERO_TIMESTAMP, ZERO_TIMESTAMP, 0));
        assert!(in_range(ZERO_TIMESTAMP, ZERO_TIMESTAMP - 1, 0));
    }
}
