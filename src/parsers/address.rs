/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: Apache-2.0 OR MIT
 */

//! Strict RFC 5322 `address-list` parsing.
//!
//! The lenient field parsers of `mail-parser` repair broken input, which hides
//! exactly the fields a malformed-list search is looking for. This parser
//! rejects the whole list as soon as any part of it does not follow the
//! grammar: unbalanced `<>`, `()` or `"`, empty list elements, text after an
//! angle-addr, a `;` outside of a group or an addr-spec without a valid
//! local-part and domain.

/// Parses an address list and returns its addr-specs in order, or `None` when
/// the list is empty or malformed.
pub fn parse_address_list(value: &str) -> Option<Vec<String>> {
    let value = unfold(value);
    let mut parser = AddressListParser { input: &value };
    let mut addresses = Vec::new();

    loop {
        parser.skip_space();
        parser.parse_address(true, &mut addresses)?;
        if !parser.skip_cfws() {
            return None;
        }
        if parser.input.is_empty() {
            break;
        }
        if !parser.consume(',') {
            return None;
        }
    }

    Some(addresses)
}

/// Joins folded lines with a single space.
fn unfold(value: &str) -> String {
    value
        .split('\n')
        .map(|line| line.trim_matches(|ch: char| ch == ' ' || ch == '\t' || ch == '\r'))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

struct AddressListParser<'x> {
    input: &'x str,
}

impl<'x> AddressListParser<'x> {
    fn peek(&self) -> Option<char> {
        self.input.chars().next()
    }

    fn consume(&mut self, ch: char) -> bool {
        let input = self.input;
        match input.strip_prefix(ch) {
            Some(rest) => {
                self.input = rest;
                true
            }
            None => false,
        }
    }

    fn skip_space(&mut self) {
        let input = self.input;
        self.input = input.trim_start_matches(is_wsp);
    }

    /// Skips folding white space and comments, returns `false` on an
    /// unclosed comment.
    fn skip_cfws(&mut self) -> bool {
        self.skip_space();
        while self.consume('(') {
            if !self.consume_comment() {
                return false;
            }
            self.skip_space();
        }
        true
    }

    /// Skips a comment whose opening parenthesis was already consumed.
    fn consume_comment(&mut self) -> bool {
        let input = self.input;
        let mut depth = 1;
        let mut chars = input.char_indices();

        while let Some((pos, ch)) = chars.next() {
            match ch {
                '\\' => {
                    chars.next();
                }
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        self.input = &input[pos + 1..];
                        return true;
                    }
                }
                _ => (),
            }
        }

        false
    }

    // address = mailbox / group
    // mailbox = name-addr / addr-spec
    fn parse_address(&mut self, handle_group: bool, addresses: &mut Vec<String>) -> Option<()> {
        self.skip_space();
        if self.input.is_empty() {
            return None;
        }

        if let Some(address) = self.try_addr_spec() {
            self.skip_space();
            if self.consume('(') && !self.consume_comment() {
                return None;
            }
            addresses.push(address);
            return Some(());
        }

        if self.peek() != Some('<') {
            self.consume_phrase()?;
        }
        self.skip_space();

        if handle_group && self.consume(':') {
            return self.parse_group(addresses);
        }

        // angle-addr = "<" addr-spec ">"
        if !self.consume('<') {
            return None;
        }
        let address = self.try_addr_spec()?;
        if !self.consume('>') {
            return None;
        }
        addresses.push(address);

        Some(())
    }

    // group = display-name ":" [group-list] ";" [CFWS]
    fn parse_group(&mut self, addresses: &mut Vec<String>) -> Option<()> {
        self.skip_space();
        if self.consume(';') {
            self.skip_cfws();
            return Some(());
        }

        loop {
            self.skip_space();
            self.parse_address(false, addresses)?;
            if !self.skip_cfws() {
                return None;
            }
            if self.consume(';') {
                self.skip_cfws();
                return Some(());
            }
            if !self.consume(',') {
                return None;
            }
        }
    }

    // phrase = 1*word
    fn consume_phrase(&mut self) -> Option<()> {
        let mut words = 0;

        loop {
            if words > 0 && !self.skip_cfws() {
                return None;
            }
            self.skip_space();

            let word = if self.peek() == Some('"') {
                self.consume_quoted_string().map(|_| ())
            } else {
                self.consume_atom(true, true).map(|_| ())
            };
            if word.is_none() {
                break;
            }
            words += 1;
        }

        (words > 0).then_some(())
    }

    /// Parses an addr-spec, leaving the input untouched when there is none.
    fn try_addr_spec(&mut self) -> Option<String> {
        let start = self.input;
        let address = self.consume_addr_spec();
        if address.is_none() {
            self.input = start;
        }
        address
    }

    // addr-spec = local-part "@" domain
    fn consume_addr_spec(&mut self) -> Option<String> {
        self.skip_space();
        let local_part = if self.peek() == Some('"') {
            self.consume_quoted_string()
                .filter(|local_part| !local_part.is_empty())?
        } else {
            self.consume_atom(true, false)?.to_string()
        };

        if !self.consume('@') {
            return None;
        }

        self.skip_space();
        let domain = if self.peek() == Some('[') {
            self.consume_domain_literal()?
        } else {
            self.consume_atom(true, false)?.to_string()
        };

        Some(format!("{local_part}@{domain}"))
    }

    /// Consumes an atom, or a dot-atom when `dot` is set. Unless `permissive`,
    /// leading, trailing and consecutive dots are rejected.
    fn consume_atom(&mut self, dot: bool, permissive: bool) -> Option<&'x str> {
        let input = self.input;
        let end = input
            .find(|ch: char| !is_atext(ch, dot))
            .unwrap_or(input.len());
        if end == 0 {
            return None;
        }

        let (atom, rest) = input.split_at(end);
        if !permissive && (atom.starts_with('.') || atom.ends_with('.') || atom.contains("..")) {
            return None;
        }
        self.input = rest;

        Some(atom)
    }

    /// Returns the unescaped contents of a quoted string.
    fn consume_quoted_string(&mut self) -> Option<String> {
        let input = self.input;
        let mut chars = input.strip_prefix('"')?.char_indices();
        let mut text = String::new();

        while let Some((pos, ch)) = chars.next() {
            match ch {
                '"' => {
                    self.input = &input[pos + 2..];
                    return Some(text);
                }
                '\\' => match chars.next() {
                    Some((_, ch)) if is_vchar(ch) || is_wsp(ch) => text.push(ch),
                    _ => return None,
                },
                ch if is_qtext(ch) || is_wsp(ch) => text.push(ch),
                _ => return None,
            }
        }

        None
    }

    // domain-literal = "[" *dtext "]"
    fn consume_domain_literal(&mut self) -> Option<String> {
        let input = self.input;
        let rest = input.strip_prefix('[')?;
        let end = rest.find(']')?;
        let dtext = &rest[..end];

        if !dtext.chars().all(|ch| is_vchar(ch) && !matches!(ch, '[' | ']' | '\\')) {
            return None;
        }
        self.input = &rest[end + 1..];

        Some(format!("[{dtext}]"))
    }
}

fn is_atext(ch: char, dot: bool) -> bool {
    match ch {
        '.' => dot,
        '(' | ')' | '<' | '>' | '[' | ']' | ':' | ';' | '@' | '\\' | ',' | '"' => false,
        _ => is_vchar(ch),
    }
}

fn is_vchar(ch: char) -> bool {
    ('!'..='~').contains(&ch) || !ch.is_ascii()
}

fn is_qtext(ch: char) -> bool {
    ch != '\\' && ch != '"' && is_vchar(ch)
}

fn is_wsp(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

#[cfg(test)]
mod tests {
    use super::parse_address_list;

    #[test]
    fn parse_valid_lists() {
        let inputs: [(&str, &[&str]); 10] = [
            ("jane@example.com", &["jane@example.com"]),
            (
                "  jane@example.com ,john@example.com  ",
                &["jane@example.com", "john@example.com"],
            ),
            ("Jane Doe <jane@example.com>", &["jane@example.com"]),
            (
                "\"Doe, Jane\" <jane@example.com>, <john@example.com>",
                &["jane@example.com", "john@example.com"],
            ),
            ("jane@example.com (Jane Doe)", &["jane@example.com"]),
            (
                "Friends: jane@example.com, John <john@example.com>;, kramer@kramerica.com",
                &[
                    "jane@example.com",
                    "john@example.com",
                    "kramer@kramerica.com",
                ],
            ),
            ("undisclosed-recipients:;", &[]),
            ("\"jane doe\"@example.com", &["jane doe@example.com"]),
            ("jane@[192.168.0.1]", &["jane@[192.168.0.1]"]),
            (
                "=?utf-8?q?Jane_Doe?= <jane@example.com>,\r\n John\r\n <john@example.com>\r\n",
                &["jane@example.com", "john@example.com"],
            ),
        ];

        for (input, expected) in inputs {
            assert_eq!(
                parse_address_list(input).as_deref(),
                Some(expected.iter().map(|a| a.to_string()).collect::<Vec<_>>().as_slice()),
                "failed for {input:?}"
            );
        }
    }

    #[test]
    fn reject_malformed_lists() {
        for input in [
            "",
            "   ",
            "Jane Doe",
            "jane@example.com, Jane Doe",
            "Broken <jane@example.com",
            "Jane <jane@example.com> trailing",
            "jane@example.com;",
            "jane@example.com,",
            "jane@example.com,,",
            ",jane@example.com",
            "jane@example.com (comment",
            "jane@example.com (comment) trailing",
            "Jane (comment <jane@example.com>",
            "\"Jane <jane@example.com>",
            "jane@@example.com",
            "jane@",
            "@example.com",
            "jane..doe@example.com",
            ".jane@example.com",
            "jane@example.com.",
            "jane doe@example.com",
            "Friends: jane@example.com",
            "Friends: Family: jane@example.com;;",
            "jane@[example.com",
            "<>",
        ] {
            assert_eq!(parse_address_list(input), None, "accepted {input:?}");
        }
    }
}
