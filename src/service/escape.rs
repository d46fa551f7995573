//! `\uXXXX` 跳脫序列修復
//!
//! 單次、非遞迴的替換：由左至右找出不重疊的 `\u` 加四位十六進位數字，
//! 換成該碼位的字元。代理對不會合併；單獨的代理碼位無法以 `char` 表示，
//! 寫出時成為 U+FFFD。因為只掃描一次，替換結果若恰好組成新的跳脫序列，
//! 再執行一次會得到不同的結果。

use std::sync::LazyLock;

use regex::{Captures, Regex};

static ESCAPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\u[0-9A-Fa-f]{4}").expect("escape pattern is valid"));

/// 修復文字中的跳脫序列
pub fn repair(text: &str) -> String {
    repair_counted(text).0
}

/// 修復文字並回傳找到的跳脫序列數量
pub fn repair_counted(text: &str) -> (String, usize) {
    let mut count = 0;
    let repaired = ESCAPE_PATTERN.replace_all(text, |caps: &Captures| {
        count += 1;
        escape_to_char(&caps[0]).to_string()
    });
    (repaired.into_owned(), count)
}

pub fn count_escapes(text: &str) -> usize {
    ESCAPE_PATTERN.find_iter(text).count()
}

fn escape_to_char(escape: &str) -> char {
    u32::from_str_radix(&escape[2..], 16)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn has_escape(text: &str) -> bool {
        let chars: Vec<char> = text.chars().collect();
        chars.windows(6).any(|w| {
            w[0] == '\\' && w[1] == 'u' && w[2..].iter().all(|c| c.is_ascii_hexdigit())
        })
    }

    #[test]
    fn test_text_without_escapes_unchanged() {
        for text in ["", "id,name\n1,Zoë\n", "C:\\users\\data", "\\x41", "u0041"] {
            assert_eq!(repair(text), text);
            assert_eq!(count_escapes(text), 0);
        }
    }

    #[test]
    fn test_basic_replacement() {
        assert_eq!(repair("\\u0041\\u0042"), "AB");
        assert_eq!(repair("Hello\\u0020World"), "Hello World");
    }

    #[test]
    fn test_short_escape_left_alone() {
        assert_eq!(repair("\\u12"), "\\u12");
        assert_eq!(repair("\\u12,x"), "\\u12,x");
        assert_eq!(repair("\\u00g1"), "\\u00g1");
    }

    #[test]
    fn test_hex_digits_case_insensitive() {
        assert_eq!(repair("\\u00e9"), "é");
        assert_eq!(repair("\\u00E9"), "é");
    }

    #[test]
    fn test_uppercase_u_not_matched() {
        assert_eq!(repair("\\U00e9"), "\\U00e9");
    }

    #[test]
    fn test_only_four_digits_consumed() {
        assert_eq!(repair("\\u00411"), "A1");
    }

    #[test]
    fn test_counted_reports_matches() {
        let (text, count) = repair_counted("caf\\u00e9,na\\u00efve,\\u12");
        assert_eq!(text, "café,naïve,\\u12");
        assert_eq!(count, 2);
        assert_eq!(count_escapes("caf\\u00e9,na\\u00efve,\\u12"), 2);
    }

    #[test]
    fn test_surrogate_pair_not_combined() {
        let (text, count) = repair_counted("\\uD83D\\uDE00");
        assert_eq!(count, 2);
        assert_eq!(text, "\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn test_repair_is_not_idempotent() {
        // \u005C 是反斜線，修復後留下新的跳脫序列
        let once = repair("\\u005Cu0041");
        assert_eq!(once, "\\u0041");
        let twice = repair(&once);
        assert_eq!(twice, "A");
        assert_ne!(once, twice);
    }

    proptest! {
        #[test]
        fn test_any_text_without_escapes_unchanged(text in any::<String>()) {
            prop_assume!(!has_escape(&text));
            prop_assert_eq!(repair(&text), text.clone());
            prop_assert_eq!(count_escapes(&text), 0);
        }

        #[test]
        fn test_near_miss_escapes_unchanged(text in "[\\\\uU0-9a-fA-Fg ,]{0,16}") {
            prop_assume!(!has_escape(&text));
            prop_assert_eq!(repair(&text), text.clone());
        }

        #[test]
        fn test_escape_count_matches_repairs(text in "[\\\\u0-9a-fA-F,]{0,24}") {
            let (_, count) = repair_counted(&text);
            prop_assert_eq!(count, count_escapes(&text));
            prop_assert_eq!(count > 0, has_escape(&text));
        }
    }
}
