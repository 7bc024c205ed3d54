//! Anchor-relative ranking keys for firmware version labels
//!
//! A version label is ranked by the characters that follow the first
//! occurrence of an anchor character (the last character of the model the
//! user typed). Each character is mapped through a fixed alphabet:
//!
//! ```text
//! 0 1 2 ... 9 a  b  ... z    anything else
//! 0 1 2 ... 9 10 11 ... 35   -1
//! ```
//!
//! Keys compare lexicographically, so a longer key wins over its own prefix
//! and an empty key sorts below everything.

/// Ranking alphabet, lowest first
pub const RANK_ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// Rank assigned to characters outside [`RANK_ALPHABET`]
pub const UNRANKED: i8 = -1;

const RANK_TABLE: [i8; 128] = build_rank_table();

const fn build_rank_table() -> [i8; 128] {
    let mut table = [UNRANKED; 128];
    let bytes = RANK_ALPHABET.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        table[bytes[i] as usize] = i as i8;
        i += 1;
    }
    table
}

/// Rank of a single (already case-folded) character
pub fn char_rank(c: char) -> i8 {
    if c.is_ascii() {
        RANK_TABLE[c as usize]
    } else {
        UNRANKED
    }
}

/// Comparable key derived from a version label and an anchor character
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RankingKey(Vec<i8>);

impl RankingKey {
    pub fn as_slice(&self) -> &[i8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Returns the case-folded ranking window of `version` for `anchor`.
///
/// The window starts one character past the first occurrence of the anchor.
/// When the anchor is missing, or its first occurrence is the very first
/// character, the window is the whole label.
pub fn ranking_window(version: &str, anchor: char) -> String {
    let folded = version.to_lowercase();
    let anchor: String = anchor.to_lowercase().collect();

    let start = match folded.find(&anchor) {
        Some(0) | None => 0,
        Some(pos) => {
            // one character past the start of the match
            let first_len = folded[pos..].chars().next().map_or(0, char::len_utf8);
            pos + first_len
        }
    };

    folded[start..].to_string()
}

/// Builds the ranking key of `version` relative to `anchor`
pub fn rank_key(version: &str, anchor: char) -> RankingKey {
    RankingKey(ranking_window(version, anchor).chars().map(char_rank).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('0', 0)]
    #[case('9', 9)]
    #[case('a', 10)]
    #[case('z', 35)]
    #[case('.', -1)]
    #[case('-', -1)]
    #[case('é', -1)]
    fn char_rank_follows_alphabet(#[case] c: char, #[case] expected: i8) {
        assert_eq!(char_rank(c), expected);
    }

    #[rstest]
    #[case("V10a", 'a', "")]
    #[case("H86010d", 'h', "h86010d")] // match at position 0 keeps the whole label
    #[case("LMG850V20c", '0', "v20c")]
    #[case("V20c", 'x', "v20c")]
    #[case("", 'a', "")]
    #[case("LGH86020A", '0', "20a")]
    fn ranking_window_starts_after_first_anchor(
        #[case] version: &str,
        #[case] anchor: char,
        #[case] expected: &str,
    ) {
        assert_eq!(ranking_window(version, anchor), expected);
    }

    #[test]
    fn anchor_at_position_zero_matches_missing_anchor() {
        // "+1 then clamp" rule: a leading anchor is indistinguishable from no anchor
        assert_eq!(rank_key("a10", 'a'), rank_key("a10", '#'));
        assert_eq!(rank_key("a10", 'a').as_slice(), &[10, 1, 0]);
    }

    #[test]
    fn rank_key_maps_window_characters() {
        assert_eq!(rank_key("H860V10a", '0').as_slice(), &[31, 1, 0, 10]);
        assert_eq!(rank_key("v1.2", 'x').as_slice(), &[31, 1, -1, 2]);
    }

    #[rstest]
    #[case("V10a", 'A')]
    #[case("h860v20c", '0')]
    #[case("LM-G850_V20c", 'g')]
    #[case("", 'q')]
    fn rank_key_is_case_insensitive(#[case] version: &str, #[case] anchor: char) {
        let lower_anchor = anchor.to_ascii_lowercase();
        assert_eq!(
            rank_key(version, anchor),
            rank_key(&version.to_uppercase(), lower_anchor)
        );
        assert_eq!(rank_key(version, anchor), rank_key(version, anchor));
    }

    #[test]
    fn keys_compare_lexicographically() {
        assert!(rank_key("v20", 'x') > rank_key("v10", 'x'));
        assert!(rank_key("v10a", 'x') > rank_key("v10", 'x'));
        assert!(rank_key("v10", 'x') > rank_key("v1.", 'x'));
        assert!(rank_key("", 'x') < rank_key("-", 'x'));
        assert!(rank_key("", 'x').is_empty());
    }
}
