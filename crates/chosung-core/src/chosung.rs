//! Initial-consonant (chosung) extraction for Hangul words.

const SYLLABLE_FIRST: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
/// Number of syllables sharing one leading consonant (21 vowels x 28 finals).
const SYLLABLES_PER_INITIAL: u32 = 21 * 28;

/// Leading consonants in syllable-table order, as compatibility jamo.
const INITIALS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// Returns the leading consonant of a precomposed Hangul syllable.
pub fn initial_of(c: char) -> Option<char> {
    let code = c as u32;
    if !(SYLLABLE_FIRST..=SYLLABLE_LAST).contains(&code) {
        return None;
    }
    let index = ((code - SYLLABLE_FIRST) / SYLLABLES_PER_INITIAL) as usize;
    INITIALS.get(index).copied()
}

/// Builds the chosung prompt for a word.
///
/// Every precomposed Hangul syllable is replaced by its leading consonant.
/// Anything else (spaces, digits, Latin letters, bare jamo) is kept as is.
///
/// ```
/// use chosung_core::chosung::extract;
///
/// assert_eq!(extract("사과"), "ㅅㄱ");
/// assert_eq!(extract("초성 퀴즈"), "ㅊㅅ ㅋㅈ");
/// ```
pub fn extract(word: &str) -> String {
    word.chars().map(|c| initial_of(c).unwrap_or(c)).collect()
}
