//! Answer normalization.
//!
//! Turns a verbose model response into the canonical short answer the scoring
//! server expects. The cleanup is deterministic and total: any input string
//! produces an output, and re-normalizing a normalized answer is a no-op.

/// Normalize a raw model answer into its canonical short form.
///
/// Applied in order:
/// 1. If the text contains "answer is" (case-insensitive), keep only what
///    follows the last occurrence and strip surrounding colon/period
///    punctuation and whitespace.
/// 2. Strip exactly one layer of matching surrounding quotes, double quotes
///    first, single quotes otherwise.
/// 3. Remove literal occurrences of the prefixes "The answer is ",
///    "Answer: ", and "ANSWER: " anywhere in the string.
pub fn normalize(raw: &str) -> String {
    let mut answer = raw.trim().to_string();

    if let Some(pos) = rfind_ignore_ascii_case(&answer, "answer is") {
        let tail = answer[pos + "answer is".len()..].to_string();
        answer = tail
            .trim()
            .trim_matches(|c| c == ':' || c == '.')
            .trim()
            .to_string();
    }

    if answer.len() >= 2 && answer.starts_with('"') && answer.ends_with('"') {
        answer = answer[1..answer.len() - 1].to_string();
    } else if answer.len() >= 2 && answer.starts_with('\'') && answer.ends_with('\'') {
        answer = answer[1..answer.len() - 1].to_string();
    }

    answer = answer.replace("The answer is ", "");
    answer = answer.replace("Answer: ", "");
    answer = answer.replace("ANSWER: ", "");

    answer
}

/// Byte position of the last case-insensitive occurrence of `needle`.
///
/// The needle must be ASCII; a match therefore always starts and ends on a
/// character boundary of the haystack.
fn rfind_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len())
        .rev()
        .find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}
