//! Writing submission parsing — section split, word counting, coverage.
//!
//! A writing submission is one free-text message expected to contain three
//! sections introduced by literal `1)`, `2)`, `3)` markers at line starts.
//! A missing marker yields an empty section, never an error — the coverage
//! check downstream is what penalises missing work.
//!
//! [`advice_block`] builds the task-by-task advice text that is appended to
//! every writing result, with or without a grader verdict.

use once_cell::sync::Lazy;
use regex::Regex;

// ---------------------------------------------------------------------------
// Word counting
// ---------------------------------------------------------------------------

/// A word is a run of ASCII letters with at most one internal apostrophe
/// (`don't`, `o'clock`).  Digits and punctuation never count.
static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)?").expect("word regex"));

/// Count the words in `text`.
///
/// ```
/// use speaking_zone::assess::word_count;
///
/// assert_eq!(word_count("I don't know."), 3);
/// assert_eq!(word_count("in 1990, 42 people"), 2);
/// ```
pub fn word_count(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}

// ---------------------------------------------------------------------------
// Section splitting
// ---------------------------------------------------------------------------

/// Per-task section markers, matched at line starts.
static MARKER_RES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"(?m)^\s*1\)").expect("marker 1 regex"),
        Regex::new(r"(?m)^\s*2\)").expect("marker 2 regex"),
        Regex::new(r"(?m)^\s*3\)").expect("marker 3 regex"),
    ]
});

/// Split a raw submission into its three labeled sections.
///
/// Each section runs from the end of its `n)` marker to the start of the
/// next marker found after it, or to the end of the text.  A marker that is
/// absent produces an empty section.
pub fn split_sections(text: &str) -> [String; 3] {
    // (marker end, marker start) for each of the three markers, if present.
    let spans: Vec<Option<(usize, usize)>> = MARKER_RES
        .iter()
        .map(|re| re.find(text).map(|m| (m.end(), m.start())))
        .collect();

    let mut sections: [String; 3] = Default::default();
    for i in 0..3 {
        let Some((body_start, _)) = spans[i] else {
            continue;
        };
        // The section ends at the nearest marker start after this one.
        let body_end = spans
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .filter_map(|(_, span)| span.map(|(_, start)| start))
            .filter(|&start| start >= body_start)
            .min()
            .unwrap_or(text.len());
        sections[i] = text[body_start..body_end].trim().to_string();
    }
    sections
}

// ---------------------------------------------------------------------------
// Coverage
// ---------------------------------------------------------------------------

/// Number of sections meeting their minimum word count, 0–3.
pub fn coverage(counts: &[usize; 3], minimums: &[usize; 3]) -> u8 {
    counts
        .iter()
        .zip(minimums)
        .filter(|(count, min)| count >= min)
        .count() as u8
}

// ---------------------------------------------------------------------------
// Advice block
// ---------------------------------------------------------------------------

/// Short Uzbek description of each task type.
const TASK_LABELS_UZ: [&str; 3] = [
    "1-vazifa (norasmiy xat)",
    "2-vazifa (fikr bildirish inshosi)",
    "3-vazifa (munozara inshosi)",
];

/// Required structural elements, per task type.
const TASK_STRUCTURE_UZ: [&str; 3] = [
    "Xatda salomlashish, yozishdan maqsad va xayrlashish bo'lishi shart.",
    "Insho kirish, o'z fikringiz (2 ta sabab bilan) va xulosadan iborat bo'lsin.",
    "Ikkala tomonning dalillarini keltirib, oxirida o'z pozitsiyangizni bildiring.",
];

/// A worked one-line opener for each task type.
const TASK_EXAMPLES: [&str; 3] = [
    "Masalan: \"Dear Alex, I'm writing to tell you about my new school...\"",
    "Masalan: \"In my opinion, learning English online has two clear advantages...\"",
    "Masalan: \"While some people believe city life is stressful, others argue that...\"",
];

/// Generic closing tips shown after the per-task lines.
const CLOSING_TIPS_UZ: &str = "\
Umumiy maslahatlar:
• Har bir fikrni alohida abzatsda yozing.
• Bog'lovchi so'zlardan foydalaning (however, therefore, in addition).
• Yozib bo'lgach, grammatika va imloni qayta tekshiring.";

/// Build the task-by-task advice text for a writing submission.
///
/// Always produced — it does not depend on the grader being reachable — and
/// appended to whatever narrative feedback the result carries.
pub fn advice_block(counts: &[usize; 3], minimums: &[usize; 3]) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str("📝 Vazifalar tahlili:\n");
    for i in 0..3 {
        let verdict = if counts[i] >= minimums[i] {
            "yetarli ✅"
        } else {
            "yetarli emas ❌"
        };
        out.push_str(&format!(
            "\n{} — {} so'z (kamida {} kerak): {}\n{}\n{}\n",
            TASK_LABELS_UZ[i], counts[i], minimums[i], verdict, TASK_STRUCTURE_UZ[i],
            TASK_EXAMPLES[i],
        ));
    }
    out.push('\n');
    out.push_str(CLOSING_TIPS_UZ);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
