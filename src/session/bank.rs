//! Question bank — speaking interview questions and writing task pools.
//!
//! Speaking entry draws 3 distinct questions without replacement; writing
//! entry draws one prompt from each of the three task pools.  The pools are
//! fixed at compile time; re-sampling happens on every mode entry so repeat
//! takers see variety.

use rand::seq::SliceRandom;

// ---------------------------------------------------------------------------
// Speaking questions
// ---------------------------------------------------------------------------

/// Interview-style questions, one answer expected per question.
pub const SPEAKING_QUESTIONS: &[&str] = &[
    "What do you usually do in your free time, and why do you enjoy it?",
    "Describe your home town. What do you like and dislike about it?",
    "Do you prefer studying alone or with friends? Why?",
    "Tell me about a person who has influenced you. What did you learn from them?",
    "What kind of food is popular in your country? Describe a traditional dish.",
    "How do you usually travel around your city? What would you improve?",
    "Describe a book or film that impressed you recently.",
    "What are your plans for the next five years?",
    "Do you think technology makes people's lives better? Why or why not?",
    "Describe a holiday or celebration that is important in your culture.",
];

// ---------------------------------------------------------------------------
// Writing task pools
// ---------------------------------------------------------------------------

/// Task 1 — informal letter, minimum 50 words.
pub const WRITING_POOL_LETTER: &[&str] = &[
    "You recently moved to a new city. Write a letter to your friend describing \
     your new home and inviting them to visit.",
    "Your English-speaking friend wants to learn your language. Write a letter \
     giving advice on how to start.",
    "You borrowed a book from a classmate and lost it. Write a letter \
     apologising and suggesting a solution.",
];

/// Task 2 — opinion essay, minimum 120 words.
pub const WRITING_POOL_OPINION: &[&str] = &[
    "Some people think children should start learning a foreign language at \
     primary school. Do you agree or disagree? Give reasons for your answer.",
    "Many students now take online lessons instead of attending school. Is this \
     a positive or negative development?",
    "Some believe that watching films in English is the best way to learn the \
     language. Do you agree?",
];

/// Task 3 — discussion essay, minimum 180 words.
pub const WRITING_POOL_DISCUSSION: &[&str] = &[
    "Some people prefer to live in a big city, while others choose the \
     countryside. Discuss both views and give your own opinion.",
    "Some say exams are the best way to measure knowledge, while others argue \
     they cause unnecessary stress. Discuss both views and give your opinion.",
    "Many young people dream of working abroad, while others want to build a \
     career at home. Discuss both views and give your own opinion.",
];

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

/// Draw 3 distinct speaking questions, in a fresh random order.
pub fn sample_speaking_questions() -> Vec<String> {
    let mut rng = rand::thread_rng();
    SPEAKING_QUESTIONS
        .choose_multiple(&mut rng, 3)
        .map(|q| q.to_string())
        .collect()
}

/// Draw one prompt from each writing pool, in task order 1/2/3.
pub fn sample_writing_prompts() -> Vec<String> {
    let mut rng = rand::thread_rng();
    [
        WRITING_POOL_LETTER,
        WRITING_POOL_OPINION,
        WRITING_POOL_DISCUSSION,
    ]
    .iter()
    .map(|pool| {
        pool.choose(&mut rng)
            .map(|p| p.to_string())
            .unwrap_or_default()
    })
    .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
