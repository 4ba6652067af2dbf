//! Quick-reply suggestions for the chat panel

const MUTATION_REPLIES: [&str; 5] = [
    "Show more details about this mutation",
    "What are the clinical implications?",
    "Compare with normal gene sequence",
    "What genetic tests are available for this mutation?",
    "What are the common mutations associated with this condition?",
];

const EXPRESSION_REPLIES: [&str; 5] = [
    "Show expression levels in detail",
    "How does this affect treatment options?",
    "Are there relevant clinical trials?",
    "What gene therapies are available?",
    "What are the genetic variants linked to this condition?",
];

const TREATMENT_REPLIES: [&str; 5] = [
    "What are the side effects?",
    "Show success rates",
    "Are there alternative treatments?",
    "What are the latest advancements in treatment?",
    "Can this treatment be personalized based on genetic data?",
];

const DEFAULT_REPLIES: [&str; 2] = [
    "Can you provide more details?",
    "Would you like more information on this topic?",
];

/// Follow-up prompts for an assistant reply
///
/// Keyword match, case-insensitive, first group wins.
pub fn quick_replies(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();

    let replies: &[&'static str] = if lower.contains("mutation") {
        &MUTATION_REPLIES
    } else if lower.contains("gene") || lower.contains("expression") {
        &EXPRESSION_REPLIES
    } else if lower.contains("treatment") || lower.contains("therapy") {
        &TREATMENT_REPLIES
    } else {
        &DEFAULT_REPLIES
    };

    replies.to_vec()
}
