//! Keyword heuristics deciding whether a reply gets a stock comparison chart.

const COMPARISON_WORDS: &[&str] = &[
    "compare",
    "comparison",
    "vs",
    "versus",
    "against",
    "difference",
    "chart",
    "graph",
    "plot",
];

const FINANCE_WORDS: &[&str] = &["stock", "share", "market", "invest", "price"];

const COMPANY_NAMES: &[&str] = &["apple", "amazon", "boeing", "aapl", "amz", "bco"];

fn mentions_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

/// A chart is shown when the message pairs finance words with either a
/// comparison word or one of the charted company names.
pub fn is_stock_comparison_request(message: &str) -> bool {
    let text = message.to_lowercase();
    let finance = mentions_any(&text, FINANCE_WORDS);

    finance && (mentions_any(&text, COMPARISON_WORDS) || mentions_any(&text, COMPANY_NAMES))
}
