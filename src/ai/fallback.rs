//! Canned replies used when no vendor answers.

pub const BALANCE_RESPONSE: &str = "Your current balance is €1,245.32 in your main account.";
pub const INVESTMENT_RESPONSE: &str = "I recommend diversifying your investments across different asset classes based on your risk tolerance and financial goals.";
pub const BUDGET_RESPONSE: &str = "Based on your recent transactions, you might want to consider reducing discretionary spending to meet your savings goals.";
pub const GENERIC_RESPONSE: &str = "Thanks for your message. As your financial assistant, I'm here to help you manage your finances better. Is there something specific about your accounts or finances you'd like to know?";

const TOPICS: &[(&[&str], &str)] = &[
    (&["balance", "account"], BALANCE_RESPONSE),
    (&["invest", "stock"], INVESTMENT_RESPONSE),
    (&["budget", "spend"], BUDGET_RESPONSE),
];

/// Pick the canned reply for `message`; topics are checked in order.
pub fn canned_response(message: &str) -> &'static str {
    let text = message.to_lowercase();
    TOPICS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, reply)| *reply)
        .unwrap_or(GENERIC_RESPONSE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_keywords_select_reply() {
        assert_eq!(canned_response("How is my balance?"), BALANCE_RESPONSE);
        assert_eq!(canned_response("open an ACCOUNT"), BALANCE_RESPONSE);
        assert_eq!(canned_response("Where should I invest?"), INVESTMENT_RESPONSE);
        assert_eq!(canned_response("stock tips"), INVESTMENT_RESPONSE);
        assert_eq!(canned_response("help me budget"), BUDGET_RESPONSE);
        assert_eq!(canned_response("I spend too much"), BUDGET_RESPONSE);
        assert_eq!(canned_response("hello"), GENERIC_RESPONSE);
    }

    #[test]
    fn earlier_topic_wins() {
        assert_eq!(
            canned_response("what stock should my account buy"),
            BALANCE_RESPONSE
        );
    }
}
