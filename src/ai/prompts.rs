//! Assistant persona, context data and voice preferences.

pub struct ContextData {
    pub app_name: &'static str,
    pub app_description: &'static str,
    pub system_prompt: &'static str,
    pub capabilities: &'static [&'static str],
}

pub const CHAT_CONTEXT: ContextData = ContextData {
    app_name: "Financial Assistant",
    app_description: "A personal finance management application that helps users track their cash, investments, and financial goals.",
    system_prompt: r#"You are a helpful financial assistant called Republica.
Be concise and friendly in your responses.
Focus on providing clear financial advice and insights.
If asked about account specifics, refer to the user's transactions and balance.
If a users asks about their performance of their portfolio say the following: Last week, U.S. stock markets saw modest declines due to investor caution over high U.S.-China tariffs and upcoming trade negotiations. In contrast, European and Canadian markets performed well, driven by optimism around international trade developments and strong corporate earnings.
Keep your answer short and precise with at maximum of three sentences.
Current balance: €1,245.32"#,
    capabilities: &[
        "Answer questions about financial topics",
        "Provide basic investment advice",
        "Provide stock advices",
        "Explain financial terms",
        "Help with budgeting questions",
        "Analyze spending patterns based on transaction history",
    ],
};

pub const VOICE_CONTEXT: ContextData = ContextData {
    app_name: "Financial Voice Assistant Republica",
    app_description: "A voice-enabled financial assistant that helps users interact with their finances through voice commands.",
    system_prompt: r#"You are a helpful financial voice assistant called Republica.
Be concise and conversational in your responses.
Focus on providing clear financial advice and information that works well when spoken aloud.
Prioritize brevity in your responses since they will be read out loud.
If asked about account specifics, refer to the user's transactions and balance.
If the user asks for specific stock advices select one of the following (also provide a bit more information about the stock itself):
1. Merck 2. Continental 3. Siemens Energy
If the user asks about stock comparisons or price charts for Apple, Amazon, or Boeing, let them know you can display a visual comparison
of these stocks and mention you'll show a chart at the end of your response.
Keep yourself short and precise with a maximum of 3 sentences.
Current balance: €1,245.32"#,
    capabilities: &[
        "Answer questions about financial topics",
        "Provide basic investment advice",
        "Explain financial terms",
        "Help with budgeting questions",
        "Analyze spending patterns based on transaction history",
        "Show stock price comparisons for Apple, Amazon, and Boeing",
    ],
};

pub const STOCK_CHART_NOTE: &str = r#"After your response, a stock price comparison chart will be shown for Apple, Amazon, and Boeing.
Please introduce the chart at the end of your response with a phrase like "Let me show you a visual comparison of these stocks"
or "Here's a chart of the stock prices to help you visualize the differences"."#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptMode {
    Chat,
    Voice,
}

impl PromptMode {
    pub fn context(self) -> &'static ContextData {
        match self {
            PromptMode::Chat => &CHAT_CONTEXT,
            PromptMode::Voice => &VOICE_CONTEXT,
        }
    }
}

impl ContextData {
    /// Persona prompt followed by the app summary and capability list.
    pub fn render(&self) -> String {
        let mut prompt = format!(
            "{}\n\nYou are part of {}: {}\nYou can:",
            self.system_prompt, self.app_name, self.app_description
        );
        for capability in self.capabilities {
            prompt.push_str("\n- ");
            prompt.push_str(capability);
        }
        prompt
    }
}

pub fn system_prompt(mode: PromptMode, with_chart: bool) -> String {
    let base = mode.context().render();
    if with_chart {
        format!("{base}\n\n{STOCK_CHART_NOTE}")
    } else {
        base
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoiceType {
    Friendly,
    Professional,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeechRate {
    Slow,
    Medium,
    Fast,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoicePreferences {
    pub voice_type: VoiceType,
    pub speech_rate: SpeechRate,
    /// Token budget for spoken replies.
    pub max_response_length: u32,
}

pub const VOICE_PREFERENCES: VoicePreferences = VoicePreferences {
    voice_type: VoiceType::Friendly,
    speech_rate: SpeechRate::Medium,
    max_response_length: 200,
};

impl VoicePreferences {
    pub fn voice(&self) -> &'static str {
        match self.voice_type {
            VoiceType::Friendly => "alloy",
            VoiceType::Professional => "onyx",
        }
    }

    pub fn speed(&self) -> f32 {
        match self.speech_rate {
            SpeechRate::Slow => 0.8,
            SpeechRate::Medium => 1.0,
            SpeechRate::Fast => 1.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_note_is_appended_only_when_requested() {
        let plain = system_prompt(PromptMode::Chat, false);
        assert!(!plain.contains("comparison chart"));
        let charted = system_prompt(PromptMode::Chat, true);
        assert!(charted.starts_with(CHAT_CONTEXT.system_prompt));
        assert!(charted.ends_with(STOCK_CHART_NOTE));
    }

    #[test]
    fn prompt_carries_app_summary_and_capabilities() {
        let prompt = system_prompt(PromptMode::Voice, false);
        assert!(prompt.contains("You are part of Financial Voice Assistant Republica:"));
        assert!(prompt.contains(VOICE_CONTEXT.app_description));
        for capability in VOICE_CONTEXT.capabilities {
            assert!(prompt.contains(&format!("- {capability}")), "{capability}");
        }
        assert!(!prompt.contains("Provide stock advices"));
        assert!(system_prompt(PromptMode::Chat, false).contains("- Provide stock advices"));
    }

    #[test]
    fn voice_preferences_map_to_tts_parameters() {
        assert_eq!(VOICE_PREFERENCES.voice(), "alloy");
        assert_eq!(VOICE_PREFERENCES.speed(), 1.0);

        let prefs = VoicePreferences {
            voice_type: VoiceType::Professional,
            speech_rate: SpeechRate::Fast,
            max_response_length: 200,
        };
        assert_eq!(prefs.voice(), "onyx");
        assert_eq!(prefs.speed(), 1.2);
    }
}
