/// AI module for Republica
///
/// Chat dispatch with vendor failover. Two OpenAI-shaped chat vendors sit
/// behind the `ChatProvider` trait; keys come from `crate::credentials`.
///
/// # Architecture
///
/// - `dispatch` - `Assistant`: chart intent, vendor failover, canned fallback
/// - `providers` - `ChatProvider` trait and the HTTP chat-completions client
/// - `intent` - keyword heuristics for the stock comparison chart
/// - `prompts` - assistant persona and voice preferences
/// - `fallback` - canned replies
///
/// # Usage
///
/// ```rust,no_run
/// use republica::ai::Assistant;
/// use republica::config::AppConfig;
///
/// # async fn example() {
/// let assistant = Assistant::from_config(&AppConfig::from_env());
/// let reply = assistant.send_chat("How is my balance?").await;
/// println!("{}", reply.text);
/// # }
/// ```
mod dispatch;
pub mod fallback;
pub mod intent;
pub mod prompts;
pub mod providers;

pub use dispatch::{Assistant, CHAT_VENDOR_ORDER, ChatReply, ReplySource, VOICE_VENDOR_ORDER};
pub use providers::{
    ChatProvider, CompletionRequest, HttpProviderFactory, ProviderError, ProviderFactory,
};
