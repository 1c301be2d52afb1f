//! Integration tests for chat dispatch
//!
//! Scripted vendors stand in for the HTTP clients so failover order can be observed

use async_trait::async_trait;
use republica::ai::fallback::{BALANCE_RESPONSE, GENERIC_RESPONSE, INVESTMENT_RESPONSE};
use republica::ai::prompts::STOCK_CHART_NOTE;
use republica::ai::{
    Assistant, ChatProvider, CompletionRequest, ProviderError, ProviderFactory, ReplySource,
};
use republica::credentials::{CredentialResolver, KeyCache, MemoryKeyCache, Vendor};
use republica::types::Role;
use std::sync::{Arc, Mutex};

/// What a scripted vendor does when called.
#[derive(Clone, Copy)]
enum Script {
    Reply(&'static str),
    Fail,
}

#[derive(Default)]
struct ScriptedFactory {
    mistral: Option<Script>,
    openai: Option<Script>,
    calls: Mutex<Vec<(Vendor, String, CompletionRequest)>>,
}

impl ScriptedFactory {
    fn new(mistral: Script, openai: Script) -> Self {
        Self {
            mistral: Some(mistral),
            openai: Some(openai),
            ..Default::default()
        }
    }

    fn called(&self) -> Vec<Vendor> {
        self.calls.lock().unwrap().iter().map(|(v, _, _)| *v).collect()
    }
}

struct ScriptedProvider {
    vendor: Vendor,
    key: String,
    script: Option<Script>,
    factory: Arc<ScriptedFactory>,
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn vendor(&self) -> Vendor {
        self.vendor
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.factory
            .calls
            .lock()
            .unwrap()
            .push((self.vendor, self.key.clone(), request.clone()));
        match self.script {
            Some(Script::Reply(text)) => Ok(text.to_string()),
            _ => Err(ProviderError::Status {
                vendor: self.vendor,
                status: 500,
                body: "internal error".into(),
            }),
        }
    }
}

/// Shares the scripted factory with the providers it builds.
struct FactoryHandle(Arc<ScriptedFactory>);

impl ProviderFactory for FactoryHandle {
    fn build(&self, vendor: Vendor, api_key: &str) -> Box<dyn ChatProvider> {
        let script = match vendor {
            Vendor::Mistral => self.0.mistral,
            Vendor::OpenAi => self.0.openai,
        };
        Box::new(ScriptedProvider {
            vendor,
            key: api_key.to_string(),
            script,
            factory: self.0.clone(),
        })
    }
}

fn assistant(keys: &[(Vendor, &str)], factory: Arc<ScriptedFactory>) -> Assistant {
    let cache = Arc::new(MemoryKeyCache::new());
    for (vendor, key) in keys {
        cache.set(vendor.cache_key(), key).unwrap();
    }
    Assistant::new(
        CredentialResolver::new(None, cache),
        Arc::new(FactoryHandle(factory)),
    )
}

const BOTH_KEYS: &[(Vendor, &str)] = &[(Vendor::Mistral, "mk-1"), (Vendor::OpenAi, "sk-1")];

mod chat_tests {
    use super::*;

    #[tokio::test]
    async fn test_primary_vendor_answers() {
        let factory = Arc::new(ScriptedFactory::new(
            Script::Reply("from mistral"),
            Script::Reply("from openai"),
        ));
        let reply = assistant(BOTH_KEYS, factory.clone())
            .send_chat("What did I spend on rent?")
            .await;

        assert_eq!(reply.text, "from mistral");
        assert_eq!(reply.source, ReplySource::Vendor(Vendor::Mistral));
        assert_eq!(factory.called(), vec![Vendor::Mistral]);
    }

    #[tokio::test]
    async fn test_primary_failure_falls_back_to_secondary() {
        let factory = Arc::new(ScriptedFactory::new(Script::Fail, Script::Reply("from openai")));
        let reply = assistant(BOTH_KEYS, factory.clone()).send_chat("hello").await;

        assert_eq!(reply.text, "from openai");
        assert_eq!(reply.source, ReplySource::Vendor(Vendor::OpenAi));
        assert_eq!(factory.called(), vec![Vendor::Mistral, Vendor::OpenAi]);
    }

    #[tokio::test]
    async fn test_missing_primary_key_skips_to_secondary() {
        let factory = Arc::new(ScriptedFactory::new(
            Script::Reply("from mistral"),
            Script::Reply("from openai"),
        ));
        let reply = assistant(&[(Vendor::OpenAi, "sk-1")], factory.clone())
            .send_chat("hello")
            .await;

        assert_eq!(reply.source, ReplySource::Vendor(Vendor::OpenAi));
        let calls = factory.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "sk-1");
    }

    #[tokio::test]
    async fn test_all_vendors_failing_gives_canned_reply() {
        let factory = Arc::new(ScriptedFactory::new(Script::Fail, Script::Fail));
        let reply = assistant(BOTH_KEYS, factory.clone())
            .send_chat("Should I invest more?")
            .await;

        assert_eq!(reply.text, INVESTMENT_RESPONSE);
        assert_eq!(reply.source, ReplySource::Canned);
        assert_eq!(factory.called().len(), 2);
    }

    #[tokio::test]
    async fn test_no_keys_never_calls_a_vendor() {
        let factory = Arc::new(ScriptedFactory::new(
            Script::Reply("unreachable"),
            Script::Reply("unreachable"),
        ));
        let reply = assistant(&[], factory.clone())
            .send_chat("How is my balance?")
            .await;

        assert_eq!(reply.text, BALANCE_RESPONSE);
        assert_eq!(reply.source, ReplySource::Canned);
        assert!(factory.called().is_empty());
    }

    #[tokio::test]
    async fn test_chat_request_parameters() {
        let factory = Arc::new(ScriptedFactory::new(Script::Reply("ok"), Script::Fail));
        assistant(BOTH_KEYS, factory.clone()).send_chat("hi").await;

        let calls = factory.calls.lock().unwrap();
        let request = &calls[0].2;
        assert_eq!(request.max_tokens, 500);
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[1].content, "hi");
        assert!(!request.messages[0].content.contains(STOCK_CHART_NOTE));
    }

    #[tokio::test]
    async fn test_stock_comparison_sets_chart_and_prompt_note() {
        let factory = Arc::new(ScriptedFactory::new(Script::Fail, Script::Reply("chart incoming")));
        let reply = assistant(BOTH_KEYS, factory.clone())
            .send_chat("Compare Apple and Amazon stock")
            .await;

        assert!(reply.show_chart);
        let calls = factory.calls.lock().unwrap();
        assert!(calls
            .iter()
            .all(|(_, _, request)| request.messages[0].content.contains(STOCK_CHART_NOTE)));
    }

    #[tokio::test]
    async fn test_canned_reply_still_reports_chart() {
        let factory = Arc::new(ScriptedFactory::default());
        let reply = assistant(&[], factory).send_chat("plot the share price vs boeing").await;
        assert!(reply.show_chart);
        assert_eq!(reply.source, ReplySource::Canned);
    }
}

mod voice_tests {
    use super::*;

    #[tokio::test]
    async fn test_voice_uses_openai_only() {
        let factory = Arc::new(ScriptedFactory::new(
            Script::Reply("from mistral"),
            Script::Reply("spoken answer"),
        ));
        let reply = assistant(BOTH_KEYS, factory.clone())
            .send_voice("what's new")
            .await;

        assert_eq!(reply.text, "spoken answer");
        assert_eq!(factory.called(), vec![Vendor::OpenAi]);

        let calls = factory.calls.lock().unwrap();
        assert_eq!(calls[0].2.max_tokens, 200);
        assert!((calls[0].2.temperature - 0.6).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_voice_without_openai_key_is_canned() {
        let factory = Arc::new(ScriptedFactory::new(
            Script::Reply("from mistral"),
            Script::Reply("unused"),
        ));
        let reply = assistant(&[(Vendor::Mistral, "mk-1")], factory.clone())
            .send_voice("tell me something")
            .await;

        assert_eq!(reply.text, GENERIC_RESPONSE);
        assert!(factory.called().is_empty());
    }
}
