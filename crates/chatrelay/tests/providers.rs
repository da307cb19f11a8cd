use anyhow::Result;
use chatrelay::{
    limits::ChatSettingLimits,
    models::{chat::ChatSettings, message::Message},
    providers::{base::ProviderFactory, factory::AnthropicFactory},
    relay::relay,
    translate::translate,
};
use dotenv::dotenv;
use futures::TryStreamExt;

fn load_env() {
    if let Ok(path) = dotenv() {
        println!("Loaded environment from {:?}", path);
    }
}

#[tokio::test]
async fn test_anthropic_streaming_reply() -> Result<()> {
    load_env();

    // Skip if credentials aren't available
    let Ok(api_key) = std::env::var("ANTHROPIC_API_KEY") else {
        println!("Skipping Anthropic tests - credentials not configured");
        return Ok(());
    };
    let model =
        std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| "claude-3-haiku-20240307".to_string());

    let conversation = vec![
        Message::system("You are a helpful assistant."),
        Message::user("Just say hello!"),
    ];
    let payload = translate(
        &conversation,
        &ChatSettings::new(model).with_temperature(0.0),
        &ChatSettingLimits::new(),
    );

    let factory = AnthropicFactory::default();
    let stream = relay(&payload, &api_key, &factory)
        .await
        .map_err(|e| anyhow::anyhow!("{} ({})", e.message, e.status))?;
    let reply: String = stream.try_collect::<Vec<_>>().await?.concat();

    assert!(!reply.is_empty(), "Expected a non-empty reply from {}", factory.name());
    Ok(())
}

#[tokio::test]
async fn test_anthropic_rejects_bad_key() -> Result<()> {
    load_env();

    if std::env::var("ANTHROPIC_LIVE_TESTS").is_err() {
        println!("Skipping Anthropic bad key test - ANTHROPIC_LIVE_TESTS not set");
        return Ok(());
    }

    let payload = translate(
        &[Message::system("sys"), Message::user("hi")],
        &ChatSettings::new("claude-3-haiku-20240307"),
        &ChatSettingLimits::new(),
    );
    let envelope = relay(&payload, "sk-ant-invalid", &AnthropicFactory::default())
        .await
        .err()
        .expect("an invalid key must be rejected");

    assert_eq!(envelope.status, 401);
    assert_eq!(
        envelope.message,
        "Anthropic API Key is incorrect. Please fix it in your profile settings."
    );
    Ok(())
}
