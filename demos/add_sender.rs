mod common;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api = common::api_from_env()?;
    let sender = common::required_env("SMS_SENDER")?;
    let reason = std::env::var("SMS_SENDER_REASON").unwrap_or_default();
    let description = std::env::var("SMS_SENDER_DESCRIPTION").unwrap_or_default();

    api.add_sender(&sender, reason, description).await?;
    println!("sender {sender} submitted for validation");

    let senders = api.get_senders().await?;
    println!("registered senders: {senders:?}");

    Ok(())
}
