mod common;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api = common::api_from_env()?;
    let sender = common::required_env("SMS_SENDER")?;
    let receiver = common::required_env("SMS_RECEIVER")?;
    let text = std::env::var("SMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the ovh-sms demo.".to_owned());

    let mut message = api.create_message(false);
    message.set_sender(sender)?;
    message.add_receiver(receiver)?;
    message.set_text(text)?;

    let response = message.send().await?;
    for result in &response.results {
        println!(
            "{}: {:?} (id: {:?})",
            result.receiver, result.status, result.sms_id
        );
    }
    println!("credits removed: {:?}", response.total_credits_removed);

    Ok(())
}
