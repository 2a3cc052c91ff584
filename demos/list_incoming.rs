mod common;

use ovh_sms::IncomingFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api = common::api_from_env()?;

    let messages = api.get_incoming_messages(&IncomingFilter::default()).await?;
    for sms in messages {
        let props = sms.properties().await?;
        println!(
            "#{} from {:?} at {:?}: {:?}",
            props.id.as_str(),
            props.sender,
            props.creation_datetime,
            props.message
        );
    }

    Ok(())
}
