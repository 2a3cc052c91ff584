use std::io;

use ovh_sms::SmsApi;

pub fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

/// Build an API handle from `APP_KEY`, `APP_SECRET`, `CONSUMER`, `ENDPOINT` and
/// select the account named by `SMS_ACCOUNT`.
pub fn api_from_env() -> Result<SmsApi, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut api = SmsApi::new(
        required_env("APP_KEY")?,
        required_env("APP_SECRET")?,
        required_env("ENDPOINT")?,
        required_env("CONSUMER")?,
        None,
    )?;
    api.set_account(required_env("SMS_ACCOUNT")?)?;
    Ok(api)
}
