use std::io;

use courier::{DeliveryService, MessagingConfig};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let mut config = MessagingConfig::default();
    config.sms_delivery_method = courier::config::SmsDeliveryMethod::Twilio;
    config.twilio.account_sid = Some(required("TWILIO_ACCOUNT_SID")?);
    config.twilio.auth_token = Some(required("TWILIO_AUTH_TOKEN")?);
    config.twilio.callback_url = std::env::var("TWILIO_CALLBACK_URL").ok();

    let from = required("COURIER_SMS_FROM")?;
    let to = required("COURIER_SMS_TO")?;
    let body = std::env::var("COURIER_SMS_BODY")
        .unwrap_or_else(|_| "Hello from the courier demo.".to_owned());

    let service = DeliveryService::from_config(&config)?;
    match service.send_sms(&from, &to, &body) {
        Ok(detail) => println!("delivered: {}", detail.unwrap_or_default()),
        Err(err) => {
            let response = err
                .as_unsuccessful()
                .map(|failure| failure.error_response().to_owned());
            println!("failed: {err}; response: {response:?}");
        }
    }

    Ok(())
}
