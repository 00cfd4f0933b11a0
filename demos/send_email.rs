use std::io;

use courier::config::{EmailDeliveryMethod, SmtpSettings, TlsMode};
use courier::{DeliveryService, MessagingConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let to = std::env::var("COURIER_EMAIL_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "COURIER_EMAIL_TO environment variable is required",
        )
    })?;

    let mut config = MessagingConfig::default();
    config.email.default_sender_address = std::env::var("COURIER_EMAIL_FROM").ok();
    config.email.subject_prefix = Some("[DEMO]".to_owned());

    // Without an SMTP host the message is only logged.
    if let Ok(host) = std::env::var("COURIER_SMTP_HOST") {
        config.email_delivery_method = EmailDeliveryMethod::Smtp;
        config.smtp = Some(SmtpSettings {
            host,
            port: std::env::var("COURIER_SMTP_PORT")
                .ok()
                .and_then(|port| port.parse().ok()),
            username: std::env::var("COURIER_SMTP_USERNAME").ok(),
            password: std::env::var("COURIER_SMTP_PASSWORD").ok(),
            tls: TlsMode::StartTls,
        });
    }

    let service = DeliveryService::from_config(&config)?;
    service.send_email(None, &to, "Hello", "Hello from the courier demo.")?;
    println!("sent to {to}");

    Ok(())
}
