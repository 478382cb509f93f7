use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};

use crate::config::AppConfig;

/// SMTP client for the account verification mail. Built once at startup;
/// absent when no mail credentials are configured.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_email: String,
}

impl Mailer {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Option<Self>> {
        if config.mail_username.is_empty() {
            return Ok(None);
        }

        let creds = Credentials::new(config.mail_username.clone(), config.mail_password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.mail_host)
            .map_err(|e| anyhow::anyhow!("failed to create SMTP transport: {e}"))?
            .port(587)
            .credentials(creds)
            .build();

        Ok(Some(Self {
            transport,
            from_email: config.mail_username.clone(),
        }))
    }

    pub async fn send_verification(
        &self,
        to: &str,
        name: &str,
        verification_link: &str,
    ) -> anyhow::Result<()> {
        let body = format!(
            r#"<html>
  <body>
    <h3>Account Verification</h3>
    <p>Hello {name}, thanks for choosing our services. Please click the link below to verify your account.</p>
    <a href="{verification_link}">Verify Your Email</a>
    <p>Please kindly ignore this email if you did not register for our services.</p>
  </body>
</html>"#
        );

        let email = Message::builder()
            .from(
                self.from_email
                    .parse()
                    .map_err(|e| anyhow::anyhow!("invalid from address: {e}"))?,
            )
            .to(to
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid to address: {e}"))?)
            .subject("Account Verification Email")
            .header(ContentType::TEXT_HTML)
            .body(body)?;

        self.transport.send(email).await?;
        Ok(())
    }
}
