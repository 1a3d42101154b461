//! IMAP-backed mailbox access.

use super::{classify_entries, Mailbox, MailboxInventory};
use anyhow::{Context, Result};

type ImapSession = imap::Session<Box<dyn imap::ImapConnection>>;

/// Connects to the IMAP server with STARTTLS, once per operation. The run
/// model is strictly sequential, so no session is held between calls.
pub struct ImapMailbox {
    host: String,
    port: u16,
    username: String,
    password: String,
}

impl ImapMailbox {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self { host: host.into(), port, username: username.into(), password: password.into() }
    }

    fn session(&self) -> Result<ImapSession> {
        let client = imap::ClientBuilder::new(self.host.as_str(), self.port)
            .mode(imap::ConnectionMode::StartTls)
            .connect()
            .with_context(|| format!("Failed connecting to {}:{}", self.host, self.port))?;

        client
            .login(&self.username, &self.password)
            .map_err(|(err, _client)| anyhow::Error::new(err).context("IMAP login failed"))
    }
}

impl Mailbox for ImapMailbox {
    fn inventory(&mut self) -> Result<MailboxInventory> {
        let mut session = self.session()?;
        let names = session.list(Some(""), Some("*")).context("IMAP LIST failed")?;
        let raw: Vec<String> = names.iter().map(|name| name.name().to_string()).collect();
        session.logout().ok();

        Ok(classify_entries(&raw))
    }

    fn create(&mut self, raw_name: &str) -> Result<()> {
        let mut session = self.session()?;
        session.create(raw_name).with_context(|| format!("IMAP CREATE {raw_name} failed"))?;
        session.logout().ok();
        Ok(())
    }
}
