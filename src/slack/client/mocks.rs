use std::sync::Mutex;

use async_trait::async_trait;

use crate::views::{MessageView, ModalView};

use super::{Error, OAuthAccess, SlackApi};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    OpenView {
        token: String,
        trigger_id: String,
        view: ModalView,
    },
    UpdateView {
        token: String,
        view_id: String,
        hash: Option<String>,
        view: ModalView,
    },
    PostMessage {
        token: String,
        channel: String,
        message: MessageView,
    },
    ExchangeCode(String),
    ListMembers {
        token: String,
        team_id: String,
    },
}

/// Records every call and answers with canned data.
pub struct MockSlackApi {
    calls: Mutex<Vec<Call>>,
    failing: bool,
    failing_channels: Vec<String>,
    access: Option<OAuthAccess>,
    members: Vec<String>,
}

impl MockSlackApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(vec![]),
            failing: false,
            failing_channels: vec![],
            access: None,
            members: vec![],
        }
    }

    /// Every call fails after being recorded.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    pub fn with_failing_channel(mut self, channel: &str) -> Self {
        self.failing_channels.push(channel.to_string());
        self
    }

    pub fn with_access(mut self, access: OAuthAccess) -> Self {
        self.access = Some(access);
        self
    }

    pub fn with_members(mut self, members: &[&str]) -> Self {
        self.members = members.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), Error> {
        let rejected = match &call {
            Call::PostMessage { channel, .. } => self.failing_channels.contains(channel),
            _ => false,
        };
        self.calls.lock().unwrap().push(call);
        if self.failing || rejected {
            return Err("mock failure".into());
        }
        Ok(())
    }
}

#[async_trait]
impl SlackApi for MockSlackApi {
    async fn open_view(
        &self,
        token: &str,
        trigger_id: &str,
        view: &ModalView,
    ) -> Result<(), Error> {
        self.record(Call::OpenView {
            token: token.to_string(),
            trigger_id: trigger_id.to_string(),
            view: view.clone(),
        })
    }

    async fn update_view(
        &self,
        token: &str,
        view_id: &str,
        hash: Option<&str>,
        view: &ModalView,
    ) -> Result<(), Error> {
        self.record(Call::UpdateView {
            token: token.to_string(),
            view_id: view_id.to_string(),
            hash: hash.map(String::from),
            view: view.clone(),
        })
    }

    async fn post_message(
        &self,
        token: &str,
        channel: &str,
        _text: &str,
        message: &MessageView,
    ) -> Result<(), Error> {
        self.record(Call::PostMessage {
            token: token.to_string(),
            channel: channel.to_string(),
            message: message.clone(),
        })
    }

    async fn exchange_code(&self, code: &str) -> Result<OAuthAccess, Error> {
        self.record(Call::ExchangeCode(code.to_string()))?;
        self.access.clone().ok_or_else(|| "invalid_code".into())
    }

    async fn list_members(&self, token: &str, team_id: &str) -> Result<Vec<String>, Error> {
        self.record(Call::ListMembers {
            token: token.to_string(),
            team_id: team_id.to_string(),
        })?;
        Ok(self.members.clone())
    }
}
