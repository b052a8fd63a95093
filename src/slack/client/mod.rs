pub mod chat;
pub mod core;
pub mod get_users;
pub mod oauth_access;
pub mod views;

#[cfg(test)]
pub mod mocks;

use async_trait::async_trait;

use crate::views::{MessageView, ModalView};

pub use self::core::Error;
pub use oauth_access::OAuthAccess;

/// The Slack Web API methods the app calls.
#[async_trait]
pub trait SlackApi: Send + Sync {
    async fn open_view(&self, token: &str, trigger_id: &str, view: &ModalView)
        -> Result<(), Error>;

    async fn update_view(
        &self,
        token: &str,
        view_id: &str,
        hash: Option<&str>,
        view: &ModalView,
    ) -> Result<(), Error>;

    async fn post_message(
        &self,
        token: &str,
        channel: &str,
        text: &str,
        message: &MessageView,
    ) -> Result<(), Error>;

    async fn exchange_code(&self, code: &str) -> Result<OAuthAccess, Error>;

    async fn list_members(&self, token: &str, team_id: &str) -> Result<Vec<String>, Error>;
}

pub struct WebClient {
    client: self::core::Client,
    client_id: String,
    client_secret: String,
}

impl WebClient {
    pub fn new(client_id: &str, client_secret: &str) -> Self {
        Self {
            client: self::core::Client::new(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }
}

#[async_trait]
impl SlackApi for WebClient {
    async fn open_view(
        &self,
        token: &str,
        trigger_id: &str,
        view: &ModalView,
    ) -> Result<(), Error> {
        views::open(
            &self.client.with_access_token(token),
            views::OpenRequest { trigger_id, view },
        )
        .await
    }

    async fn update_view(
        &self,
        token: &str,
        view_id: &str,
        hash: Option<&str>,
        view: &ModalView,
    ) -> Result<(), Error> {
        views::update(
            &self.client.with_access_token(token),
            views::UpdateRequest {
                view_id,
                hash,
                view,
            },
        )
        .await
    }

    async fn post_message(
        &self,
        token: &str,
        channel: &str,
        text: &str,
        message: &MessageView,
    ) -> Result<(), Error> {
        chat::post_message(
            &self.client.with_access_token(token),
            chat::PostMessageRequest {
                channel,
                text,
                message,
            },
        )
        .await
    }

    async fn exchange_code(&self, code: &str) -> Result<OAuthAccess, Error> {
        oauth_access::execute(
            &self.client,
            oauth_access::ClientRequest {
                client_id: &self.client_id,
                client_secret: &self.client_secret,
                code,
            },
        )
        .await
    }

    async fn list_members(&self, token: &str, team_id: &str) -> Result<Vec<String>, Error> {
        get_users::new(self.client.with_access_token(token), team_id)
            .execute()
            .await
    }
}
