use std::sync::Arc;

use futures::future::join_all;
use serde_json::json;

use crate::domain::{
    find_access_token, find_all_tags, find_shared_links, find_sharing_links, save_link,
    save_members, save_workspace, share_link,
};
use crate::repository;
use crate::views::{
    self, locale::render, modal, share_message, MessageView, ModalView, ShareMessageView,
};

use super::client::{self, SlackApi};
use super::payloads::{InteractionPayload, ShareSubmission};

#[derive(Debug)]
enum Error {
    BadRequest(String),
    Domain(String),
    Slack(client::Error),
    View(views::Error),
}

impl From<client::Error> for Error {
    fn from(value: client::Error) -> Self {
        Error::Slack(value)
    }
}

impl From<views::Error> for Error {
    fn from(value: views::Error) -> Self {
        Error::View(value)
    }
}

fn domain_error(operation: &str, err: impl std::fmt::Debug) -> Error {
    Error::Domain(format!("{}: {:?}", operation, err))
}

/// Everything the interaction handlers delegate to. Each operation logs its
/// failure and reports whether it succeeded.
pub struct Service {
    pub link_repo: Arc<dyn repository::link::Repository>,
    pub workspace_repo: Arc<dyn repository::workspace::Repository>,
    pub api: Arc<dyn SlackApi>,
    /// Used for teams without a stored installation.
    pub bot_token: String,
    pub locale: views::Locale,
}

impl Service {
    pub async fn call_modal(&self, team_id: Option<&str>, trigger_id: &str) -> bool {
        collapse("call_modal", self.try_call_modal(team_id, trigger_id).await).is_some()
    }

    pub async fn get_modal_values(&self, payload: &InteractionPayload) -> bool {
        collapse("get_modal_values", self.try_get_modal_values(payload).await).is_some()
    }

    pub async fn update_modal(&self, payload: &InteractionPayload) -> bool {
        collapse("update_modal", self.try_update_modal(payload).await).is_some()
    }

    pub async fn access_workspace(&self, code: &str) -> bool {
        collapse("access_workspace", self.try_access_workspace(code).await).is_some()
    }

    pub async fn sharing_links(&self, team_id: &str, user_id: &str) -> Option<MessageView> {
        collapse(
            "sharing_links",
            self.try_sharing_links(team_id, user_id).await,
        )
    }

    pub async fn shared_links(&self, team_id: &str, user_id: &str) -> Option<MessageView> {
        collapse("shared_links", self.try_shared_links(team_id, user_id).await)
    }

    async fn try_call_modal(&self, team_id: Option<&str>, trigger_id: &str) -> Result<(), Error> {
        let tags = find_all_tags::execute(self.link_repo.clone())
            .await
            .map_err(|err| domain_error("find_all_tags", err))?
            .tags;
        let view = views::build_initial_modal(self.locale, &tags);
        let token = self.bot_token(team_id).await;

        self.api.open_view(&token, trigger_id, &view).await?;
        Ok(())
    }

    async fn try_get_modal_values(&self, payload: &InteractionPayload) -> Result<(), Error> {
        let request: share_link::Request = ShareSubmission::try_from(payload)
            .and_then(share_link::Request::try_from)
            .map_err(Error::BadRequest)?;
        let team_id = request.team_id.clone();

        let shared = share_link::execute(self.link_repo.clone(), request)
            .await
            .map_err(|err| domain_error("share_link", err))?;

        let mention_text = share_message::mention_text(
            self.locale,
            shared
                .recipients
                .iter()
                .map(|user| user.slack_user_id.as_str()),
            shared.to_all_members,
        )?;
        let tags_text = share_message::tags_text(
            self.locale,
            shared.link.tags.iter().map(|tag| tag.name.as_str()),
        )?;
        let message = views::build_share_message(
            self.locale,
            ShareMessageView {
                link_id: shared.link.id,
                mention_text: &mention_text,
                user_id: &shared.link.sharing_user.slack_user_id,
                tags_text: &tags_text,
                content: &shared.link.content,
                url: &shared.link.url,
                title: None,
            },
        )?;
        let notification = render(
            self.locale.messages().shared_by,
            json!({ "user_id": shared.link.sharing_user.slack_user_id }),
        )?;

        let token = self.bot_token(Some(&team_id)).await;
        let sends = shared.recipients.iter().map(|user| {
            self.api
                .post_message(&token, &user.slack_user_id, &notification, &message)
        });
        let failures: Vec<client::Error> = join_all(sends)
            .await
            .into_iter()
            .filter_map(Result::err)
            .collect();

        log::debug!(
            "sent link {} to {} recipients, {} failed",
            shared.link.id,
            shared.recipients.len(),
            failures.len()
        );

        // a link is only listed once every recipient got it
        if let Some(err) = failures.into_iter().next() {
            return Err(err.into());
        }

        save_link::execute(
            self.link_repo.clone(),
            save_link::Request { link: shared.link },
        )
        .await
        .map_err(|err| domain_error("save_link", err))?;
        Ok(())
    }

    async fn try_update_modal(&self, payload: &InteractionPayload) -> Result<(), Error> {
        let action = match payload.action(modal::USER_OPTION_ACTION_ID) {
            Some(action) => action,
            None => {
                log::debug!("ignoring block actions without a sharing scope change");
                return Ok(());
            }
        };
        let is_to_all_users = action
            .selected_option
            .as_ref()
            .and_then(|option| option.value.as_deref())
            == Some(modal::SELECTED_ALL_OPTION);

        let view = payload
            .view
            .as_ref()
            .ok_or_else(|| Error::BadRequest(String::from("no view")))?;
        let view_id = view
            .id
            .as_deref()
            .ok_or_else(|| Error::BadRequest(String::from("no view id")))?;

        let updated: ModalView =
            views::build_updated_modal(self.locale, view.blocks.clone(), is_to_all_users);
        let token = self.bot_token(payload.team_id()).await;

        self.api
            .update_view(&token, view_id, view.hash.as_deref(), &updated)
            .await?;
        Ok(())
    }

    async fn try_access_workspace(&self, code: &str) -> Result<(), Error> {
        let access = self.api.exchange_code(code).await?;

        let workspace = save_workspace::execute(
            self.workspace_repo.clone(),
            save_workspace::Request {
                team_id: access.team_id.clone(),
                access_token: access.access_token.clone(),
                bot_user_id: access.bot_user_id.clone(),
            },
        )
        .await
        .map_err(|err| domain_error("save_workspace", err))?;
        log::info!("registered workspace {}", workspace);

        let members = self
            .api
            .list_members(&access.access_token, &access.team_id)
            .await?;
        let saved = save_members::execute(
            self.link_repo.clone(),
            save_members::Request {
                team_id: access.team_id,
                slack_user_ids: members,
            },
        )
        .await
        .map_err(|err| domain_error("save_members", err))?
        .saved;
        log::debug!("saved {} members of workspace {}", saved, workspace.team_id);

        Ok(())
    }

    async fn try_sharing_links(&self, team_id: &str, user_id: &str) -> Result<MessageView, Error> {
        let found = find_sharing_links::execute(
            self.link_repo.clone(),
            find_sharing_links::Request {
                team_id: team_id.to_string(),
                user_id: user_id.to_string(),
            },
        )
        .await
        .map_err(|err| domain_error("find_sharing_links", err))?;

        Ok(views::build_outgoing_links_digest(
            self.locale,
            &found.links,
            found.total_recipient_count,
        )?)
    }

    async fn try_shared_links(&self, team_id: &str, user_id: &str) -> Result<MessageView, Error> {
        let found = find_shared_links::execute(
            self.link_repo.clone(),
            find_shared_links::Request {
                team_id: team_id.to_string(),
                user_id: user_id.to_string(),
            },
        )
        .await
        .map_err(|err| domain_error("find_shared_links", err))?;

        Ok(views::build_incoming_links_digest(
            self.locale,
            &found.links,
        )?)
    }

    /// The installation token of the team, or the configured bot token.
    async fn bot_token(&self, team_id: Option<&str>) -> String {
        let team_id = match team_id {
            Some(team_id) => team_id,
            None => return self.bot_token.clone(),
        };
        match find_access_token::execute(
            self.workspace_repo.clone(),
            find_access_token::Request {
                team_id: team_id.to_string(),
            },
        )
        .await
        {
            Ok(token) => token,
            Err(find_access_token::Error::NotInstalled) => {
                log::debug!("team {} is not installed, using the bot token", team_id);
                self.bot_token.clone()
            }
            Err(err) => {
                log::error!(
                    "could not find access token of team {}: {:?}",
                    team_id,
                    err
                );
                self.bot_token.clone()
            }
        }
    }
}

fn collapse<T>(operation: &str, result: Result<T, Error>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(Error::BadRequest(reason)) => {
            log::debug!("{}: rejected request: {}", operation, reason);
            None
        }
        Err(err) => {
            log::error!("{} failed: {:?}", operation, err);
            None
        }
    }
}
