use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::share_link;
use crate::views::modal::SELECTED_ALL_OPTION;

/// Form-encoded interaction body as Slack posts it.
#[derive(Serialize, Deserialize)]
pub struct InteractionBody {
    pub payload: String,
}

/// Slack interaction
#[derive(Deserialize, Debug, Clone)]
pub struct InteractionPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub trigger_id: Option<String>,
    pub team: Option<Team>,
    pub user: Option<PayloadUser>,
    pub view: Option<PayloadView>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl InteractionPayload {
    pub fn team_id(&self) -> Option<&str> {
        self.team
            .as_ref()
            .map(|team| team.id.as_str())
            .or_else(|| self.user.as_ref()?.team_id.as_deref())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }

    pub fn action(&self, action_id: &str) -> Option<&Action> {
        self.actions
            .iter()
            .find(|action| action.action_id.as_deref() == Some(action_id))
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Team {
    pub id: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PayloadUser {
    pub id: String,
    pub team_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PayloadView {
    pub id: Option<String>,
    pub hash: Option<String>,
    #[serde(default)]
    pub blocks: Vec<Value>,
    pub state: Option<FormState>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Action {
    pub action_id: Option<String>,
    pub block_id: Option<String>,
    pub selected_option: Option<SelectedOption>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FormState {
    values: FormStateValues,
}

/// Submitted values keyed by block id.
type FormStateValues = HashMap<String, FormStateValue>;

/// The modal inputs keyed by action id, whatever block they were found in.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct FormStateValue {
    user_option: Option<RadioButton>,
    selected_users: Option<MultiUsersSelect>,
    selected_options: Option<MultiStaticSelect>,
    link: Option<InputText>,
    contents: Option<InputText>,
}

impl FormStateValue {
    fn merge(self, v: FormStateValue) -> FormStateValue {
        Self {
            user_option: merge_option(self.user_option, v.user_option),
            selected_users: merge_option(self.selected_users, v.selected_users),
            selected_options: merge_option(self.selected_options, v.selected_options),
            link: merge_option(self.link, v.link),
            contents: merge_option(self.contents, v.contents),
        }
    }

    pub fn is_to_all_members(&self) -> bool {
        self.user_option
            .as_ref()
            .and_then(|radio| radio.selected_option.as_ref())
            .and_then(|option| option.value.as_deref())
            == Some(SELECTED_ALL_OPTION)
    }
}

impl From<FormState> for FormStateValue {
    fn from(form: FormState) -> Self {
        form.values
            .into_iter()
            .fold(FormStateValue::default(), |acc, (_, v)| acc.merge(v))
    }
}

fn merge_option<T>(acc: Option<T>, cur: Option<T>) -> Option<T> {
    match acc {
        Some(..) => acc,
        None => cur,
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct InputText {
    value: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RadioButton {
    selected_option: Option<SelectedOption>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SelectedOption {
    pub value: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MultiUsersSelect {
    #[serde(default)]
    selected_users: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MultiStaticSelect {
    #[serde(default)]
    selected_options: Vec<SelectedOption>,
}

/// A submitted share modal together with who submitted it.
pub struct ShareSubmission {
    pub team_id: String,
    pub user_id: String,
    pub form: FormStateValue,
}

impl TryFrom<&InteractionPayload> for ShareSubmission {
    type Error = String;

    fn try_from(payload: &InteractionPayload) -> Result<Self, Self::Error> {
        let state = payload
            .view
            .as_ref()
            .ok_or("no view")?
            .state
            .clone()
            .ok_or("no view state")?;
        Ok(Self {
            team_id: payload.team_id().ok_or("no team id")?.to_string(),
            user_id: payload.user_id().ok_or("no user id")?.to_string(),
            form: state.into(),
        })
    }
}

impl TryFrom<ShareSubmission> for share_link::Request {
    type Error = String;

    fn try_from(data: ShareSubmission) -> Result<Self, Self::Error> {
        let recipients = if data.form.is_to_all_members() {
            share_link::Recipients::AllMembers
        } else {
            share_link::Recipients::Selected(
                data.form
                    .selected_users
                    .map(|select| select.selected_users)
                    .unwrap_or_default(),
            )
        };
        Ok(share_link::Request {
            team_id: data.team_id,
            sharing_user_id: data.user_id,
            recipients,
            tag_ids: data
                .form
                .selected_options
                .map(|select| select.selected_options)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|option| option.value)
                .collect(),
            url: data
                .form
                .link
                .ok_or("no link input")?
                .value
                .ok_or("no link value")?,
            content: data
                .form
                .contents
                .and_then(|input| input.value)
                .unwrap_or_default(),
        })
    }
}

/// Reads an interaction from either a form body (`payload=<json>`) or a JSON
/// body (`{"payload": ...}`).
pub fn parse_interaction(content_type: &str, body: &str) -> Result<InteractionPayload, String> {
    if content_type.starts_with("application/json") {
        let mut wrapper: Value = serde_json::from_str(body).map_err(|err| err.to_string())?;
        return match wrapper.get_mut("payload").map(Value::take) {
            Some(Value::String(payload)) => {
                serde_json::from_str(&payload).map_err(|err| err.to_string())
            }
            Some(payload) => serde_json::from_value(payload).map_err(|err| err.to_string()),
            None => Err(String::from("no payload")),
        };
    }

    let form: InteractionBody = serde_urlencoded::from_str(body).map_err(|err| err.to_string())?;
    serde_json::from_str(&form.payload).map_err(|err| err.to_string())
}
