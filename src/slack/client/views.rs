use serde::Serialize;

use crate::slack::client::{self, core::Empty};
use crate::views::ModalView;

#[derive(Serialize, Debug)]
pub struct OpenRequest<'a> {
    pub trigger_id: &'a str,
    pub view: &'a ModalView,
}

#[derive(Serialize, Debug)]
pub struct UpdateRequest<'a> {
    pub view_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<&'a str>,
    pub view: &'a ModalView,
}

pub async fn open(
    client: &client::core::Client,
    request: OpenRequest<'_>,
) -> Result<(), client::Error> {
    client
        .post_json("https://slack.com/api/views.open", &request)
        .await?
        .api::<Empty>()
        .await?;
    Ok(())
}

pub async fn update(
    client: &client::core::Client,
    request: UpdateRequest<'_>,
) -> Result<(), client::Error> {
    client
        .post_json("https://slack.com/api/views.update", &request)
        .await?
        .api::<Empty>()
        .await?;
    Ok(())
}
