use serde::Serialize;

use crate::slack::client::{self, core::Empty};
use crate::views::MessageView;

#[derive(Serialize, Debug)]
pub struct PostMessageRequest<'a> {
    pub channel: &'a str,
    /// Notification fallback for clients that cannot render blocks.
    pub text: &'a str,
    #[serde(flatten)]
    pub message: &'a MessageView,
}

pub async fn post_message(
    client: &client::core::Client,
    request: PostMessageRequest<'_>,
) -> Result<(), client::Error> {
    client
        .post_json("https://slack.com/api/chat.postMessage", &request)
        .await?
        .api::<Empty>()
        .await?;
    Ok(())
}
