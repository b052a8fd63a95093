use serde_json::json;
use uuid::Uuid;

use super::entities::{context, divider, section, Attachment, MessageView};
use super::locale::{render, Locale};
use super::{short_id, Error};

const TAGS_COLOR: &str = "#355FE9";
const CONTENT_COLOR: &str = "#01319F";

pub struct ShareMessageView<'a> {
    pub link_id: Uuid,
    pub mention_text: &'a str,
    pub user_id: &'a str,
    pub tags_text: &'a str,
    pub content: &'a str,
    pub url: &'a str,
    pub title: Option<&'a str>,
}

pub fn build_share_message(locale: Locale, data: ShareMessageView) -> Result<MessageView, Error> {
    let messages = locale.messages();

    let blocks = vec![
        context(&render(
            messages.short_id,
            json!({ "id": short_id::encode(&data.link_id) }),
        )?),
        section(&render(
            messages.share_request,
            json!({ "mentions": data.mention_text }),
        )?),
        divider(),
        section(&render(
            messages.shared_by,
            json!({ "user_id": data.user_id }),
        )?),
    ];

    let attachments = vec![
        Attachment {
            blocks: vec![section(data.tags_text)],
            color: TAGS_COLOR.to_string(),
        },
        Attachment {
            blocks: vec![section(&render(
                messages.share_content,
                json!({
                    "content": data.content,
                    "url": data.url,
                    "title": data.title.unwrap_or(messages.default_link_title),
                }),
            )?)],
            color: CONTENT_COLOR.to_string(),
        },
    ];

    Ok(MessageView {
        blocks,
        attachments,
    })
}

/// `모두` when the link goes to every member, otherwise the mentions of the
/// recipients.
pub fn mention_text<'a>(
    locale: Locale,
    recipient_ids: impl IntoIterator<Item = &'a str>,
    to_all_members: bool,
) -> Result<String, Error> {
    let messages = locale.messages();
    if to_all_members {
        return Ok(messages.everyone.to_string());
    }
    render(
        messages.mentioned_users,
        json!({ "mentions": mentions(recipient_ids) }),
    )
}

pub fn tags_text<'a>(
    locale: Locale,
    tag_names: impl IntoIterator<Item = &'a str>,
) -> Result<String, Error> {
    let tags = tag_names
        .into_iter()
        .map(|name| render(locale.messages().tag, json!({ "name": name })))
        .collect::<Result<Vec<String>, Error>>()?;
    Ok(tags.join(" "))
}

pub(crate) fn mentions<'a>(user_ids: impl IntoIterator<Item = &'a str>) -> String {
    itertools::join(user_ids.into_iter().map(|id| format!("<@{}>", id)), " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mocks;
    use serde_json::Value;

    fn view<'a>(title: Option<&'a str>) -> ShareMessageView<'a> {
        ShareMessageView {
            link_id: Uuid::parse_str(mocks::LINK_ID).unwrap(),
            mention_text: "<@U0002> <@U0003>님",
            user_id: mocks::SHARING_USER_ID,
            tags_text: "#개발 #회고",
            content: "같이 읽어요",
            url: "https://example.com/post",
            title,
        }
    }

    fn text(block: &Value) -> &str {
        block["text"]["text"].as_str().unwrap()
    }

    #[test]
    fn it_should_build_the_share_blocks_in_order() {
        let message = build_share_message(Locale::Ko, view(None)).unwrap();
        let link_id = Uuid::parse_str(mocks::LINK_ID).unwrap();

        assert_eq!(message.blocks.len(), 4);
        assert_eq!(
            message.blocks[0]["elements"][0]["text"],
            format!("ID: *{}*", short_id::encode(&link_id))
        );
        assert_eq!(
            text(&message.blocks[1]),
            "*<@U0002> <@U0003>님 이거 같이 볼까요? 👀*"
        );
        assert_eq!(message.blocks[2]["type"], "divider");
        assert_eq!(text(&message.blocks[3]), "<@U0001>님이 공유했어요");
    }

    #[test]
    fn it_should_attach_tags_and_content_with_the_default_title() {
        let message = build_share_message(Locale::Ko, view(None)).unwrap();

        assert_eq!(message.attachments.len(), 2);
        assert_eq!(message.attachments[0].color, "#355FE9");
        assert_eq!(text(&message.attachments[0].blocks[0]), "#개발 #회고");
        assert_eq!(message.attachments[1].color, "#01319F");
        assert_eq!(
            text(&message.attachments[1].blocks[0]),
            "같이 읽어요 \n\n*<https://example.com/post|👉 지금 보러가기>*"
        );
    }

    #[test]
    fn it_should_use_the_provided_title() {
        let message = build_share_message(Locale::Ko, view(Some("원문 보기"))).unwrap();

        assert_eq!(
            text(&message.attachments[1].blocks[0]),
            "같이 읽어요 \n\n*<https://example.com/post|👉 원문 보기>*"
        );
    }

    #[test]
    fn it_should_mention_recipients_or_everyone() {
        assert_eq!(
            mention_text(Locale::Ko, ["U0002", "U0003"], false).unwrap(),
            "<@U0002> <@U0003>님"
        );
        assert_eq!(mention_text(Locale::Ko, ["U0002"], true).unwrap(), "모두");
    }

    #[test]
    fn it_should_join_tag_names() {
        assert_eq!(tags_text(Locale::Ko, ["개발", "회고"]).unwrap(), "#개발 #회고");
        assert_eq!(tags_text(Locale::Ko, Vec::<&str>::new()).unwrap(), "");
    }
}
