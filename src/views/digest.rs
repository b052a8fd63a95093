use serde_json::{json, Value};

use crate::domain::entities::Link;

use super::entities::{context, divider, section, MessageView};
use super::locale::{render, Locale};
use super::share_message::mentions;
use super::{short_id, Error};

pub const CONTENT_PREVIEW_LENGTH: usize = 80;

/// Links the caller shared, with who they went to.
pub fn build_outgoing_links_digest(
    locale: Locale,
    links: &[Link],
    total_recipient_count: usize,
) -> Result<MessageView, Error> {
    let messages = locale.messages();
    let mut blocks = Vec::with_capacity(links.len() * 3);
    for link in links.iter() {
        let recipients = if link.shared_users.len() == total_recipient_count {
            messages.everyone.to_string()
        } else {
            render(
                messages.mentioned_users,
                json!({
                    "mentions": mentions(
                        link.shared_users.iter().map(|user| user.slack_user_id.as_str())
                    )
                }),
            )?
        };
        let attribution = render(
            messages.outgoing_attribution,
            json!({ "recipients": recipients }),
        )?;
        let date = locale.format_date(link.created_at, messages.outgoing_date);
        blocks.extend(link_blocks(locale, link, &date, &attribution)?);
    }
    wrap(locale, blocks, messages.outgoing_empty)
}

/// Links shared with the caller, with who shared them.
pub fn build_incoming_links_digest(locale: Locale, links: &[Link]) -> Result<MessageView, Error> {
    let messages = locale.messages();
    let mut blocks = Vec::with_capacity(links.len() * 3);
    for link in links.iter() {
        let attribution = render(
            messages.shared_by,
            json!({ "user_id": link.sharing_user.slack_user_id }),
        )?;
        let date = locale.format_date(link.created_at, messages.incoming_date);
        blocks.extend(link_blocks(locale, link, &date, &attribution)?);
    }
    wrap(locale, blocks, messages.incoming_empty)
}

/// First [`CONTENT_PREVIEW_LENGTH`] characters of the content. The ellipsis
/// follows whenever the preview is that long, including content of exactly
/// that length.
pub fn preview(locale: Locale, content: &str) -> String {
    let mut kept: String = content.chars().take(CONTENT_PREVIEW_LENGTH).collect();
    if kept.chars().count() == CONTENT_PREVIEW_LENGTH {
        kept.push_str(locale.messages().ellipsis);
    }
    kept
}

fn link_blocks(
    locale: Locale,
    link: &Link,
    date: &str,
    attribution: &str,
) -> Result<[Value; 3], Error> {
    let messages = locale.messages();
    Ok([
        context(&render(
            messages.short_id,
            json!({ "id": short_id::encode(&link.id) }),
        )?),
        section(&render(
            messages.digest_entry,
            json!({
                "date": date,
                "attribution": attribution,
                "content": preview(locale, &link.content),
                "url": link.url,
                "title": messages.default_link_title,
            }),
        )?),
        divider(),
    ])
}

fn wrap(locale: Locale, blocks: Vec<Value>, empty_message: &str) -> Result<MessageView, Error> {
    if !blocks.is_empty() {
        return Ok(MessageView::blocks(blocks));
    }
    let text = render(
        locale.messages().digest_empty,
        json!({ "message": empty_message }),
    )?;
    Ok(MessageView::blocks(vec![section(&text)]))
}
