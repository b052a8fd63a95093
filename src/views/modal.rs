use serde_json::{json, Value};

use crate::domain::entities::Tag;

use super::entities::{block_id, plain_text, ModalView};
use super::locale::Locale;

pub const CALLBACK_ID: &str = "call_modal";

pub const USER_OPTION_ACTION_ID: &str = "user_option";
pub const USER_ACTION_ID: &str = "selected_users";
pub const TAG_ACTION_ID: &str = "selected_options";
pub const LINK_ACTION_ID: &str = "link";
pub const CONTENT_ACTION_ID: &str = "contents";

/// Radio values of the sharing scope.
pub const SELECTED_USERS_OPTION: &str = "selected_users";
pub const SELECTED_ALL_OPTION: &str = "selected_all";

// Each input block is identified by the action id of its element.
const USER_OPTION_BLOCK_ID: &str = USER_OPTION_ACTION_ID;
const USER_BLOCK_ID: &str = USER_ACTION_ID;

pub fn build_initial_modal(locale: Locale, tags: &[Tag]) -> ModalView {
    let messages = locale.messages();
    let tag_options: Vec<Value> = tags
        .iter()
        .map(|tag| {
            json!({
                "text": plain_text(&tag.name),
                "value": tag.id,
            })
        })
        .collect();
    let individually = json!({
        "text": plain_text(messages.share_individually),
        "value": SELECTED_USERS_OPTION,
    });

    let blocks = vec![
        json!({
            "type": "input",
            "block_id": USER_OPTION_BLOCK_ID,
            "element": {
                "type": "radio_buttons",
                "options": [
                    individually,
                    {
                        "text": plain_text(messages.share_all_members),
                        "value": SELECTED_ALL_OPTION,
                    },
                ],
                "action_id": USER_OPTION_ACTION_ID,
                "initial_option": individually,
            },
            "label": plain_text(messages.blank_label),
            "dispatch_action": true,
        }),
        user_select(locale),
        json!({
            "type": "input",
            "block_id": TAG_ACTION_ID,
            "element": {
                "type": "multi_static_select",
                "placeholder": plain_text(messages.tags_placeholder),
                "options": tag_options,
                "action_id": TAG_ACTION_ID,
            },
            "label": plain_text(messages.blank_label),
        }),
        json!({
            "type": "input",
            "block_id": LINK_ACTION_ID,
            "element": {
                "type": "plain_text_input",
                "action_id": LINK_ACTION_ID,
                "placeholder": plain_text(messages.link_placeholder),
            },
            "label": plain_text(messages.blank_label),
        }),
        json!({ "type": "divider" }),
        json!({
            "type": "input",
            "block_id": CONTENT_ACTION_ID,
            "element": {
                "type": "plain_text_input",
                "multiline": true,
                "action_id": CONTENT_ACTION_ID,
                "placeholder": plain_text(messages.content_placeholder),
            },
            "label": plain_text(messages.content_label),
        }),
    ];

    modal(locale, blocks)
}

/// Rebuilds a rendered modal after the sharing scope changed.
///
/// The user selector lives in the slot right after the scope radio. Sharing
/// with all members empties the slot; sharing individually puts a fresh
/// selector there. Insertion does not check whether the slot already holds a
/// selector. Sharing with all members leaves the blocks unchanged when the
/// slot holds no selector.
pub fn build_updated_modal(
    locale: Locale,
    mut blocks: Vec<Value>,
    is_to_all_users: bool,
) -> ModalView {
    let slot = match blocks
        .iter()
        .position(|block| block_id(block) == Some(USER_OPTION_BLOCK_ID))
    {
        Some(anchor) => anchor + 1,
        None => {
            log::warn!("modal has no sharing scope block, keeping its blocks");
            return modal(locale, blocks);
        }
    };

    if is_to_all_users {
        let holds_selector = blocks.get(slot).and_then(block_id) == Some(USER_BLOCK_ID);
        if holds_selector {
            blocks.remove(slot);
        } else {
            log::debug!("no user selector to remove at slot {}", slot);
        }
    } else {
        blocks.insert(slot, user_select(locale));
    }

    modal(locale, blocks)
}

fn user_select(locale: Locale) -> Value {
    let messages = locale.messages();
    json!({
        "type": "input",
        "block_id": USER_BLOCK_ID,
        "element": {
            "type": "multi_users_select",
            "placeholder": plain_text(messages.users_placeholder),
            "action_id": USER_ACTION_ID,
        },
        "label": plain_text(messages.blank_label),
    })
}

fn modal(locale: Locale, blocks: Vec<Value>) -> ModalView {
    let messages = locale.messages();
    ModalView {
        kind: "modal".to_string(),
        title: plain_text(messages.modal_title),
        submit: plain_text(messages.modal_submit),
        close: json!({
            "type": "plain_text",
            "text": messages.modal_close,
        }),
        callback_id: CALLBACK_ID.to_string(),
        blocks,
    }
}
