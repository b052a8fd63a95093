use chrono::{DateTime, Utc};
use chrono_tz::{Asia, Tz};
use handlebars::Handlebars;
use once_cell::sync::Lazy;

use super::Error;

/// Every user-facing string of the app. Interpolated entries are handlebars
/// templates; date entries are chrono format strings.
pub struct Messages {
    pub modal_title: &'static str,
    pub modal_submit: &'static str,
    pub modal_close: &'static str,
    pub share_individually: &'static str,
    pub share_all_members: &'static str,
    pub blank_label: &'static str,
    pub users_placeholder: &'static str,
    pub tags_placeholder: &'static str,
    pub link_placeholder: &'static str,
    pub content_placeholder: &'static str,
    pub content_label: &'static str,

    pub short_id: &'static str,
    pub share_request: &'static str,
    pub shared_by: &'static str,
    pub share_content: &'static str,
    pub default_link_title: &'static str,
    pub everyone: &'static str,
    pub mentioned_users: &'static str,
    pub tag: &'static str,

    pub outgoing_date: &'static str,
    pub incoming_date: &'static str,
    pub outgoing_attribution: &'static str,
    pub digest_entry: &'static str,
    pub digest_empty: &'static str,
    pub outgoing_empty: &'static str,
    pub incoming_empty: &'static str,
    pub ellipsis: &'static str,

    pub command_usage: &'static str,
    pub command_failure: &'static str,
}

static KO: Messages = Messages {
    modal_title: "Zettel",
    modal_submit: "제텔로 공유하기",
    modal_close: "닫기",
    share_individually: "개별 공유하기",
    share_all_members: "채널 멤버 전체에게 공유하기",
    blank_label: " ",
    users_placeholder: "누구와 정보를 공유 할까요?",
    tags_placeholder: "태그로 정보를 분류해 보세요",
    link_placeholder: "공유할 링크를 입력해 주세요",
    content_placeholder: "생각을 공유하고 팀원들과 이야기 나눠보세요!",
    content_label: "공유하고 싶은 이유는 무엇인가요?",

    short_id: "ID: *{{id}}*",
    share_request: "*{{mentions}} 이거 같이 볼까요? 👀*",
    shared_by: "<@{{user_id}}>님이 공유했어요",
    share_content: "{{content}} \n\n*<{{url}}|👉 {{title}}>*",
    default_link_title: "지금 보러가기",
    everyone: "모두",
    mentioned_users: "{{mentions}}님",
    tag: "#{{name}}",

    outgoing_date: "📘 %y년 %m월 %d일",
    incoming_date: "📙 %y년 %m월 %d일",
    outgoing_attribution: "{{recipients}}에게 공유했어요",
    digest_entry: "*{{date}}에 {{attribution}}*\n{{content}}\n*<{{url}}|{{title}}>*\n\n",
    digest_empty: "{{message}}\n\n",
    outgoing_empty: "공유한 링크가 없습니다",
    incoming_empty: "공유받은 링크가 없습니다",
    ellipsis: "...",

    command_usage: "`/zettel sent` 공유한 링크 보기\n`/zettel received` 공유받은 링크 보기",
    command_failure: "링크를 불러오지 못했어요. 잠시 후 다시 시도해 주세요.",
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Locale {
    #[default]
    Ko,
}

impl Locale {
    pub fn messages(&self) -> &'static Messages {
        match self {
            Locale::Ko => &KO,
        }
    }

    pub fn timezone(&self) -> Tz {
        match self {
            Locale::Ko => Asia::Seoul,
        }
    }

    pub fn format_date(&self, date: DateTime<Utc>, format: &str) -> String {
        date.with_timezone(&self.timezone()).format(format).to_string()
    }
}

// Slack mrkdwn relies on `<` and `>`, so nothing is HTML-escaped.
static HANDLEBARS: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    registry
});

pub fn render(template: &str, context: serde_json::Value) -> Result<String, Error> {
    HANDLEBARS
        .render_template(template, &context)
        .map_err(|err| {
            log::error!("could not render template {}: {}", template, err);
            Error::RenderTemplate
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn it_should_not_escape_slack_mentions() {
        let text = render(
            Locale::Ko.messages().shared_by,
            json!({ "user_id": "U0001" }),
        )
        .unwrap();

        assert_eq!(text, "<@U0001>님이 공유했어요");
    }

    #[test]
    fn it_should_format_dates_in_the_locale_timezone() {
        // 23:30 UTC is already the next day in Seoul
        let date = Utc.with_ymd_and_hms(2023, 12, 31, 23, 30, 0).unwrap();

        assert_eq!(
            Locale::Ko.format_date(date, Locale::Ko.messages().outgoing_date),
            "📘 24년 01월 01일"
        );
    }
}
