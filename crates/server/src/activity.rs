//! Bot Framework activity wire types.
//!
//! Only the fields the bot reads or writes are modeled; everything else in
//! an inbound activity is ignored.

use dialog::{ActionKind, CardAction, CardImage, OutboundMessage, PresentationCard};
use serde::{Deserialize, Serialize};

pub const MESSAGE_TYPE: &str = "message";
pub const TYPING_TYPE: &str = "typing";
pub const HERO_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.hero";
pub const CAROUSEL_LAYOUT: &str = "carousel";
pub const EXPECT_REPLIES_MODE: &str = "expectReplies";

// =============================================================================
// Inbound
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationAccount {
    pub id: String,
}

/// An activity posted to the webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub from: ChannelAccount,
    pub conversation: ConversationAccount,
    #[serde(default)]
    pub recipient: Option<ChannelAccount>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub service_url: Option<String>,
    #[serde(default)]
    pub delivery_mode: Option<String>,
}

impl Activity {
    pub fn is_message(&self) -> bool {
        self.kind == MESSAGE_TYPE
    }

    /// Whether the channel reads replies from the webhook response body
    pub fn expects_replies(&self) -> bool {
        self.delivery_mode.as_deref() == Some(EXPECT_REPLIES_MODE)
    }
}

// =============================================================================
// Outbound
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCardAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCardImage {
    pub url: String,
    pub tap: WireCardAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroCard {
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<WireCardImage>,
    pub buttons: Vec<WireCardAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content_type: String,
    pub content: HeroCard,
}

/// An activity sent back to the channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyActivity {
    #[serde(rename = "type")]
    pub kind: String,
    pub conversation: ConversationAccount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_layout: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl ReplyActivity {
    /// Address a reply to the sender of `inbound`, swapping from/recipient
    fn addressed_to(inbound: &Activity, kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            conversation: inbound.conversation.clone(),
            from: inbound.recipient.clone(),
            recipient: Some(inbound.from.clone()),
            reply_to_id: inbound.id.clone(),
            text: None,
            attachment_layout: None,
            attachments: Vec::new(),
        }
    }

    pub fn from_outbound(message: &OutboundMessage, inbound: &Activity) -> Self {
        match message {
            OutboundMessage::Text(text) => Self {
                text: Some(text.clone()),
                ..Self::addressed_to(inbound, MESSAGE_TYPE)
            },
            OutboundMessage::Typing => Self::addressed_to(inbound, TYPING_TYPE),
            OutboundMessage::Carousel(cards) => Self {
                attachment_layout: Some(CAROUSEL_LAYOUT.to_string()),
                attachments: cards.iter().map(Attachment::hero).collect(),
                ..Self::addressed_to(inbound, MESSAGE_TYPE)
            },
        }
    }
}

impl Attachment {
    fn hero(card: &PresentationCard) -> Self {
        Self {
            content_type: HERO_CARD_CONTENT_TYPE.to_string(),
            content: HeroCard {
                title: card.title.clone(),
                text: card.text.clone(),
                images: card.images.iter().map(WireCardImage::from).collect(),
                buttons: card.buttons.iter().map(WireCardAction::from).collect(),
            },
        }
    }
}

impl From<&CardAction> for WireCardAction {
    fn from(action: &CardAction) -> Self {
        let kind = match action.kind {
            ActionKind::OpenUrl => "openUrl",
            ActionKind::ShowImage => "showImage",
        };
        Self {
            kind: kind.to_string(),
            title: action.title.clone(),
            value: action.value.clone(),
        }
    }
}

impl From<&CardImage> for WireCardImage {
    fn from(image: &CardImage) -> Self {
        Self {
            url: image.url.clone(),
            tap: WireCardAction::from(&image.tap),
        }
    }
}

/// Body returned from the webhook: every activity the turn produced, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub activities: Vec<ReplyActivity>,
}
