// Wish mailbox payloads and client-side validation.
//
// Request bodies can only be built through the validators, so nothing
// reaches the network without passing them.

use crate::constants::{
    DISPLAY_NAME_MAX_CHARS, SEARCH_MIN_CHARS, UNREAD_BADGE_CAP, WISH_LIMIT_MAX, WISH_MAX_CHARS,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Vui lòng chọn người nhận")]
    MissingReceiver,
    #[error("Vui lòng nhập lời chúc")]
    EmptyMessage,
    #[error("Lời chúc tối đa {0} ký tự")]
    MessageTooLong(usize),
    #[error("Tên hiển thị tối đa {0} ký tự")]
    DisplayNameTooLong(usize),
    #[error("Thiếu thông tin")]
    MissingLimitFields,
    #[error("Giới hạn không hợp lệ")]
    InvalidLimit,
    #[error("Giới hạn phải từ 0 đến {0}")]
    LimitOutOfRange(u32),
}

impl ValidationError {
    pub fn status_text(&self) -> String {
        format!("❌ {}", self)
    }
}

/// `max_send` is a number, or the string `"unlimited"` for superadmins.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SendLimit {
    Limited(i64),
    Unlimited(String),
}

impl Default for SendLimit {
    fn default() -> Self {
        SendLimit::Limited(7)
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct WishStats {
    pub sent_count: i64,
    pub max_send: SendLimit,
    pub can_send_more: bool,
    pub received_count: u32,
    pub unread_count: u32,
    pub is_superadmin: bool,
}

impl WishStats {
    /// Text for the "remaining wishes" badge on the send button.
    pub fn remaining_label(&self) -> String {
        match (&self.max_send, self.is_superadmin) {
            (_, true) | (SendLimit::Unlimited(_), _) => "∞".to_string(),
            (SendLimit::Limited(max), false) => (max - self.sent_count).to_string(),
        }
    }
}

/// Unread badge text; `None` hides the badge.
pub fn unread_badge(count: u32) -> Option<String> {
    match count {
        0 => None,
        c if c > UNREAD_BADGE_CAP => Some(format!("{}+", UNREAD_BADGE_CAP)),
        c => Some(c.to_string()),
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Wish {
    pub id: u64,
    pub sender_name: String,
    #[serde(default)]
    pub is_from_superadmin: bool,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct WishList {
    pub wishes: Vec<Wish>,
    pub unread_count: u32,
}

/// Flag the wish with `id` as read. The list may have been reloaded since
/// the wish was opened, so it is looked up by id rather than position.
pub fn mark_read(wishes: &mut [Wish], id: u64) -> bool {
    match wishes.iter_mut().find(|w| w.id == id) {
        Some(w) => {
            w.is_read = true;
            true
        }
        None => false,
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UserHit {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub can_send: bool,
}

impl UserHit {
    pub fn label(&self) -> String {
        let name = if self.display_name.is_empty() {
            &self.username
        } else {
            &self.display_name
        };
        let note = if self.can_send { "" } else { " (Đã gửi)" };
        format!("{} (@{}){}", name, self.username, note)
    }
}

/// Search results; this endpoint has no `success` envelope.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserSearch {
    pub users: Vec<UserHit>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserLimit {
    pub user_id: u64,
    pub username: String,
    pub max_wishes: u32,
    pub sent_count: u32,
}

/// Trimmed query when it is long enough to send to the server.
pub fn search_query(raw: &str) -> Option<&str> {
    let q = raw.trim();
    (q.chars().count() >= SEARCH_MIN_CHARS).then_some(q)
}

fn checked_message(raw: &str) -> Result<String, ValidationError> {
    let message = raw.trim();
    if message.is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    if message.chars().count() > WISH_MAX_CHARS {
        return Err(ValidationError::MessageTooLong(WISH_MAX_CHARS));
    }
    Ok(message.to_string())
}

/// Form state of the send-wish modal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WishDraft {
    pub receiver_id: Option<u64>,
    pub message: String,
    pub is_broadcast: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SendWishRequest {
    receiver_id: Option<u64>,
    message: String,
    is_broadcast: bool,
}

impl SendWishRequest {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl WishDraft {
    pub fn validate(&self) -> Result<SendWishRequest, ValidationError> {
        if !self.is_broadcast && self.receiver_id.is_none() {
            return Err(ValidationError::MissingReceiver);
        }
        let message = checked_message(&self.message)?;
        Ok(SendWishRequest {
            receiver_id: self.receiver_id,
            message,
            is_broadcast: self.is_broadcast,
        })
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SetLimitRequest {
    user_id: u64,
    max_wishes: u32,
}

impl SetLimitRequest {
    pub fn max_wishes(&self) -> u32 {
        self.max_wishes
    }
}

pub fn validate_limit(user_id: Option<u64>, raw_limit: &str) -> Result<SetLimitRequest, ValidationError> {
    let raw = raw_limit.trim();
    let user_id = match user_id {
        Some(id) if !raw.is_empty() => id,
        _ => return Err(ValidationError::MissingLimitFields),
    };
    let limit: i64 = raw.parse().map_err(|_| ValidationError::InvalidLimit)?;
    if !(0..=WISH_LIMIT_MAX as i64).contains(&limit) {
        return Err(ValidationError::LimitOutOfRange(WISH_LIMIT_MAX));
    }
    Ok(SetLimitRequest {
        user_id,
        max_wishes: limit as u32,
    })
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct MarkReadRequest {
    pub wish_id: u64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SupporterGreetingRequest {
    message: String,
    display_name: String,
}

pub fn validate_supporter_greeting(
    display_name: &str,
    message: &str,
) -> Result<SupporterGreetingRequest, ValidationError> {
    let message = checked_message(message)?;
    let display_name = display_name.trim();
    if display_name.chars().count() > DISPLAY_NAME_MAX_CHARS {
        return Err(ValidationError::DisplayNameTooLong(DISPLAY_NAME_MAX_CHARS));
    }
    Ok(SupporterGreetingRequest {
        message,
        display_name: display_name.to_string(),
    })
}
