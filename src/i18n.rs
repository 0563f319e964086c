//! Site languages and bilingual field selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Languages the public site is published in. Turkish is the primary one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Tr,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Tr, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Language::Tr => "tr",
            Language::En => "en",
        }
    }

    /// Parse a language code. Anything outside the fixed set is rejected.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Pick the English variant of a bilingual field only when English was asked
/// for and the English value is non-empty; Turkish otherwise.
pub fn localized<'a>(lang: Language, tr: &'a str, en: &'a str) -> &'a str {
    if lang == Language::En && !en.is_empty() {
        en
    } else {
        tr
    }
}

/// User-facing strings emitted by the API itself (not stored content).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    EmailRequired,
    AlreadySubscribed,
    Subscribed,
    Resubscribed,
    FillAllFields,
    ContactReceived,
}

impl Message {
    pub fn text(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Message::EmailRequired, Language::Tr) => "E-posta adresi gereklidir.",
            (Message::EmailRequired, Language::En) => "Email address is required.",
            (Message::AlreadySubscribed, Language::Tr) => "Bu e-posta adresi zaten kayıtlı.",
            (Message::AlreadySubscribed, Language::En) => {
                "This email address is already subscribed."
            }
            (Message::Subscribed, Language::Tr) => {
                "Teşekkürler! Bültene başarıyla abone oldunuz."
            }
            (Message::Subscribed, Language::En) => {
                "Thank you! You have successfully subscribed to the newsletter."
            }
            (Message::Resubscribed, Language::Tr) => "Aboneliğiniz yeniden aktif edildi!",
            (Message::Resubscribed, Language::En) => "Your subscription has been reactivated!",
            (Message::FillAllFields, Language::Tr) => "Lütfen tüm alanları doldurun.",
            (Message::FillAllFields, Language::En) => "Please fill in all fields.",
            (Message::ContactReceived, Language::Tr) => {
                "Mesajınız başarıyla gönderildi. En kısa sürede size dönüş yapacağız."
            }
            (Message::ContactReceived, Language::En) => {
                "Your message has been sent. We will get back to you as soon as possible."
            }
        }
    }
}
