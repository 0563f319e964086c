pub mod article;
pub mod article_image;
pub mod article_paragraph;
pub mod category;
pub mod contact_message;
pub mod cookie_consent;
pub mod cookie_policy;
pub mod homepage_seo;
pub mod newsletter_subscriber;

pub use article::{Entity as Article, Model as ArticleModel};
pub use article_image::{Entity as ArticleImage, Model as ArticleImageModel};
pub use article_paragraph::{Entity as ArticleParagraph, Model as ArticleParagraphModel};
pub use category::{Entity as Category, Model as CategoryModel};
pub use contact_message::{Entity as ContactMessage, Model as ContactMessageModel};
pub use cookie_consent::{Entity as CookieConsent, Model as CookieConsentModel};
pub use cookie_policy::{Entity as CookiePolicy, Model as CookiePolicyModel};
pub use homepage_seo::{Entity as HomepageSeo, Model as HomepageSeoModel};
pub use newsletter_subscriber::{Entity as NewsletterSubscriber, Model as NewsletterSubscriberModel};
