use crate::{
    error::{AppError, AppResult},
    models::{
        article_image, article_paragraph::{self, ParagraphType},
        Article, ArticleImage, ArticleImageModel, ArticleParagraph, ArticleParagraphModel,
    },
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder,
};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use utoipa::ToSchema;
use validator::Validate;

/// One block of an article body, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Paragraph(ArticleParagraphModel),
    Image(ArticleImageModel),
}

/// Interleave paragraphs and images into reading order.
///
/// Every paragraph is followed by the images anchored to it; images without
/// an anchor (or anchored to a paragraph that is not part of this body) come
/// last. Both lists are ordered by `sort_order`, ties broken by id.
pub fn assemble_content(
    mut paragraphs: Vec<ArticleParagraphModel>,
    mut images: Vec<ArticleImageModel>,
) -> Vec<ContentItem> {
    paragraphs.sort_by_key(|p| (p.sort_order, p.id));
    images.sort_by_key(|i| (i.sort_order, i.id));

    let paragraph_ids: HashSet<i32> = paragraphs.iter().map(|p| p.id).collect();
    let mut anchored: HashMap<i32, Vec<ArticleImageModel>> = HashMap::new();
    let mut trailing = Vec::new();

    for image in images {
        match image.after_paragraph_id {
            Some(id) if paragraph_ids.contains(&id) => anchored.entry(id).or_default().push(image),
            _ => trailing.push(image),
        }
    }

    let mut items = Vec::with_capacity(paragraph_ids.len() + trailing.len());
    for paragraph in paragraphs {
        let following = anchored.remove(&paragraph.id).unwrap_or_default();
        items.push(ContentItem::Paragraph(paragraph));
        items.extend(following.into_iter().map(ContentItem::Image));
    }
    items.extend(trailing.into_iter().map(ContentItem::Image));
    items
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ParagraphDraft {
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub paragraph_type: ParagraphType,
    /// Markdown for text/quote paragraphs, raw source for code paragraphs
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub content_en: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub heading_text: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub heading_text_en: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub code_language: String,
}

impl ParagraphDraft {
    fn check(&self) -> AppResult<()> {
        let has_body = match self.paragraph_type {
            ParagraphType::Heading => !self.heading_text.trim().is_empty(),
            _ => !self.content.trim().is_empty(),
        };
        if has_body {
            Ok(())
        } else {
            Err(AppError::Validation("Paragraph has no content".to_string()))
        }
    }

    fn apply(self, active: &mut article_paragraph::ActiveModel) {
        active.sort_order = Set(self.sort_order);
        active.paragraph_type = Set(self.paragraph_type);
        active.content = Set(self.content);
        active.content_en = Set(self.content_en);
        active.heading_text = Set(self.heading_text);
        active.heading_text_en = Set(self.heading_text_en);
        active.code_language = Set(self.code_language);
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ImageDraft {
    /// Stored path returned by the content image upload endpoint
    #[validate(length(min = 1, max = 255))]
    pub image: String,
    #[validate(length(min = 1, max = 200))]
    pub alt_text: String,
    #[serde(default)]
    #[validate(length(max = 300))]
    pub caption: String,
    #[serde(default)]
    pub sort_order: i32,
    /// Paragraph of the same article to show this image after
    pub after_paragraph_id: Option<i32>,
}

impl ImageDraft {
    fn apply(self, active: &mut article_image::ActiveModel) {
        active.image = Set(self.image);
        active.alt_text = Set(self.alt_text);
        active.caption = Set(self.caption);
        active.sort_order = Set(self.sort_order);
        active.after_paragraph_id = Set(self.after_paragraph_id);
    }
}

pub struct ArticleContentService {
    db: DatabaseConnection,
}

impl ArticleContentService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn paragraphs(&self, article_id: i32) -> AppResult<Vec<ArticleParagraphModel>> {
        let paragraphs = ArticleParagraph::find()
            .filter(article_paragraph::Column::ArticleId.eq(article_id))
            .order_by_asc(article_paragraph::Column::SortOrder)
            .order_by_asc(article_paragraph::Column::Id)
            .all(&self.db)
            .await?;
        Ok(paragraphs)
    }

    pub async fn images(&self, article_id: i32) -> AppResult<Vec<ArticleImageModel>> {
        let images = ArticleImage::find()
            .filter(article_image::Column::ArticleId.eq(article_id))
            .order_by_asc(article_image::Column::SortOrder)
            .order_by_asc(article_image::Column::Id)
            .all(&self.db)
            .await?;
        Ok(images)
    }

    /// The article body in reading order.
    pub async fn content(&self, article_id: i32) -> AppResult<Vec<ContentItem>> {
        let paragraphs = self.paragraphs(article_id).await?;
        let images = self.images(article_id).await?;
        Ok(assemble_content(paragraphs, images))
    }

    pub async fn add_paragraph(
        &self,
        article_id: i32,
        draft: ParagraphDraft,
    ) -> AppResult<ArticleParagraphModel> {
        draft.check()?;
        self.ensure_article_exists(article_id).await?;

        let mut active = article_paragraph::ActiveModel {
            article_id: Set(article_id),
            ..Default::default()
        };
        draft.apply(&mut active);
        Ok(active.insert(&self.db).await?)
    }

    pub async fn update_paragraph(
        &self,
        id: i32,
        draft: ParagraphDraft,
    ) -> AppResult<ArticleParagraphModel> {
        draft.check()?;
        let existing = ArticleParagraph::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: article_paragraph::ActiveModel = existing.into();
        draft.apply(&mut active);
        Ok(active.update(&self.db).await?)
    }

    /// Delete a paragraph. Images anchored to it move to the end of the body.
    pub async fn delete_paragraph(&self, id: i32) -> AppResult<()> {
        let existing = ArticleParagraph::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        ArticleImage::update_many()
            .col_expr(
                article_image::Column::AfterParagraphId,
                Expr::value(Option::<i32>::None),
            )
            .filter(article_image::Column::AfterParagraphId.eq(existing.id))
            .exec(&self.db)
            .await?;

        ArticleParagraph::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn add_image(
        &self,
        article_id: i32,
        draft: ImageDraft,
    ) -> AppResult<ArticleImageModel> {
        self.ensure_article_exists(article_id).await?;
        self.ensure_anchor_belongs(article_id, draft.after_paragraph_id)
            .await?;

        let mut active = article_image::ActiveModel {
            article_id: Set(article_id),
            ..Default::default()
        };
        draft.apply(&mut active);
        Ok(active.insert(&self.db).await?)
    }

    pub async fn update_image(&self, id: i32, draft: ImageDraft) -> AppResult<ArticleImageModel> {
        let existing = ArticleImage::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;
        self.ensure_anchor_belongs(existing.article_id, draft.after_paragraph_id)
            .await?;

        let mut active: article_image::ActiveModel = existing.into();
        draft.apply(&mut active);
        Ok(active.update(&self.db).await?)
    }

    pub async fn delete_image(&self, id: i32) -> AppResult<()> {
        let result = ArticleImage::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Remove the whole body of an article.
    pub async fn delete_all_for(&self, article_id: i32) -> AppResult<()> {
        ArticleImage::delete_many()
            .filter(article_image::Column::ArticleId.eq(article_id))
            .exec(&self.db)
            .await?;
        ArticleParagraph::delete_many()
            .filter(article_paragraph::Column::ArticleId.eq(article_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn ensure_article_exists(&self, article_id: i32) -> AppResult<()> {
        Article::find_by_id(article_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }

    async fn ensure_anchor_belongs(&self, article_id: i32, anchor: Option<i32>) -> AppResult<()> {
        let Some(paragraph_id) = anchor else {
            return Ok(());
        };
        let paragraph = ArticleParagraph::find_by_id(paragraph_id)
            .one(&self.db)
            .await?;
        match paragraph {
            Some(p) if p.article_id == article_id => Ok(()),
            _ => Err(AppError::Validation(format!(
                "Paragraph {} does not belong to article {}",
                paragraph_id, article_id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(id: i32, sort_order: i32) -> ArticleParagraphModel {
        ArticleParagraphModel {
            id,
            article_id: 1,
            sort_order,
            paragraph_type: ParagraphType::Text,
            content: format!("p{}", id),
            content_en: String::new(),
            heading_text: String::new(),
            heading_text_en: String::new(),
            code_language: String::new(),
        }
    }

    fn image(id: i32, sort_order: i32, after: Option<i32>) -> ArticleImageModel {
        ArticleImageModel {
            id,
            article_id: 1,
            image: format!("i{}.jpg", id),
            alt_text: "alt".to_string(),
            caption: String::new(),
            sort_order,
            after_paragraph_id: after,
        }
    }

    fn labels(items: &[ContentItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                ContentItem::Paragraph(p) => format!("P{}", p.id),
                ContentItem::Image(i) => format!("I{}", i.id),
            })
            .collect()
    }

    #[test]
    fn anchored_images_follow_their_paragraph() {
        let items = assemble_content(
            vec![paragraph(1, 0), paragraph(2, 1), paragraph(3, 2)],
            vec![image(1, 0, Some(1)), image(2, 1, None)],
        );
        assert_eq!(labels(&items), ["P1", "I1", "P2", "P3", "I2"]);
    }

    #[test]
    fn ordering_uses_sort_order_then_id() {
        let items = assemble_content(
            vec![paragraph(5, 1), paragraph(4, 1), paragraph(9, 0)],
            vec![image(3, 2, Some(4)), image(2, 1, Some(4)), image(7, 0, None), image(6, 0, None)],
        );
        assert_eq!(labels(&items), ["P9", "P4", "I2", "I3", "P5", "I6", "I7"]);
    }

    #[test]
    fn foreign_anchor_is_treated_as_unanchored() {
        let items = assemble_content(vec![paragraph(1, 0)], vec![image(1, 0, Some(42))]);
        assert_eq!(labels(&items), ["P1", "I1"]);
    }

    #[test]
    fn images_only_body() {
        let items = assemble_content(vec![], vec![image(2, 0, None), image(1, 0, None)]);
        assert_eq!(labels(&items), ["I1", "I2"]);
    }

    #[test]
    fn heading_needs_heading_text() {
        let draft = ParagraphDraft {
            sort_order: 0,
            paragraph_type: ParagraphType::Heading,
            content: String::new(),
            content_en: String::new(),
            heading_text: "Giriş".to_string(),
            heading_text_en: String::new(),
            code_language: String::new(),
        };
        assert!(draft.check().is_ok());

        let empty = ParagraphDraft {
            heading_text: " ".to_string(),
            ..draft
        };
        assert!(empty.check().is_err());
    }
}
