use super::Id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookType {
    Educational,
    Reference,
    Research,
    Guide,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookCategory {
    #[serde(default)]
    pub id: Option<Id>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub books_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookReview {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub user: Option<Id>,
    #[serde(default)]
    pub user_name: Option<String>,
    /// 1 to 5.
    pub rating: u8,
    #[serde(default)]
    pub review_text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub id: Option<Id>,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub description: String,
    pub category: Id,
    #[serde(default)]
    pub category_name: Option<String>,
    pub book_type: BookType,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub pdf_file: Option<String>,
    #[serde(default)]
    pub is_available: bool,
    /// Present on detail reads only.
    #[serde(default)]
    pub reviews: Vec<BookReview>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub reviews_count: u64,
    #[serde(default)]
    pub is_bookmarked: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BookQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_type: Option<BookType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Publication year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub category: Id,
    pub book_type: BookType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_type: Option<BookType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBookReview {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBookCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::to_query_pairs;
    use serde_json::json;

    #[test]
    fn test_list_row_without_reviews() {
        let book: Book = serde_json::from_value(json!({
            "id": 1,
            "title": "Clinical Kinesiology",
            "author": "Smith",
            "category": 2,
            "book_type": "reference",
            "average_rating": 4.5,
            "is_bookmarked": true
        }))
        .unwrap();
        assert!(book.reviews.is_empty());
        assert!(book.is_bookmarked);
        assert_eq!(book.book_type, BookType::Reference);
    }

    #[test]
    fn test_query_with_year() {
        let pairs = to_query_pairs(&BookQuery {
            book_type: Some(BookType::Guide),
            year: Some(2019),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("book_type".to_string(), "guide".to_string()),
                ("year".to_string(), "2019".to_string()),
            ]
        );
    }
}
