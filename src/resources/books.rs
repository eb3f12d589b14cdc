use super::{item, item_action};
use crate::client::ApiClient;
use crate::types::book::{
    Book, BookCategory, BookQuery, BookReview, BookUpdate, NewBook, NewBookCategory, NewBookReview,
};
use crate::types::{Acknowledgement, Id, ListResponse};
use crate::Result;

const BOOKS: &str = "/books/";
const CATEGORIES: &str = "/categories/";

pub struct Books<'a> {
    client: &'a ApiClient,
}

impl<'a> Books<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &BookQuery) -> Result<ListResponse<Book>> {
        self.client.get_with(BOOKS, query).await
    }

    pub async fn get(&self, id: Id) -> Result<Book> {
        self.client.get(&item(BOOKS, id)).await
    }

    pub async fn create(&self, book: &NewBook) -> Result<Book> {
        self.client.post(BOOKS, book).await
    }

    pub async fn update(&self, id: Id, update: &BookUpdate) -> Result<Book> {
        self.client.patch(&item(BOOKS, id), update).await
    }

    pub async fn delete(&self, id: Id) -> Result<()> {
        self.client.delete(&item(BOOKS, id)).await
    }

    /// Bookmarking twice is acknowledged, not an error.
    pub async fn bookmark(&self, id: Id) -> Result<Acknowledgement> {
        self.client.post_ack(&item_action(BOOKS, id, "bookmark")).await
    }

    /// `NotFound` when the book was not bookmarked.
    pub async fn remove_bookmark(&self, id: Id) -> Result<()> {
        self.client.delete(&item_action(BOOKS, id, "bookmark")).await
    }

    /// One review per user and book; a second one is `ValidationFailed`.
    pub async fn review(&self, id: Id, review: &NewBookReview) -> Result<BookReview> {
        self.client.post(&item_action(BOOKS, id, "review"), review).await
    }

    pub async fn reviews(&self, id: Id) -> Result<ListResponse<BookReview>> {
        self.client.get(&item_action(BOOKS, id, "reviews")).await
    }

    pub async fn categories(&self) -> Result<ListResponse<BookCategory>> {
        self.client.get(CATEGORIES).await
    }

    pub async fn create_category(&self, category: &NewBookCategory) -> Result<BookCategory> {
        self.client.post(CATEGORIES, category).await
    }
}
