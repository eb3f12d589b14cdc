use super::{item, item_action};
use crate::client::ApiClient;
use crate::transport::MultipartPayload;
use crate::types::chat::{Attachment, Conversation, Message, NewConversation, NewMessage};
use crate::types::{Id, ListResponse};
use crate::Result;
use bytes::Bytes;

const CONVERSATIONS: &str = "/conversations/";
const MESSAGES: &str = "/messages/";

pub struct Chat<'a> {
    client: &'a ApiClient,
}

impl<'a> Chat<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn conversations(&self) -> Result<ListResponse<Conversation>> {
        self.client.get(CONVERSATIONS).await
    }

    /// The caller is added to `participants` by the backend.
    pub async fn create_conversation(&self, conversation: &NewConversation) -> Result<Conversation> {
        self.client.post(CONVERSATIONS, conversation).await
    }

    pub async fn conversation(&self, id: Id) -> Result<Conversation> {
        self.client.get(&item(CONVERSATIONS, id)).await
    }

    pub async fn delete_conversation(&self, id: Id) -> Result<()> {
        self.client.delete(&item(CONVERSATIONS, id)).await
    }

    /// Oldest first. Reading marks the other side's messages as read.
    pub async fn messages(&self, conversation_id: Id) -> Result<ListResponse<Message>> {
        self.client
            .get(&item_action(CONVERSATIONS, conversation_id, "messages"))
            .await
    }

    pub async fn send_message(&self, conversation_id: Id, message: &NewMessage) -> Result<Message> {
        self.client
            .post(&item_action(CONVERSATIONS, conversation_id, "messages"), message)
            .await
    }

    /// Attach a file to a message the caller sent. Sent as multipart field `file`.
    pub async fn upload_attachment(
        &self,
        message_id: Id,
        file_name: &str,
        contents: impl Into<Bytes>,
        mime: Option<&str>,
    ) -> Result<Attachment> {
        let payload = MultipartPayload::new().file("file", file_name, contents, mime);
        self.client
            .upload(&item_action(MESSAGES, message_id, "attachments"), payload)
            .await
    }
}
