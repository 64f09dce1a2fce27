//! Chat turn persistence into the `ai_messages` table

use async_trait::async_trait;

use super::ConversationStore;
use super::Database;
use crate::Result;

#[async_trait]
impl ConversationStore for Database {
    async fn save_turns(
        &self,
        conversation_id: &str,
        user_message: &str,
        assistant_message: &str,
    ) -> Result<()> {
        // Both turns of the exchange are appended in one statement so a
        // partial write can't leave an assistant reply without its question.
        sqlx::query(
            r"
            INSERT INTO ai_messages (conversation_id, role, content)
            VALUES ($1::uuid, 'user', $2), ($1::uuid, 'assistant', $3)
            ",
        )
        .bind(conversation_id)
        .bind(user_message)
        .bind(assistant_message)
        .execute(self.pool())
        .await?;

        Ok(())
    }
}
