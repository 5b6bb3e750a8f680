use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::MessageAttributeValue;
use aws_sdk_sqs::Client;
use std::time::Instant;

use crate::api::error;
use crate::constants::MESSAGE_TYPE_ATTRIBUTE;
use crate::modules::job::model::QueuePayload;
use crate::modules::job::queue::JobQueue;

#[derive(Clone)]
pub struct SqsJobQueue {
    client: Client,
    queue_url: String,
}

impl SqsJobQueue {
    pub fn new(client: Client, queue_url: String) -> Self {
        Self { client, queue_url }
    }
}

#[async_trait::async_trait]
impl JobQueue for SqsJobQueue {
    async fn enqueue(&self, payload: &QueuePayload) -> Result<String, error::SystemError> {
        let start = Instant::now();

        let message_type = MessageAttributeValue::builder()
            .data_type("String")
            .string_value(payload.message_type)
            .build()
            .map_err(|e| error::SystemError::queue(e.to_string()))?;

        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(&payload.body)
            .message_attributes(MESSAGE_TYPE_ATTRIBUTE, message_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %DisplayErrorContext(&e),
                    queue = %self.queue_url,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "SQS send_message failed"
                );
                error::SystemError::queue(DisplayErrorContext(&e).to_string())
            })?;

        let message_id = output
            .message_id()
            .map(str::to_string)
            .ok_or_else(|| error::SystemError::queue("SQS did not return a message id"))?;

        tracing::info!(
            queue = %self.queue_url,
            message_id = %message_id,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "SQS message sent"
        );

        Ok(message_id)
    }
}
