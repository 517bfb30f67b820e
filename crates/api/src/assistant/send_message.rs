use crate::error::GlucomateError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use glucomate_api_structs::send_assistant_message::{APIResponse, RequestBody};
use glucomate_domain::quick_reply;
use glucomate_infra::GlucomateContext;
use tracing::warn;

const SYSTEM_PREAMBLE: &str = "You are a diabetes management assistant. Important:\n\
- Always state \"I am not a doctor\" before medical advice\n\
- Cite sources from ADA (American Diabetes Association)\n\
- Never suggest altering medication without doctor consultation";

const FALLBACK_REPLY: &str = "I'm having trouble connecting. Please try again later.";

pub async fn send_assistant_message_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GlucomateContext>,
) -> Result<HttpResponse, GlucomateError> {
    protect_route(&http_req, &ctx).await?;

    let usecase = SendAssistantMessageUseCase {
        message: body.into_inner().message,
    };

    execute(usecase, &ctx)
        .await
        .map(|reply| HttpResponse::Ok().json(APIResponse { reply }))
        .map_err(|_| GlucomateError::InternalError)
}

/// Answers a chat message: the quick-reply tables first, then the LLM
/// provider. A provider failure degrades to a fixed fallback reply so the
/// chat surface never errors out.
#[derive(Debug)]
struct SendAssistantMessageUseCase {
    pub message: String,
}

#[derive(Debug)]
enum UseCaseErrors {}

#[async_trait::async_trait(?Send)]
impl UseCase for SendAssistantMessageUseCase {
    type Response = String;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "SendAssistantMessage";

    async fn execute(&mut self, ctx: &GlucomateContext) -> Result<Self::Response, Self::Errors> {
        if let Some(reply) = quick_reply(&self.message) {
            return Ok(reply.to_string());
        }

        let prompt = format!(
            "[System Prompt] {}\n[User Question] {}",
            SYSTEM_PREAMBLE, self.message
        );
        match ctx.assistant.complete(&prompt).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                warn!("Assistant provider failed: {}", e);
                Ok(FALLBACK_REPLY.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glucomate_infra::CannedAssistantProvider;
    use std::sync::Arc;

    #[actix_web::test]
    async fn quick_replies_bypass_the_provider() {
        let mut ctx = GlucomateContext::create_inmemory();
        let provider = Arc::new(CannedAssistantProvider::new());
        ctx.assistant = provider.clone();

        let usecase = SendAssistantMessageUseCase {
            message: "hi".into(),
        };
        let reply = execute(usecase, &ctx).await.unwrap();
        assert_eq!(
            reply,
            "Hello! I'm your diabetes assistant. How can I help today?"
        );
        assert!(provider.prompts().is_empty());
    }

    #[actix_web::test]
    async fn other_messages_are_sent_to_the_provider_with_the_preamble() {
        let mut ctx = GlucomateContext::create_inmemory();
        let provider = Arc::new(CannedAssistantProvider::with_reply(
            "Carbs vary by apple size.".into(),
        ));
        ctx.assistant = provider.clone();

        let usecase = SendAssistantMessageUseCase {
            message: "how many carbs in an apple?".into(),
        };
        let reply = execute(usecase, &ctx).await.unwrap();
        assert_eq!(reply, "Carbs vary by apple size.");

        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("how many carbs in an apple?"));
        assert!(prompts[0].contains("I am not a doctor"));
    }
}
