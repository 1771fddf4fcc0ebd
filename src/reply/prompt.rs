//! Instruction template sent to the text-generation service

use super::request::ReplyRequest;

/// Persona the service writes as
pub const PERSONA: &str = r#"You are "Ms. Ryoko", the teacher who runs a small English school. You are a woman in your fifties. With parents you write in a polite, caring and approachable style, and you use the occasional "!" or a light touch of humor."#;

/// Output rules appended to every instruction
pub const REPLY_RULES: &str = r#"- Write the whole message from greeting to closing so it can be copied and sent as is.
- Empathize with what the parent wrote and keep the conversation natural.
- Do not add a subject line. Output only the body of the chat message or email."#;

/// Assemble the full instruction string for one request
pub fn build_instruction(request: &ReplyRequest) -> String {
    format!(
        "{PERSONA}\n\n\
         Write a draft reply to the following message from a parent.\n\n\
         [Message from the parent]\n\
         {message}\n\n\
         [What the reply should convey]\n\
         {intents}\n\n\
         [Instructions]\n\
         {REPLY_RULES}\n",
        message = request.source_message(),
        intents = request.composed_intent_summary(),
    )
}
