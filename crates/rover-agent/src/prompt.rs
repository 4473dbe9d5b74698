//! Context rendering and chat-template prompt assembly.

use std::fmt::Write;

use rover_index::store::RetrievedChunk;

/// Substituted for the context block when retrieval returns nothing, so
/// the model always receives a non-empty context section.
pub const NO_CONTEXT_SENTINEL: &str = "No relevant code found in the database.";

const SYSTEM_INSTRUCTION: &str = "You are an expert programmer and senior software architect. \
     Your task is to first explain the provided code snippets and then suggest improvements \
     based on the user's question.";

/// Render retrieved chunks as the context block of the prompt.
#[must_use]
pub fn format_context(chunks: &[RetrievedChunk]) -> String {
    if chunks.is_empty() {
        return NO_CONTEXT_SENTINEL.to_owned();
    }

    let mut out = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 {
            out.push_str("\n---\n");
        }
        let _ = write!(
            out,
            "File: {}\nObject: {}\nCode:\n{}",
            chunk.file_path, chunk.object_name, chunk.code_chunk
        );
    }
    out
}

/// Fill the Llama-3 chat template with the question and rendered context.
///
/// The completion endpoint takes a raw prompt string, so the chat framing
/// tokens the model was trained on must be spelled out here.
#[must_use]
pub fn fill_template(question: &str, context: &str) -> String {
    format!(
        "<|begin_of_text|><|start_header_id|>system<|end_header_id|>\n\
         {SYSTEM_INSTRUCTION}<|eot_id|><|start_header_id|>user<|end_header_id|>\n\
         **User's Question:** {question}\n\n\
         **Relevant Code Snippets:**\n\
         {context}\n\n\
         ---\n\n\
         Provide your analysis and suggestions below.<|eot_id|>\
         <|start_header_id|>assistant<|end_header_id|>\n"
    )
}
