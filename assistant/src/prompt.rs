const GENERAL_PROMPT: &str = "You are a helpful AI assistant. Answer the user's question clearly and accurately.";

/// Builds the system instruction for one chat turn.
///
/// With document text, the model is told to answer from the document and to say so when the
/// answer is not there. The document is cut to `char_budget` characters first.
pub fn build_system_prompt(document_text: &str, char_budget: usize) -> String {
    if document_text.trim().is_empty() {
        return GENERAL_PROMPT.to_string();
    }

    let document = truncate_chars(document_text, char_budget);

    format!(
        r#"You are an AI assistant helping users understand and analyze documents.

INSTRUCTIONS:
1. Answer the user's question using the document content below
2. Be helpful, accurate and concise
3. If the question cannot be answered from the document, say so clearly

DOCUMENT CONTENT:
{document}"#
    )
}

/// Hard cut at a character boundary. Never splits a multi-byte character.
pub fn truncate_chars(text: &str, char_budget: usize) -> &str {
    match text.char_indices().nth(char_budget) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
