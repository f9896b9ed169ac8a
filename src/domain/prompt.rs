//! Final generation prompt assembly

const NO_CONTEXT_PLACEHOLDER: &str = "No relevant context available.";

/// Build the final generation prompt from refined contexts and the question
pub fn build_prompt(contexts: &[String], question: &str) -> String {
    let mut context_block = contexts.join("\n\n");
    if context_block.trim().is_empty() {
        context_block = NO_CONTEXT_PLACEHOLDER.to_string();
    }
    format!(
        "You are a helpful assistant.\n\
         Use the provided context to answer the question.\n\
         If the answer is not present in the context, say you don't know.\n\
         \n\
         Context:\n\
         ---------\n\
         {}\n\
         ---------\n\
         \n\
         Question:\n\
         {}\n",
        context_block, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contexts_joined_by_blank_lines() {
        let prompt = build_prompt(
            &["first context".to_string(), "second context".to_string()],
            "what is this?",
        );

        assert!(prompt.contains("first context\n\nsecond context"));
        assert!(prompt.contains("Question:\nwhat is this?"));
    }

    #[test]
    fn test_empty_contexts_use_placeholder() {
        let prompt = build_prompt(&[], "what is this?");
        assert!(prompt.contains(NO_CONTEXT_PLACEHOLDER));
    }

    #[test]
    fn test_blank_contexts_use_placeholder() {
        let prompt = build_prompt(&["   ".to_string()], "what is this?");
        assert!(prompt.contains(NO_CONTEXT_PLACEHOLDER));
    }
}
