use crate::error::{MapError, Result};

/// Counts tokens the way a given model's tokenizer would
pub trait TokenCounter {
    fn count_tokens(&self, model: &str, text: &str) -> Result<usize>;
}

/// BPE tokenizers bundled with `tiktoken-rs`
#[derive(Debug, Default, Clone, Copy)]
pub struct TiktokenCounter;

impl TokenCounter for TiktokenCounter {
    fn count_tokens(&self, model: &str, text: &str) -> Result<usize> {
        let bpe = tiktoken_rs::get_bpe_from_model(model).map_err(|e| MapError::Tokenizer {
            model: model.to_string(),
            message: e.to_string(),
        })?;
        Ok(bpe.encode_ordinary(text).len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_tokens_for_known_model() {
        let count = TiktokenCounter.count_tokens("gpt-4o", "def foo():\n    pass\n").unwrap();
        assert!(count > 0);
        assert_eq!(TiktokenCounter.count_tokens("gpt-4o", "").unwrap(), 0);
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        assert!(matches!(
            TiktokenCounter.count_tokens("definitely-not-a-model", "hello"),
            Err(MapError::Tokenizer { .. })
        ));
    }
}
