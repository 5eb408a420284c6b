use crate::models::TokenCount;
use tiktoken_rs::CoreBPE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    O200kBase,
    Cl100kBase,
}

impl Vocabulary {
    pub const ALL: [Vocabulary; 2] = [Vocabulary::O200kBase, Vocabulary::Cl100kBase];

    pub fn name(&self) -> &'static str {
        match self {
            Self::O200kBase => "o200k_base",
            Self::Cl100kBase => "cl100k_base",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|vocabulary| vocabulary.name() == name)
    }
}

/// Holds both vocabularies; loaded once, counts are never cached.
pub struct TokenCounter {
    o200k: CoreBPE,
    cl100k: CoreBPE,
}

impl TokenCounter {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            o200k: tiktoken_rs::o200k_base()?,
            cl100k: tiktoken_rs::cl100k_base()?,
        })
    }

    /// Special-token markers inside documents are counted as ordinary text.
    pub fn count(&self, text: &str, vocabulary: Vocabulary) -> usize {
        let bpe = match vocabulary {
            Vocabulary::O200kBase => &self.o200k,
            Vocabulary::Cl100kBase => &self.cl100k,
        };
        bpe.encode_ordinary(text).len()
    }

    pub fn count_all(&self, text: &str) -> TokenCount {
        TokenCount {
            o200k_base: self.count(text, Vocabulary::O200kBase),
            cl100k_base: self.count(text, Vocabulary::Cl100kBase),
        }
    }
}
