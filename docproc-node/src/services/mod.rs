pub mod assembler;
pub mod classifier;
pub mod language;
pub mod llm;
pub mod router;
pub mod tokens;
pub mod url_extractor;
pub mod validation;


pub use assembler::Assembler;
pub use llm::{ExtractedPage, PageExtractor, VisionPageExtractor};
pub use router::ConversionRouter;
pub use tokens::{TokenCounter, Vocabulary};
pub use url_extractor::UrlExtractor;
