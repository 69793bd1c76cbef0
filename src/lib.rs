#![deny(warnings)]

mod error;
mod segment;
mod tokeneer;
mod vocab;

pub use error::{Error, Result};
pub use segment::{reattach_punctuation, segment};
pub use tokeneer::Tokeneer;
pub use vocab::Vocab;

/// `utok` for token id.
#[allow(non_camel_case_types)]
pub type utok = u32;

/// 文本结束标记，总是词表中倒数第二个词。
pub const END_OF_TEXT: &str = "<|endoftext|>";
/// 未知词标记，总是词表中最后一个词。
pub const UNK: &str = "<|unk|>";

/// 分词器使用的词表。
///
/// 分词器前端负责切分文本和拼接输出，词表只负责词和词序号之间的相互映射。
pub trait Method {
    fn unk_token(&self) -> utok;
    fn vocab_size(&self) -> usize;
    fn internal_special(&self) -> impl IntoIterator<Item = (&str, utok)>;
    /// piece -> token
    fn find_piece(&self, piece: &str) -> Option<utok>;
    /// token -> piece，越界的词序号返回 `None`
    fn decode(&self, token: utok) -> Option<&str>;
}
