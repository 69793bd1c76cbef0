use crate::utok;
use thiserror::Error;

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// 词序号不属于当前词表。
    ///
    /// 词序号总是由同一个词表产生，出现此错误说明调用方混用了词表或序列已损坏。
    #[error("token {token} is out of vocab range 0..{vocab_size}")]
    KeyNotFound { token: utok, vocab_size: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
