use crate::{reattach_punctuation, segment, utok, Error, Method, Result};
use log::{debug, trace};

pub struct Tokeneer<M> {
    method: M,
}

impl<M: Method> Tokeneer<M> {
    pub fn new(method: M) -> Self {
        debug!(
            "Tokeneer over {} tokens, special: {:?}",
            method.vocab_size(),
            method.internal_special().into_iter().collect::<Vec<_>>(),
        );
        Self { method }
    }

    /// 文本 -> 词序列，不在词表中的词编码为 `<|unk|>`。
    pub fn encode(&self, text: &str) -> Vec<utok> {
        let unk = self.method.unk_token();
        let mut unknown = 0usize;
        let ans = segment(text)
            .into_iter()
            .map(|piece| {
                self.method.find_piece(piece).unwrap_or_else(|| {
                    unknown += 1;
                    unk
                })
            })
            .collect::<Vec<_>>();
        trace!(
            "encode {} bytes into {} tokens, {unknown} unknown",
            text.len(),
            ans.len(),
        );
        ans
    }

    /// 词序列 -> 文本。
    ///
    /// 词之间以单个空格连接，然后删除标点前的空白。原文中的其他空白不会恢复。
    pub fn decode(&self, tokens: &[utok]) -> Result<String> {
        let pieces = tokens
            .iter()
            .map(|&token| {
                self.method.decode(token).ok_or(Error::KeyNotFound {
                    token,
                    vocab_size: self.method.vocab_size(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let ans = reattach_punctuation(&pieces.join(" ")).into_owned();
        trace!("decode {} tokens into {} bytes", tokens.len(), ans.len());
        Ok(ans)
    }

    /// 切分文本但不查词表。
    #[inline]
    pub fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str> {
        segment(text)
    }

    /// piece -> token，不在词表中返回 `None`。
    #[inline]
    pub fn lookup(&self, piece: &str) -> Option<utok> {
        self.method.find_piece(piece)
    }
}

impl<M> Tokeneer<M> {
    #[inline]
    pub fn internal(&self) -> &M {
        &self.method
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Vocab, UNK};

    fn tokeneer(corpus: &str) -> Tokeneer<Vocab> {
        Tokeneer::new(Vocab::from_corpus(corpus))
    }

    #[test]
    fn test_hello_tea() {
        let tokeneer = tokeneer("Hello, do you like tea?");
        assert_eq!(tokeneer.internal().vocab_size(), 9);

        let tokens = tokeneer.encode("Hello, do you like tea?");
        assert_eq!(tokens, [2, 0, 3, 6, 4, 5, 1]);
        assert_eq!(
            tokeneer.decode(&tokens).as_deref(),
            Ok("Hello, do you like tea?")
        );
    }

    #[test]
    fn test_unknown() {
        let tokeneer = tokeneer("Hello, do you like tea?");
        let unk = tokeneer.internal().unk_token();
        assert_eq!(unk, 8);

        let tokens = tokeneer.encode("xyz123");
        assert_eq!(tokens, [unk]);
        assert_eq!(tokeneer.decode(&tokens).as_deref(), Ok(UNK));

        let tokens = tokeneer.encode("Hello, do you like coffee?");
        assert_eq!(tokens, [2, 0, 3, 6, 4, unk, 1]);
        assert_eq!(
            tokeneer.decode(&tokens).as_deref(),
            Ok("Hello, do you like <|unk|>?")
        );
    }

    #[test]
    fn test_special_in_text() {
        let tokeneer = tokeneer("tea");
        assert_eq!(tokeneer.encode("tea <|endoftext|> <|unk|>"), [0, 1, 2]);
    }

    #[test]
    fn test_decode_out_of_range() {
        let tokeneer = tokeneer("Hello, do you like tea?");
        assert_eq!(
            tokeneer.decode(&[2, 9, 0]),
            Err(Error::KeyNotFound {
                token: 9,
                vocab_size: 9,
            }),
        );
    }

    #[test]
    fn test_empty() {
        let tokeneer = tokeneer("");
        assert!(tokeneer.encode("").is_empty());
        assert_eq!(tokeneer.decode(&[]).as_deref(), Ok(""));
    }

    #[test]
    fn test_whitespace_collapses() {
        let tokeneer = tokeneer("a  b\n\nc ( d )");
        let tokens = tokeneer.encode("a  b\n\nc ( d )");
        assert_eq!(tokeneer.decode(&tokens).as_deref(), Ok("a b c( d)"));
    }

    #[test]
    fn test_lookup() {
        let tokeneer = tokeneer("Hello, do you like tea?");
        assert_eq!(tokeneer.lookup("tea"), Some(5));
        assert_eq!(tokeneer.lookup("Hello,"), None);
        assert_eq!(tokeneer.lookup(UNK), Some(8));
        assert_eq!(tokeneer.tokenize("Hello, tea").len(), 3);
    }
}
