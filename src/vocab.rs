//! 这个模块提供词表，即词和词序号之间的双向映射。
//!
//! 词表从语料构造一次，此后只读。语料中的词去重后按码点字典序排列，占据 `0..K` 的词序号；
//! 两个保留词 [`END_OF_TEXT`] 和 [`UNK`] 依次追加在最后，占据 `K` 和 `K + 1`。

use crate::{segment, utok, Error, Method, Result, END_OF_TEXT, UNK};
use log::{debug, warn};
use patricia_tree::PatriciaMap;
use std::{cmp::Reverse, collections::BTreeSet};

#[derive(Clone)]
pub struct Vocab {
    /// 保存所有词的字符串内容，被其他词包含的词直接复用已有内容
    text: Box<str>,
    /// 按词序保存每个词在 `text` 中的位置和长度
    tokens: Box<[(u32, u32)]>,
    /// 词汇的前缀树
    trie: PatriciaMap<utok>,
}

impl Vocab {
    /// 从完整的语料文本构造词表。
    #[inline]
    pub fn from_corpus(text: &str) -> Self {
        Self::new(segment(text))
    }

    /// 从切分好的语料词构造词表，重复的词只计一次。
    ///
    /// 与保留词相同的语料词不进入语料区间，保留词的位置优先。
    pub fn new<'a>(pieces: impl IntoIterator<Item = &'a str>) -> Self {
        let mut total = 0usize;
        let corpus = pieces
            .into_iter()
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .inspect(|_| total += 1)
            .collect::<BTreeSet<_>>();

        let mut vocabs = corpus
            .into_iter()
            .filter(|&piece| {
                let reserved = piece == END_OF_TEXT || piece == UNK;
                if reserved {
                    warn!("corpus piece {piece:?} collides with a reserved token, keeping the reserved slot");
                }
                !reserved
            })
            .collect::<Vec<_>>();
        vocabs.extend([END_OF_TEXT, UNK]);

        let total_len = vocabs.iter().map(|piece| piece.len()).sum::<usize>();
        let CompressedVocab { text, slices } = CompressedVocab::new(&vocabs, total_len);
        let trie = vocabs
            .iter()
            .enumerate()
            .map(|(i, piece)| (piece.as_bytes(), i as utok))
            .collect();

        debug!(
            "Building vocab from {total} corpus pieces, detected {} tokens, compressed to {} bytes from {total_len} bytes",
            vocabs.len(),
            text.len(),
        );

        Self {
            text: text.into_boxed_str(),
            tokens: slices.into_boxed_slice(),
            trie,
        }
    }

    #[inline]
    pub fn eos_token(&self) -> utok {
        (self.tokens.len() - 2) as _
    }

    /// token -> piece，词序号越界时返回错误。
    pub fn token(&self, token: utok) -> Result<&str> {
        self.piece(token).ok_or(Error::KeyNotFound {
            token,
            vocab_size: self.tokens.len(),
        })
    }

    /// 按词序遍历整个词表。
    pub fn iter(&self) -> impl Iterator<Item = (&str, utok)> + '_ {
        (0..self.tokens.len() as utok).filter_map(|t| self.piece(t).map(|piece| (piece, t)))
    }

    /// 查找所有以 `prefix` 开头的词，按词序排列。
    pub fn starting_with(&self, prefix: &str) -> Vec<(&str, utok)> {
        let mut tokens = self
            .trie
            .iter_prefix(prefix.as_bytes())
            .map(|(_, &t)| t)
            .collect::<Vec<_>>();
        tokens.sort_unstable();
        tokens
            .into_iter()
            .filter_map(|t| self.piece(t).map(|piece| (piece, t)))
            .collect()
    }

    #[inline(always)]
    fn piece(&self, token: utok) -> Option<&str> {
        let &(off, len) = self.tokens.get(token as usize)?;
        Some(&self.text[off as usize..][..len as usize])
    }
}

impl Method for Vocab {
    #[inline]
    fn unk_token(&self) -> utok {
        (self.tokens.len() - 1) as _
    }
    #[inline]
    fn vocab_size(&self) -> usize {
        self.tokens.len()
    }
    #[inline]
    fn internal_special(&self) -> impl IntoIterator<Item = (&str, utok)> {
        [(END_OF_TEXT, self.eos_token()), (UNK, self.unk_token())]
    }
    #[inline]
    fn find_piece(&self, piece: &str) -> Option<utok> {
        self.trie.get(piece.as_bytes()).copied()
    }
    #[inline]
    fn decode(&self, token: utok) -> Option<&str> {
        self.piece(token)
    }
}

/// 利用词表中的重复部分压缩词表。
struct CompressedVocab {
    text: String,
    slices: Vec<(u32, u32)>,
}

impl CompressedVocab {
    fn new(vocabs: &[&str], total_len: usize) -> Self {
        let mut slices = vec![(0u32, 0u32); vocabs.len()];
        let mut text = String::with_capacity(total_len);
        let mut indices = (0..vocabs.len()).collect::<Vec<_>>();
        // 对词按内容长度从长到短排序，因为短的内容有可能是长内容的子串，可以避免重复存储相同内容
        indices.sort_unstable_by_key(|&i| Reverse(vocabs[i].len()));
        for i in indices {
            let v = vocabs[i];
            // 完整的 utf-8 序列只会在字符边界上匹配，因此复用的切片总是合法的 str
            let off = memchr::memmem::find(text.as_bytes(), v.as_bytes()).unwrap_or_else(|| {
                let off = text.len();
                text.push_str(v);
                off
            });
            slices[i] = (off as _, v.len() as _);
        }
        Self { text, slices }
    }
}
