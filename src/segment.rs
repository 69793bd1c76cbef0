//! 按空白和标点切分文本，以及解码时把标点重新贴回前一个词。

use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

/// 分隔符本身也作为词保留。
const DELIMITER: &str = r#"[,.:;?_!"()']|--|\s"#;
/// 解码时这些标点前的空白被删除。`_` 和 `--` 不在其中。
const ATTACHED: &str = r#"\s+([,.:;?!"()'])"#;

static DELIMITER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(DELIMITER).unwrap());
static ATTACHED_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(ATTACHED).unwrap());

/// 把文本切分为有序的词序列。
///
/// 分隔符之间的片段和分隔符本身都是候选词，去掉首尾空白后为空的候选词被丢弃。
pub fn segment(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for m in DELIMITER_REGEX.find_iter(text) {
        pieces.push(&text[start..m.start()]);
        pieces.push(m.as_str());
        start = m.end();
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// 删除标点前的空白，使标点贴回前一个词。
#[inline]
pub fn reattach_punctuation(text: &str) -> Cow<'_, str> {
    ATTACHED_REGEX.replace_all(text, "$1")
}
