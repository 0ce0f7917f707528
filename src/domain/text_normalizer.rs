//! 文本规范化
//!
//! 折叠抽取文本中的空白与换行

/// 规范化抽取出的原始文本
///
/// 规则：
/// 1. 不含换行的连续空白折叠为单个空格
/// 2. 含换行的连续空白（含两侧缩进）折叠为单个换行
/// 3. 去除首尾空白（包括换行）
///
/// 纯函数，幂等：`normalize(&normalize(s)) == normalize(s)`
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // 当前空白段：None 表示不在空白段内，Some(true) 表示段内出现过换行
    let mut pending: Option<bool> = None;

    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            let newline = pending.unwrap_or(false) || ch == '\n';
            pending = Some(newline);
            continue;
        }

        if let Some(newline) = pending.take() {
            out.push(if newline { '\n' } else { ' ' });
        }
        out.push(ch);
    }

    out
}
