//! 字符串工具

/// 提取两个分隔符之间的内容（去除首尾空白）
///
/// 只返回最外层的匹配，嵌套的分隔符原样保留：
/// `"( (a) )"` 得到 `"(a)"`。未闭合的分组不产生结果，多余的右分隔符被忽略。
pub fn strings_between(data: &str, open: char, close: char) -> Vec<String> {
    let mut matches = Vec::new();
    let mut depth = 0usize;
    let mut begin = 0usize;

    for (index, ch) in data.char_indices() {
        if ch == open {
            if depth == 0 {
                begin = index + open.len_utf8();
            }
            depth += 1;
        } else if ch == close && depth > 0 {
            if depth == 1 {
                matches.push(data[begin..index].trim().to_string());
            }
            depth -= 1;
        }
    }

    matches
}
