/// 每分钟阅读字数
const WORDS_PER_MINUTE: usize = 200;

/// 计算字数（以空白分隔）
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 估算阅读时间（分钟），向上取整
pub fn estimate_read_time(content: &str) -> i64 {
    let words = count_words(content);
    ((words + WORDS_PER_MINUTE - 1) / WORDS_PER_MINUTE) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words_ignores_repeated_whitespace() {
        assert_eq!(count_words("  one\ttwo \n three  "), 3);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn test_read_time_rounds_up() {
        assert_eq!(estimate_read_time("word"), 1);
        assert_eq!(estimate_read_time(&"word ".repeat(200)), 1);
        assert_eq!(estimate_read_time(&"word ".repeat(201)), 2);
        assert_eq!(estimate_read_time("   "), 0);
    }
}
