//! 章节模块

/// 段落，保存未转义的原始文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// 段落文本
    pub text: String,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<String> for Paragraph {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<&str> for Paragraph {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// 章节信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chapter {
    /// 章节标题
    pub title: String,
    /// 段落列表，插入顺序即阅读顺序
    pub paragraphs: Vec<Paragraph>,
}

impl Chapter {
    /// 创建空章节
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            paragraphs: Vec::new(),
        }
    }

    /// 创建带段落的章节
    pub fn with_paragraphs<I, S>(title: impl Into<String>, paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut chapter = Self::new(title);
        chapter.add_paragraphs(paragraphs);
        chapter
    }

    /// 添加一个段落
    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.paragraphs.push(Paragraph::new(text));
    }

    /// 批量添加段落
    pub fn add_paragraphs<I, S>(&mut self, paragraphs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for text in paragraphs {
            self.add_paragraph(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_order_is_kept() {
        let chapter = Chapter::with_paragraphs("第一章", ["甲", "乙", "丙"]);

        let texts: Vec<&str> = chapter.paragraphs.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["甲", "乙", "丙"]);
    }

    #[test]
    fn test_raw_text_is_not_escaped() {
        let mut chapter = Chapter::new("Tom & Jerry");
        chapter.add_paragraph("<b>bold</b>");

        assert_eq!(chapter.title, "Tom & Jerry");
        assert_eq!(chapter.paragraphs[0].text, "<b>bold</b>");
    }
}
