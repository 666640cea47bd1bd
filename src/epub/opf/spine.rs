//! 脊柱模块
//!
//! 提供EPUB包中阅读顺序（脊柱）的结构定义。

use crate::xml::XmlElement;

/// 脊柱项信息(阅读顺序)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpineItem {
    /// 引用的清单项ID
    pub idref: String,
}

impl SpineItem {
    /// 创建新的脊柱项
    pub fn new(idref: impl Into<String>) -> Self {
        Self {
            idref: idref.into(),
        }
    }

    /// 生成 `<itemref>` 元素
    pub fn to_element(&self) -> XmlElement {
        XmlElement::new("itemref").attr("idref", &self.idref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itemref() {
        let element = SpineItem::new("chapter_1").to_element();
        assert_eq!(element.attribute("idref"), Some("chapter_1"));
        assert_eq!(element.attribute("linear"), None);
    }
}
