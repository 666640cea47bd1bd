//! XML树模块
//!
//! 构建器持有的可变XML树。元素名与属性名按字面写入（包含命名空间前缀），
//! 文本与属性值在序列化时由quick-xml统一转义，存储时保持原样。

use std::io::Write;

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::Result;

/// XML节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// 子元素
    Element(XmlElement),
    /// 文本内容(未转义)
    Text(String),
}

/// XML元素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// 创建新的元素
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// 添加属性
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// 添加文本内容，空文本不会产生节点
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// 添加子元素
    pub fn child(mut self, child: XmlElement) -> Self {
        self.push(child);
        self
    }

    /// 批量添加子元素
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = XmlElement>,
    {
        self.children
            .extend(children.into_iter().map(XmlNode::Element));
        self
    }

    /// 设置属性，已存在的同名属性会被覆盖
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// 追加子元素
    pub fn push(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// 追加文本
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(XmlNode::Text(text));
        }
    }

    /// 元素名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 获取属性值
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 遍历子元素
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// 查找第一个指定名称的子元素
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.name == name)
    }

    /// 查找所有指定名称的子元素
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements().filter(move |element| element.name == name)
    }

    /// 可变地查找第一个指定名称的子元素
    pub fn find_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.children.iter_mut().find_map(|node| match node {
            XmlNode::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// 沿路径逐级查找子元素
    pub fn find_path(&self, path: &[&str]) -> Option<&XmlElement> {
        let mut current = self;
        for name in path {
            current = current.find(name)?;
        }
        Some(current)
    }

    /// 沿路径逐级可变地查找子元素
    ///
    /// # 参数
    /// * `path` - 子元素名称序列，空序列表示当前元素
    pub fn find_path_mut(&mut self, path: &[&str]) -> Option<&mut XmlElement> {
        let mut current = self;
        for name in path {
            current = current.find_mut(name)?;
        }
        Some(current)
    }

    /// 拼接所有后代文本
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, result: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => result.push_str(text),
                XmlNode::Element(element) => element.collect_text(result),
            }
        }
    }

    /// 将元素写入quick-xml写入器
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for node in &self.children {
            match node {
                XmlNode::Element(element) => element.write_to(writer)?,
                XmlNode::Text(text) => {
                    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
                }
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

/// 带XML声明的完整文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    /// 根元素
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// 以UTF-8写出文档，包含XML声明，不输出DOCTYPE
    pub fn write_to<W: Write>(&self, output: W) -> Result<()> {
        let mut writer = Writer::new(output);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.get_mut().write_all(b"\n")?;
        self.root.write_to(&mut writer)?;
        Ok(())
    }

    /// 序列化为字节
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(buffer)
    }
}
