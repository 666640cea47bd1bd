use crate::epub::{CONTAINER_NS, OPF_MEDIA_TYPE};
use crate::xml::{XmlDocument, XmlElement};

/// Container.xml中的rootfile信息
#[derive(Debug, Clone)]
pub struct RootFile {
    pub full_path: String,
    pub media_type: String,
}

/// OCF容器描述(META-INF/container.xml)
#[derive(Debug, Clone)]
pub struct Container {
    pub rootfiles: Vec<RootFile>,
}

impl Container {
    /// 创建只指向一个OPF包文件的容器
    ///
    /// # 参数
    /// * `opf_path` - OPF文件在压缩包中的完整路径
    pub fn new(opf_path: impl Into<String>) -> Self {
        Self {
            rootfiles: vec![RootFile {
                full_path: opf_path.into(),
                media_type: OPF_MEDIA_TYPE.to_string(),
            }],
        }
    }

    /// 获取主要的OPF文件路径
    ///
    /// # 返回值
    /// * `Option<&str>` - 第一个OPF类型rootfile的路径，没有时退回第一个rootfile
    pub fn get_opf_path(&self) -> Option<&str> {
        self.rootfiles
            .iter()
            .find(|rootfile| rootfile.media_type == OPF_MEDIA_TYPE)
            .or_else(|| self.rootfiles.first())
            .map(|rootfile| rootfile.full_path.as_str())
    }

    /// 生成container.xml文档
    pub fn to_document(&self) -> XmlDocument {
        let rootfiles = self.rootfiles.iter().map(|rootfile| {
            XmlElement::new("rootfile")
                .attr("full-path", &rootfile.full_path)
                .attr("media-type", &rootfile.media_type)
        });

        XmlDocument::new(
            XmlElement::new("container")
                .attr("xmlns", CONTAINER_NS)
                .attr("version", "1.0")
                .child(XmlElement::new("rootfiles").children(rootfiles)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;
    use quick_xml::reader::Reader;

    #[test]
    fn test_container_xml_points_at_opf() {
        let container = Container::new("OEBPS/content.opf");
        let xml = String::from_utf8(container.to_document().to_bytes().unwrap()).unwrap();

        let mut reader = Reader::from_str(&xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut found = Vec::new();
        loop {
            match reader.read_event_into(&mut buf).unwrap() {
                Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"rootfile" => {
                    let full_path = e
                        .try_get_attribute("full-path")
                        .unwrap()
                        .map(|a| String::from_utf8_lossy(&a.value).to_string());
                    found.push(full_path);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        assert_eq!(found, vec![Some("OEBPS/content.opf".to_string())]);
        assert!(xml.contains("xmlns=\"urn:oasis:names:tc:opendocument:xmlns:container\""));
        assert!(xml.contains("media-type=\"application/oebps-package+xml\""));
    }

    #[test]
    fn test_get_opf_path() {
        let container = Container {
            rootfiles: vec![
                RootFile {
                    full_path: "OEBPS/toc.ncx".to_string(),
                    media_type: "application/x-dtbncx+xml".to_string(),
                },
                RootFile {
                    full_path: "OEBPS/content.opf".to_string(),
                    media_type: "application/oebps-package+xml".to_string(),
                },
            ],
        };

        assert_eq!(container.get_opf_path(), Some("OEBPS/content.opf"));
        assert_eq!(Container { rootfiles: vec![] }.get_opf_path(), None);
    }
}
