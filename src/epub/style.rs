//! 样式表模块

/// 所有内容页共享的样式表
pub const STYLESHEET: &str = "\
body { font-family: serif; line-height: 1.2; margin: 1em; }
p { text-indent: 1.5em; margin-top: 0; margin-bottom: 1em; }
h1.chapter-title { text-align: center; }
.toc-container { margin: 2em 1em; }
nav#toc ol { margin-top: 1em; }
nav#toc li { margin-bottom: 0.5em; }
nav#toc a { color: #000; text-decoration: none; display: block; padding: 0.3em 0; }
nav#toc a:hover { color: #444; text-decoration: underline; }
";
