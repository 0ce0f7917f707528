//! Markup Driver - quick-xml 事件驱动
//!
//! 树解析与流式解析共用同一套良构性检查，只在 sink 上不同

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::Display;
use std::io::BufRead;

use crate::application::ports::ExtractError;

/// 元素属性 (限定名, 值)
pub type Attributes = Vec<(String, String)>;

/// 标记事件接收端
pub trait MarkupSink {
    /// 元素开始（空元素紧跟一次 close）
    fn open(&mut self, name: &str, attributes: Attributes);

    /// 元素内的文本或 CDATA，实体已解析
    fn text(&mut self, text: &str);

    /// 最近打开的元素结束
    fn close(&mut self);
}

/// 读取全部事件并推送到 sink
///
/// 以下情况返回 `ExtractError::Malformed`:
/// - 结束标签与开始标签不匹配，或没有对应的开始标签
/// - 文件结束时仍有未闭合元素
/// - 文档中没有任何元素
/// - 顶层元素之外出现非空白文本或 CDATA
///
/// 允许多个顶层元素，依次推送
/// - 未声明的实体引用
pub fn drive<R: BufRead, S: MarkupSink>(mut reader: Reader<R>, sink: &mut S) -> Result<(), ExtractError> {
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = true;

    let mut buf = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut seen_element = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let (name, attributes) = start_tag(&e, reader.buffer_position())?;
                seen_element = true;
                sink.open(&name, attributes);
                open.push(name);
            }
            Ok(Event::Empty(e)) => {
                let (name, attributes) = start_tag(&e, reader.buffer_position())?;
                seen_element = true;
                sink.open(&name, attributes);
                sink.close();
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                match open.pop() {
                    Some(expected) if expected == name => sink.close(),
                    Some(expected) => {
                        return Err(ExtractError::Malformed(format!(
                            "expected </{}>, found </{}>",
                            expected, name
                        )));
                    }
                    None => {
                        return Err(ExtractError::Malformed(format!("unmatched </{}>", name)));
                    }
                }
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| xml_error(err.into(), reader.buffer_position()))?;
                if !open.is_empty() {
                    sink.text(&text);
                } else if !text.trim().is_empty() {
                    return Err(ExtractError::Malformed(
                        "text outside of any element".to_string(),
                    ));
                }
            }
            Ok(Event::CData(e)) => {
                if open.is_empty() {
                    return Err(ExtractError::Malformed(
                        "CDATA outside of any element".to_string(),
                    ));
                }
                let text = reader
                    .decoder()
                    .decode(&e)
                    .map_err(|err| xml_error(err.into(), reader.buffer_position()))?;
                sink.text(&text);
            }
            Ok(Event::Eof) => break,
            // 声明、注释、处理指令、DOCTYPE 不产生内容
            Ok(_) => {}
            Err(err) => return Err(xml_error(err, reader.buffer_position())),
        }
        buf.clear();
    }

    if let Some(name) = open.last() {
        return Err(ExtractError::Malformed(format!("unclosed <{}> at end of document", name)));
    }
    if !seen_element {
        return Err(ExtractError::Malformed("no element in document".to_string()));
    }

    Ok(())
}

fn start_tag(e: &BytesStart<'_>, position: impl Display + Copy) -> Result<(String, Attributes), ExtractError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_error(err.into(), position))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| xml_error(err.into(), position))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok((name, attributes))
}

fn xml_error(err: quick_xml::Error, position: impl Display) -> ExtractError {
    match err {
        quick_xml::Error::Io(e) => ExtractError::IoError(e.to_string()),
        other => ExtractError::Malformed(format!("{} (at byte {})", other, position)),
    }
}
