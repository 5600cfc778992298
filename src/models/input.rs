//! 输入项
//!
//! 一个输入项要么是待上传的文件（保留原始字节），要么是粘贴的文本

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, warn};

/// 建议接受的上传类型（仅用于提示，不阻止添加）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcceptedType {
    PlainText,
    Html,
    Pdf,
    Docx,
    Pptx,
    Xlsx,
}

impl AcceptedType {
    pub const ALL: [AcceptedType; 6] = [
        AcceptedType::PlainText,
        AcceptedType::Html,
        AcceptedType::Pdf,
        AcceptedType::Docx,
        AcceptedType::Pptx,
        AcceptedType::Xlsx,
    ];

    pub fn mime(self) -> &'static str {
        match self {
            AcceptedType::PlainText => "text/plain",
            AcceptedType::Html => "text/html",
            AcceptedType::Pdf => "application/pdf",
            AcceptedType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            AcceptedType::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            AcceptedType::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            AcceptedType::PlainText => &["txt", "md", "csv"],
            AcceptedType::Html => &["html", "htm"],
            AcceptedType::Pdf => &["pdf"],
            AcceptedType::Docx => &["docx"],
            AcceptedType::Pptx => &["pptx"],
            AcceptedType::Xlsx => &["xlsx"],
        }
    }

    /// 按扩展名识别（不区分大小写）
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        AcceptedType::ALL
            .into_iter()
            .find(|t| t.extensions().contains(&ext.as_str()))
    }
}

/// 待上传文件的句柄
///
/// 字节以 `Arc` 共享，输入项被移除或输入列表被清空时随之释放
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub file_name: String,
    pub mime: Option<&'static str>,
    pub bytes: Arc<[u8]>,
}

impl FileRef {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let file_name = file_name.into();
        let mime = AcceptedType::from_file_name(&file_name).map(AcceptedType::mime);
        Self {
            file_name,
            mime,
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPayload {
    File(FileRef),
    Text(String),
}

/// 一个待提交的输入项，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputItem {
    name: String,
    payload: InputPayload,
}

impl InputItem {
    pub fn file(file: FileRef) -> Self {
        Self {
            name: file.file_name.clone(),
            payload: InputPayload::File(file),
        }
    }

    pub fn text(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: InputPayload::Text(content.into()),
        }
    }

    /// 粘贴文本，名称为 `Pasted Text <时间>`；空白文本返回 None
    pub fn pasted_text(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return None;
        }
        let name = format!(
            "Pasted Text {}",
            chrono::Local::now().format("%H:%M:%S")
        );
        Some(Self::text(name, content))
    }

    /// 从磁盘读取文件作为输入项
    ///
    /// 不支持的类型只会记录警告，仍然会被添加
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .await
            .with_context(|| format!("无法读取输入文件: {}", path.display()))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        if AcceptedType::from_file_name(&file_name).is_none() {
            warn!("⚠️ 文件类型可能不受支持: {}", file_name);
        }
        debug!("读取文件 {}，大小: {} 字节", file_name, bytes.len());

        Ok(Self::file(FileRef::new(file_name, bytes)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &InputPayload {
        &self.payload
    }

    pub fn as_file(&self) -> Option<&FileRef> {
        match &self.payload {
            InputPayload::File(f) => Some(f),
            InputPayload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.payload {
            InputPayload::Text(t) => Some(t),
            InputPayload::File(_) => None,
        }
    }
}
