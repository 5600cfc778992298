//! 输入列表
//!
//! 有序、允许重复、不限数量

use crate::models::{InputItem, InputPayload};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputCollection {
    items: Vec<InputItem>,
}

impl InputCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加到末尾，不去重
    pub fn add(&mut self, item: InputItem) {
        self.items.push(item);
    }

    /// 按位置移除
    ///
    /// 位置越界时不做任何修改并返回 `None`
    pub fn remove(&mut self, index: usize) -> Option<InputItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// 清空全部输入，文件句柄随之释放
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InputItem> {
        self.items.iter()
    }

    /// 所有文本输入按空行拼接
    pub fn joined_text(&self) -> String {
        self.items
            .iter()
            .filter_map(|item| match item.payload() {
                InputPayload::Text(t) => Some(t.as_str()),
                InputPayload::File(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl<'a> IntoIterator for &'a InputCollection {
    type Item = &'a InputItem;
    type IntoIter = std::slice::Iter<'a, InputItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
